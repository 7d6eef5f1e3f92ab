use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::Sender;
use log::{debug, warn};

use crate::TaskId;

/// A value on its way back to the UI thread.
pub(crate) struct Update {
    pub(crate) id: TypeId,
    pub(crate) value: Box<dyn Any + Send>,
    /// Set when the value comes from a command task; used to drop superseded results.
    pub(crate) origin: Option<TaskId>,
}

/// Sends replacement values for states/computes; applied in `StateCtx::sync_computes`.
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<Update>,
    origin: Option<TaskId>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send, origin: None }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        let update = Update {
            id: TypeId::of::<T>(),
            value: Box::new(value),
            origin: self.origin,
        };
        if self.send.send(update).is_err() {
            warn!("StateCtx dropped before update for {} arrived", type_name::<T>());
        }
    }
}

impl std::fmt::Debug for Update {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Update")
            .field("id", &self.id)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Updater handed to commands.
///
/// Every dispatch of a command type bumps that type's generation. Values set
/// from an older generation are discarded, both here and again when the UI
/// thread applies them, so the most recently dispatched run always wins.
#[derive(Debug, Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    task: TaskId,
    latest: Arc<AtomicU64>,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(send: Sender<Update>, task: TaskId, latest: Arc<AtomicU64>) -> Self {
        Self {
            inner: Updater {
                send,
                origin: Some(task),
            },
            task,
            latest,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.task.generation()
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        if self.is_current() {
            self.inner.set(value);
        } else {
            debug!(
                "Discarded {} from superseded task generation {}",
                type_name::<T>(),
                self.task.generation()
            );
        }
    }
}
