use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::{Receiver, Sender};
use log::{debug, error, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::updater::Update;
use crate::{
    Command, CommandSnapshot, Compute, Dep, Error, LatestOnlyUpdater, State, TaskHandle, TaskId,
    Updater,
};

/// Whether a derived compute must re-run on the next [`StateCtx::run_computed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Dirty,
    Clean,
}

pub(crate) struct ComputeSlot {
    pub(crate) compute: Box<dyn Compute>,
    pub(crate) status: SyncStatus,
}

struct CommandSlot {
    name: &'static str,
    command: Arc<dyn Command>,
}

/// Owner of every state, compute and command of the application.
///
/// The UI thread is the only writer. Per frame the app calls
/// [`StateCtx::sync_computes`] to apply values sent through updaters, then
/// [`StateCtx::run_computed`] to refresh derived computes.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, ComputeSlot>,
    commands: BTreeMap<TypeId, CommandSlot>,
    queue: Vec<TypeId>,

    generations: BTreeMap<TypeId, Arc<AtomicU64>>,
    tasks: BTreeMap<TypeId, TaskHandle>,
    task_set: JoinSet<()>,

    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: Vec::new(),
            generations: BTreeMap::new(),
            tasks: BTreeMap::new(),
            task_set: JoinSet::new(),
            send,
            recv,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.computes.insert(
            TypeId::of::<T>(),
            ComputeSlot {
                compute: Box::new(compute),
                status: SyncStatus::Dirty,
            },
        );
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(
            TypeId::of::<T>(),
            CommandSlot {
                name: type_name::<T>(),
                command: Arc::new(command),
            },
        );
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never added.
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable access; computes depending on `T` are marked dirty.
    ///
    /// # Panics
    /// Panics if `T` was never added.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.mark_dependents_dirty(&id);
        self.states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("{}", Error::state_not_found::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded.
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("{}", Error::compute_not_found::<T>()))
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    pub fn is_dirty(&self, id: &TypeId) -> bool {
        self.computes
            .get(id)
            .is_some_and(|slot| slot.status == SyncStatus::Dirty)
    }

    pub fn mark_dirty(&mut self, id: &TypeId) {
        if let Some(slot) = self.computes.get_mut(id) {
            slot.status = SyncStatus::Dirty;
        }
    }

    pub fn mark_clean(&mut self, id: &TypeId) {
        if let Some(slot) = self.computes.get_mut(id) {
            slot.status = SyncStatus::Clean;
        }
    }

    /// Queue a command; it runs on the next [`StateCtx::flush_commands`].
    pub fn enqueue_command<C: Command>(&mut self) {
        self.queue.push(TypeId::of::<C>());
    }

    /// Queue `C` and flush the queue right away.
    pub fn dispatch<C: Command>(&mut self) {
        if let Err(err) = self.try_dispatch::<C>() {
            error!("{err}");
        }
    }

    /// Like [`StateCtx::dispatch`], but fails when `C` was never recorded.
    pub fn try_dispatch<C: Command>(&mut self) -> Result<(), Error> {
        if !self.commands.contains_key(&TypeId::of::<C>()) {
            return Err(Error::command_not_found::<C>());
        }
        self.enqueue_command::<C>();
        self.flush_commands();
        Ok(())
    }

    /// Spawn every queued command on the current tokio runtime.
    ///
    /// Each spawn supersedes the previous run of the same command type: its
    /// token is cancelled and its updater stops publishing.
    pub fn flush_commands(&mut self) {
        let queued = std::mem::take(&mut self.queue);
        for id in queued {
            self.spawn_command(id);
        }
    }

    fn spawn_command(&mut self, id: TypeId) {
        let Some(slot) = self.commands.get(&id) else {
            error!("Dispatched a command that was never recorded ({id:?})");
            return;
        };
        let name = slot.name;
        let command = Arc::clone(&slot.command);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            error!("Cannot run {name}: no tokio runtime entered on this thread");
            return;
        };

        let latest = Arc::clone(
            self.generations
                .entry(id)
                .or_insert_with(|| Arc::new(AtomicU64::new(0))),
        );
        let generation = latest.fetch_add(1, Ordering::AcqRel) + 1;
        let task = TaskId::new(id, generation);
        let token = CancellationToken::new();

        if let Some(previous) = self.tasks.insert(id, TaskHandle::new(task, token.clone())) {
            debug!(
                "{name}: superseding generation {} with {generation}",
                previous.id().generation()
            );
            previous.cancel();
        }

        let snap = self.snapshot();
        let updater = LatestOnlyUpdater::new(self.send.clone(), task, latest);
        self.task_set
            .spawn_on(command.run(snap, updater, token), &runtime);
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.clone_boxed() {
                snap.insert_state(*id, value);
            }
        }
        for (id, slot) in &self.computes {
            if let Some(value) = slot.compute.clone_boxed() {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }

    /// Apply every value sent through an updater since the last call.
    pub fn sync_computes(&mut self) {
        self.reap_tasks();
        let pending: Vec<Update> = self.recv.try_iter().collect();
        for update in pending {
            self.apply(update);
        }
    }

    fn apply(&mut self, update: Update) {
        if let Some(origin) = update.origin
            && !self.is_latest(origin)
        {
            debug!(
                "Dropped update from superseded task generation {}",
                origin.generation()
            );
            return;
        }

        if let Some(slot) = self.computes.get_mut(&update.id) {
            slot.compute.assign_box(update.value);
        } else if let Some(state) = self.states.get_mut(&update.id) {
            state.assign_box(update.value);
        } else {
            warn!("Update for unregistered type {:?} ignored", update.id);
            return;
        }
        self.mark_dependents_dirty(&update.id);
    }

    fn is_latest(&self, task: TaskId) -> bool {
        self.generations
            .get(&task.type_id())
            .is_some_and(|latest| latest.load(Ordering::Acquire) == task.generation())
    }

    fn mark_dependents_dirty(&mut self, id: &TypeId) {
        for slot in self.computes.values_mut() {
            if slot.compute.deps().contains(id) {
                slot.status = SyncStatus::Dirty;
            }
        }
    }

    /// Re-run dirty computes until the graph settles.
    pub fn run_computed(&mut self) {
        let max_rounds = self.computes.len() + 1;
        for _ in 0..max_rounds {
            let dirty: Vec<TypeId> = self
                .computes
                .iter()
                .filter(|(_, slot)| slot.status == SyncStatus::Dirty)
                .map(|(id, _)| *id)
                .collect();
            if dirty.is_empty() {
                return;
            }

            for id in dirty {
                if let Some(slot) = self.computes.get(&id) {
                    let deps = Dep::new(&self.states, &self.computes);
                    slot.compute.compute(deps, self.updater());
                }
                self.mark_clean(&id);
            }
            self.sync_computes();
        }
        warn!("Computes still dirty after {max_rounds} rounds; check for dependency cycles");
    }

    fn reap_tasks(&mut self) {
        while let Some(joined) = self.task_set.try_join_next() {
            if let Err(err) = joined
                && err.is_panic()
            {
                error!("Command task panicked: {err}");
            }
        }
    }

    pub fn task_count(&self) -> usize {
        self.task_set.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.task_set
    }

    /// Cancel every running command and wait for the tasks to stop.
    pub async fn shutdown(&mut self) {
        for handle in self.tasks.values() {
            handle.cancel();
        }
        self.task_set.shutdown().await;
        self.tasks.clear();
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("tasks", &self.task_set.len())
            .finish_non_exhaustive()
    }
}
