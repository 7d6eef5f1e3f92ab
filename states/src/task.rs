//! Identity and cancellation for command tasks.
//!
//! A `TaskId` pairs the command's `TypeId` with a per-type generation counter.
//! `StateCtx` keeps one `TaskHandle` per command type; dispatching the same
//! command again cancels the previous handle and issues the next generation.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher values were dispatched later.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Cooperative cancellation handle for a running command.
///
/// Cancelling does not abort the task; the command observes the token (for
/// example with `tokio::select!` on `cancelled()`) and stops on its own.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
