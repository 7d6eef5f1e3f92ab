//! Reactive state container shared by the business and UI layers.
//!
//! - [`State`]: plain values edited on the UI thread.
//! - [`Compute`]: cached values, derived from dependencies or written by commands.
//! - [`Command`]: explicitly dispatched async work (network I/O lives here).
//! - [`StateCtx`]: owns all of the above and applies updates once per frame.

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod snapshot;
mod state;
mod task;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::{StateCtx, SyncStatus};
pub use dep::Dep;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::{SnapshotClone, State, state_assign_impl};
pub use task::{TaskHandle, TaskId};
pub use updater::{LatestOnlyUpdater, Updater};
