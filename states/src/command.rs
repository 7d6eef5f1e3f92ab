use std::any::Any;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// An explicitly dispatched action.
///
/// Commands are the only place allowed to perform I/O. They read an owned
/// [`CommandSnapshot`], publish results through the [`LatestOnlyUpdater`] and
/// should stop early once `cancel` fires.
pub trait Command: Any + Send + Sync + Debug {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
