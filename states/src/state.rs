use std::any::{Any, type_name};
use std::fmt::Debug;

use log::warn;

/// Types whose value can be copied into a [`crate::CommandSnapshot`].
///
/// Returning `None` keeps the type out of snapshots; commands then cannot read it.
pub trait SnapshotClone {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// A plain value stored in [`crate::StateCtx`].
///
/// States are mutated from the UI thread through `StateCtx::update`/`state_mut`,
/// or replaced wholesale through an [`crate::Updater`].
pub trait State: Any + Send + Debug + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replace `target` with the boxed value if the types line up.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => warn!("Ignored state update with mismatched type for {}", type_name::<T>()),
    }
}
