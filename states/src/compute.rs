use std::any::{Any, TypeId, type_name};
use std::fmt::Debug;

use log::warn;

use crate::{Dep, SnapshotClone, State, Updater};

/// The states and computes a [`Compute`] reads.
///
/// A change to any of them marks the compute dirty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeDeps {
    pub states: Vec<TypeId>,
    pub computes: Vec<TypeId>,
}

impl ComputeDeps {
    /// No dependencies; the compute only changes through an [`Updater`].
    pub fn none() -> Self {
        Self::default()
    }

    pub fn state<T: State>(mut self) -> Self {
        self.states.push(TypeId::of::<T>());
        self
    }

    pub fn compute<T: Compute>(mut self) -> Self {
        self.computes.push(TypeId::of::<T>());
        self
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.states.contains(id) || self.computes.contains(id)
    }
}

/// A cached value in [`crate::StateCtx`].
///
/// Computes come in two shapes:
/// - derived: `compute` reads `deps` and publishes a new value through the updater;
/// - command-written caches: `deps` is empty, `compute` is a no-op, and a
///   [`crate::Command`] writes the value.
///
/// `compute` must not perform I/O; that belongs in a command.
pub trait Compute: Any + Send + Debug + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replace `target` with the boxed value if the types line up.
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => warn!("Ignored compute update with mismatched type for {}", type_name::<T>()),
    }
}
