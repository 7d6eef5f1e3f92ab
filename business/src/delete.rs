//! Record deletion: the mutation half of the data hook.
//!
//! The UI sets [`DeleteRecordInput`] and dispatches [`DeleteRecordCommand`]
//! (see [`request_delete`]). After a successful delete the statement of the
//! current selection is fetched again through [`refresh_after_delete`].

use std::any::Any;

use log::{info, warn};
use nomina_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, LatestOnlyUpdater,
    SnapshotClone, State, StateCtx, Updater, assign_impl, state_assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::models::RecordKind;
use crate::source::StatementSourceState;
use crate::statement::FetchAccountStatementCommand;
use crate::table::RowId;

/// The record the next [`DeleteRecordCommand`] removes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteRecordInput {
    pub target: Option<(RecordKind, RowId)>,
}

impl SnapshotClone for DeleteRecordInput {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for DeleteRecordInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    InFlight { kind: RecordKind, id: RowId },
    Deleted { kind: RecordKind, id: RowId },
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct DeleteRecordCompute {
    pub state: DeleteState,
    /// Set once the statement has been re-fetched for the last `Deleted`.
    pub refreshed: bool,
}

impl DeleteRecordCompute {
    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, DeleteState::InFlight { .. })
    }

    fn needs_refresh(&self) -> bool {
        matches!(self.state, DeleteState::Deleted { .. }) && !self.refreshed
    }
}

impl SnapshotClone for DeleteRecordCompute {}

impl Compute for DeleteRecordCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

#[derive(Debug, Default)]
pub struct DeleteRecordCommand;

impl Command for DeleteRecordCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let target = snap.state::<DeleteRecordInput>().target;
        let source = snap.state::<StatementSourceState>().clone();

        Box::pin(async move {
            let Some((kind, id)) = target else {
                warn!("DeleteRecordCommand dispatched without a target");
                return;
            };

            updater.set(DeleteRecordCompute {
                state: DeleteState::InFlight { kind, id },
                refreshed: false,
            });

            let result = tokio::select! {
                () = cancel.cancelled() => return,
                result = source.inner.delete_record(kind, id.as_str()) => result,
            };

            let state = match result {
                Ok(()) => {
                    info!("Deleted {kind} {id}");
                    DeleteState::Deleted { kind, id }
                }
                Err(err) => {
                    warn!("Failed to delete {kind} {id}: {err}");
                    DeleteState::Error(err.to_string())
                }
            };
            updater.set(DeleteRecordCompute {
                state,
                refreshed: false,
            });
        })
    }
}

/// Point [`DeleteRecordInput`] at a record and start the delete.
pub fn request_delete(ctx: &mut StateCtx, kind: RecordKind, id: RowId) {
    ctx.update::<DeleteRecordInput>(|input| input.target = Some((kind, id)));
    ctx.dispatch::<DeleteRecordCommand>();
}

/// Re-fetch the selected statement once per completed delete.
///
/// Call after `sync_computes`; returns whether a fetch was dispatched.
pub fn refresh_after_delete(ctx: &mut StateCtx) -> bool {
    let compute = ctx.compute::<DeleteRecordCompute>();
    if !compute.needs_refresh() {
        return false;
    }

    let refreshed = DeleteRecordCompute {
        state: compute.state.clone(),
        refreshed: true,
    };
    ctx.updater().set(refreshed);
    ctx.sync_computes();
    ctx.dispatch::<FetchAccountStatementCommand>();
    true
}
