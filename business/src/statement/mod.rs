//! Account statement: selection state, fetch command and cached result.
//!
//! The UI changes the selection through [`select_employee`], which also
//! dispatches [`FetchAccountStatementCommand`]. The command writes
//! [`AccountStatementCompute`], keyed by the employee it was fetched for, and
//! [`StatementViewCompute`] derives what the page should render.

mod view;

use std::any::Any;

use log::{debug, info, warn};
use nomina_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, LatestOnlyUpdater,
    SnapshotClone, State, StateCtx, Updater, assign_impl, state_assign_impl,
};
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::models::AccountStatement;
use crate::source::StatementSourceState;

pub use view::{
    PAYMENTS_LIMIT, StatementPhase, StatementSections, StatementViewCompute, SummaryCard,
    loans_table, payments_table, summary_cards,
};

/// The employee currently picked in the selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedEmployee {
    pub id: Option<Ustr>,
}

impl SnapshotClone for SelectedEmployee {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for SelectedEmployee {
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

#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatementResult {
    /// Nothing selected, nothing requested.
    #[default]
    Idle,
    Loading,
    /// `None` is the absence state: fetched fine, nothing to show.
    Loaded(Option<AccountStatement>),
    Error(String),
}

/// Latest statement fetch, tagged with the employee it belongs to.
#[derive(Debug, Clone, Default)]
pub struct AccountStatementCompute {
    pub employee_id: Option<Ustr>,
    pub result: StatementResult,
}

impl AccountStatementCompute {
    pub fn is_loading(&self) -> bool {
        matches!(self.result, StatementResult::Loading)
    }

    pub fn statement(&self) -> Option<&AccountStatement> {
        match &self.result {
            StatementResult::Loaded(statement) => statement.as_ref(),
            _ => None,
        }
    }

    /// The result only if it was fetched for `employee_id`.
    pub fn result_for(&self, employee_id: Ustr) -> Option<&StatementResult> {
        (self.employee_id == Some(employee_id)).then_some(&self.result)
    }
}

impl SnapshotClone for AccountStatementCompute {}

impl Compute for AccountStatementCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Written by `FetchAccountStatementCommand`.
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Fetch the statement of the current [`SelectedEmployee`].
///
/// With no selection it resets the cache to `Idle` without any I/O.
#[derive(Debug, Default)]
pub struct FetchAccountStatementCommand;

impl Command for FetchAccountStatementCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let selected = snap.state::<SelectedEmployee>().id;
        let source = snap.state::<StatementSourceState>().clone();

        Box::pin(async move {
            let Some(employee_id) = selected else {
                updater.set(AccountStatementCompute::default());
                return;
            };

            updater.set(AccountStatementCompute {
                employee_id: Some(employee_id),
                result: StatementResult::Loading,
            });

            let fetched = tokio::select! {
                () = cancel.cancelled() => {
                    debug!("Statement fetch for {employee_id} superseded");
                    return;
                }
                fetched = source.inner.get_statement(employee_id.as_str()) => fetched,
            };

            let result = match fetched {
                Ok(Some(statement)) => {
                    info!(
                        "Statement for {employee_id}: {} payments, {} loans",
                        statement.payments.len(),
                        statement.loans.len()
                    );
                    StatementResult::Loaded(Some(statement))
                }
                Ok(None) => {
                    info!("No statement for {employee_id}");
                    StatementResult::Loaded(None)
                }
                Err(err) => {
                    warn!("Statement fetch for {employee_id} failed: {err}");
                    StatementResult::Error(err.to_string())
                }
            };
            updater.set(AccountStatementCompute {
                employee_id: Some(employee_id),
                result,
            });
        })
    }
}

/// Replace the selection and fetch its statement.
pub fn select_employee(ctx: &mut StateCtx, employee_id: Option<Ustr>) {
    if ctx.state::<SelectedEmployee>().id == employee_id {
        return;
    }
    debug!("Selected employee {employee_id:?}");
    ctx.update::<SelectedEmployee>(|selected| selected.id = employee_id);
    ctx.dispatch::<FetchAccountStatementCommand>();
}

/// Fetch the current selection again, e.g. after a failed fetch.
///
/// The cache is marked loading right away so the next frame does not offer
/// the retry a second time.
pub fn reload_statement(ctx: &mut StateCtx) {
    let Some(employee_id) = ctx.state::<SelectedEmployee>().id else {
        return;
    };
    debug!("Reloading statement for {employee_id}");
    ctx.updater().set(AccountStatementCompute {
        employee_id: Some(employee_id),
        result: StatementResult::Loading,
    });
    ctx.dispatch::<FetchAccountStatementCommand>();
}
