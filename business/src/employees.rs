//! Employee list cache + the command that fills it.

use std::any::Any;

use log::{info, warn};
use nomina_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, LatestOnlyUpdater,
    SnapshotClone, Updater, assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::models::Employee;
use crate::source::StatementSourceState;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EmployeesResult {
    /// Never requested.
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Employee>),
    Error(String),
}

/// Employees shown in the selector; written by [`ListEmployeesCommand`].
#[derive(Debug, Clone, Default)]
pub struct EmployeesCompute {
    pub result: EmployeesResult,
}

impl EmployeesCompute {
    pub fn is_idle(&self) -> bool {
        matches!(self.result, EmployeesResult::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.result, EmployeesResult::Loading)
    }

    pub fn employees(&self) -> &[Employee] {
        match &self.result {
            EmployeesResult::Loaded(employees) => employees,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            EmployeesResult::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl SnapshotClone for EmployeesCompute {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for EmployeesCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Written by `ListEmployeesCommand`.
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

#[derive(Debug, Default)]
pub struct ListEmployeesCommand;

impl Command for ListEmployeesCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let source = snap.state::<StatementSourceState>().clone();

        Box::pin(async move {
            updater.set(EmployeesCompute {
                result: EmployeesResult::Loading,
            });

            let result = tokio::select! {
                () = cancel.cancelled() => return,
                result = source.inner.list_employees() => result,
            };

            let result = match result {
                Ok(employees) => {
                    info!("Loaded {} employees", employees.len());
                    EmployeesResult::Loaded(employees)
                }
                Err(err) => {
                    warn!("Failed to list employees: {err}");
                    EmployeesResult::Error(err.to_string())
                }
            };
            updater.set(EmployeesCompute { result });
        })
    }
}
