//! Domain layer of the account statement page: wire models, the data source
//! seam, the commands that talk to it and the view-models the UI renders.

mod config;
mod delete;
mod employees;
mod format;
mod models;
mod source;
mod statement;
mod table;

#[cfg(test)]
mod test_utils;

pub use config::{BusinessConfig, ConfigError};
pub use delete::{
    DeleteRecordCommand, DeleteRecordCompute, DeleteRecordInput, DeleteState,
    refresh_after_delete, request_delete,
};
pub use employees::{EmployeesCompute, EmployeesResult, ListEmployeesCommand};
pub use format::format_currency;
pub use models::{
    Absence, AccountStatement, Deduction, Employee, Loan, Overtime, Payment, RecordKind,
};
pub use source::{
    InMemoryStatementSource, RestStatementSource, SourceError, SourceResult, StatementSource,
    StatementSourceState,
};
pub use statement::{
    AccountStatementCompute, FetchAccountStatementCommand, PAYMENTS_LIMIT, SelectedEmployee,
    StatementPhase, StatementResult, StatementSections, StatementViewCompute, SummaryCard,
    loans_table, payments_table, reload_statement, select_employee, summary_cards,
};
pub use table::{CellValue, RowId, TableError, TableRow, TableSpec};

use nomina_states::StateCtx;

/// Install every state, compute and command the statement page uses.
pub fn register(ctx: &mut StateCtx, config: BusinessConfig, source: StatementSourceState) {
    ctx.add_state(config);
    ctx.add_state(source);
    ctx.add_state(SelectedEmployee::default());
    ctx.add_state(DeleteRecordInput::default());

    ctx.record_compute(EmployeesCompute::default());
    ctx.record_compute(AccountStatementCompute::default());
    ctx.record_compute(StatementViewCompute::default());
    ctx.record_compute(DeleteRecordCompute::default());

    ctx.record_command(ListEmployeesCommand);
    ctx.record_command(FetchAccountStatementCommand);
    ctx.record_command(DeleteRecordCommand);
}
