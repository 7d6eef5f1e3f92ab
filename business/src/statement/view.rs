//! What the account statement page shows for the current selection.

use std::any::Any;

use chrono::NaiveDate;
use nomina_states::{Compute, ComputeDeps, Dep, SnapshotClone, Updater, assign_impl};
use ustr::Ustr;

use super::{AccountStatementCompute, SelectedEmployee, StatementResult};
use crate::models::{AccountStatement, Loan, Payment};
use crate::table::{CellValue, TableError, TableRow, TableSpec};

/// "Últimos Pagos" shows at most this many payments.
pub const PAYMENTS_LIMIT: usize = 10;

const PAYMENT_HEADERS: [&str; 6] = [
    "Fecha",
    "Periodo",
    "Salario Base",
    "Tiempo Extra",
    "Descuentos",
    "Total",
];

const LOAN_HEADERS: [&str; 4] = ["Fecha", "Monto", "Saldo", "Status"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub label: &'static str,
    pub count: usize,
    /// Rendered in the warning color (deductions, absences).
    pub attention: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementSections {
    pub cards: [SummaryCard; 5],
    /// `None` when there are no payments; the section is omitted.
    pub payments: Option<TableSpec>,
    /// `None` when there are no loans; the section is omitted.
    pub loans: Option<TableSpec>,
}

impl StatementSections {
    pub fn from_statement(statement: &AccountStatement) -> Result<Self, TableError> {
        let payments = if statement.payments.is_empty() {
            None
        } else {
            Some(payments_table(&statement.payments)?)
        };
        let loans = if statement.loans.is_empty() {
            None
        } else {
            Some(loans_table(&statement.loans)?)
        };

        Ok(Self {
            cards: summary_cards(statement),
            payments,
            loans,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatementPhase {
    #[default]
    Unselected,
    Loading,
    Failed(String),
    /// Fetched, but there is no statement for this employee.
    Absent,
    Loaded(StatementSections),
}

impl StatementPhase {
    /// A cached result for another employee than `selected` counts as loading,
    /// so a stale fetch is never shown under a new selection.
    pub fn derive(selected: Option<Ustr>, cache: &AccountStatementCompute) -> Self {
        let Some(employee_id) = selected else {
            return Self::Unselected;
        };

        match cache.result_for(employee_id) {
            None | Some(StatementResult::Idle | StatementResult::Loading) => Self::Loading,
            Some(StatementResult::Error(message)) => Self::Failed(message.clone()),
            Some(StatementResult::Loaded(None)) => Self::Absent,
            Some(StatementResult::Loaded(Some(statement))) => {
                match StatementSections::from_statement(statement) {
                    Ok(sections) => Self::Loaded(sections),
                    Err(err) => Self::Failed(err.to_string()),
                }
            }
        }
    }
}

pub fn summary_cards(statement: &AccountStatement) -> [SummaryCard; 5] {
    [
        SummaryCard {
            label: "Pagos",
            count: statement.payments.len(),
            attention: false,
        },
        SummaryCard {
            label: "Tiempo Extra",
            count: statement.overtime.len(),
            attention: false,
        },
        SummaryCard {
            label: "Descuentos",
            count: statement.deductions.len(),
            attention: true,
        },
        SummaryCard {
            label: "Préstamos",
            count: statement.loans.len(),
            attention: false,
        },
        SummaryCard {
            label: "Faltas",
            count: statement.absences.len(),
            attention: true,
        },
    ]
}

/// Missing dates render as an empty cell.
fn date_cell(date: Option<NaiveDate>) -> CellValue {
    CellValue::text(date.map(|day| day.to_string()).unwrap_or_default())
}

/// The first [`PAYMENTS_LIMIT`] payments, in the order given.
pub fn payments_table(payments: &[Payment]) -> Result<TableSpec, TableError> {
    let rows = payments
        .iter()
        .take(PAYMENTS_LIMIT)
        .map(|payment| {
            TableRow::new(
                payment.id,
                vec![
                    date_cell(payment.date),
                    CellValue::text(payment.period.clone()),
                    CellValue::Currency(payment.base_salary),
                    CellValue::Currency(payment.overtime),
                    CellValue::Currency(payment.deductions),
                    CellValue::Currency(payment.total),
                ],
            )
        })
        .collect();
    TableSpec::new(PAYMENT_HEADERS, rows)
}

/// Every loan, in the order given.
pub fn loans_table(loans: &[Loan]) -> Result<TableSpec, TableError> {
    let rows = loans
        .iter()
        .map(|loan| {
            TableRow::new(
                loan.id,
                vec![
                    date_cell(loan.date),
                    CellValue::Currency(loan.amount),
                    CellValue::Currency(loan.balance),
                    CellValue::status(loan.status.clone()),
                ],
            )
        })
        .collect();
    TableSpec::new(LOAN_HEADERS, rows)
}

/// Derived from the selection and the statement cache; the page renders this.
#[derive(Debug, Clone, Default)]
pub struct StatementViewCompute {
    pub phase: StatementPhase,
}

impl SnapshotClone for StatementViewCompute {}

impl Compute for StatementViewCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
            .state::<SelectedEmployee>()
            .compute::<AccountStatementCompute>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let selected = deps.get_state_ref::<SelectedEmployee>().id;
        let cache = deps.get_compute_ref::<AccountStatementCompute>();
        updater.set(Self {
            phase: StatementPhase::derive(selected, cache),
        });
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
