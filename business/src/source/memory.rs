//! In-process data source used by the demo build and by tests.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use tokio::sync::RwLock;
use ustr::Ustr;

use super::{SourceError, SourceResult, StatementSource};
use crate::models::{
    AccountStatement, Absence, Deduction, Employee, Loan, Overtime, Payment, RecordKind,
};

#[derive(Debug, Default)]
pub struct InMemoryStatementSource {
    employees: Vec<Employee>,
    statements: RwLock<BTreeMap<Ustr, AccountStatement>>,
    delays: BTreeMap<Ustr, Duration>,
    failing: BTreeSet<Ustr>,
}

impl InMemoryStatementSource {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            ..Self::default()
        }
    }

    pub fn with_statement(mut self, employee_id: &str, statement: AccountStatement) -> Self {
        self.statements
            .get_mut()
            .insert(Ustr::from(employee_id), statement);
        self
    }

    /// Delay statement reads for one employee.
    pub fn with_delay(mut self, employee_id: &str, delay: Duration) -> Self {
        self.delays.insert(Ustr::from(employee_id), delay);
        self
    }

    /// Make statement reads for one employee fail.
    pub fn with_failure(mut self, employee_id: &str) -> Self {
        self.failing.insert(Ustr::from(employee_id));
        self
    }

    /// A small dataset for running the app without a backend.
    pub fn demo() -> Self {
        let date = |month: u32, day: u32| NaiveDate::from_ymd_opt(2024, month, day);
        let months = [
            "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
        ];

        let payments = (1_u32..=12)
            .rev()
            .zip(months.iter().rev())
            .map(|(month, period)| Payment {
                id: Ustr::from(&format!("p{month}")),
                date: date(month, 28),
                period: (*period).to_owned(),
                base_salary: 12_500.0,
                overtime: f64::from(month) * 150.0,
                deductions: 980.5,
                total: 12_500.0 + f64::from(month) * 150.0 - 980.5,
            })
            .collect();

        let ana = AccountStatement {
            payments,
            overtime: vec![Overtime {
                id: Ustr::from("te1"),
                date: date(11, 3),
                hours: 4.0,
                amount: 600.0,
            }],
            deductions: vec![Deduction {
                id: Ustr::from("d1"),
                date: date(12, 1),
                concept: "IMSS".to_owned(),
                amount: 980.5,
            }],
            loans: vec![Loan {
                id: Ustr::from("l1"),
                date: date(3, 10),
                amount: 20_000.0,
                balance: 8_500.0,
                status: "activo".to_owned(),
            }],
            absences: vec![Absence {
                id: Ustr::from("f1"),
                date: date(6, 14),
                reason: "Enfermedad".to_owned(),
                justified: true,
            }],
        };

        let luis = AccountStatement {
            loans: vec![Loan {
                id: Ustr::from("l2"),
                date: date(1, 5),
                amount: 5_000.0,
                balance: 0.0,
                status: "pagado".to_owned(),
            }],
            ..AccountStatement::default()
        };

        Self::new(vec![
            Employee {
                id: Ustr::from("1"),
                name: "Ana Torres".to_owned(),
            },
            Employee {
                id: Ustr::from("2"),
                name: "Luis Ramírez".to_owned(),
            },
            Employee {
                id: Ustr::from("3"),
                name: "María López".to_owned(),
            },
        ])
        .with_statement("1", ana)
        .with_statement("2", luis)
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: Ustr, key: impl Fn(&T) -> Ustr) -> bool {
    let before = items.len();
    items.retain(|item| key(item) != id);
    items.len() != before
}

fn remove_record(statement: &mut AccountStatement, kind: RecordKind, id: Ustr) -> bool {
    match kind {
        RecordKind::Payment => remove_by_id(&mut statement.payments, id, |r| r.id),
        RecordKind::Overtime => remove_by_id(&mut statement.overtime, id, |r| r.id),
        RecordKind::Deduction => remove_by_id(&mut statement.deductions, id, |r| r.id),
        RecordKind::Loan => remove_by_id(&mut statement.loans, id, |r| r.id),
        RecordKind::Absence => remove_by_id(&mut statement.absences, id, |r| r.id),
    }
}

#[async_trait]
impl StatementSource for InMemoryStatementSource {
    async fn list_employees(&self) -> SourceResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    async fn get_statement(&self, employee_id: &str) -> SourceResult<Option<AccountStatement>> {
        let key = Ustr::from(employee_id);
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&key) {
            return Err(SourceError::Status {
                url: format!("memory://statements/{employee_id}"),
                status: 500,
            });
        }
        Ok(self.statements.read().await.get(&key).cloned())
    }

    async fn delete_record(&self, kind: RecordKind, id: &str) -> SourceResult<()> {
        let key = Ustr::from(id);
        let mut statements = self.statements.write().await;
        let removed = statements
            .values_mut()
            .any(|statement| remove_record(statement, kind, key));
        if removed {
            info!("Deleted {kind} record {id}");
            Ok(())
        } else {
            Err(SourceError::NotFound {
                kind,
                id: id.to_owned(),
            })
        }
    }
}
