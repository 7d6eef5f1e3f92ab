//! Wire types for the HR account statement.
//!
//! Field names follow the remote database schema (`fecha`, `salario_base`, ...);
//! fields the page never renders default when absent.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use ustr::Ustr;

/// Accepts both text and integer primary keys.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Ustr, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => Ustr::from(&text),
        RawId::Number(number) => Ustr::from(&number.to_string()),
    })
}

/// Accepts a plain date, a timestamp (its date part is kept) or null.
fn deserialize_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|err| D::Error::custom(format!("invalid fecha {raw:?}: {err}")))
}

/// An employee as listed in the selector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Ustr,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Payment {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Ustr,
    #[serde(rename = "fecha", default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "salario_base")]
    pub base_salary: f64,
    #[serde(rename = "tiempo_extra")]
    pub overtime: f64,
    #[serde(rename = "descuentos")]
    pub deductions: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Overtime {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Ustr,
    #[serde(rename = "fecha", default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "horas", default)]
    pub hours: f64,
    #[serde(rename = "monto", default)]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deduction {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Ustr,
    #[serde(rename = "fecha", default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "concepto", default)]
    pub concept: String,
    #[serde(rename = "monto", default)]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Loan {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Ustr,
    #[serde(rename = "fecha", default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "saldo")]
    pub balance: f64,
    /// Free-form state such as `activo` or `pagado`; shown as-is.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Absence {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Ustr,
    #[serde(rename = "fecha", default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "motivo", default)]
    pub reason: String,
    #[serde(rename = "justificada", default)]
    pub justified: bool,
}

/// Consolidated statement of one employee.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccountStatement {
    #[serde(rename = "pagos", default)]
    pub payments: Vec<Payment>,
    #[serde(rename = "tiempoExtra", alias = "tiempo_extra", default)]
    pub overtime: Vec<Overtime>,
    #[serde(rename = "descuentos", default)]
    pub deductions: Vec<Deduction>,
    #[serde(rename = "prestamos", default)]
    pub loans: Vec<Loan>,
    #[serde(rename = "faltas", default)]
    pub absences: Vec<Absence>,
}

/// The tables a statement is assembled from; also the targets of deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Payment,
    Overtime,
    Deduction,
    Loan,
    Absence,
}

impl RecordKind {
    pub const ALL: [Self; 5] = [
        Self::Payment,
        Self::Overtime,
        Self::Deduction,
        Self::Loan,
        Self::Absence,
    ];

    /// Remote table name.
    pub const fn table(self) -> &'static str {
        match self {
            Self::Payment => "pagos",
            Self::Overtime => "tiempo_extra",
            Self::Deduction => "descuentos",
            Self::Loan => "prestamos",
            Self::Absence => "faltas",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
