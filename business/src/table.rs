//! Typed view-model for tabular data.
//!
//! A [`TableSpec`] is a header list plus rows; every row carries an id (used
//! only to address a delete) and exactly one [`CellValue`] per header.

use std::fmt;

use thiserror::Error;
use ustr::Ustr;

use crate::format::format_currency;

pub type RowId = Ustr;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    /// Rendered through [`format_currency`].
    Currency(f64),
    /// Raw status string, rendered unmapped.
    Status(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn status(value: impl Into<String>) -> Self {
        Self::Status(value.into())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Status(text) => f.write_str(text),
            Self::Currency(amount) => f.write_str(&format_currency(*amount)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: RowId,
    pub cells: Vec<CellValue>,
}

impl TableRow {
    pub fn new(id: impl Into<RowId>, cells: Vec<CellValue>) -> Self {
        Self {
            id: id.into(),
            cells,
        }
    }

    /// Cells as display strings, in header order.
    pub fn display_cells(&self) -> Vec<String> {
        self.cells.iter().map(ToString::to_string).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("row {row} (id {id}) has {found} cells but the table has {expected} columns")]
    ArityMismatch {
        row: usize,
        id: RowId,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSpec {
    headers: Vec<String>,
    rows: Vec<TableRow>,
}

impl TableSpec {
    /// Build a table, rejecting any row whose cell count differs from the header count.
    pub fn new<H, S>(headers: H, rows: Vec<TableRow>) -> Result<Self, TableError>
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if let Some((row, bad)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.cells.len() != headers.len())
        {
            return Err(TableError::ArityMismatch {
                row,
                id: bad.id,
                expected: headers.len(),
                found: bad.cells.len(),
            });
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rows_matching_headers() {
        let table = TableSpec::new(
            ["Fecha", "Monto"],
            vec![
                TableRow::new("a", vec![CellValue::text("2024-01-01"), CellValue::Currency(5.0)]),
                TableRow::new("b", vec![CellValue::text("2024-02-01"), CellValue::Currency(7.5)]),
            ],
        )
        .expect("table");

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1].display_cells(), ["2024-02-01", "$7.5"]);
    }

    #[test]
    fn rejects_short_and_long_rows() {
        let short = TableSpec::new(
            ["Fecha", "Monto"],
            vec![TableRow::new("x", vec![CellValue::text("2024-01-01")])],
        );
        assert_eq!(
            short,
            Err(TableError::ArityMismatch {
                row: 0,
                id: Ustr::from("x"),
                expected: 2,
                found: 1,
            })
        );

        let long = TableSpec::new(
            ["Status"],
            vec![
                TableRow::new("ok", vec![CellValue::status("activo")]),
                TableRow::new("bad", vec![CellValue::status("a"), CellValue::status("b")]),
            ],
        );
        assert!(matches!(long, Err(TableError::ArityMismatch { row: 1, .. })));
    }

    #[test]
    fn empty_rows_are_valid() {
        let table = TableSpec::new(["Fecha"], Vec::new()).expect("table");
        assert!(table.rows().is_empty());
        assert_eq!(table.headers(), ["Fecha"]);
    }

    #[test]
    fn status_cells_are_not_mapped() {
        assert_eq!(CellValue::status("pagado").to_string(), "pagado");
        assert_eq!(CellValue::Currency(-250.0).to_string(), "-$250");
    }
}
