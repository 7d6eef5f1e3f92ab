//! Payments and loans tables of a loaded statement.

use egui::Ui;
use nomina_business::StatementSections;

use crate::widgets::table::{DeleteColumn, render_table};

pub const PAYMENTS_HEADING: &str = "Últimos Pagos";
pub const LOANS_HEADING: &str = "Préstamos";

/// Each table is skipped, heading included, when its list is empty.
pub fn statement_tables(ui: &mut Ui, sections: &StatementSections) {
    if let Some(payments) = &sections.payments {
        ui.add_space(16.0);
        ui.heading(PAYMENTS_HEADING);
        render_table(ui, "payments_table", payments, DeleteColumn::Disabled);
    }

    if let Some(loans) = &sections.loans {
        ui.add_space(16.0);
        ui.heading(LOANS_HEADING);
        render_table(ui, "loans_table", loans, DeleteColumn::Disabled);
    }
}
