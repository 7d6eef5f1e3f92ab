//! Cell rendering per [`CellValue`] variant.

use egui::{RichText, Ui};
use nomina_business::CellValue;

use super::DELETE_BUTTON;

pub fn render_cell(ui: &mut Ui, cell: &CellValue) {
    match cell {
        CellValue::Text(text) => {
            ui.label(text.as_str());
        }
        CellValue::Currency(_) => {
            ui.label(RichText::new(cell.to_string()).monospace());
        }
        CellValue::Status(status) => {
            ui.label(RichText::new(status.as_str()).italics());
        }
    }
}

/// Returns `true` if the button was clicked.
pub fn render_delete_button(ui: &mut Ui) -> bool {
    ui.button(DELETE_BUTTON)
        .on_hover_text("Eliminar registro")
        .clicked()
}
