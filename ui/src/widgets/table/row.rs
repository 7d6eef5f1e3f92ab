//! Data row rendering.

use egui::{Frame, InnerResponse, Margin, Ui};
use nomina_business::TableRow;

use super::cells::{render_cell, render_delete_button};

/// Renders the cells of `row` in header order.
///
/// Returns `true` if the row's delete button was clicked.
pub fn render_row(ui: &mut Ui, row: &TableRow, with_delete: bool) -> bool {
    for cell in &row.cells {
        data_cell(ui, |ui| render_cell(ui, cell));
    }

    with_delete && data_cell(ui, render_delete_button).inner
}

fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}
