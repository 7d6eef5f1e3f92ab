//! Generic table for [`TableSpec`] view-models.
//!
//! Split into:
//! - `header`: header row rendering
//! - `row`: one data row plus the optional delete control
//! - `cells`: cell rendering per [`nomina_business::CellValue`] variant

mod cells;
mod header;
mod row;

use std::hash::Hash;

use egui::{Frame, Grid, Margin, ScrollArea, Stroke, Ui};
use nomina_business::{RowId, TableSpec};

use crate::utils::colors::TABLE_BORDER_COLOR;

/// Label of the trailing column added by [`DeleteColumn::Enabled`].
pub const ACTIONS_HEADER: &str = "Acciones";

/// Text of the per-row delete button.
pub const DELETE_BUTTON: &str = "🗑 Eliminar";

/// Whether the table gets a trailing delete column.
pub enum DeleteColumn<'a> {
    Disabled,
    /// Called once per click with the id of the clicked row.
    Enabled(Box<dyn FnMut(RowId) + 'a>),
}

impl DeleteColumn<'_> {
    fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableResponse {
    /// Row whose delete control was clicked this frame.
    pub deleted: Option<RowId>,
}

/// Render `table` as a header row followed by one row per data row, in order.
pub fn render_table(
    ui: &mut Ui,
    id_salt: impl Hash,
    table: &TableSpec,
    mut delete: DeleteColumn<'_>,
) -> TableResponse {
    let mut response = TableResponse::default();
    let num_columns = table.column_count() + usize::from(delete.is_enabled());

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            ScrollArea::horizontal().id_salt((&id_salt, "scroll")).show(ui, |ui| {
                Grid::new(&id_salt)
                    .num_columns(num_columns)
                    .striped(true)
                    .spacing([16.0, 0.0])
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        header::render_table_header(ui, table.headers(), delete.is_enabled());
                        ui.end_row();

                        for table_row in table.rows() {
                            let clicked = row::render_row(ui, table_row, delete.is_enabled());
                            ui.end_row();

                            if clicked {
                                response.deleted = Some(table_row.id);
                                if let DeleteColumn::Enabled(on_delete) = &mut delete {
                                    on_delete(table_row.id);
                                }
                            }
                        }
                    });
            });
        });

    response
}
