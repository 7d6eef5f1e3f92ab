//! Header row rendering.

use egui::{Frame, InnerResponse, Margin, Ui};

use super::ACTIONS_HEADER;
use crate::utils::colors::HEADER_BG_COLOR;

/// Renders one bold header cell per label, plus "Acciones" when deletes are enabled.
pub fn render_table_header(ui: &mut Ui, headers: &[String], with_actions: bool) {
    for label in headers {
        header_cell(ui, |ui| {
            ui.strong(label.as_str());
        });
    }
    if with_actions {
        header_cell(ui, |ui| {
            ui.strong(ACTIONS_HEADER);
        });
    }
}

fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}
