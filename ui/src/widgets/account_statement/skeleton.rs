use egui::{Frame, Margin, Sense, Ui, vec2};

use crate::utils::colors::SKELETON_COLOR;

pub const LOADING_TEXT: &str = "Cargando estado de cuenta...";

/// Placeholder block shown while the statement is being fetched.
pub fn statement_skeleton(ui: &mut Ui) {
    Frame::NONE.inner_margin(Margin::same(12)).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(LOADING_TEXT);
        });
        ui.add_space(8.0);

        for fraction in [0.9, 0.6, 0.75] {
            let size = vec2(ui.available_width() * fraction, 14.0);
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            ui.painter().rect_filled(rect, 4.0, SKELETON_COLOR);
            ui.add_space(6.0);
        }
    });
}
