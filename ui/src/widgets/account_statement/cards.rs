//! Summary cards: one count per statement sequence.

use egui::{Frame, Margin, RichText, Ui};
use nomina_business::SummaryCard;

use crate::utils::colors::COLOR_AMBER;

pub fn summary_cards(ui: &mut Ui, cards: &[SummaryCard]) {
    ui.horizontal_wrapped(|ui| {
        for card in cards {
            summary_card(ui, card);
        }
    });
}

fn summary_card(ui: &mut Ui, card: &SummaryCard) {
    Frame::group(ui.style())
        .inner_margin(Margin::same(12))
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.set_min_width(110.0);
            ui.vertical(|ui| {
                ui.label(card.label);

                let mut count = RichText::new(card.count.to_string()).size(22.0).strong();
                if card.attention {
                    count = count.color(COLOR_AMBER);
                }
                ui.label(count);
            });
        });
}
