use std::time::Duration;

use nomina_business::refresh_after_delete;

use crate::{state::State, widgets};

/// How often to poll for command results while tasks are running.
const TASK_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct NominaApp {
    pub state: State,
}

impl NominaApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for NominaApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Sync Compute for render
        self.state.ctx.sync_computes();
        refresh_after_delete(&mut self.state.ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.strong("Nómina RH");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                widgets::account_statement_view(&mut self.state.ctx, ui);
            });
        });

        // Settle derived computes for the next frame
        self.state.ctx.run_computed();

        if self.state.ctx.task_count() > 0 {
            ctx.request_repaint_after(TASK_POLL_INTERVAL);
        }
    }
}
