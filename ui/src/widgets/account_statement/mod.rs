//! Account statement page: employee selector, summary cards and the
//! payments/loans tables of the selected employee.

mod cards;
mod sections;
mod selector;
mod skeleton;

use egui::{Response, Ui};
use nomina_business::{
    EmployeesCompute, EmployeesResult, ListEmployeesCommand, StatementPhase, StatementViewCompute,
    reload_statement,
};
use nomina_states::StateCtx;

pub use sections::{LOANS_HEADING, PAYMENTS_HEADING};
pub use selector::{PLACEHOLDER, RETRY_BUTTON};
pub use skeleton::LOADING_TEXT;

use crate::utils::colors::COLOR_RED;

pub const FAILED_PREFIX: &str = "Error al cargar el estado de cuenta";

/// Displays the account statement page.
///
/// Reads [`StatementViewCompute`], so callers run `sync_computes` before and
/// `run_computed` after, as the app loop does.
pub fn account_statement_view(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    if state_ctx.compute::<EmployeesCompute>().is_idle() {
        load_employees(state_ctx);
    }

    let mut retry = false;
    let response = ui.vertical(|ui| {
        ui.heading("Estado de Cuenta");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Empleado:");
            selector::employee_selector(state_ctx, ui);
        });
        ui.separator();

        match &state_ctx.compute::<StatementViewCompute>().phase {
            StatementPhase::Unselected | StatementPhase::Absent => {}
            StatementPhase::Loading => skeleton::statement_skeleton(ui),
            StatementPhase::Failed(message) => {
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(COLOR_RED, format!("{FAILED_PREFIX}: {message}"));
                    retry = ui.button(RETRY_BUTTON).clicked();
                });
            }
            StatementPhase::Loaded(loaded) => {
                cards::summary_cards(ui, &loaded.cards);
                sections::statement_tables(ui, loaded);
            }
        }
    })
    .response;

    if retry {
        reload_statement(state_ctx);
    }
    response
}

/// Mark the employee list as loading and fetch it.
///
/// The loading value goes through the context's own updater so the next
/// frame does not see `Idle` again and dispatch twice.
fn load_employees(state_ctx: &mut StateCtx) {
    state_ctx.updater().set(EmployeesCompute {
        result: EmployeesResult::Loading,
    });
    state_ctx.dispatch::<ListEmployeesCommand>();
}
