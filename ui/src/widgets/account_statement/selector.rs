//! Employee selector with its own load/retry states.

use egui::{ComboBox, Ui};
use nomina_business::{EmployeesCompute, EmployeesResult, SelectedEmployee, select_employee};
use nomina_states::StateCtx;

use super::load_employees;
use crate::utils::colors::COLOR_RED;

pub const PLACEHOLDER: &str = "Seleccionar empleado";
pub const RETRY_BUTTON: &str = "Reintentar";

pub fn employee_selector(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let selected = state_ctx.state::<SelectedEmployee>().id;
    let mut choice = selected;
    let mut retry = false;

    match &state_ctx.compute::<EmployeesCompute>().result {
        EmployeesResult::Idle | EmployeesResult::Loading => {
            ui.spinner();
            ui.label("Cargando empleados...");
        }
        EmployeesResult::Error(message) => {
            ui.colored_label(COLOR_RED, format!("Error al cargar empleados: {message}"));
            retry = ui.button(RETRY_BUTTON).clicked();
        }
        EmployeesResult::Loaded(employees) => {
            let selected_text = selected
                .and_then(|id| employees.iter().find(|employee| employee.id == id))
                .map_or(PLACEHOLDER, |employee| employee.name.as_str());

            ComboBox::from_id_salt("employee_selector")
                .selected_text(selected_text)
                .width(240.0)
                .show_ui(ui, |ui| {
                    for employee in employees {
                        ui.selectable_value(
                            &mut choice,
                            Some(employee.id),
                            employee.name.as_str(),
                        );
                    }
                });
        }
    }

    if retry {
        load_employees(state_ctx);
    }
    if choice != selected {
        select_employee(state_ctx, choice);
    }
}
