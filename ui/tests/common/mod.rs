use std::time::Duration;

use egui_kittest::Harness;
use nomina_ui::NominaApp;
use nomina_ui::state::State;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Time given to background commands between frames.
const FRAME_WAIT: Duration = Duration::from_millis(20);

pub struct TestCtx<'a> {
    /// Mock server must be retained to keep HTTP endpoints alive during tests.
    pub mock_server: MockServer,
    harness: Harness<'a, NominaApp>,
}

impl<'a> TestCtx<'a> {
    pub async fn new_app() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;
        mock_employees(&mock_server).await;

        let state = State::test(mock_server.uri());
        let app = NominaApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, NominaApp> {
        &mut self.harness
    }

    pub fn harness(&self) -> &Harness<'a, NominaApp> {
        &self.harness
    }

    /// Step frames, yielding to the runtime in between, until `done` holds.
    pub async fn run_until(&mut self, mut done: impl FnMut(&NominaApp) -> bool) {
        for _ in 0..100 {
            self.harness.step();
            if done(self.harness.state()) {
                // One more frame so the UI shows what the computes hold.
                self.harness.step();
                return;
            }
            tokio::time::sleep(FRAME_WAIT).await;
        }
        panic!("Condition not reached after 100 frames");
    }
}

async fn mock_employees(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/empleados"))
        .and(query_param("select", "id,nombre"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "nombre": "Ana Torres" },
            { "id": 2, "nombre": "Luis Ramírez" }
        ])))
        .mount(server)
        .await;
}

/// Mount one employee's statement; `payments` go to `pagos`, `loans` to `prestamos`.
pub async fn mock_statement(
    server: &MockServer,
    employee_id: &str,
    payments: serde_json::Value,
    loans: serde_json::Value,
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/empleados"))
        .and(query_param("id", format!("eq.{employee_id}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "id": employee_id }])),
        )
        .mount(server)
        .await;

    let tables = [
        ("pagos", payments),
        ("tiempo_extra", serde_json::json!([])),
        ("descuentos", serde_json::json!([])),
        ("prestamos", loans),
        ("faltas", serde_json::json!([])),
    ];
    for (table, rows) in tables {
        Mock::given(method("GET"))
            .and(path(format!("/rest/v1/{table}")))
            .and(query_param("empleado_id", format!("eq.{employee_id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(rows)
                    .set_delay(delay),
            )
            .mount(server)
            .await;
    }
}

pub fn sample_payment() -> serde_json::Value {
    serde_json::json!([{
        "id": 10,
        "fecha": "2024-01-01",
        "periodo": "Ene",
        "salario_base": 1000,
        "tiempo_extra": 50,
        "descuentos": 20,
        "total": 1030
    }])
}

pub fn sample_loan() -> serde_json::Value {
    serde_json::json!([{
        "id": 20,
        "fecha": "2024-01-01",
        "monto": 500,
        "saldo": 200,
        "status": "activo"
    }])
}
