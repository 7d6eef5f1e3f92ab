//! Helpers for driving the business commands against a [`StateCtx`].
//!
//! Commands run on the test's tokio runtime; [`TestContext::flush_and_wait`]
//! spawns everything queued and applies the results.

use std::time::Duration;

use chrono::NaiveDate;
use nomina_states::StateCtx;
use ustr::Ustr;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::{
    AccountStatement, BusinessConfig, Employee, InMemoryStatementSource, Loan, Payment,
    RestStatementSource, StatementSourceState, register,
};

pub struct TestContext {
    pub ctx: StateCtx,
}

impl TestContext {
    pub fn new(source: InMemoryStatementSource) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut ctx = StateCtx::new();
        register(
            &mut ctx,
            BusinessConfig::default(),
            StatementSourceState::new(source),
        );
        Self { ctx }
    }

    /// Context backed by the REST client pointed at `server`.
    pub fn with_server(server: &MockServer) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = BusinessConfig::new(server.uri());
        let mut ctx = StateCtx::new();
        register(
            &mut ctx,
            config.clone(),
            StatementSourceState::new(RestStatementSource::new(&config)),
        );
        Self { ctx }
    }

    /// Flush queued commands, await every task and settle the computes.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();
        while self.ctx.task_count() > 0 {
            assert!(
                start.elapsed() < timeout,
                "Timed out waiting for {} pending tasks",
                self.ctx.task_count()
            );
            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
        self.ctx.run_computed();
    }

    pub async fn shutdown(&mut self) {
        self.ctx.shutdown().await;
    }
}

pub fn employee(id: &str, name: &str) -> Employee {
    Employee {
        id: Ustr::from(id),
        name: name.to_owned(),
    }
}

pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

/// One payment and one loan, matching the single-employee scenario.
pub fn sample_statement() -> AccountStatement {
    AccountStatement {
        payments: vec![Payment {
            id: Ustr::from("p1"),
            date: Some(sample_date()),
            period: "Ene".to_owned(),
            base_salary: 1000.0,
            overtime: 50.0,
            deductions: 20.0,
            total: 1030.0,
        }],
        loans: vec![Loan {
            id: Ustr::from("l1"),
            date: Some(sample_date()),
            amount: 500.0,
            balance: 200.0,
            status: "activo".to_owned(),
        }],
        ..AccountStatement::default()
    }
}

/// Mount the five statement tables for `employee_id`; only `pagos` has rows.
pub async fn mock_statement_tables(
    server: &MockServer,
    employee_id: &str,
    payments: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/empleados"))
        .and(query_param("id", format!("eq.{employee_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": employee_id }
        ])))
        .mount(server)
        .await;

    for table in ["tiempo_extra", "descuentos", "prestamos", "faltas"] {
        Mock::given(method("GET"))
            .and(path(format!("/rest/v1/{table}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/rest/v1/pagos"))
        .and(query_param("empleado_id", format!("eq.{employee_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(payments))
        .mount(server)
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AccountStatementCompute, DeleteRecordCompute, DeleteRecordInput, DeleteState,
        EmployeesCompute, EmployeesResult, FetchAccountStatementCommand, ListEmployeesCommand,
        RecordKind, SelectedEmployee, StatementPhase, StatementResult, StatementViewCompute,
        refresh_after_delete, reload_statement, request_delete, select_employee,
    };

    fn phase(test_ctx: &TestContext) -> &StatementPhase {
        &test_ctx.ctx.compute::<StatementViewCompute>().phase
    }

    #[tokio::test]
    async fn employees_load_into_the_selector_cache() {
        let mut test_ctx = TestContext::new(InMemoryStatementSource::new(vec![
            employee("1", "Ana"),
            employee("2", "Luis"),
        ]));

        test_ctx.ctx.enqueue_command::<ListEmployeesCommand>();
        test_ctx.flush_and_wait().await;

        let employees = test_ctx.ctx.compute::<EmployeesCompute>();
        assert_eq!(employees.employees().len(), 2);
        assert_eq!(employees.employees()[0].name, "Ana");

        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn unselected_page_stays_idle_without_io() {
        let mut test_ctx = TestContext::new(InMemoryStatementSource::default());

        test_ctx.ctx.enqueue_command::<FetchAccountStatementCommand>();
        test_ctx.flush_and_wait().await;

        let cache = test_ctx.ctx.compute::<AccountStatementCompute>();
        assert_eq!(cache.result, StatementResult::Idle);
        assert!(!cache.is_loading());
        assert_eq!(phase(&test_ctx), &StatementPhase::Unselected);
    }

    #[tokio::test]
    async fn selecting_an_employee_loads_its_statement() {
        let source = InMemoryStatementSource::new(vec![employee("1", "Ana")])
            .with_statement("1", sample_statement());
        let mut test_ctx = TestContext::new(source);

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("1")));
        test_ctx.flush_and_wait().await;

        let StatementPhase::Loaded(sections) = phase(&test_ctx) else {
            panic!("expected loaded, got {:?}", phase(&test_ctx));
        };
        let counts: Vec<_> = sections.cards.iter().map(|card| card.count).collect();
        assert_eq!(counts, [1, 0, 0, 1, 0]);

        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn selection_reads_as_loading_until_the_fetch_lands() {
        let source = InMemoryStatementSource::new(vec![employee("1", "Ana")])
            .with_statement("1", sample_statement())
            .with_delay("1", Duration::from_millis(50));
        let mut test_ctx = TestContext::new(source);

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("1")));
        test_ctx.ctx.run_computed();
        assert_eq!(phase(&test_ctx), &StatementPhase::Loading);

        test_ctx.flush_and_wait().await;
        assert!(matches!(phase(&test_ctx), StatementPhase::Loaded(_)));

        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn last_selected_employee_wins() {
        let source = InMemoryStatementSource::new(vec![employee("A", "Ana"), employee("B", "Beto")])
            .with_statement("A", sample_statement())
            .with_statement("B", AccountStatement::default())
            .with_delay("A", Duration::from_millis(200));
        let mut test_ctx = TestContext::new(source);

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("A")));
        select_employee(&mut test_ctx.ctx, Some(Ustr::from("B")));
        test_ctx.flush_and_wait().await;

        let cache = test_ctx.ctx.compute::<AccountStatementCompute>();
        assert_eq!(cache.employee_id, Some(Ustr::from("B")));
        let StatementPhase::Loaded(sections) = phase(&test_ctx) else {
            panic!("expected loaded, got {:?}", phase(&test_ctx));
        };
        assert!(sections.payments.is_none());
        assert!(sections.loans.is_none());

        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn employee_without_statement_renders_nothing() {
        let mut test_ctx =
            TestContext::new(InMemoryStatementSource::new(vec![employee("3", "María")]));

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("3")));
        test_ctx.flush_and_wait().await;

        assert_eq!(phase(&test_ctx), &StatementPhase::Absent);
        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn failed_fetch_is_surfaced() {
        let source =
            InMemoryStatementSource::new(vec![employee("1", "Ana")]).with_failure("1");
        let mut test_ctx = TestContext::new(source);

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("1")));
        test_ctx.flush_and_wait().await;

        assert!(matches!(phase(&test_ctx), StatementPhase::Failed(_)));
        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn reload_after_failure_fetches_again() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/pagos"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        mock_statement_tables(
            &server,
            "7",
            serde_json::json!([{
                "id": 1,
                "fecha": "2024-01-01",
                "periodo": "Ene",
                "salario_base": 1000,
                "tiempo_extra": 0,
                "descuentos": 0,
                "total": 1000
            }]),
        )
        .await;
        let mut test_ctx = TestContext::with_server(&server);

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("7")));
        test_ctx.flush_and_wait().await;
        assert!(matches!(phase(&test_ctx), StatementPhase::Failed(_)));

        reload_statement(&mut test_ctx.ctx);
        test_ctx.flush_and_wait().await;

        let StatementPhase::Loaded(sections) = phase(&test_ctx) else {
            panic!("expected loaded, got {:?}", phase(&test_ctx));
        };
        assert_eq!(sections.cards[0].count, 1);
        test_ctx.shutdown().await;
    }

    #[test]
    fn reload_without_selection_does_nothing() {
        let mut test_ctx = TestContext::new(InMemoryStatementSource::default());

        reload_statement(&mut test_ctx.ctx);
        test_ctx.ctx.sync_computes();

        let cache = test_ctx.ctx.compute::<AccountStatementCompute>();
        assert_eq!(cache.result, StatementResult::Idle);
    }

    #[tokio::test]
    async fn clearing_the_selection_resets_the_page() {
        let source = InMemoryStatementSource::new(vec![employee("1", "Ana")])
            .with_statement("1", sample_statement());
        let mut test_ctx = TestContext::new(source);

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("1")));
        test_ctx.flush_and_wait().await;
        select_employee(&mut test_ctx.ctx, None);
        test_ctx.flush_and_wait().await;

        assert_eq!(test_ctx.ctx.state::<SelectedEmployee>().id, None);
        assert_eq!(phase(&test_ctx), &StatementPhase::Unselected);
        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn delete_refetches_the_selected_statement() {
        let source = InMemoryStatementSource::new(vec![employee("1", "Ana")])
            .with_statement("1", sample_statement());
        let mut test_ctx = TestContext::new(source);

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("1")));
        test_ctx.flush_and_wait().await;

        request_delete(&mut test_ctx.ctx, RecordKind::Loan, Ustr::from("l1"));
        test_ctx.flush_and_wait().await;
        assert_eq!(
            test_ctx.ctx.compute::<DeleteRecordCompute>().state,
            DeleteState::Deleted {
                kind: RecordKind::Loan,
                id: Ustr::from("l1"),
            }
        );

        assert!(refresh_after_delete(&mut test_ctx.ctx));
        test_ctx.flush_and_wait().await;
        assert!(!refresh_after_delete(&mut test_ctx.ctx));

        let StatementPhase::Loaded(sections) = phase(&test_ctx) else {
            panic!("expected loaded, got {:?}", phase(&test_ctx));
        };
        assert_eq!(sections.cards[3].count, 0);
        assert!(sections.loans.is_none());
        assert!(sections.payments.is_some());

        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn failed_delete_does_not_refetch() {
        let source = InMemoryStatementSource::new(vec![employee("1", "Ana")])
            .with_statement("1", sample_statement());
        let mut test_ctx = TestContext::new(source);

        request_delete(&mut test_ctx.ctx, RecordKind::Payment, Ustr::from("missing"));
        test_ctx.flush_and_wait().await;

        assert!(matches!(
            test_ctx.ctx.compute::<DeleteRecordCompute>().state,
            DeleteState::Error(_)
        ));
        assert!(!refresh_after_delete(&mut test_ctx.ctx));
        assert_eq!(
            test_ctx.ctx.state::<DeleteRecordInput>().target,
            Some((RecordKind::Payment, Ustr::from("missing")))
        );
        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn statement_loads_through_the_rest_client() {
        let server = MockServer::start().await;
        mock_statement_tables(
            &server,
            "7",
            serde_json::json!([{
                "id": 1,
                "fecha": "2024-01-01",
                "periodo": "Ene",
                "salario_base": 1000,
                "tiempo_extra": 50,
                "descuentos": 20,
                "total": 1030
            }]),
        )
        .await;
        let mut test_ctx = TestContext::with_server(&server);

        select_employee(&mut test_ctx.ctx, Some(Ustr::from("7")));
        test_ctx.flush_and_wait().await;

        let StatementPhase::Loaded(sections) = phase(&test_ctx) else {
            panic!("expected loaded, got {:?}", phase(&test_ctx));
        };
        let payments = sections.payments.as_ref().expect("payments");
        assert_eq!(
            payments.rows()[0].display_cells(),
            ["2024-01-01", "Ene", "$1,000", "$50", "$20", "$1,030"]
        );
        test_ctx.shutdown().await;
    }

    #[tokio::test]
    async fn employee_list_error_is_kept_for_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/empleados"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let mut test_ctx = TestContext::with_server(&server);

        test_ctx.ctx.enqueue_command::<ListEmployeesCommand>();
        test_ctx.flush_and_wait().await;

        let employees = test_ctx.ctx.compute::<EmployeesCompute>();
        assert!(matches!(employees.result, EmployeesResult::Error(_)));
        assert!(employees.error_message().is_some_and(|msg| msg.contains("500")));
        test_ctx.shutdown().await;
    }
}
