//! REST client for a PostgREST-style database endpoint (`{base}/rest/v1/{table}`).

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{SourceError, SourceResult, StatementSource};
use crate::config::BusinessConfig;
use crate::models::{AccountStatement, Employee, RecordKind};

const EMPLOYEES_TABLE: &str = "empleados";

#[derive(Debug, Clone)]
pub struct RestStatementSource {
    client: Client,
    rest_url: String,
    api_key: Option<String>,
}

impl RestStatementSource {
    pub fn new(config: &BusinessConfig) -> Self {
        Self {
            client: Client::new(),
            rest_url: config.rest_url(),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: Method, table: &str) -> (String, RequestBuilder) {
        let url = format!("{}/{table}", self.rest_url);
        let mut request = self
            .client
            .request(method, &url)
            .header("accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }
        (url, request)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, String)],
    ) -> SourceResult<Vec<T>> {
        let (url, request) = self.request(Method::GET, table);
        debug!("GET {url} {query:?}");

        let response = request
            .query(query)
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| SourceError::Http {
            url: url.clone(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|err| SourceError::Decode {
            what: table,
            message: err.to_string(),
        })
    }

    async fn rows_for<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
        employee_id: &str,
    ) -> SourceResult<Vec<T>> {
        self.select(
            kind.table(),
            &[
                ("empleado_id", format!("eq.{employee_id}")),
                ("order", "fecha.desc".to_owned()),
            ],
        )
        .await
    }
}

#[async_trait]
impl StatementSource for RestStatementSource {
    async fn list_employees(&self) -> SourceResult<Vec<Employee>> {
        self.select(
            EMPLOYEES_TABLE,
            &[
                ("select", "id,nombre".to_owned()),
                ("order", "nombre.asc".to_owned()),
            ],
        )
        .await
    }

    async fn get_statement(&self, employee_id: &str) -> SourceResult<Option<AccountStatement>> {
        let found: Vec<serde_json::Value> = self
            .select(
                EMPLOYEES_TABLE,
                &[
                    ("id", format!("eq.{employee_id}")),
                    ("select", "id".to_owned()),
                ],
            )
            .await?;
        if found.is_empty() {
            info!("No employee {employee_id}; statement is absent");
            return Ok(None);
        }

        let (payments, overtime, deductions, loans, absences) = tokio::try_join!(
            self.rows_for(RecordKind::Payment, employee_id),
            self.rows_for(RecordKind::Overtime, employee_id),
            self.rows_for(RecordKind::Deduction, employee_id),
            self.rows_for(RecordKind::Loan, employee_id),
            self.rows_for(RecordKind::Absence, employee_id),
        )?;

        Ok(Some(AccountStatement {
            payments,
            overtime,
            deductions,
            loans,
            absences,
        }))
    }

    async fn delete_record(&self, kind: RecordKind, id: &str) -> SourceResult<()> {
        let (url, request) = self.request(Method::DELETE, kind.table());
        debug!("DELETE {url} id={id}");

        let response = request
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }
        info!("Deleted {kind} record {id}");
        Ok(())
    }
}
