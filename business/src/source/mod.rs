//! Data source seam between commands and the remote database.
//!
//! Commands only see [`StatementSource`]; production wires the REST client,
//! tests and the demo build wire the in-memory source.

mod memory;
mod rest;

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use nomina_states::{SnapshotClone, State, state_assign_impl};
use thiserror::Error;

use crate::models::{AccountStatement, Employee, RecordKind};

pub use memory::InMemoryStatementSource;
pub use rest::RestStatementSource;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },
    #[error("no {kind} record with id {id}")]
    NotFound { kind: RecordKind, id: String },
}

pub type SourceResult<T> = Result<T, SourceError>;

#[async_trait]
pub trait StatementSource: Send + Sync + Debug {
    /// Employees for the selector, in display order.
    async fn list_employees(&self) -> SourceResult<Vec<Employee>>;

    /// `Ok(None)` when the employee has no statement; that is not an error.
    async fn get_statement(&self, employee_id: &str) -> SourceResult<Option<AccountStatement>>;

    async fn delete_record(&self, kind: RecordKind, id: &str) -> SourceResult<()>;
}

/// The active data source, stored in `StateCtx` so commands can snapshot it.
#[derive(Debug, Clone)]
pub struct StatementSourceState {
    pub inner: Arc<dyn StatementSource>,
}

impl StatementSourceState {
    pub fn new(source: impl StatementSource + 'static) -> Self {
        Self {
            inner: Arc::new(source),
        }
    }
}

impl Default for StatementSourceState {
    fn default() -> Self {
        Self::new(InMemoryStatementSource::default())
    }
}

impl SnapshotClone for StatementSourceState {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for StatementSourceState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
