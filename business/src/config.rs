use std::any::Any;

use nomina_states::{SnapshotClone, State, state_assign_impl};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(String),
    #[error("NOMINA_API_URL must start with http:// or https://, got {0:?}")]
    InvalidUrl(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    nomina_api_url: Option<String>,
    nomina_api_key: Option<String>,
}

/// Where the remote database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Sent as `apikey` and bearer token when present.
    pub api_key: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Base of the table endpoints, e.g. `https://db.example.com/rest/v1`.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.api_base_url.trim_end_matches('/'))
    }

    /// Read `NOMINA_API_URL` / `NOMINA_API_KEY`.
    ///
    /// `Ok(None)` when no URL is configured; the app then runs on demo data.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let raw: RawConfig =
            serde_env::from_env().map_err(|err| ConfigError::Env(err.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn from_iter<I, S>(vars: I) -> Result<Option<Self>, ConfigError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let raw: RawConfig =
            serde_env::from_iter(vars).map_err(|err| ConfigError::Env(err.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Option<Self>, ConfigError> {
        let Some(url) = raw.nomina_api_url.filter(|url| !url.trim().is_empty()) else {
            return Ok(None);
        };
        let url = url.trim().to_owned();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url));
        }

        let mut config = Self::new(url);
        config.api_key = raw.nomina_api_key.filter(|key| !key.is_empty());
        Ok(Some(config))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321")
    }
}

impl SnapshotClone for BusinessConfig {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for BusinessConfig {
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
