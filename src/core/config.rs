

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{PurgeError, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

pub const DEFAULT_STORAGE_URL: &str = "https://firebasestorage.googleapis.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_PREFIX: &str = "PURGE";


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeConfig {
    /// Property backend serving `getPropertyDetails` and `updatePropStatus`.
    pub backend_url: String,
    /// Bucket used for media references given as bare object paths.
    pub storage_bucket: Option<String>,
    pub storage_base_url: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    pub user_agent: String,
}

impl PurgeConfig {

    pub fn new(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            storage_bucket: None,
            storage_base_url: DEFAULT_STORAGE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("listing-purge/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }


    /// Layers defaults, an optional config file and `PURGE_*` environment
    /// variables, in that order of precedence.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("backend_url", defaults.backend_url)?
            .set_default("storage_base_url", defaults.storage_base_url)?
            .set_default("timeout", defaults.timeout)?
            .set_default("user_agent", defaults.user_agent)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }


    pub fn validate(&self) -> Result<()> {
        if self.backend_url.trim().is_empty() {
            return Err(PurgeError::Config("backend_url must not be empty".to_string()));
        }
        Url::parse(&self.backend_url)?;
        Url::parse(&self.storage_base_url)?;

        if self.timeout == 0 {
            return Err(PurgeError::Config("timeout must be greater than zero".to_string()));
        }
        if matches!(&self.storage_bucket, Some(b) if b.trim().is_empty()) {
            return Err(PurgeError::Config("storage_bucket must not be blank".to_string()));
        }

        Ok(())
    }


    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Builds the shared HTTP client used by both backends.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout())
            .user_agent(self.user_agent.clone())
            .build()?;
        Ok(client)
    }
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
