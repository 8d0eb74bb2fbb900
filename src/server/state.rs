//! Shared request state

use super::auth::AuthPolicy;
use crate::config::MockConfig;
use crate::core::csv::CsvHeaderTable;
use crate::domain::{OdmCatalog, Result};
use std::sync::Arc;

/// State handed to every handler
///
/// Everything inside is built once before the listener starts and is read-only
/// afterwards; cloning only bumps reference counts.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<OdmCatalog>,
    pub csv_headers: Arc<CsvHeaderTable>,
    pub auth: Arc<AuthPolicy>,
    pub rws_version: Arc<str>,
    pub cache_flush_status: Arc<str>,
    pub body_limit: usize,
}

impl AppState {
    /// Materializes the catalog and every other table from a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the MAuth header name is not a valid HTTP header name.
    pub fn from_config(config: &MockConfig) -> Result<Self> {
        Ok(Self {
            catalog: Arc::new(OdmCatalog::from_config(config)),
            csv_headers: Arc::new(CsvHeaderTable::new(config.csv_datasets.clone())),
            auth: Arc::new(AuthPolicy::from_config(&config.auth)?),
            rws_version: Arc::from(config.rws.version.as_str()),
            cache_flush_status: Arc::from(config.cache.flush_status.as_str()),
            body_limit: config.server.body_limit,
        })
    }
}
