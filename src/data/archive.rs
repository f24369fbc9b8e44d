//! NASA Exoplanet Archive integration (TAP sync endpoint, `pscomppars` table).

use std::time::Duration;

use reqwest::blocking::Client;

use crate::data::catalog::{Catalog, CatalogError, CatalogRecord};
use crate::data::resolver::CATALOG_COLUMNS;
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TABLE: &str = "pscomppars";

const ENV_BASE_URL: &str = "EXO_ARCHIVE_URL";
const ENV_TIMEOUT: &str = "EXO_ARCHIVE_TIMEOUT_SECS";

pub struct ArchiveClient {
    client: Client,
    base_url: String,
}

impl ArchiveClient {
    /// Build a client from the environment (`.env` is loaded when present).
    ///
    /// - `EXO_ARCHIVE_URL`: TAP sync endpoint
    /// - `EXO_ARCHIVE_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match std::env::var(ENV_TIMEOUT) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::input(format!("Invalid {ENV_TIMEOUT} '{raw}': {e}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::runtime(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Catalog for ArchiveClient {
    fn lookup(&self, name: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
        let query = build_query(name);
        tracing::debug!(planet = name, %query, "querying exoplanet archive");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("query", query.as_str()), ("format", "json")])
            .send()
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status().as_u16()));
        }

        let records: Vec<CatalogRecord> = resp
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::debug!(planet = name, matches = records.len(), "archive lookup complete");
        Ok(records)
    }
}

/// ADQL query selecting the resolver's columns for one planet name.
pub fn build_query(name: &str) -> String {
    format!(
        "select {} from {TABLE} where pl_name = '{}'",
        CATALOG_COLUMNS.join(","),
        escape_literal(name)
    )
}

/// Escape a value for use inside a single-quoted ADQL string literal.
fn escape_literal(raw: &str) -> String {
    raw.replace('\'', "''")
}
