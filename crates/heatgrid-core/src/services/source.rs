//! Data source abstraction
//!
//! One trait covers both forms of the data contract: an in-memory
//! record list resolved synchronously, and an HTTP endpoint returning a
//! JSON array of records. The pipeline consumes either transparently.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use crate::error::{Error, Result};
use crate::models::Record;

/// Fetch parameters for one render pass
#[derive(Debug, Clone, Default)]
pub struct FetchQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Extra key/value pairs from the `query_params` callback
    pub params: Vec<(String, String)>,
}

/// Trait for pluggable record sources
///
/// Implement this trait to feed the heatmap from a new transport. A
/// source returns the raw records for a pass; validation and bucketing
/// happen downstream in the pipeline.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short identifier used in logs (e.g. "inline", "http")
    fn source_name(&self) -> &'static str;

    /// Fetch records for the given query
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<Record>>;
}

/// In-memory records, resolved without any transport
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    records: Vec<Record>,
}

impl InlineSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DataSource for InlineSource {
    fn source_name(&self) -> &'static str {
        "inline"
    }

    async fn fetch(&self, _query: &FetchQuery) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }
}

/// Remote JSON endpoint queried with `startDate`/`endDate` plus any
/// custom parameters
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn source_name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<Record>> {
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(start) = query.start_date {
            params.push(("startDate".to_string(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = query.end_date {
            params.push(("endDate".to_string(), end.format("%Y-%m-%d").to_string()));
        }
        params.extend(query.params.iter().cloned());

        debug!("fetching records from {} ({} params)", self.url, params.len());
        let response = self
            .client
            .get(&self.url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        if !body.is_array() {
            return Err(Error::data_shape("response is not a JSON array of records"));
        }
        serde_json::from_value(body)
            .map_err(|e| Error::data_shape(format!("invalid record in response: {}", e)))
    }
}
