//! Dune Analytics adapter.
//!
//! Implements the `holderscan-core` query port over the Dune execution API:
//! execute the pre-registered query with a bound `token_mint` parameter, poll
//! the execution status until it is terminal, then fetch the result rows.

pub mod models;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use holderscan_core::{
    config::DEFAULT_DUNE_API_URL, domain::HolderRow, errors::Error, ports::HolderQueries, Result,
};

use crate::models::{ExecuteResponse, ExecutionState, ResultsResponse, StatusResponse};

const API_KEY_HEADER: &str = "X-Dune-API-Key";

#[derive(Clone, Debug)]
pub struct DuneClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    query_id: u64,
    poll_interval: Duration,
}

impl DuneClient {
    pub fn new(api_key: impl Into<String>, query_id: u64) -> Self {
        Self::with_base_url(api_key, query_id, DEFAULT_DUNE_API_URL)
    }

    /// Custom base URL, mainly for tests against a local stub.
    pub fn with_base_url(
        api_key: impl Into<String>,
        query_id: u64,
        base_url: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client build");

        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query_id,
            poll_interval: Duration::from_secs(1),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn execute(&self, token_mint: &str) -> Result<ExecuteResponse> {
        let url = format!("{}/query/{}/execute", self.base_url, self.query_id);
        let body = json!({ "query_parameters": { "token_mint": token_mint } });
        self.request_json(self.http.post(&url).json(&body)).await
    }

    async fn status(&self, execution_id: &str) -> Result<StatusResponse> {
        let url = format!("{}/execution/{execution_id}/status", self.base_url);
        self.request_json(self.http.get(&url)).await
    }

    async fn results(&self, execution_id: &str) -> Result<ResultsResponse> {
        let url = format!("{}/execution/{execution_id}/results", self.base_url);
        self.request_json(self.http.get(&url)).await
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T> {
        let resp = req
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| Error::Query(format!("dune request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Query(format!(
                "dune api returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| Error::Query(format!("dune response decode error: {e}")))
    }
}

#[async_trait]
impl HolderQueries for DuneClient {
    async fn first_buyers_still_top(&self, token_mint: &str) -> Result<Vec<HolderRow>> {
        let exec = self.execute(token_mint).await?;
        tracing::info!(execution_id = %exec.execution_id, "dune execution started");

        let mut state = exec.state;
        while !state.is_terminal() {
            tokio::time::sleep(self.poll_interval).await;
            let status = self.status(&exec.execution_id).await?;
            if let Some(pos) = status.queue_position {
                tracing::debug!(queue_position = pos, "dune execution queued");
            }
            state = status.state;
        }

        if state != ExecutionState::Completed {
            return Err(Error::Query(format!(
                "query execution ended in state {state}"
            )));
        }

        let results = self.results(&exec.execution_id).await?;
        let rows = results
            .result
            .rows
            .iter()
            .map(holder_row_from_value)
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            rows = rows.len(),
            ended_at = ?results.execution_ended_at,
            "dune execution finished"
        );
        Ok(rows)
    }
}

/// Map one result-row object onto the columns the overlap query contracts to
/// return. A missing or mistyped column is a malformed result.
fn holder_row_from_value(row: &Value) -> Result<HolderRow> {
    Ok(HolderRow {
        wallet: string_column(row, "wallet")?,
        current_rank: int_column(row, "current_rank")?,
        initial_balance: decimal_column(row, "initial_balance")?,
        current_balance: decimal_column(row, "current_balance")?,
    })
}

fn string_column(row: &Value, name: &str) -> Result<String> {
    match row.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(malformed_column(name)),
    }
}

fn int_column(row: &Value, name: &str) -> Result<i64> {
    match row.get(name) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| malformed_column(name)),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| malformed_column(name)),
        _ => Err(malformed_column(name)),
    }
}

// Balances may arrive as strings or JSON numbers; keep the textual form and
// let the formatter do the numeric interpretation.
fn decimal_column(row: &Value, name: &str) -> Result<String> {
    match row.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(malformed_column(name)),
    }
}

fn malformed_column(name: &str) -> Error {
    Error::Query(format!("result row is missing column {name:?}"))
}
