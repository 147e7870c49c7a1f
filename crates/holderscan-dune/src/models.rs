//! Wire types for the Dune execution API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum ExecutionState {
    #[serde(rename = "QUERY_STATE_PENDING")]
    Pending,
    #[serde(rename = "QUERY_STATE_EXECUTING")]
    Executing,
    #[serde(rename = "QUERY_STATE_COMPLETED")]
    Completed,
    #[serde(rename = "QUERY_STATE_FAILED")]
    Failed,
    #[serde(rename = "QUERY_STATE_CANCELLED")]
    Cancelled,
    #[serde(rename = "QUERY_STATE_EXPIRED")]
    Expired,
}

impl ExecutionState {
    /// Terminal states end the poll loop; only `Completed` has rows.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending | Self::Executing)
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Executing => "executing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// `POST /query/{id}/execute` response.
#[derive(Clone, Debug, Deserialize)]
pub struct ExecuteResponse {
    pub execution_id: String,
    pub state: ExecutionState,
}

/// `GET /execution/{id}/status` response (fields we care about).
#[derive(Clone, Debug, Deserialize)]
pub struct StatusResponse {
    pub execution_id: String,
    pub state: ExecutionState,
    #[serde(default)]
    pub queue_position: Option<u32>,
}

/// `GET /execution/{id}/results` response.
#[derive(Clone, Debug, Deserialize)]
pub struct ResultsResponse {
    pub execution_id: String,
    pub state: ExecutionState,
    #[serde(default)]
    pub execution_ended_at: Option<DateTime<Utc>>,
    pub result: ResultPayload,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ResultPayload {
    pub rows: Vec<serde_json::Value>,
    #[serde(default)]
    pub metadata: Option<ResultMetadata>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ResultMetadata {
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub total_row_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!ExecutionState::Pending.is_terminal());
        assert!(!ExecutionState::Executing.is_terminal());
        assert!(ExecutionState::Completed.is_terminal());
        assert!(ExecutionState::Failed.is_terminal());
        assert!(ExecutionState::Cancelled.is_terminal());
        assert!(ExecutionState::Expired.is_terminal());
    }

    #[test]
    fn decodes_execute_response() {
        let json = r#"{"execution_id":"01HX2B3G4J5K6M7N8P","state":"QUERY_STATE_PENDING"}"#;
        let resp: ExecuteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.execution_id, "01HX2B3G4J5K6M7N8P");
        assert_eq!(resp.state, ExecutionState::Pending);
    }

    #[test]
    fn decodes_results_response() {
        let json = r#"{
            "execution_id": "01HX2B3G4J5K6M7N8P",
            "query_id": 3412345,
            "state": "QUERY_STATE_COMPLETED",
            "submitted_at": "2026-01-05T12:00:00Z",
            "execution_ended_at": "2026-01-05T12:00:09.5Z",
            "result": {
                "rows": [
                    {"wallet": "W1", "current_rank": 4, "initial_balance": "1500000.25", "current_balance": 1200000}
                ],
                "metadata": {
                    "column_names": ["wallet", "current_rank", "initial_balance", "current_balance"],
                    "total_row_count": 1
                }
            }
        }"#;
        let resp: ResultsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.state, ExecutionState::Completed);
        assert_eq!(resp.result.rows.len(), 1);
        assert!(resp.execution_ended_at.is_some());
        let meta = resp.result.metadata.unwrap();
        assert_eq!(meta.total_row_count, Some(1));
        assert_eq!(meta.column_names.len(), 4);
    }

    #[test]
    fn unknown_state_is_a_decode_error() {
        let json = r#"{"execution_id":"x","state":"QUERY_STATE_SOMETHING_NEW"}"#;
        assert!(serde_json::from_str::<StatusResponse>(json).is_err());
    }
}
