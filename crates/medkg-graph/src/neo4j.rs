//! Neo4j backend over the transactional HTTP endpoint.
//!
//! Requires the `neo4j` feature for the client itself. The wire types and
//! row decoding are always compiled so they can be exercised without a
//! server.
//!
//! The client is blocking. Drive it from a plain thread or
//! `spawn_blocking`, never directly inside an async task.

use medkg_core::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neo4jConfig {
    /// HTTP base URI, e.g. `http://localhost:7474`.
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub timeout_secs: u64,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "http://localhost:7474".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Neo4jConfig {
    /// URL of the auto-commit transaction endpoint.
    pub fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.uri.trim_end_matches('/'),
            self.database
        )
    }
}

/// Request body for `tx/commit`.
#[derive(Debug, Serialize)]
pub struct TxRequest {
    pub statements: Vec<TxStatement>,
}

#[derive(Debug, Serialize)]
pub struct TxStatement {
    pub statement: String,
    pub parameters: serde_json::Map<String, Value>,
}

impl TxRequest {
    /// Build a single-statement request from a shape and its parameters.
    pub fn single(shape: &QueryShape, params: &QueryParams) -> Self {
        let parameters = params
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Self {
            statements: vec![TxStatement {
                statement: shape.to_cypher(params),
                parameters,
            }],
        }
    }
}

/// Response body of `tx/commit`.
#[derive(Debug, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub results: Vec<TxResult>,
    #[serde(default)]
    pub errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
pub struct TxResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
pub struct TxRow {
    pub row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TxError {
    pub code: String,
    pub message: String,
}

impl TxResponse {
    /// Extract the `result` column. Null and non-string values are dropped.
    pub fn into_rows(self) -> std::result::Result<Vec<ResultValue>, GraphError> {
        if let Some(err) = self.errors.first() {
            return Err(GraphError::QueryFailed(format!("{}: {}", err.code, err.message)));
        }

        let mut rows = Vec::new();
        for result in self.results {
            let column = result
                .columns
                .iter()
                .position(|c| c == "result")
                .unwrap_or(0);
            rows.extend(
                result
                    .data
                    .iter()
                    .filter_map(|r| r.row.get(column))
                    .filter_map(decode_value),
            );
        }
        Ok(rows)
    }
}

fn decode_value(value: &Value) -> Option<ResultValue> {
    match value {
        Value::String(s) => Some(ResultValue::Text(s.clone())),
        Value::Number(n) => Some(ResultValue::Text(n.to_string())),
        Value::Array(items) => Some(ResultValue::List(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) if s.trim().is_empty() => None,
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
        )),
        _ => None,
    }
}

#[cfg(feature = "neo4j")]
pub use client::Neo4jStore;

#[cfg(feature = "neo4j")]
mod client {
    use super::*;
    use std::time::Duration;

    /// Graph store backed by a Neo4j server.
    pub struct Neo4jStore {
        config: Neo4jConfig,
        client: reqwest::blocking::Client,
    }

    impl Neo4jStore {
        pub fn connect(config: Neo4jConfig) -> std::result::Result<Self, GraphError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| GraphError::Unavailable(e.to_string()))?;
            tracing::info!(uri = %config.uri, database = %config.database, "neo4j store configured");
            Ok(Self { config, client })
        }

        pub fn config(&self) -> &Neo4jConfig {
            &self.config
        }
    }

    impl GraphStore for Neo4jStore {
        fn name(&self) -> &str {
            "neo4j"
        }

        fn run(&self, shape: &QueryShape, params: &QueryParams) -> std::result::Result<Vec<ResultValue>, GraphError> {
            shape.check_params(params)?;
            let request = TxRequest::single(shape, params);
            tracing::debug!(statement = %request.statements[0].statement, "running cypher");

            let response = self
                .client
                .post(self.config.commit_url())
                .basic_auth(&self.config.user, Some(&self.config.password))
                .json(&request)
                .send()
                .map_err(|e| {
                    if e.is_connect() || e.is_timeout() {
                        GraphError::Unavailable(format!(
                            "cannot reach Neo4j at {}: {}",
                            self.config.uri, e
                        ))
                    } else {
                        GraphError::QueryFailed(e.to_string())
                    }
                })?;

            let status = response.status();
            if status.as_u16() == 401 {
                return Err(GraphError::Unavailable("authentication failed".to_string()));
            }
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(GraphError::QueryFailed(format!("Neo4j error {}: {}", status, body)));
            }

            let body: TxResponse = response
                .json()
                .map_err(|e| GraphError::QueryFailed(format!("invalid response: {e}")))?;
            body.into_rows()
        }
    }
}
