//! Graph store doubles shared by the integration tests.

#![allow(dead_code)]

use medkg_rag::prelude::*;
use std::sync::Mutex;

/// Returns canned rows and records every query it receives.
pub struct RecordingStore {
    rows: Vec<ResultValue>,
    calls: Mutex<Vec<(QueryShape, QueryParams)>>,
}

impl RecordingStore {
    pub fn returning<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ResultValue>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::returning(Vec::<ResultValue>::new())
    }

    pub fn calls(&self) -> Vec<(QueryShape, QueryParams)> {
        self.calls.lock().unwrap().clone()
    }
}

impl GraphStore for RecordingStore {
    fn name(&self) -> &str {
        "recording"
    }

    fn run(&self, shape: &QueryShape, params: &QueryParams) -> std::result::Result<Vec<ResultValue>, GraphError> {
        shape.check_params(params)?;
        self.calls.lock().unwrap().push((*shape, params.clone()));
        Ok(self.rows.clone())
    }
}

/// Fails every query.
pub struct FailingStore;

impl GraphStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    fn run(&self, _: &QueryShape, _: &QueryParams) -> std::result::Result<Vec<ResultValue>, GraphError> {
        Err(GraphError::Unavailable("connection refused".to_string()))
    }
}
