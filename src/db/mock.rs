//! Mock database clients for testing.
//!
//! Provides in-memory client implementations so component behavior can be
//! tested without a running database.

use super::{ColumnInfo, DatabaseClient, ParamStyle, QueryResult, Row};
use crate::error::{Result, SuggestError};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A mock database client that returns predefined rows and records every
/// query it receives.
pub struct MockDatabaseClient {
    columns: Vec<ColumnInfo>,
    rows: Vec<Row>,
    param_style: ParamStyle,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockDatabaseClient {
    /// Creates a new mock client that returns no rows.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            param_style: ParamStyle::Question,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock client that returns the given columns and rows for
    /// every query.
    pub fn with_rows(columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            param_style: ParamStyle::Question,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Overrides the placeholder style the mock reports.
    pub fn with_param_style(mut self, style: ParamStyle) -> Self {
        self.param_style = style;
        self
    }

    /// Returns the `(sql, params)` pairs received so far, in order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Returns how many queries have been executed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    fn param_style(&self) -> ParamStyle {
        self.param_style
    }

    async fn query_with_params(&self, sql: &str, params: &[String]) -> Result<QueryResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((sql.to_string(), params.to_vec()));
        }

        Ok(QueryResult {
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            execution_time: Duration::from_millis(1),
        })
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A mock database client whose queries always fail.
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client with a default error message.
    pub fn new() -> Self {
        Self {
            message: "mock query failure".to_string(),
        }
    }

    /// Creates a failing client with the given error message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    fn param_style(&self) -> ParamStyle {
        ParamStyle::Question
    }

    async fn query_with_params(&self, _sql: &str, _params: &[String]) -> Result<QueryResult> {
        Err(SuggestError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
