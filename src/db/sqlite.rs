//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient`
//! trait for SQLite databases using sqlx. Also hosts the seeded in-memory
//! demo database used by `dbsuggest --demo`.

use crate::db::{ColumnInfo, DatabaseClient, ParamStyle, QueryResult, Row, Value};
use crate::error::{Result, SuggestError};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo};
use std::time::Instant;
use tracing::debug;

/// SQLite database client.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Connects to a SQLite database at the given URL.
    ///
    /// In-memory databases exist per connection, so `:memory:` URLs pin the
    /// pool to a single connection that is never reaped.
    pub async fn connect(url: &str) -> Result<Self> {
        let mut options = SqlitePoolOptions::new();

        if url.contains(":memory:") {
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options.max_connections(5);
        }

        let pool = options
            .connect(url)
            .await
            .map_err(|e| SuggestError::connection(format!("Cannot open '{url}': {e}")))?;

        debug!("Connected to SQLite at {url}");
        Ok(Self { pool })
    }

    /// Opens a fresh in-memory database.
    pub async fn connect_in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    /// Creates a new SqliteClient from an existing connection pool.
    ///
    /// This is primarily useful for testing.
    #[allow(dead_code)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Executes a statement that returns no rows (DDL, INSERT, ...).
    pub async fn execute(&self, sql: &str) -> Result<()> {
        sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| SuggestError::query(e.to_string()))?;
        Ok(())
    }

    /// Creates and populates the `people` table used by demo mode.
    pub async fn seed_demo(&self) -> Result<()> {
        self.execute(
            "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT, email TEXT)",
        )
        .await?;

        let rows = [
            ("John Doe", Some("john@example.com")),
            ("Joanne Smith", Some("joanne@example.com")),
            ("Bob Jones", None),
            ("Alice Brown", Some("alice@example.com")),
            ("Jon Snow", Some("jon@winterfell.example")),
            ("Mary Major", Some("mary@example.com")),
            ("Diego Rivera", Some("diego@example.com")),
            ("Joan Baez", Some("joan@music.example")),
            ("Pedro Alvarez", Some("pedro@example.com")),
            ("Banjo Patterson", Some("banjo@poets.example")),
            ("Marjorie Lee", Some("marjorie@example.com")),
            ("Sam Johnson", Some("sam.johnson@example.com")),
        ];

        for (name, email) in rows {
            sqlx::query("INSERT INTO people (name, email) VALUES (?, ?)")
                .bind(name)
                .bind(email)
                .execute(&self.pool)
                .await
                .map_err(|e| SuggestError::query(e.to_string()))?;
        }

        debug!("Seeded demo database with {} people", rows.len());
        Ok(())
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    fn param_style(&self) -> ParamStyle {
        ParamStyle::Question
    }

    async fn query_with_params(&self, sql: &str, params: &[String]) -> Result<QueryResult> {
        let start = Instant::now();

        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.as_str());
        }

        let result = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SuggestError::query(format_query_error(e)))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = result
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Row> = result.iter().map(convert_row).collect();

        debug!(
            "Query returned {} rows in {:?}",
            rows.len(),
            execution_time
        );

        Ok(QueryResult {
            columns,
            rows,
            execution_time,
        })
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
///
/// SQLite typing is dynamic; the reported type name reflects the column's
/// declared affinity, so the string fallback matters more than on Postgres.
fn convert_value(row: &SqliteRow, index: usize, type_name: &str) -> Value {
    match type_name.to_uppercase().as_str() {
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "INTEGER" | "INT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        "NULL" => Value::Null,

        // TEXT, DATETIME and anything else: try as string
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Formats a query error with the database message when available.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
