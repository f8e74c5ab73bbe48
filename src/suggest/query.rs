//! Suggestion statement building and result mapping.

use super::SuggestBinding;
use crate::db::{ParamStyle, QueryResult, Value};

/// Maximum number of suggestions fetched per query.
pub const SUGGESTION_LIMIT: usize = 10;

/// Separator between column values in a suggestion label.
pub const LABEL_SEPARATOR: &str = " | ";

/// A single suggestion derived from a result row.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Identifier from the id column; SQL NULL becomes `None`.
    pub id: Option<String>,

    /// Display label joined from the search column values.
    pub label: String,
}

/// A built suggestion statement with its bind parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl SuggestionQuery {
    /// Builds the statement that matches `term` against the binding's
    /// search columns.
    ///
    /// Table and column names come from trusted configuration and are
    /// interpolated into the statement text; the user's term is always a
    /// bind parameter, wrapped in `%` wildcards. Wildcards typed by the
    /// user pass through unescaped.
    pub fn build(binding: &SuggestBinding, term: &str, style: ParamStyle) -> Self {
        let pattern = format!("%{term}%");

        let mut where_clause = String::new();
        for (i, column) in binding.search_columns.iter().enumerate() {
            if i > 0 {
                where_clause.push_str(" OR ");
            }
            where_clause.push_str(column);
            where_clause.push_str(" LIKE ");
            where_clause.push_str(&style.placeholder(i + 1));
        }

        let sql = format!(
            "SELECT {}, {} FROM {} WHERE {} LIMIT {}",
            binding.id_column,
            binding.search_columns.join(", "),
            binding.table,
            where_clause,
            SUGGESTION_LIMIT
        );

        let params = vec![pattern; binding.search_columns.len()];

        Self { sql, params }
    }
}

/// Maps a result set to suggestions, one per row, preserving order.
///
/// The first column is the id; the remaining columns are the search columns
/// in configured order. Label construction is deterministic: values joined
/// with [`LABEL_SEPARATOR`], NULLs contributing empty segments.
pub fn suggestions_from(result: &QueryResult) -> Vec<Suggestion> {
    result
        .rows
        .iter()
        .map(|row| {
            let id = row.first().and_then(id_segment);
            let label = row
                .iter()
                .skip(1)
                .map(label_segment)
                .collect::<Vec<_>>()
                .join(LABEL_SEPARATOR);
            Suggestion { id, label }
        })
        .collect()
}

fn id_segment(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_display_string()),
    }
}

fn label_segment(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_display_string(),
    }
}
