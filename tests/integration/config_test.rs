//! Configuration loading integration tests.
//!
//! Exercises TOML parsing through real files and the CLI-over-file
//! settings precedence.

use clap::Parser;
use db_suggest::cli::Cli;
use db_suggest::config::Config;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_full_config_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[connections.default]
url = "sqlite:app.db"

[connections.prod]
url = "postgres://readonly@prod.example.com:5432/app"

[suggest]
table = "customers"
search_columns = ["name", "city"]
id_column = "customer_id"
icon = "*"
debounce_ms = 200
popup_width = 50
popup_height = 10
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();

    assert_eq!(config.connections.len(), 2);
    assert_eq!(config.get_connection(None).unwrap().url, "sqlite:app.db");
    assert_eq!(
        config.get_connection(Some("prod")).unwrap().url,
        "postgres://readonly@prod.example.com:5432/app"
    );

    assert_eq!(config.suggest.table, Some("customers".to_string()));
    assert_eq!(config.suggest.search_columns, vec!["name", "city"]);
    assert_eq!(config.suggest.id_column, Some("customer_id".to_string()));
    assert_eq!(config.suggest.icon, Some("*".to_string()));
    assert_eq!(config.suggest.debounce_ms, Some(200));
    assert_eq!(config.suggest.popup_width, Some(50));
    assert_eq!(config.suggest.popup_height, Some(10));
}

#[test]
fn test_missing_file_returns_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from_file(&dir.path().join("missing.toml")).unwrap();

    assert!(config.connections.is_empty());
    assert_eq!(config.suggest.table, None);
    assert!(config.suggest.search_columns.is_empty());
    assert_eq!(config.suggest.debounce_ms, None);
}

#[test]
fn test_invalid_toml_reports_file_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "connections = 12").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_cli_overrides_file_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[suggest]
table = "customers"
search_columns = ["name", "city"]
id_column = "customer_id"
debounce_ms = 200
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    let cli = Cli::parse_from(["dbsuggest", "--table", "users", "--debounce-ms", "150"]);
    let merged = cli.merge_suggest_settings(&config.suggest);

    // CLI wins where given; everything else falls through to the file.
    assert_eq!(merged.table, Some("users".to_string()));
    assert_eq!(merged.debounce_ms, Some(150));
    assert_eq!(merged.search_columns, vec!["name", "city"]);
    assert_eq!(merged.id_column, Some("customer_id".to_string()));
}
