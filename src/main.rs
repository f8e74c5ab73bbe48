//! dbsuggest - A debounced, database-backed autocomplete dropdown for the
//! terminal.

use db_suggest::cli::Cli;
use db_suggest::config::{Config, ConnectionConfig, SuggestSettings};
use db_suggest::db::{self, DatabaseClient, SqliteClient};
use db_suggest::error::{Result, SuggestError};
use db_suggest::logging;
use db_suggest::suggest::{
    AutoSuggest, SuggestBinding, DEFAULT_POPUP_HEIGHT, DEFAULT_POPUP_WIDTH,
};
use db_suggest::tui::{self, App};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Logs go to a file; writing to stderr would corrupt the TUI.
    logging::init_file_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let settings = cli.merge_suggest_settings(&config.suggest);

    let client: Arc<dyn DatabaseClient>;
    let binding;
    let connection_info;

    if cli.demo {
        info!("Starting against a seeded in-memory demo database");
        let demo = SqliteClient::connect_in_memory().await?;
        demo.seed_demo().await?;

        client = Arc::new(demo);
        binding = if settings.table.is_some() {
            resolve_binding(&settings)?
        } else {
            demo_binding(&settings)
        };
        connection_info = "demo @ :memory:".to_string();
    } else {
        let connection = resolve_connection(&cli, &config)?.ok_or_else(|| {
            SuggestError::config(
                "No database connection configured. Pass a URL, use --connection, or try --demo",
            )
        })?;
        info!("Connection: {}", connection.display_string());

        client = Arc::from(db::connect(&connection).await?);
        binding = resolve_binding(&settings)?;
        connection_info = connection.display_string();
    }

    let mut suggest = AutoSuggest::new(Arc::clone(&client), binding).with_on_select(Box::new(
        |id, label| {
            info!("Committed suggestion '{label}' (id: {id:?})");
        },
    ));

    if let Some(ms) = settings.debounce_ms {
        suggest = suggest.with_debounce_delay(Duration::from_millis(ms));
    }
    suggest.set_popup_size(
        settings.popup_width.unwrap_or(DEFAULT_POPUP_WIDTH),
        settings.popup_height.unwrap_or(DEFAULT_POPUP_HEIGHT),
    );

    let app = App::new(suggest, Some(connection_info));
    tui::run(app).await?;

    if let Err(e) = client.close().await {
        warn!("Error closing database connection: {}", e);
    }

    Ok(())
}

/// Resolves the connection with precedence: CLI URL, then the named
/// connection, then the config default, then the DATABASE_URL environment
/// variable.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    let mut connection = cli.to_connection_config();

    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(SuggestError::config(format!(
                    "Connection '{name}' not found in config file"
                )));
            }
        }
    }

    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    if connection.is_none() {
        connection = std::env::var("DATABASE_URL").ok().map(ConnectionConfig::new);
    }

    Ok(connection)
}

/// Builds the component binding from the merged settings.
fn resolve_binding(settings: &SuggestSettings) -> Result<SuggestBinding> {
    let table = settings.table.clone().ok_or_else(|| {
        SuggestError::config(
            "No suggestion table configured. Use --table or [suggest] in the config file",
        )
    })?;

    if settings.search_columns.is_empty() {
        return Err(SuggestError::config(
            "No search columns configured. Use --columns or [suggest] in the config file",
        ));
    }

    let id_column = settings.id_column.clone().ok_or_else(|| {
        SuggestError::config(
            "No id column configured. Use --id-column or [suggest] in the config file",
        )
    })?;

    let mut binding = SuggestBinding::new(table, settings.search_columns.clone(), id_column);
    if let Some(icon) = &settings.icon {
        binding = binding.with_icon(icon.clone());
    }

    Ok(binding)
}

/// Binding for the seeded demo database, used when nothing is configured.
fn demo_binding(settings: &SuggestSettings) -> SuggestBinding {
    let mut binding = SuggestBinding::new(
        "people",
        vec!["name".to_string(), "email".to_string()],
        "id",
    );
    if let Some(icon) = &settings.icon {
        binding = binding.with_icon(icon.clone());
    }
    binding
}
