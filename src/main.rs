//! Roster GUI Client - Main Entry Point
//!
//! Resilient, virtualized player list.

use std::sync::Arc;

use roster_gui::app::application::run_app;
use roster_gui::domain::config::{AppConfig, SourceKind};
use roster_gui::domain::player::Player;
use roster_gui::loader::controller::{LoadController, LoadControllerBuilder};
use roster_gui::loader::store::{FileStore, KeyValueStore, MemoryStore};
use roster_gui::services::{DemoSource, HttpSource};
use roster_gui::utils::config_store::{get_or_create_data_dir, load_app_config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Log to stdout and, when the data directory is available, a daily file
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout = fmt::layer().with_target(false);

    match get_or_create_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join("logs"), "roster-gui.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry().with(filter).with(stdout).init();
            tracing::warn!("File logging disabled: {}", e);
            None
        }
    }
}

fn with_source(
    builder: LoadControllerBuilder<Player>,
    config: &AppConfig,
) -> LoadControllerBuilder<Player> {
    let source = &config.source;
    if source.kind == SourceKind::Http {
        match source.endpoint.as_deref() {
            Some(endpoint) => {
                match HttpSource::<Player>::new(endpoint, config.list.request_timeout()) {
                    Ok(http) => {
                        tracing::info!("Loading players from {}", http.endpoint());
                        return builder.source(http);
                    }
                    Err(e) => tracing::warn!("HTTP source unavailable ({}); using demo data", e),
                }
            }
            None => tracing::warn!("HTTP source has no endpoint; using demo data"),
        }
    }
    let demo = DemoSource::from_config(source);
    tracing::info!("Loading {} generated players", demo.len());
    builder.source(demo)
}

fn cache_store() -> Arc<dyn KeyValueStore> {
    match FileStore::in_cache_dir() {
        Ok(store) => {
            tracing::debug!("Record cache at {}", store.dir().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Cache directory unavailable ({}); caching in memory", e);
            Arc::new(MemoryStore::new())
        }
    }
}

fn main() {
    let _guard = init_tracing();
    tracing::info!("Starting Roster GUI...");

    let config = load_app_config();
    let builder = LoadController::builder(config.list.clone()).store(cache_store());
    let loader = with_source(builder, &config).build();

    run_app(config, loader);
}
