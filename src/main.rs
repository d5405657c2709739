mod app;
mod config;
mod db;
mod error;
mod meals;
#[cfg(test)]
mod memory;
mod state;
#[cfg(test)]
mod test_support;
mod users;
mod validate;

use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, db::PgStore, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let store = PgStore::connect(&config).await?;
    store.migrate().await?;

    let app = app::build_app(AppState::new(config, store.clone()));
    let served = app::serve(app, app::shutdown_signal()).await;

    store.close().await;
    tracing::info!("database pool closed");
    served
}

/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches the
/// output to one JSON object per event.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dietlog=debug,axum=info,tower_http=info"));
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.with_target(false).json().init();
    } else {
        builder.init();
    }
}
