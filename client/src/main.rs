//! Roster - load the user collection through the local cache and print it.

use std::sync::Arc;

use roster_client::{App, Config, HttpSource, ListView, Reconciler, SqliteCache};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster=info,roster_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!(
        "Loading users from {} through cache {}",
        config.remote_url,
        config.cache_url
    );

    let remote = HttpSource::new(&config.remote_url, config.request_timeout)?;
    let cache = SqliteCache::connect(&config.cache_url).await?;
    let reconciler = Reconciler::new(Arc::new(remote), Arc::new(cache));

    let mut app = App::new(reconciler, ListView::new(config.display_field.clone()));
    app.load().await;

    if let Some(error) = &app.status().last_error {
        tracing::error!("Load finished with an error: {}", error);
    }
    tracing::info!("{} users", app.model().collection().len());

    print!("{}", app.sink().render());

    Ok(())
}
