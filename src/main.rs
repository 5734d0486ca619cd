use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bankdex::db::BankStorage;
use bankdex::service::{self, IngestOutcome};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &bankdex::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        data_file = %cfg.data_file.display(),
        skip_startup = cfg.skip_startup,
        loglevel = %cfg.loglevel
    );

    let pool = bankdex::db::connect(&cfg.database_url).await?;
    let storage = BankStorage::new(pool.clone());

    if !cfg.skip_startup {
        storage.init_schema().await?;

        // One transaction around the whole load; dropping it on error rolls
        // the bootstrap back wholesale.
        let mut tx = pool.begin().await?;
        let outcome = service::load_if_needed(&mut *tx, &cfg.data_file).await?;
        tx.commit().await?;

        match outcome {
            IngestOutcome::Skipped => info!("store already populated; bulk load skipped"),
            IngestOutcome::Loaded { banks, branches } => {
                info!(banks, branches, "bulk load complete");
            }
        }
    }

    let state = bankdex::router::AppState::new(storage);
    let app = bankdex::router::bankdex_router(state);

    let addr = format!("{}:{}", cfg.host, cfg.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
