//! Slotter Server — application entry point.

use slotter_db::DbManager;
use slotter_notify::Notifier;
use slotter_server::{load_config, router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("slotter=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Slotter server...");

    let config = load_config()?;

    let db = DbManager::connect(&config.database).await?;
    db.migrate().await?;

    let notifier = match &config.smtp {
        Some(smtp) => Notifier::smtp(smtp)?,
        None => {
            tracing::info!("SMTP not configured, mail dispatch disabled");
            Notifier::disabled()
        }
    };

    let state = AppState::new(db.client().clone(), config.auth.clone(), notifier);

    if let Some(admin) = &config.admin {
        state.auth.provision_admin(&admin.email, &admin.password).await?;
    }

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Slotter server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Slotter server stopped.");
    Ok(())
}
