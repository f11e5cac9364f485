use crate::{
    controller::build_router,
    shared::structs::{
        AppState,
        config::{Configuration, LogFormat},
    },
};

mod controller;
mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Configuration::load()?;
    initialize_tracing(&config);

    let app_state = AppState::from_config(config).await?;
    let server_bind_point = app_state.config.server_address();
    let route = app_state.config.route.clone();
    let publisher = app_state.publisher.clone();

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&server_bind_point).await?;
    tracing::info!("Accepting interactions on {}{}", &server_bind_point, &route);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    publisher.shutdown().await;
    tracing::info!("Server stopped.");

    Ok(())
}

fn initialize_tracing(config: &Configuration) {
    let builder = tracing_subscriber::FmtSubscriber::builder().with_max_level(config.log_level());

    let result = match config.log_format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.pretty().finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };

    if let Err(e) = result {
        eprintln!(
            "Initialization of tracing subscriber failed with error: {}",
            e
        );
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let reason = tokio::select! {
        _ = ctrl_c => "ctrl-c",
        _ = terminate => "SIGTERM",
    };

    tracing::info!(
        "Shutdown signal received ({}), draining in-flight interactions.",
        reason
    );
}
