//! `conversai serve` - run the HTTP API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use console::style;

use crate::http::router::build_router;
use crate::state::AppState;

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn serve(state: AppState, quiet: bool) -> Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    if !quiet {
        println!();
        println!(
            "  {} ConversAI API listening on {}",
            style("⚡").bold(),
            style(format!("http://{addr}")).cyan()
        );
        if !state.chat_service.inference_configured() {
            println!(
                "  {} HF_TOKEN is not set; replies will report the AI service as not configured",
                style("!").yellow().bold()
            );
        }
        println!("  {}", style("Press Ctrl+C to stop").dim());
    }

    let db_pool = state.db_pool.clone();
    let router = build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db_pool.close().await;
    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
