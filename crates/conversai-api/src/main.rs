//! ConversAI CLI and REST API entry point.
//!
//! Binary name: `conversai`
//!
//! Parses CLI arguments, loads configuration, initializes database and
//! services, then dispatches to the command handler or starts the server.

mod cli;
mod http;
mod state;

use clap::Parser;

use conversai_infra::config::{apply_env_overrides, load_config, resolve_data_dir};
use conversai_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => cli.command.default_log_filter(),
        1 => "info,conversai=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // File, then environment, then flags.
    let data_dir = resolve_data_dir();
    let mut config = load_config(&data_dir).await;
    apply_env_overrides(&mut config);

    if let Commands::Serve { host, port } = &cli.command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    let state = AppState::init(config, data_dir).await?;

    match cli.command {
        Commands::Serve { .. } => {
            cli::serve::serve(state, cli.quiet).await?;
        }

        Commands::InitDb => {
            cli::db::init_db(&state, cli.json).await?;
        }

        Commands::Ask { message, session } => {
            cli::ask::ask(&state, message, session, cli.json).await?;
        }

        Commands::History { session_id, limit } => {
            cli::history::show_history(&state, &session_id, limit, cli.json).await?;
        }

        Commands::Sessions => {
            cli::session::list_sessions(&state, cli.json).await?;
        }
    }

    Ok(())
}
