//! CLI command definitions for the `conversai` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod db;
pub mod history;
pub mod serve;
pub mod session;

use clap::{Parser, Subcommand};

/// Voice-chat backend relaying messages to a hosted language model.
#[derive(Parser)]
#[command(name = "conversai", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind (overrides config and CONVERSAI_HOST).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and CONVERSAI_PORT).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Create the data directory and conversation database.
    InitDb,

    /// Send one message and print the reply.
    Ask {
        /// Message text.
        message: String,

        /// Session to continue (a new one is created when omitted).
        #[arg(long, short)]
        session: Option<String>,
    },

    /// Show recent turns of a session, newest first.
    History {
        /// Session identifier.
        session_id: String,

        /// Maximum number of turns to show.
        #[arg(long, short, default_value_t = 20)]
        limit: u32,
    },

    /// List known sessions, newest activity first.
    #[command(alias = "ls")]
    Sessions,
}

impl Commands {
    /// Default log filter when neither `-v` nor `RUST_LOG` is given.
    ///
    /// The server logs requests at info; one-shot commands stay quiet.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Commands::Serve { .. } => "info",
            _ => "warn",
        }
    }
}
