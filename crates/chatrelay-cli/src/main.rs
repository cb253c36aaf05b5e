//! chatrelay CLI — run the relay or inspect its configuration.
//!
//! Usage:
//!   chatrelay serve         — Start the HTTP relay (also the default)
//!   chatrelay status        — Show resolved configuration without serving

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use chatrelay_core::config::{self, Config};
use chatrelay_core::provider::openai::OpenAiProvider;
use chatrelay_core::server::{self, AppContext};

#[derive(Parser)]
#[command(
    name = "chatrelay",
    version,
    about = "A minimal HTTP relay for OpenAI-compatible chat completions"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay
    Serve {
        /// Bind host (overrides CHATRELAY_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides CHATRELAY_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Model identifier (overrides CHATRELAY_MODEL)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show resolved configuration and credential status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port, model }) => cmd_serve(host, port, model).await?,
        Some(Commands::Status) => cmd_status(),
        None => cmd_serve(None, None, None).await?,
    }

    Ok(())
}

async fn cmd_serve(host: Option<String>, port: Option<u16>, model: Option<String>) -> Result<()> {
    // Fails here, before any socket is bound, if the credential is unset
    let mut config = Config::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(model) = model {
        config.model = model;
    }

    info!(model = %config.model, "Starting chatrelay");

    let provider = OpenAiProvider::new(
        &config.api_key,
        config.api_base.as_deref(),
        &config.model,
        reqwest::Client::new(),
    );
    let ctx = Arc::new(AppContext::new(Arc::new(provider)));

    server::serve(ctx, &config.bind_addr()).await
}

fn cmd_status() {
    match Config::from_env() {
        Ok(config) => {
            println!("chatrelay configuration");
            println!("  api key   : set ({}…)", mask(&config.api_key));
            println!(
                "  api base  : {}",
                config.api_base.as_deref().unwrap_or("(default: DeepSeek)")
            );
            println!("  model     : {}", config.model);
            println!("  bind addr : {}", config.bind_addr());
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("   The relay will not start until {} is set.", config::API_KEY_VAR);
            std::process::exit(1);
        }
    }
}

/// First few characters of the credential, for display only.
fn mask(key: &str) -> &str {
    let end = key.char_indices().nth(6).map_or(key.len(), |(i, _)| i);
    &key[..end]
}
