//! chatrelay-core: Core library for the chatrelay completion relay.
//!
//! This crate contains the building blocks for a minimal, stateless HTTP
//! relay in front of an OpenAI-compatible chat-completion provider:
//!
//! - [`config`] — Typed configuration loading from the environment
//! - [`provider`] — Completion provider trait and OpenAI-compatible implementation
//! - [`server`] — Axum router and the completion relay handler
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatrelay_core::config::Config;
//! use chatrelay_core::provider::openai::OpenAiProvider;
//! use chatrelay_core::server::{self, AppContext};
//!
//! # async fn run() -> anyhow::Result<()> {
//! // Load configuration (fails fast if DEEPSEEK_API_KEY is unset)
//! let config = Config::from_env()?;
//!
//! // Create a provider and serve
//! let provider = OpenAiProvider::new(
//!     &config.api_key,
//!     config.api_base.as_deref(),
//!     &config.model,
//!     reqwest::Client::new(),
//! );
//! let ctx = Arc::new(AppContext::new(Arc::new(provider)));
//! server::serve(ctx, &config.bind_addr()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod provider;
pub mod server;
