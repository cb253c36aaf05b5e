//! Completion provider trait and error type.
//!
//! Defines the `CompletionProvider` trait the relay handler depends on.
//! The `openai` module provides an OpenAI-compatible implementation that
//! covers DeepSeek and any other provider exposing the same
//! `/chat/completions` endpoint.

pub mod openai;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;
use types::ChatMessage;

/// Failure while contacting or decoding the upstream provider.
///
/// The relay makes no distinction between transient and permanent
/// failures; every variant is surfaced to the client as one HTTP 500
/// carrying the `Display` text.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never completed (connect, TLS, timeout, body read).
    #[error("request to completion API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("completion API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider answered 2xx but the body held no usable completion.
    #[error("unexpected completion response: {0}")]
    Malformed(String),
}

/// Trait for completion providers.
///
/// Any backend that can turn an ordered list of role-tagged messages into
/// generated text must implement this trait. The handler depends only on
/// this contract, so tests substitute a stub.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit a prompt and return the first choice's message text.
    ///
    /// Exactly one upstream request per call; no retry.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;

    /// The model identifier submitted with every request.
    fn model(&self) -> &str;
}
