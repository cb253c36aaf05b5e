//! Message types shared across provider implementations.
//!
//! These types define the contract between the relay handler and any
//! completion backend: an ordered list of `ChatMessage`s in, text out.

use serde::{Deserialize, Serialize};

/// A single role-tagged turn in a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}
