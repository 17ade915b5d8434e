// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator confirmation

mod stdin;

pub use stdin::StdinPrompt;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePrompt;

use async_trait::async_trait;
use thiserror::Error;

/// Errors talking to the operator
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read operator input: {0}")]
    Io(String),
}

/// Adapter for asking the operator a single question
#[async_trait]
pub trait PromptAdapter: Clone + Send + Sync + 'static {
    /// Show `prompt` and wait, without timeout, for one line of input.
    ///
    /// End of input is an empty answer.
    async fn ask(&self, prompt: &str) -> Result<String, PromptError>;
}
