// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal prompt on stderr/stdin

use super::{PromptAdapter, PromptError};
use async_trait::async_trait;
use gk_core::AFFIRMATIVE;
use std::io::{BufRead, Write};

/// Asks on stderr, reads the answer from stdin
#[derive(Clone, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    pub fn new() -> Self {
        Self
    }
}

fn ask_blocking(prompt: &str) -> Result<String, PromptError> {
    let mut stderr = std::io::stderr().lock();
    write!(stderr, "{} [type '{}' to continue] ", prompt, AFFIRMATIVE)
        .and_then(|()| stderr.flush())
        .map_err(|e| PromptError::Io(e.to_string()))?;
    drop(stderr);

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PromptError::Io(e.to_string()))?;
    Ok(line)
}

#[async_trait]
impl PromptAdapter for StdinPrompt {
    async fn ask(&self, prompt: &str) -> Result<String, PromptError> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || ask_blocking(&prompt))
            .await
            .map_err(|e| PromptError::Io(e.to_string()))?
    }
}
