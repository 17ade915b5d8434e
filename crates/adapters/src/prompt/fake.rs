// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake prompt for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PromptAdapter, PromptError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

/// Scripted operator: answers in order, then end of input
#[derive(Clone, Default)]
pub struct FakePrompt {
    inner: Arc<Mutex<FakeState>>,
}

impl FakePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prompt = Self::new();
        prompt
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .answers
            .extend(answers.into_iter().map(Into::into));
        prompt
    }

    /// Prompts shown, in order
    pub fn asked(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .asked
            .clone()
    }

    /// Number of blocking asks observed
    pub fn call_count(&self) -> usize {
        self.asked().len()
    }
}

#[async_trait]
impl PromptAdapter for FakePrompt {
    async fn ask(&self, prompt: &str) -> Result<String, PromptError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.asked.push(prompt.to_string());
        Ok(inner.answers.pop_front().unwrap_or_default())
    }
}
