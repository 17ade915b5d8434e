// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP status collaborators

mod http;

pub use http::UreqStatusAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeStatusAdapter;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reaching a status endpoint; any HTTP response is not an error
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("{url} unreachable: {message}")]
    Unreachable { url: String, message: String },
    #[error("failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}

/// One HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    pub code: u16,
    pub body: String,
}

impl StatusResponse {
    pub fn new(code: u16, body: impl Into<String>) -> Self {
        Self {
            code,
            body: body.into(),
        }
    }
}

/// Adapter for HTTP GET probes
#[async_trait]
pub trait StatusAdapter: Clone + Send + Sync + 'static {
    /// Issue one GET and return whatever the server answered
    async fn fetch(&self, url: &str) -> Result<StatusResponse, StatusError>;
}
