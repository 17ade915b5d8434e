// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ureq-backed status adapter

use super::{StatusAdapter, StatusError, StatusResponse};
use async_trait::async_trait;
use std::time::Duration;

/// Blocking ureq agent driven from the tokio blocking pool
#[derive(Clone)]
pub struct UreqStatusAdapter {
    agent: ureq::Agent,
}

impl UreqStatusAdapter {
    pub fn new() -> Self {
        Self::with_timeout(gk_core::limits::HTTP_REQUEST_TIMEOUT)
    }

    /// Every request (connect through body) is bounded by `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqStatusAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn get(agent: &ureq::Agent, url: &str) -> Result<StatusResponse, StatusError> {
    let mut response = agent.get(url).call().map_err(|e| StatusError::Unreachable {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    let code = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| StatusError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    Ok(StatusResponse { code, body })
}

#[async_trait]
impl StatusAdapter for UreqStatusAdapter {
    async fn fetch(&self, url: &str) -> Result<StatusResponse, StatusError> {
        let agent = self.agent.clone();
        let owned = url.to_string();
        tokio::task::spawn_blocking(move || get(&agent, &owned))
            .await
            .map_err(|e| StatusError::Unreachable {
                url: url.to_string(),
                message: e.to_string(),
            })?
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
