// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake status adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{StatusAdapter, StatusError, StatusResponse};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Reply {
    Response(StatusResponse),
    Unreachable(String),
}

#[derive(Default)]
struct FakeState {
    /// Replies per url; the last one repeats once the queue drains
    replies: HashMap<String, VecDeque<Reply>>,
    delays: HashMap<String, Duration>,
    calls: Vec<String>,
}

/// Fake status endpoint: unscripted urls answer `200` with an empty body
#[derive(Clone, Default)]
pub struct FakeStatusAdapter {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeStatusAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `url`
    pub fn respond(&self, url: &str, code: u16, body: &str) -> &Self {
        self.push(url, Reply::Response(StatusResponse::new(code, body)))
    }

    /// Queue a connection failure for `url`
    pub fn unreachable(&self, url: &str, message: &str) -> &Self {
        self.push(url, Reply::Unreachable(message.to_string()))
    }

    /// Make every fetch of `url` take `delay` before answering
    pub fn delay(&self, url: &str, delay: Duration) -> &Self {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .delays
            .insert(url.to_string(), delay);
        self
    }

    fn push(&self, url: &str, reply: Reply) -> &Self {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replies
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Urls fetched, in order
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl StatusAdapter for FakeStatusAdapter {
    async fn fetch(&self, url: &str) -> Result<StatusResponse, StatusError> {
        let (reply, delay) = {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.calls.push(url.to_string());
            let delay = inner.delays.get(url).copied();
            let reply = match inner.replies.get_mut(url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            };
            (reply, delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            None => Ok(StatusResponse::new(200, "")),
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Unreachable(message)) => Err(StatusError::Unreachable {
                url: url.to_string(),
                message,
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
