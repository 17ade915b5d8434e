// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step action definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// What a `run` step executes: one command line, or one per scope
///
/// ```toml
/// run = "scripts/audit"
/// run = { dev = "migrate validate", prod = "migrate apply" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunDirective {
    /// Same command under every scope
    Shell(String),
    /// Command keyed by scope name
    Scoped(BTreeMap<String, String>),
}

impl RunDirective {
    /// The command line for the given scope name
    pub fn command_for(&self, scope: &str) -> Option<&str> {
        match self {
            RunDirective::Shell(cmd) => Some(cmd),
            RunDirective::Scoped(map) => map.get(scope).map(String::as_str),
        }
    }

    /// Scope names this directive is keyed by (empty for a plain command)
    pub fn scope_names(&self) -> Vec<&str> {
        match self {
            RunDirective::Shell(_) => Vec::new(),
            RunDirective::Scoped(map) => map.keys().map(String::as_str).collect(),
        }
    }
}

fn default_expect() -> u16 {
    gk_core::limits::DEFAULT_HTTP_EXPECT
}

/// One HTTP GET that must return the expected status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpDef {
    pub url: String,
    #[serde(default = "default_expect")]
    pub expect: u16,
}

/// Poll an HTTP status endpoint until a terminal status or the deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollDef {
    pub url: String,
    /// Top-level JSON string field holding the status
    #[serde(default)]
    pub field: Option<String>,
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    #[serde(with = "humantime_serde")]
    pub deadline: Duration,
    /// Status values that stop polling
    pub terminal: Vec<String>,
    /// Terminal values that mean success
    #[serde(default)]
    pub success: Vec<String>,
}
