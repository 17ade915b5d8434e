// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step outcomes
//!
//! A collaborator invocation is reduced to [`Outcome::Success`] or
//! [`Outcome::Failure`]. The failure kind separates "the check found a
//! problem" from "the check could not run at all" and "the check ran out of
//! time"; all three propagate identically.

use crate::limits::MAX_DIAGNOSTIC_BYTES;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a step did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Collaborator ran and reported unsuccessful completion
    Failed,
    /// Collaborator could not be located, launched or reached
    Unavailable,
    /// Collaborator exceeded its deadline
    Timeout,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Failed => "failed",
            FailureKind::Unavailable => "unavailable",
            FailureKind::Timeout => "timed out",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure details with the collaborator's diagnostic text verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    /// Exit status or HTTP status, when the collaborator reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if let Some(code) = self.code {
            write!(f, " (code {})", code)?;
        }
        Ok(())
    }
}

/// Result of executing one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure(Failure),
}

impl Outcome {
    pub fn failed(code: Option<i32>, message: impl Into<String>) -> Self {
        Outcome::Failure(Failure {
            kind: FailureKind::Failed,
            code,
            message: message.into(),
        })
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure {
            kind: FailureKind::Unavailable,
            code: None,
            message: message.into(),
        })
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure {
            kind: FailureKind::Timeout,
            code: None,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }
}

/// Merge collaborator output into diagnostic text.
///
/// Output is decoded lossily and never interpreted. When it exceeds
/// [`MAX_DIAGNOSTIC_BYTES`] only the tail is kept, preceded by a marker.
pub fn capture_diagnostics(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    let stderr = String::from_utf8_lossy(stderr);
    if !stderr.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }
    truncate_tail(text, MAX_DIAGNOSTIC_BYTES)
}

fn truncate_tail(text: String, max: usize) -> String {
    if text.len() <= max {
        return text;
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("… [truncated {} bytes]\n{}", start, &text[start..])
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
