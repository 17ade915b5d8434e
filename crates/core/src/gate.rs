// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Confirmation gate definitions

use serde::{Deserialize, Serialize};

/// The only operator input that approves an interactive gate
pub const AFFIRMATIVE: &str = "yes";

/// How a gate is resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// Blocks until the operator answers
    #[default]
    Interactive,
    /// Auto-approves, for unattended execution
    Bypassed,
}

impl GateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateMode::Interactive => "interactive",
            GateMode::Bypassed => "bypassed",
        }
    }
}

impl std::fmt::Display for GateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gate resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Aborted,
}

impl Decision {
    /// Interpret one line of operator input.
    ///
    /// Surrounding whitespace is ignored; anything but [`AFFIRMATIVE`],
    /// including empty input, aborts.
    pub fn from_input(input: &str) -> Decision {
        if input.trim() == AFFIRMATIVE {
            Decision::Approved
        } else {
            Decision::Aborted
        }
    }
}

/// A checkpoint placed before a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub prompt: String,
    #[serde(default)]
    pub mode: GateMode,
}

impl Gate {
    pub fn interactive(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            mode: GateMode::Interactive,
        }
    }

    pub fn bypassed(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            mode: GateMode::Bypassed,
        }
    }
}
