// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment scope
//!
//! The scope is selected once at the start of a run and never changes. It
//! decides which targets, credentials and collaborator modes every step is
//! bound to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors selecting the scope for a run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("environment scope is not set (pass --env or set GK_ENV)")]
    Unset,
    #[error("unknown environment scope: {0} (expected dev or prod)")]
    Unknown(String),
    #[error("mixed environment scope: --env {flag} but GK_ENV={env}")]
    Mixed {
        flag: EnvironmentScope,
        env: EnvironmentScope,
    },
}

/// Which environment a run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentScope {
    Dev,
    Prod,
}

impl EnvironmentScope {
    pub const ALL: [EnvironmentScope; 2] = [EnvironmentScope::Dev, EnvironmentScope::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentScope::Dev => "dev",
            EnvironmentScope::Prod => "prod",
        }
    }
}

impl fmt::Display for EnvironmentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentScope {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(EnvironmentScope::Dev),
            "prod" | "production" => Ok(EnvironmentScope::Prod),
            _ => Err(ScopeError::Unknown(s.to_string())),
        }
    }
}

/// Whether collaborators validate only or apply changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    #[default]
    Validate,
    Apply,
}

impl ScopeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeMode::Validate => "validate",
            ScopeMode::Apply => "apply",
        }
    }
}

impl fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the run scope from the command-line flag and the `GK_ENV` value.
///
/// An empty `GK_ENV` counts as unset. When both are present they must agree.
pub fn resolve_scope(
    flag: Option<&str>,
    env: Option<&str>,
) -> Result<EnvironmentScope, ScopeError> {
    let env = env.filter(|v| !v.trim().is_empty());
    match (flag, env) {
        (None, None) => Err(ScopeError::Unset),
        (Some(flag), None) => flag.parse(),
        (None, Some(env)) => env.parse(),
        (Some(flag), Some(env)) => {
            let flag: EnvironmentScope = flag.parse()?;
            let env: EnvironmentScope = env.parse()?;
            if flag == env {
                Ok(flag)
            } else {
                Err(ScopeError::Mixed { flag, env })
            }
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
