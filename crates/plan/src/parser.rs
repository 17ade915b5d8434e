// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan book TOML parsing

use crate::{PlanDef, ScopeDef};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during plan book parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("{kind} '{name}' is defined more than once")]
    Duplicate { kind: &'static str, name: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ParseError>,
    },
}

/// A parsed plan book: scope definitions plus named plans
#[derive(Debug, Clone, Default)]
pub struct PlanBook {
    pub scopes: BTreeMap<String, ScopeDef>,
    pub plans: BTreeMap<String, PlanDef>,
}

impl PlanBook {
    /// Get a plan definition by name
    pub fn get_plan(&self, name: &str) -> Option<&PlanDef> {
        self.plans.get(name)
    }

    /// Get a scope definition by name
    pub fn get_scope(&self, name: &str) -> Option<&ScopeDef> {
        self.scopes.get(name)
    }

    /// Merge another book into this one; names must not collide
    pub fn merge(&mut self, other: PlanBook) -> Result<(), ParseError> {
        for (name, scope) in other.scopes {
            if self.scopes.contains_key(&name) {
                return Err(ParseError::Duplicate { kind: "scope", name });
            }
            self.scopes.insert(name, scope);
        }
        for (name, plan) in other.plans {
            if self.plans.contains_key(&name) {
                return Err(ParseError::Duplicate { kind: "plan", name });
            }
            self.plans.insert(name, plan);
        }
        Ok(())
    }
}

/// Parse a plan book from TOML content
pub fn parse_plan_book(content: &str) -> Result<PlanBook, ParseError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("root must be a table".to_string()))?;

    let mut book = PlanBook::default();

    for key in table.keys() {
        if key != "scope" && key != "plan" {
            return Err(ParseError::InvalidFormat(format!(
                "unknown top-level table '{}' (expected scope or plan)",
                key
            )));
        }
    }

    // Parse scopes
    if let Some(scopes) = table.get("scope") {
        let scopes = scopes
            .as_table()
            .ok_or_else(|| ParseError::InvalidFormat("scope must be a table".to_string()))?;
        for (name, value) in scopes {
            let scope = parse_scope(name, value)?;
            book.scopes.insert(name.clone(), scope);
        }
    }

    // Parse plans
    if let Some(plans) = table.get("plan") {
        let plans = plans
            .as_table()
            .ok_or_else(|| ParseError::InvalidFormat("plan must be a table".to_string()))?;
        for (name, value) in plans {
            let plan = parse_plan(name, value)?;
            book.plans.insert(name.clone(), plan);
        }
    }

    Ok(book)
}

/// Load and merge every `*.toml` file in a directory, in file-name order.
///
/// A missing directory yields an empty book.
pub fn load_plan_dir(dir: &Path) -> Result<PlanBook, ParseError> {
    let mut book = PlanBook::default();
    if !dir.exists() {
        return Ok(book);
    }

    let entries = std::fs::read_dir(dir).map_err(|source| ParseError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "toml"))
        .collect();
    paths.sort();

    for path in paths {
        let content = std::fs::read_to_string(&path).map_err(|source| ParseError::Io {
            path: path.clone(),
            source,
        })?;
        let parsed = parse_plan_book(&content).map_err(|e| ParseError::InFile {
            path: path.clone(),
            source: Box::new(e),
        })?;
        book.merge(parsed).map_err(|e| ParseError::InFile {
            path: path.clone(),
            source: Box::new(e),
        })?;
    }

    Ok(book)
}

fn parse_scope(name: &str, value: &toml::Value) -> Result<ScopeDef, ParseError> {
    value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| ParseError::InvalidFormat(format!("scope.{}: {}", name, e)))
}

fn parse_plan(name: &str, value: &toml::Value) -> Result<PlanDef, ParseError> {
    if !value.is_table() {
        return Err(ParseError::InvalidFormat(format!(
            "plan.{} must be a table",
            name
        )));
    }
    let mut plan: PlanDef = value.clone().try_into().map_err(|e: toml::de::Error| {
        ParseError::InvalidFormat(format!("plan.{}: {}", name, e))
    })?;
    plan.name = name.to_string();
    Ok(plan)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
