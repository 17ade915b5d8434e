// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project root discovery and plan book loading

use crate::error::GkError;
use gk_plan::{load_plan_dir, PlanBook};
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "GK_PROJECT_ROOT";

/// Directory marking a project root
pub const MARKER_DIR: &str = ".gk";

/// Where commands run and where plans are read from
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub plans_dir: PathBuf,
}

impl Project {
    pub fn discover(plans: Option<PathBuf>) -> anyhow::Result<Self> {
        let root = find_project_root()?;
        Ok(Self::at(root, plans))
    }

    pub fn at(root: PathBuf, plans: Option<PathBuf>) -> Self {
        let plans_dir = plans.unwrap_or_else(|| root.join(MARKER_DIR).join("plans"));
        Self { root, plans_dir }
    }

    /// Load every plan file; a missing directory is an empty book
    pub fn load_book(&self) -> Result<PlanBook, GkError> {
        load_plan_dir(&self.plans_dir).map_err(|e| GkError::plan_book(&self.plans_dir, e))
    }
}

/// `GK_PROJECT_ROOT`, else the nearest ancestor holding `.gk/`, else the
/// current directory
pub fn find_project_root() -> std::io::Result<PathBuf> {
    if let Some(root) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    let cwd = std::env::current_dir()?;
    Ok(find_root_from(&cwd).unwrap_or(cwd))
}

/// Nearest directory at or above `start` containing `.gk/`
pub fn find_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(MARKER_DIR).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
