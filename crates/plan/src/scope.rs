// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scope definitions

use gk_core::ScopeMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Targets and mode for one environment scope
///
/// ```toml
/// [scope.prod]
/// mode = "apply"
/// [scope.prod.vars]
/// db_url = "${PROD_DATABASE_URL:-}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeDef {
    #[serde(default)]
    pub mode: ScopeMode,
    /// Template variables (hosts, credential references) for this scope
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}
