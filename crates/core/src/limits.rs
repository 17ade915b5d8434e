// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed limits applied by the engine.

use std::time::Duration;

/// Maximum bytes of collaborator output kept as diagnostics.
///
/// The tail is kept; a marker line records how much was dropped.
pub const MAX_DIAGNOSTIC_BYTES: usize = 16 * 1024;

/// Request timeout for a single HTTP check or poll probe.
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default expected status for `http` steps.
pub const DEFAULT_HTTP_EXPECT: u16 = 200;

/// Maximum length of a poll body retained when reporting a status value.
pub const MAX_STATUS_LEN: usize = 256;
