// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the external collaborators a step invokes

pub mod command;
pub mod prompt;
pub mod status;
pub mod traced;

pub use command::{CommandAdapter, CommandError, CommandOutput, ShellAdapter};
pub use prompt::{PromptAdapter, PromptError, StdinPrompt};
pub use status::{StatusAdapter, StatusError, StatusResponse, UreqStatusAdapter};
pub use traced::{TracedCommandAdapter, TracedPromptAdapter, TracedStatusAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use command::{CommandCall, FakeCommandAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use prompt::FakePrompt;
#[cfg(any(test, feature = "test-support"))]
pub use status::FakeStatusAdapter;
