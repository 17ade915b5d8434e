// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Release gate engine
//!
//! Orchestrator → phase executor → step runner → collaborator. Outcomes
//! flow back up unchanged and are aggregated as "first failure wins".

mod error;
mod gate;
mod orchestrator;
mod phase;
mod poller;
pub mod report;
mod step;

pub use error::EngineError;
pub use gate::ConfirmationGate;
pub use orchestrator::{EngineDeps, Orchestrator};
pub use phase::PhaseExecutor;
pub use poller::poll;
pub use report::{LineReporter, MemoryReporter, ProgressEvent, Reporter};
pub use step::StepRunner;
