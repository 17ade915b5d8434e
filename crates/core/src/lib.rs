// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gk-core: Core library for the gatekeeper (gk) release gate
//!
//! This crate provides:
//! - The environment scope a run is bound to
//! - Step outcomes, phase state and gate decisions
//! - Bound plans as consumed by the engine
//! - Verdicts, exit codes and run reports
//! - Clock and id abstractions for deterministic tests

pub mod clock;
pub mod id;
pub mod limits;

// Domain types (order matters for dependencies)
pub mod scope;
pub mod outcome;
pub mod phase;
pub mod gate;
pub mod poll;
pub mod plan;
pub mod report;
pub mod verdict;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use gate::{Decision, Gate, GateMode, AFFIRMATIVE};
pub use id::{IdGen, RunId, SequentialIdGen, UuidIdGen};
pub use outcome::{capture_diagnostics, Failure, FailureKind, Outcome};
pub use phase::{PhaseEvent, PhaseStatus};
pub use plan::{Action, CommandSpec, HttpCheck, Phase, Plan, PlanEntry, PollSpec, Step};
pub use poll::{PollAttempts, PollSchedule, PollState, StatusRule};
pub use report::{EntryReport, GateRecord, PhaseReport, RunReport, StepRecord};
pub use scope::{resolve_scope, EnvironmentScope, ScopeError, ScopeMode};
pub use verdict::{exit_code, Verdict};
