// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Plan book parsing, validation and binding

mod action;
mod bind;
mod parser;
mod plan;
mod scope;
mod template;
mod validator;

pub use action::{HttpDef, PollDef, RunDirective};
pub use bind::{bind, bind_with, BindError, MODE_ENV, SCOPE_ENV};
pub use parser::{load_plan_dir, parse_plan_book, ParseError, PlanBook};
pub use plan::{GateDef, PhaseDef, PlanDef, StepDef};
pub use scope::ScopeDef;
pub use template::{interpolate, interpolate_with};
pub use validator::{validate_book, validate_plan, ValidationError, ValidationErrors};
