// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling with a deadline
//!
//! A [`PollSchedule`] is a finite, restartable sequence of probe offsets:
//! `0, interval, 2 * interval, ...` up to and including the deadline. The
//! engine sleeps to each offset, probes, and stops as soon as the observed
//! status is terminal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Fixed-interval probe schedule bounded by an overall deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSchedule {
    pub interval: Duration,
    pub deadline: Duration,
}

impl PollSchedule {
    pub fn new(interval: Duration, deadline: Duration) -> Self {
        Self { interval, deadline }
    }

    /// Iterate the probe offsets from the start of the poll
    pub fn attempts(&self) -> PollAttempts {
        PollAttempts {
            interval: self.interval,
            deadline: self.deadline,
            next: Some(Duration::ZERO),
        }
    }
}

impl IntoIterator for &PollSchedule {
    type Item = Duration;
    type IntoIter = PollAttempts;

    fn into_iter(self) -> Self::IntoIter {
        self.attempts()
    }
}

/// Iterator over probe offsets of a [`PollSchedule`]
#[derive(Debug, Clone)]
pub struct PollAttempts {
    interval: Duration,
    deadline: Duration,
    next: Option<Duration>,
}

impl Iterator for PollAttempts {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next?;
        if current > self.deadline {
            self.next = None;
            return None;
        }
        // A zero interval would never reach the deadline: probe once.
        self.next = if self.interval.is_zero() {
            None
        } else {
            current.checked_add(self.interval)
        };
        Some(current)
    }
}

/// Classification of one observed status value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Not terminal: keep polling
    Pending,
    /// Terminal and successful
    Succeeded,
    /// Terminal but not successful
    Failed,
}

/// The closed set of terminal status values and which of them mean success
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRule {
    pub terminal: BTreeSet<String>,
    pub success: BTreeSet<String>,
}

impl StatusRule {
    pub fn new<I, J, S, T>(terminal: I, success: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            terminal: terminal.into_iter().map(Into::into).collect(),
            success: success.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, status: &str) -> PollState {
        let status = status.trim();
        if !self.terminal.contains(status) {
            PollState::Pending
        } else if self.success.contains(status) {
            PollState::Succeeded
        } else {
            PollState::Failed
        }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
