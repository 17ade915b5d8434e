// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Step timings and run timestamps go through a [`Clock`] so that two runs
//! against identical stub plans produce identical reports.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    /// Monotonic instant, used for elapsed-time measurement
    fn now(&self) -> Instant;

    /// Wall-clock time, used for report timestamps
    fn wall(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug)]
struct FakeTime {
    instant: Instant,
    offset: Duration,
}

/// Fake clock for testing with controllable time
///
/// Time only moves when [`FakeClock::advance`] is called. Wall time starts at
/// the Unix epoch plus the advanced offset.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                offset: Duration::ZERO,
            })),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.instant += duration;
        current.offset += duration;
    }

    /// Total time advanced since creation
    pub fn elapsed(&self) -> Duration {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).offset
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).instant
    }

    fn wall(&self) -> DateTime<Utc> {
        let offset = self.elapsed();
        let base = Utc.timestamp_opt(0, 0).single().unwrap_or_default();
        base + chrono::Duration::from_std(offset).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
