// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling a status endpoint until a terminal status or the deadline

use gk_adapters::StatusAdapter;
use gk_core::limits::MAX_STATUS_LEN;
use gk_core::{Outcome, PollSpec, PollState};

/// What one probe observed
#[derive(Debug, Clone, PartialEq, Eq)]
enum Observation {
    Status(String),
    /// Reached the endpoint but got no usable status
    Unusable(String),
    Unreachable(String),
}

/// Probe `spec.url` on the schedule until a terminal status is observed.
///
/// Probes never overlap: each one finishes before the next offset is slept
/// to, and offsets that pass while a slow probe runs are skipped. The
/// deadline bounds the whole poll; a probe still in flight when it passes
/// is abandoned. Unreachable and unusable responses keep polling; if the
/// endpoint was never reached the step is `Unavailable`, otherwise it is a
/// `Timeout`.
pub async fn poll<S: StatusAdapter>(status: &S, spec: &PollSpec) -> Outcome {
    let start = tokio::time::Instant::now();
    let deadline_at = start + spec.schedule.deadline;
    let mut last: Option<Observation> = None;
    let mut reached = false;
    let mut cut_off = false;
    let mut probes = 0usize;

    for offset in &spec.schedule {
        let due = start + offset;
        if tokio::time::Instant::now() > due {
            tracing::debug!(?offset, "probe offset missed");
            continue;
        }
        tokio::time::sleep_until(due).await;
        probes += 1;

        let Ok(observation) = tokio::time::timeout_at(deadline_at, probe(status, spec)).await
        else {
            tracing::warn!(probes, "status probe still running at the deadline");
            cut_off = true;
            break;
        };
        if let Observation::Status(value) = &observation {
            match spec.rule.classify(value) {
                PollState::Succeeded => {
                    tracing::info!(status = %value, probes, "terminal status reached");
                    return Outcome::Success;
                }
                PollState::Failed => {
                    tracing::warn!(status = %value, probes, "terminal failure status");
                    return Outcome::failed(
                        None,
                        format!("{} reported terminal status '{}'", spec.url, value),
                    );
                }
                PollState::Pending => tracing::debug!(status = %value, "still pending"),
            }
        }
        if !matches!(observation, Observation::Unreachable(_)) {
            reached = true;
        }
        last = Some(observation);
    }

    let deadline = spec.schedule.deadline;
    let tail = if cut_off { "; last probe still in flight at the deadline" } else { "" };
    match last {
        Some(Observation::Unreachable(message)) if !reached && !cut_off => {
            Outcome::unavailable(format!(
                "{} unreachable for {:?} ({} probes): {}",
                spec.url, deadline, probes, message
            ))
        }
        Some(observation) => Outcome::timeout(format!(
            "no terminal status from {} within {:?} ({} probes); last observed: {}{}",
            spec.url,
            deadline,
            probes,
            describe(&observation),
            tail
        )),
        None if cut_off => Outcome::timeout(format!(
            "no response from {} within {:?}{}",
            spec.url, deadline, tail
        )),
        None => Outcome::timeout(format!("{} was never probed", spec.url)),
    }
}

async fn probe<S: StatusAdapter>(status: &S, spec: &PollSpec) -> Observation {
    match status.fetch(&spec.url).await {
        Err(e) => Observation::Unreachable(e.to_string()),
        Ok(response) if !(200..300).contains(&response.code) => {
            Observation::Unusable(format!("HTTP {}", response.code))
        }
        Ok(response) => match &spec.field {
            None => Observation::Status(clip(response.body.trim())),
            Some(field) => extract_field(&response.body, field),
        },
    }
}

/// Read a top-level field of a JSON body as the status value
fn extract_field(body: &str, field: &str) -> Observation {
    let json: serde_json::Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => return Observation::Unusable(format!("body is not JSON: {}", e)),
    };
    match json.get(field) {
        Some(serde_json::Value::String(s)) => Observation::Status(clip(s)),
        Some(serde_json::Value::Null) | None => {
            Observation::Unusable(format!("field '{}' missing", field))
        }
        Some(other) => Observation::Status(clip(&other.to_string())),
    }
}

fn clip(value: &str) -> String {
    if value.len() <= MAX_STATUS_LEN {
        return value.to_string();
    }
    let mut end = MAX_STATUS_LEN;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &value[..end])
}

fn describe(observation: &Observation) -> String {
    match observation {
        Observation::Status(value) => format!("'{}'", value),
        Observation::Unusable(why) => why.clone(),
        Observation::Unreachable(why) => format!("unreachable: {}", why),
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
