// src/scheduling.rs
//
// Time-driven scheduling gate. All comparisons take a caller-supplied `now`
// so submission checks stay deterministic and testable without clock mocking.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Whether an assessment currently accepts submissions.
///
/// `ClosingSoon` is advisory only (UIs warn the user); the hard boundary is
/// `Closed`. Transitions are purely time-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Open,
    ClosingSoon,
    Closed,
}

/// Derives the gate state from the close time.
pub fn gate_state(close_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> GateState {
    match close_at {
        None => GateState::Open,
        Some(close_at) if now >= close_at => GateState::Closed,
        Some(close_at) if close_at - now <= Duration::hours(24) => GateState::ClosingSoon,
        Some(_) => GateState::Open,
    }
}

/// Submissions are accepted in every state except `Closed`.
pub fn can_submit(close_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    gate_state(close_at, now) != GateState::Closed
}
