//! Time-gated speaker reveal.
//!
//! Everything here is a pure function of `(session, now, lead)`. The wall
//! clock enters only through the `Clock` capability, so callers and tests
//! can pin "now" to arbitrary instants.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Utc};

use crate::session::Session;

/// A source of "now". Injected wherever the current instant is needed.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reveal timing, resolved from config plus any CLI overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSettings {
    /// How long before a session's start the speaker becomes visible.
    pub lead: Duration,
    /// How long before start the revealed image may begin warming.
    pub preload_lead: Duration,
}

impl Default for RevealSettings {
    fn default() -> Self {
        RevealSettings {
            lead: Duration::minutes(60),
            preload_lead: Duration::minutes(120),
        }
    }
}

/// Derived temporal state for one session at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    pub is_revealed: bool,
    /// Clamped to zero once revealed.
    pub time_until_reveal: Duration,
    pub is_ended: bool,
}

impl RevealState {
    /// Compute the reveal state for `session` at `now`.
    ///
    /// The reveal boundary is inclusive: at exactly `start - lead` the
    /// speaker is revealed. `is_ended` never re-conceals a speaker.
    pub fn at(session: &Session, now: DateTime<Utc>, lead: Duration) -> RevealState {
        let reveal_at = session.start - lead;
        let is_revealed = now >= reveal_at;
        let time_until_reveal = if is_revealed {
            Duration::zero()
        } else {
            reveal_at - now
        };

        RevealState {
            is_revealed,
            time_until_reveal,
            is_ended: now >= session.end,
        }
    }
}

/// Whether the revealed image should start warming ahead of the reveal,
/// so that the swap is not blocked on a fetch.
pub fn should_preload(session: &Session, now: DateTime<Utc>, preload_lead: Duration) -> bool {
    now >= session.start - preload_lead
}

/// Format a duration as zero-padded `HH:MM:SS`.
///
/// Durations at or below zero format as "00:00:00". Hours run past 24
/// rather than wrapping into days.
pub fn format_duration(d: Duration) -> String {
    let secs = d.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Immutable per-tick view of the whole program.
///
/// Recomputed from scratch each tick; nothing is carried over between
/// ticks except the wall-clock read itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSnapshot {
    pub taken_at: DateTime<Utc>,
    pub states: BTreeMap<String, RevealState>,
    /// Ids of sessions inside the preload window at `taken_at`.
    pub preload_ready: BTreeSet<String>,
}

impl ProgramSnapshot {
    pub fn compute(
        sessions: &[Session],
        now: DateTime<Utc>,
        settings: RevealSettings,
    ) -> ProgramSnapshot {
        let states = sessions
            .iter()
            .map(|s| (s.id.clone(), RevealState::at(s, now, settings.lead)))
            .collect();
        let preload_ready = sessions
            .iter()
            .filter(|s| should_preload(s, now, settings.preload_lead))
            .map(|s| s.id.clone())
            .collect();

        ProgramSnapshot {
            taken_at: now,
            states,
            preload_ready,
        }
    }

    pub fn get(&self, session_id: &str) -> Option<&RevealState> {
        self.states.get(session_id)
    }
}
