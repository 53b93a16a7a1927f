//! Canonical event program types.
//!
//! These are what config validation produces and what the reveal model,
//! the exporters and the CLI consume. The raw `event.toml` shapes live in
//! the `config` module.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Day-of-event tag. Tags drive schedule grouping and day dividers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDay {
    Sexta,
    Sabado,
    Domingo,
}

impl EventDay {
    /// Parse a config/CLI day tag ("sexta", "sabado", "domingo").
    pub fn parse(tag: &str) -> Option<EventDay> {
        match tag {
            "sexta" => Some(EventDay::Sexta),
            "sabado" => Some(EventDay::Sabado),
            "domingo" => Some(EventDay::Domingo),
            _ => None,
        }
    }

    /// Display label (e.g. "Sábado").
    pub fn label(&self) -> &'static str {
        match self {
            EventDay::Sexta => "Sexta",
            EventDay::Sabado => "Sábado",
            EventDay::Domingo => "Domingo",
        }
    }
}

/// One scheduled speaking slot in the event program.
///
/// Instants are stored in UTC; the configured offset is applied at parse
/// time and the event timezone only matters for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// `None` until the speaker is disclosed in the program ("mystery" slot).
    pub speaker: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub day: EventDay,
    /// Image shown before the reveal instant.
    pub silhouette_image: String,
    /// Image shown once the speaker is revealed.
    pub revealed_image: String,
}

impl Session {
    /// Whether the speaker identity is undisclosed in the program data.
    pub fn is_mystery(&self) -> bool {
        self.speaker.is_none()
    }

    /// Session length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Start time rendered in the event timezone (e.g. "19:00").
    pub fn start_time_in(&self, tz: Tz) -> String {
        self.start.with_timezone(&tz).format("%H:%M").to_string()
    }

    /// Start date rendered in the event timezone (e.g. "14/11").
    pub fn start_date_in(&self, tz: Tz) -> String {
        self.start.with_timezone(&tz).format("%d/%m").to_string()
    }
}
