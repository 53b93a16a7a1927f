//! Calendar-file payload generation.
//!
//! The payload is a fixed sequence of line records joined with CRLF, as
//! the calendar interchange grammar requires. Optional lines are omitted
//! entirely, never emitted blank. Bulk export keeps the site's original
//! "all sessions in one download" behavior: one block per session, blocks
//! separated by a single blank line.

use chrono::{DateTime, Utc};

use crate::config::Venue;
use crate::session::Session;

/// Fixed product identifier for generated payloads.
pub const PRODID: &str = "-//Salto//No Hype Event//PT";

/// Domain suffix for generated UIDs.
const UID_DOMAIN: &str = "salto-nohype.com";

/// Default filename for a single-session export.
pub fn single_export_filename(session_id: &str) -> String {
    format!("salto-{session_id}.ics")
}

/// Fixed filename for the bulk export.
pub const BULK_EXPORT_FILENAME: &str = "salto-no-hype.ics";

/// Placeholder title for slots whose speaker is still undisclosed.
const MYSTERY_TITLE: &str = "Salto No Hype - Pregador a ser revelado";

/// A calendar entry, built from a session at the moment of export.
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl CalendarEvent {
    pub fn from_session(session: &Session, venue: &Venue) -> CalendarEvent {
        let title = match &session.speaker {
            Some(name) => format!("Salto No Hype - {name}"),
            None => MYSTERY_TITLE.to_string(),
        };

        CalendarEvent {
            title,
            start: session.start,
            end: session.end,
            description: session.description.clone(),
            location: Some(format!(
                "{}, {} - {}",
                venue.name, venue.address, venue.city
            )),
        }
    }
}

/// Compact UTC timestamp shared by both export formats: `YYYYMMDDTHHMMSSZ`.
pub fn format_compact_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Generate the `.ics` payload for a single event.
///
/// `generated_at` seeds the UID together with `uid_slug` (the session id),
/// so a bulk export generated in one instant cannot collide with itself.
pub fn generate_ics(
    event: &CalendarEvent,
    uid_slug: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "BEGIN:VEVENT".to_string(),
        format!(
            "UID:{}-{}@{}",
            generated_at.timestamp_millis(),
            uid_slug,
            UID_DOMAIN
        ),
        format!("DTSTART:{}", format_compact_utc(event.start)),
        format!("DTEND:{}", format_compact_utc(event.end)),
        format!("SUMMARY:{}", event.title),
    ];

    if let Some(description) = &event.description {
        lines.push(format!("DESCRIPTION:{description}"));
    }
    if let Some(location) = &event.location {
        lines.push(format!("LOCATION:{location}"));
    }

    lines.push("STATUS:CONFIRMED".to_string());
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    lines.join("\r\n")
}

/// Generate the bulk payload: one block per `(uid_slug, event)` pair,
/// blocks joined by exactly one blank line.
pub fn generate_ics_bulk(
    entries: &[(String, CalendarEvent)],
    generated_at: DateTime<Utc>,
) -> String {
    entries
        .iter()
        .map(|(slug, event)| generate_ics(event, slug, generated_at))
        .collect::<Vec<_>>()
        .join("\r\n\r\n")
}
