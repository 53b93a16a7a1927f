//! Terminal rendering for program types.
//!
//! Colored line builders on top of salto-core types using owo_colors.

use chrono_tz::Tz;
use owo_colors::OwoColorize;
use salto_core::reveal::{RevealState, format_duration};
use salto_core::session::Session;

/// Placeholder name for undisclosed speaker slots.
pub const MYSTERY_LABEL: &str = "Slot Misterioso";

/// Speaker name, or the mystery placeholder.
pub fn speaker_label(session: &Session) -> &str {
    session.speaker.as_deref().unwrap_or(MYSTERY_LABEL)
}

/// Day divider, e.g. "Sexta • 14/11".
pub fn day_divider(session: &Session, tz: Tz) -> String {
    format!("{} • {}", session.day.label(), session.start_date_in(tz))
        .bold()
        .to_string()
}

/// One schedule line: start time, speaker and duration.
pub fn schedule_line(session: &Session, tz: Tz) -> String {
    let duration = format!("{}min", session.duration_minutes());
    format!(
        "  {} {} {}",
        session.start_time_in(tz),
        speaker_label(session),
        duration.dimmed()
    )
}

/// One reveal-status line for the speakers and watch views.
pub fn reveal_line(session: &Session, state: &RevealState, tz: Tz) -> String {
    let when = format!("{} {}", session.day.label(), session.start_time_in(tz));

    if state.is_ended {
        return format!(
            "  {} {} {}",
            when.dimmed(),
            speaker_label(session).dimmed(),
            "encerrado".dimmed()
        );
    }

    if state.is_revealed {
        return match &session.speaker {
            Some(name) => format!(
                "  {} {} {}",
                when,
                name.green().bold(),
                format!("[{}]", session.revealed_image).dimmed()
            ),
            None => format!(
                "  {} {} {}",
                when,
                "Eaí, quem será? 👀".yellow(),
                format!("[{}]", session.silhouette_image).dimmed()
            ),
        };
    }

    format!(
        "  {} {} {} {}",
        when,
        "revela em".yellow(),
        format_duration(state.time_until_reveal).yellow().bold(),
        format!("[{}]", session.silhouette_image).dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use salto_core::session::EventDay;

    fn tz() -> Tz {
        chrono_tz::America::Sao_Paulo
    }

    fn session(speaker: Option<&str>) -> Session {
        Session {
            id: "s1".to_string(),
            speaker: speaker.map(str::to_string),
            start: Utc.with_ymd_and_hms(2025, 11, 14, 19, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 11, 14, 20, 0, 0).unwrap(),
            description: None,
            day: EventDay::Sexta,
            silhouette_image: "pregador_1_placeholder.png".to_string(),
            revealed_image: "joao_heuldes.png".to_string(),
        }
    }

    #[test]
    fn schedule_line_shows_time_speaker_and_duration() {
        let line = schedule_line(&session(Some("João Heuldes")), tz());
        assert!(line.contains("16:00"));
        assert!(line.contains("João Heuldes"));
        assert!(line.contains("60min"));
    }

    #[test]
    fn mystery_slots_use_the_placeholder() {
        let line = schedule_line(&session(None), tz());
        assert!(line.contains(MYSTERY_LABEL));
    }

    #[test]
    fn hidden_state_renders_a_countdown_and_the_silhouette() {
        let state = RevealState {
            is_revealed: false,
            time_until_reveal: Duration::seconds(3661),
            is_ended: false,
        };
        let line = reveal_line(&session(Some("João Heuldes")), &state, tz());
        assert!(line.contains("01:01:01"));
        assert!(line.contains("pregador_1_placeholder.png"));
        assert!(!line.contains("João Heuldes"));
    }

    #[test]
    fn revealed_state_names_the_speaker_and_the_real_image() {
        let state = RevealState {
            is_revealed: true,
            time_until_reveal: Duration::zero(),
            is_ended: false,
        };
        let line = reveal_line(&session(Some("João Heuldes")), &state, tz());
        assert!(line.contains("João Heuldes"));
        assert!(line.contains("joao_heuldes.png"));
    }

    #[test]
    fn revealed_mystery_slot_stays_concealed() {
        let state = RevealState {
            is_revealed: true,
            time_until_reveal: Duration::zero(),
            is_ended: false,
        };
        let line = reveal_line(&session(None), &state, tz());
        assert!(line.contains("quem será"));
        assert!(line.contains("pregador_1_placeholder.png"));
    }

    #[test]
    fn ended_sessions_are_marked() {
        let state = RevealState {
            is_revealed: true,
            time_until_reveal: Duration::zero(),
            is_ended: true,
        };
        let line = reveal_line(&session(Some("João Heuldes")), &state, tz());
        assert!(line.contains("encerrado"));
    }
}
