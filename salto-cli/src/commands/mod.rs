pub mod export;
pub mod faq;
pub mod info;
pub mod link;
pub mod merch;
pub mod schedule;
pub mod speakers;
pub mod watch;

use anyhow::{Context, Result};
use dialoguer::Select;
use salto_core::config::EventConfig;
use salto_core::reveal::RevealSettings;
use salto_core::session::Session;

use crate::render;

/// Resolve which session a command targets: an explicit id, or an
/// interactive picker when none is given.
pub fn resolve_session<'a>(event: &'a EventConfig, id: Option<&str>) -> Result<&'a Session> {
    if let Some(id) = id {
        return event.sessions.iter().find(|s| s.id == id).ok_or_else(|| {
            let available: Vec<_> = event.sessions.iter().map(|s| s.id.as_str()).collect();
            anyhow::anyhow!(
                "Session '{}' not found. Available: {}",
                id,
                available.join(", ")
            )
        });
    }

    let items: Vec<String> = event
        .sessions
        .iter()
        .map(|s| {
            format!(
                "{}  {} {}  {}",
                s.id,
                s.day.label(),
                s.start_time_in(event.timezone),
                render::speaker_label(s)
            )
        })
        .collect();

    let selection = Select::new()
        .with_prompt("  Session")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(&event.sessions[selection])
}

/// Parse a human duration flag (e.g. "90m", "2h") into a chrono duration.
pub fn parse_lead(input: &str) -> Result<chrono::Duration> {
    let std_dur = humantime::parse_duration(input)
        .map_err(|e| anyhow::anyhow!("Could not parse duration \"{}\": {}", input, e))?;
    chrono::Duration::from_std(std_dur).context("Duration too large")
}

/// Apply CLI duration overrides on top of the configured reveal settings.
pub fn settings_with_overrides(
    event: &EventConfig,
    lead: Option<&str>,
    preload_lead: Option<&str>,
) -> Result<RevealSettings> {
    let mut settings = event.reveal;
    if let Some(input) = lead {
        settings.lead = parse_lead(input)?;
    }
    if let Some(input) = preload_lead {
        settings.preload_lead = parse_lead(input)?;
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lead_accepts_human_durations() {
        assert_eq!(parse_lead("90m").unwrap(), chrono::Duration::minutes(90));
        assert_eq!(parse_lead("2h").unwrap(), chrono::Duration::hours(2));
        assert_eq!(parse_lead("45s").unwrap(), chrono::Duration::seconds(45));
    }

    #[test]
    fn parse_lead_rejects_garbage() {
        assert!(parse_lead("soon").is_err());
    }
}
