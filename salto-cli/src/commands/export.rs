use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use salto_core::config::EventConfig;
use salto_core::ics::{self, CalendarEvent};
use salto_core::reveal::{Clock, SystemClock};

pub fn run(
    event: &EventConfig,
    session_id: Option<&str>,
    all: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let out_dir = output.unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Could not create {}", out_dir.display()))?;

    let generated_at = SystemClock.now();

    if all {
        let entries: Vec<(String, CalendarEvent)> = event
            .sessions
            .iter()
            .map(|s| (s.id.clone(), CalendarEvent::from_session(s, &event.venue)))
            .collect();

        let payload = ics::generate_ics_bulk(&entries, generated_at);
        let path = out_dir.join(ics::BULK_EXPORT_FILENAME);
        fs::write(&path, payload)
            .with_context(|| format!("Could not write {}", path.display()))?;

        println!(
            "{}",
            format!("  Exported {} sessions: {}", entries.len(), path.display()).green()
        );
        return Ok(());
    }

    let session = super::resolve_session(event, session_id)?;
    let entry = CalendarEvent::from_session(session, &event.venue);
    let payload = ics::generate_ics(&entry, &session.id, generated_at);
    let path = out_dir.join(ics::single_export_filename(&session.id));
    fs::write(&path, payload).with_context(|| format!("Could not write {}", path.display()))?;

    println!("{}", format!("  Exported: {}", path.display()).green());
    Ok(())
}
