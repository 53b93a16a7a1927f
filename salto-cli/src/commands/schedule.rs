use anyhow::Result;
use owo_colors::OwoColorize;
use salto_core::config::EventConfig;
use salto_core::session::EventDay;

use crate::render;

pub fn run(event: &EventConfig, day: Option<&str>) -> Result<()> {
    let filter = match day {
        Some(tag) => Some(EventDay::parse(tag).ok_or_else(|| {
            anyhow::anyhow!("Unknown day '{}'. Expected: sexta, sabado or domingo", tag)
        })?),
        None => None,
    };

    let sessions: Vec<_> = event
        .sessions
        .iter()
        .filter(|s| filter.is_none_or(|d| s.day == d))
        .collect();

    if sessions.is_empty() {
        println!("{}", "Nenhuma sessão encontrada".dimmed());
        return Ok(());
    }

    let mut current_day: Option<EventDay> = None;
    for session in sessions {
        if current_day != Some(session.day) {
            if current_day.is_some() {
                println!();
            }
            println!("{}", render::day_divider(session, event.timezone));
            current_day = Some(session.day);
        }

        println!("{}", render::schedule_line(session, event.timezone));
        if let Some(description) = &session.description {
            println!("        {}", description.dimmed());
        }
    }

    Ok(())
}
