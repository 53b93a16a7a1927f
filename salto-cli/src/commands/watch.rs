use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use owo_colors::OwoColorize;
use salto_core::config::EventConfig;
use salto_core::poll::RevealPoller;
use salto_core::reveal::{Clock, ProgramSnapshot, SystemClock};

use crate::announce::{Announcer, Priority};
use crate::render;

pub async fn run(
    event: EventConfig,
    assets_dir: PathBuf,
    lead: Option<&str>,
    preload_lead: Option<&str>,
) -> Result<()> {
    let settings = super::settings_with_overrides(&event, lead, preload_lead)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let mut poller = RevealPoller::spawn(event.sessions.clone(), clock, settings);
    let mut snapshots = poller.snapshots();
    let mut announcer = Announcer::stderr();

    println!("{}", "Contagem regressiva (Ctrl-C para sair)".dimmed());
    println!();

    let mut previous = snapshots.borrow().clone();
    let mut lines_printed = redraw(&event, &previous, 0)?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow().clone();
                announce_transitions(&event, &previous, &snapshot, &mut announcer);
                lines_printed = redraw(&event, &snapshot, lines_printed)?;
                previous = snapshot;
            }
            maybe_id = poller.preloads_mut().recv() => {
                if let Some(id) = maybe_id {
                    preload_image(&event, &assets_dir, &id);
                }
            }
        }
    }

    poller.stop();
    println!();
    Ok(())
}

/// Repaint the per-session block in place, erasing the previous one.
fn redraw(event: &EventConfig, snapshot: &ProgramSnapshot, previous_lines: usize) -> Result<usize> {
    let mut out = io::stdout();
    if previous_lines > 0 {
        write!(out, "\x1b[{previous_lines}A\x1b[J")?;
    }

    let mut printed = 0;
    for session in &event.sessions {
        if let Some(state) = snapshot.get(&session.id) {
            writeln!(out, "{}", render::reveal_line(session, state, event.timezone))?;
            printed += 1;
        }
    }
    out.flush()?;

    Ok(printed)
}

/// Announce sessions that crossed the reveal or end boundary this tick.
fn announce_transitions(
    event: &EventConfig,
    previous: &ProgramSnapshot,
    current: &ProgramSnapshot,
    announcer: &mut Announcer<impl Write>,
) {
    for session in &event.sessions {
        let (Some(before), Some(after)) = (previous.get(&session.id), current.get(&session.id))
        else {
            continue;
        };

        if !before.is_revealed && after.is_revealed {
            if let Some(name) = &session.speaker {
                announcer.announce(&format!("Pregador revelado: {name}"), Priority::Assertive);
            }
        }

        if !before.is_ended && after.is_ended {
            announcer.announce(
                &format!("Sessão encerrada: {}", render::speaker_label(session)),
                Priority::Polite,
            );
        }
    }
}

/// Fire-and-forget warm of the revealed image so the swap is not blocked
/// on a read at reveal time. Failures are ignored.
fn preload_image(event: &EventConfig, assets_dir: &Path, session_id: &str) {
    if let Some(session) = event.sessions.iter().find(|s| s.id == session_id) {
        let path = assets_dir.join(&session.revealed_image);
        tokio::spawn(async move {
            let _ = tokio::fs::read(&path).await;
        });
    }
}
