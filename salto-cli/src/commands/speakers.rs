use anyhow::Result;
use salto_core::config::EventConfig;
use salto_core::reveal::{Clock, RevealState, SystemClock};

use crate::render;

pub fn run(event: &EventConfig, lead: Option<&str>) -> Result<()> {
    let settings = super::settings_with_overrides(event, lead, None)?;
    let now = SystemClock.now();

    for session in &event.sessions {
        let state = RevealState::at(session, now, settings.lead);
        println!("{}", render::reveal_line(session, &state, event.timezone));
    }

    Ok(())
}
