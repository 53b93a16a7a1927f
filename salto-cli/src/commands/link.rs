use anyhow::Result;
use salto_core::config::EventConfig;
use salto_core::gcal;
use salto_core::ics::CalendarEvent;

pub fn run(event: &EventConfig, session_id: Option<&str>, open_browser: bool) -> Result<()> {
    let session = super::resolve_session(event, session_id)?;
    let entry = CalendarEvent::from_session(session, &event.venue);
    let url = gcal::google_calendar_url(&entry);

    println!("{url}");

    if open_browser && open::that(url.as_str()).is_err() {
        println!("(Could not open browser automatically, please copy the URL above)");
    }

    Ok(())
}
