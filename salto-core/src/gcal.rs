//! Google Calendar deep link.
//!
//! Builds the `calendar.google.com/calendar/render` URL that pre-fills the
//! "add event" form. The link is a pure function of the event; opening it
//! in a browser is the caller's concern.

use url::Url;

use crate::ics::{CalendarEvent, format_compact_utc};

const RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Build the "add event" deep link for a calendar entry.
///
/// Absent optionals become empty parameters, matching what the form
/// expects. Values are percent-encoded by the URL query serializer.
pub fn google_calendar_url(event: &CalendarEvent) -> Url {
    let dates = format!(
        "{}/{}",
        format_compact_utc(event.start),
        format_compact_utc(event.end)
    );

    let mut url = Url::parse(RENDER_URL).unwrap();
    url.query_pairs_mut()
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &event.title)
        .append_pair("dates", &dates)
        .append_pair("details", event.description.as_deref().unwrap_or(""))
        .append_pair("location", event.location.as_deref().unwrap_or(""));

    url
}
