//! User-facing announcements for the watch loop.
//!
//! The original announcement surface was a lazily created live region
//! owned by a module-level singleton. Here the announcer is an explicit
//! service instance owned by whoever runs the loop, with the output sink
//! injected so tests can capture what was said.

use std::io::Write;

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Polite,
    Assertive,
}

pub struct Announcer<W: Write> {
    out: W,
}

impl Announcer<std::io::Stderr> {
    /// Announce on stderr, keeping stdout free for the countdown view.
    pub fn stderr() -> Self {
        Announcer {
            out: std::io::stderr(),
        }
    }
}

impl<W: Write> Announcer<W> {
    pub fn new(out: W) -> Self {
        Announcer { out }
    }

    /// Consume the announcer, returning its sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one announcement line. Write failures are ignored; the watch
    /// loop keeps running without its announcements.
    pub fn announce(&mut self, message: &str, priority: Priority) {
        let line = match priority {
            Priority::Assertive => format!("{}\n", message.bold()),
            Priority::Polite => format!("{}\n", message.dimmed()),
        };
        let _ = self.out.write_all(line.as_bytes());
        let _ = self.out.flush();
    }
}
