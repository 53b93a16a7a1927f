//! Core types and logic for the Salto No Hype event program.
//!
//! This crate provides everything the CLI renders on top of:
//! - `config`: `event.toml` loading and load-time validation
//! - `session`: canonical program types (sessions, days, venue data)
//! - `reveal`: the time-gated speaker reveal model
//! - `ics` / `gcal`: the two calendar export formats
//! - `poll`: the 1 Hz snapshot poller

pub mod config;
pub mod error;
pub mod gcal;
pub mod ics;
pub mod poll;
pub mod reveal;
pub mod session;

pub use error::{SaltoError, SaltoResult};
pub use session::{EventDay, Session};
