//! Event program configuration.
//!
//! The program is described by a single `event.toml` file: sessions,
//! venue, ticketing, merch and FAQ data. Raw shapes are deserialized with
//! serde and then validated in one step into the canonical types; a
//! malformed entry (bad timestamp, end before start, duplicate id) is a
//! fatal load-time error, never a nonsensical derived state later.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{SaltoError, SaltoResult};
use crate::reveal::RevealSettings;
use crate::session::{EventDay, Session};

/// Event venue record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub city: String,
}

/// External links (checkout is delegated, never handled here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Links {
    pub tickets: String,
}

/// Ticket pricing and benefits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tickets {
    pub price: u32,
    pub presale_price: Option<u32>,
    pub lot: String,
    pub benefits: Vec<String>,
}

/// One merch listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u32,
    pub image: String,
    pub purchase_link: Option<String>,
}

/// One FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: u32,
    pub question: String,
    pub answer: String,
}

/// The validated event program.
#[derive(Debug, Clone)]
pub struct EventConfig {
    pub timezone: Tz,
    pub reveal: RevealSettings,
    /// Sorted by start instant.
    pub sessions: Vec<Session>,
    pub links: Links,
    pub tickets: Tickets,
    pub venue: Venue,
    pub products: Vec<Product>,
    pub faq: Vec<FaqEntry>,
}

impl EventConfig {
    /// Load and validate an event file.
    pub fn load(path: &Path) -> SaltoResult<EventConfig> {
        let raw: EventConfigFile = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()
            .map_err(|e| SaltoError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SaltoError::Config(e.to_string()))?;

        raw.validate()
    }

    /// Parse and validate an event program from a TOML string.
    pub fn from_toml_str(input: &str) -> SaltoResult<EventConfig> {
        let raw: EventConfigFile =
            toml::from_str(input).map_err(|e| SaltoError::Config(e.to_string()))?;

        raw.validate()
    }

    /// Resolve which event file to load: an explicit path, `./event.toml`,
    /// then `<config_dir>/salto/event.toml`.
    pub fn resolve_path(explicit: Option<PathBuf>) -> SaltoResult<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path);
            }
            return Err(SaltoError::Config(format!(
                "event file not found: {}",
                path.display()
            )));
        }

        let local = PathBuf::from("event.toml");
        if local.exists() {
            return Ok(local);
        }

        if let Some(dir) = dirs::config_dir() {
            let global = dir.join("salto").join("event.toml");
            if global.exists() {
                return Ok(global);
            }
        }

        Err(SaltoError::Config(
            "No event.toml found. Pass --config <path> or place event.toml in the working directory."
                .to_string(),
        ))
    }
}

/// Raw shape of `event.toml` before validation.
#[derive(Debug, Deserialize)]
struct EventConfigFile {
    timezone: String,
    #[serde(default)]
    reveal: RevealFile,
    sessions: Vec<SessionFile>,
    links: Links,
    tickets: Tickets,
    venue: Venue,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    faq: Vec<FaqEntry>,
}

#[derive(Debug, Deserialize)]
struct RevealFile {
    #[serde(default = "default_lead_minutes")]
    lead_minutes: i64,
    #[serde(default = "default_preload_lead_minutes")]
    preload_lead_minutes: i64,
}

fn default_lead_minutes() -> i64 {
    60
}

fn default_preload_lead_minutes() -> i64 {
    120
}

impl Default for RevealFile {
    fn default() -> Self {
        RevealFile {
            lead_minutes: default_lead_minutes(),
            preload_lead_minutes: default_preload_lead_minutes(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionFile {
    id: String,
    speaker: Option<String>,
    start: String,
    end: String,
    description: Option<String>,
    day: String,
    silhouette_image: String,
    revealed_image: String,
}

impl EventConfigFile {
    fn validate(self) -> SaltoResult<EventConfig> {
        let timezone: Tz = self
            .timezone
            .parse()
            .map_err(|_| SaltoError::UnknownTimezone(self.timezone.clone()))?;

        if self.reveal.lead_minutes < 0 || self.reveal.preload_lead_minutes < 0 {
            return Err(SaltoError::Config(
                "reveal lead times must be non-negative".to_string(),
            ));
        }
        let reveal = RevealSettings {
            lead: Duration::minutes(self.reveal.lead_minutes),
            preload_lead: Duration::minutes(self.reveal.preload_lead_minutes),
        };

        if self.sessions.is_empty() {
            return Err(SaltoError::EmptyProgram);
        }

        let mut seen = BTreeSet::new();
        let mut sessions = Vec::with_capacity(self.sessions.len());
        for raw in self.sessions {
            let session = raw.validate()?;
            if !seen.insert(session.id.clone()) {
                return Err(SaltoError::InvalidSession {
                    id: session.id,
                    reason: "duplicate session id".to_string(),
                });
            }
            sessions.push(session);
        }
        sessions.sort_by_key(|s| s.start);

        Ok(EventConfig {
            timezone,
            reveal,
            sessions,
            links: self.links,
            tickets: self.tickets,
            venue: self.venue,
            products: self.products,
            faq: self.faq,
        })
    }
}

impl SessionFile {
    fn validate(self) -> SaltoResult<Session> {
        if self.id.trim().is_empty() {
            return Err(SaltoError::Config(
                "session with empty id".to_string(),
            ));
        }

        let invalid = |reason: String| SaltoError::InvalidSession {
            id: self.id.clone(),
            reason,
        };

        let start = parse_instant(&self.start).map_err(&invalid)?;
        let end = parse_instant(&self.end).map_err(&invalid)?;
        if end <= start {
            return Err(invalid(format!(
                "end '{}' is not after start '{}'",
                self.end, self.start
            )));
        }

        let day = EventDay::parse(&self.day).ok_or_else(|| {
            invalid(format!(
                "unknown day tag '{}' (expected sexta, sabado or domingo)",
                self.day
            ))
        })?;

        // An empty or whitespace-only speaker means an undisclosed slot.
        let speaker = self.speaker.filter(|s| !s.trim().is_empty());

        Ok(Session {
            id: self.id,
            speaker,
            start,
            end,
            description: self.description,
            day,
            silhouette_image: self.silhouette_image,
            revealed_image: self.revealed_image,
        })
    }
}

/// RFC 3339 with offset; stored internally in UTC.
fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("unparseable timestamp '{s}' (expected RFC 3339)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn program_toml(sessions: &str) -> String {
        format!(
            r#"
timezone = "America/Sao_Paulo"
{sessions}

[links]
tickets = "https://youministerio.hotmart.host/conf2025"

[tickets]
price = 150
presale_price = 120
lot = "2º Lote"
benefits = ["Acesso a todas as sessões", "Coffee break incluso"]

[venue]
name = "Centro de Convenções São Paulo"
address = "Rua das Convenções, 1000 - Vila Olímpia"
city = "São Paulo - SP"
"#
        )
    }

    const JOAO: &str = r#"
[[sessions]]
id = "s1"
speaker = "João Heuldes"
start = "2025-11-14T19:00:00Z"
end = "2025-11-14T20:00:00Z"
day = "sexta"
silhouette_image = "pregador_1_placeholder.png"
revealed_image = "joao_heuldes.png"
"#;

    #[test]
    fn loads_a_valid_program() {
        let config = EventConfig::from_toml_str(&program_toml(JOAO)).unwrap();

        assert_eq!(config.timezone, chrono_tz::America::Sao_Paulo);
        assert_eq!(config.sessions.len(), 1);
        let s = &config.sessions[0];
        assert_eq!(s.speaker.as_deref(), Some("João Heuldes"));
        assert_eq!(s.start, Utc.with_ymd_and_hms(2025, 11, 14, 19, 0, 0).unwrap());
        assert_eq!(s.day, EventDay::Sexta);
        assert_eq!(config.tickets.presale_price, Some(120));
    }

    #[test]
    fn reveal_settings_default_when_absent() {
        let config = EventConfig::from_toml_str(&program_toml(JOAO)).unwrap();
        assert_eq!(config.reveal.lead, Duration::minutes(60));
        assert_eq!(config.reveal.preload_lead, Duration::minutes(120));
    }

    #[test]
    fn reveal_settings_can_be_overridden() {
        let toml = format!(
            "{}\n[reveal]\nlead_minutes = 30\npreload_lead_minutes = 90\n",
            program_toml(JOAO)
        );
        let config = EventConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.reveal.lead, Duration::minutes(30));
        assert_eq!(config.reveal.preload_lead, Duration::minutes(90));
    }

    #[test]
    fn empty_speaker_becomes_a_mystery_slot() {
        let sessions = r#"
[[sessions]]
id = "s2"
speaker = ""
start = "2025-11-15T19:00:00Z"
end = "2025-11-15T20:00:00Z"
day = "sabado"
silhouette_image = "pregador_1_placeholder.png"
revealed_image = "pregador_1_placeholder.png"
"#;
        let config = EventConfig::from_toml_str(&program_toml(sessions)).unwrap();
        assert!(config.sessions[0].is_mystery());
    }

    #[test]
    fn sessions_are_sorted_by_start() {
        let sessions = r#"
[[sessions]]
id = "late"
start = "2025-11-16T19:00:00Z"
end = "2025-11-16T20:00:00Z"
day = "domingo"
silhouette_image = "a.png"
revealed_image = "a.png"

[[sessions]]
id = "early"
start = "2025-11-14T19:00:00Z"
end = "2025-11-14T20:00:00Z"
day = "sexta"
silhouette_image = "b.png"
revealed_image = "b.png"
"#;
        let config = EventConfig::from_toml_str(&program_toml(sessions)).unwrap();
        let ids: Vec<_> = config.sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn rejects_end_not_after_start() {
        let sessions = r#"
[[sessions]]
id = "s1"
start = "2025-11-14T19:00:00Z"
end = "2025-11-14T19:00:00Z"
day = "sexta"
silhouette_image = "a.png"
revealed_image = "a.png"
"#;
        let err = EventConfig::from_toml_str(&program_toml(sessions)).unwrap_err();
        assert!(matches!(err, SaltoError::InvalidSession { .. }));
    }

    #[test]
    fn rejects_unparseable_timestamps() {
        let sessions = r#"
[[sessions]]
id = "s1"
start = "14/11/2025 19:00"
end = "2025-11-14T20:00:00Z"
day = "sexta"
silhouette_image = "a.png"
revealed_image = "a.png"
"#;
        let err = EventConfig::from_toml_str(&program_toml(sessions)).unwrap_err();
        assert!(matches!(err, SaltoError::InvalidSession { .. }));
        assert!(err.to_string().contains("unparseable timestamp"));
    }

    #[test]
    fn rejects_duplicate_session_ids() {
        let sessions = r#"
[[sessions]]
id = "s1"
start = "2025-11-14T19:00:00Z"
end = "2025-11-14T20:00:00Z"
day = "sexta"
silhouette_image = "a.png"
revealed_image = "a.png"

[[sessions]]
id = "s1"
start = "2025-11-15T19:00:00Z"
end = "2025-11-15T20:00:00Z"
day = "sabado"
silhouette_image = "a.png"
revealed_image = "a.png"
"#;
        let err = EventConfig::from_toml_str(&program_toml(sessions)).unwrap_err();
        assert!(err.to_string().contains("duplicate session id"));
    }

    #[test]
    fn rejects_unknown_day_tag() {
        let sessions = r#"
[[sessions]]
id = "s1"
start = "2025-11-14T19:00:00Z"
end = "2025-11-14T20:00:00Z"
day = "segunda"
silhouette_image = "a.png"
revealed_image = "a.png"
"#;
        let err = EventConfig::from_toml_str(&program_toml(sessions)).unwrap_err();
        assert!(err.to_string().contains("unknown day tag"));
    }

    #[test]
    fn rejects_empty_program() {
        let err = EventConfig::from_toml_str(&program_toml("sessions = []")).unwrap_err();
        assert!(matches!(err, SaltoError::EmptyProgram));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let toml = program_toml(JOAO).replace("America/Sao_Paulo", "America/Nowhere");
        let err = EventConfig::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, SaltoError::UnknownTimezone(_)));
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let sessions = r#"
[[sessions]]
id = "s1"
start = "2025-11-14T16:00:00-03:00"
end = "2025-11-14T17:00:00-03:00"
day = "sexta"
silhouette_image = "a.png"
revealed_image = "a.png"
"#;
        let config = EventConfig::from_toml_str(&program_toml(sessions)).unwrap();
        assert_eq!(
            config.sessions[0].start,
            Utc.with_ymd_and_hms(2025, 11, 14, 19, 0, 0).unwrap()
        );
    }
}
