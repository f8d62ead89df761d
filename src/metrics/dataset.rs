//! Session dataset access
//!
//! A session directory stores software events as JSON-lines files under
//! `behavior/SoftwareEvents/<StreamName>.json`, one
//! `{"timestamp": <seconds>, "data": <payload>}` record per line.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory of software-event streams relative to the session root.
pub const SOFTWARE_EVENTS_DIR: &str = "behavior/SoftwareEvents";

/// One software event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SoftwareEvent {
    pub timestamp: f64,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// A loaded event stream.
///
/// Missing and unparsable files load as [`EventStream::Errored`] rather than
/// failing, so extraction can decide per stream whether absence is fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum EventStream {
    Loaded { name: String, events: Vec<SoftwareEvent> },
    Errored { name: String, reason: String },
}

impl EventStream {
    pub fn name(&self) -> &str {
        match self {
            Self::Loaded { name, .. } | Self::Errored { name, .. } => name,
        }
    }

    /// Events of a healthy, non-empty stream.
    pub fn events(&self) -> Option<&[SoftwareEvent]> {
        match self {
            Self::Loaded { events, .. } if !events.is_empty() => Some(events),
            _ => None,
        }
    }

    pub fn has_error_or_empty(&self) -> bool {
        self.events().is_none()
    }

    /// Payload of the last event as a number.
    pub fn last_f64(&self) -> Result<Option<f64>> {
        match self.events().and_then(<[SoftwareEvent]>::last) {
            Some(event) => number(self.name(), &event.data).map(Some),
            None => Ok(None),
        }
    }

    /// Sum of all payloads as numbers; 0 for an errored or empty stream.
    pub fn sum_f64(&self) -> Result<f64> {
        let mut total = 0.0;
        for event in self.events().unwrap_or_default() {
            total += number(self.name(), &event.data)?;
        }
        Ok(total)
    }

    /// Describe why the stream is unusable.
    pub fn unavailable_reason(&self) -> String {
        match self {
            Self::Errored { reason, .. } => reason.clone(),
            Self::Loaded { .. } => "stream is empty".to_string(),
        }
    }
}

/// Handle to one session's data directory.
#[derive(Debug, Clone)]
pub struct SessionDataset {
    root: PathBuf,
}

impl SessionDataset {
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::dataset(
                "dataset",
                format!("session directory not found: {}", root.display()),
            ));
        }
        Ok(Self { root: root.to_path_buf() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn software_events(&self, name: &str) -> EventStream {
        let path = self.root.join(SOFTWARE_EVENTS_DIR).join(format!("{name}.json"));
        match fs::read_to_string(&path) {
            Ok(content) => match parse_json_lines(&content) {
                Ok(events) => EventStream::Loaded { name: name.to_string(), events },
                Err(reason) => EventStream::Errored { name: name.to_string(), reason },
            },
            Err(e) => EventStream::Errored {
                name: name.to_string(),
                reason: format!("cannot read {}: {e}", path.display()),
            },
        }
    }
}

fn parse_json_lines(content: &str) -> std::result::Result<Vec<SoftwareEvent>, String> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| format!("line {}: {e}", i + 1))
        })
        .collect()
}

/// Interpret a payload as a number.
pub fn number(stream: &str, value: &serde_json::Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::dataset(stream, format!("expected a numeric payload, got {value}")))
}

/// Read a numeric field of an object payload.
pub fn field_f64(stream: &str, value: &serde_json::Value, field: &str) -> Result<f64> {
    value.get(field).and_then(serde_json::Value::as_f64).ok_or_else(|| {
        Error::dataset(stream, format!("payload {value} has no numeric field '{field}'"))
    })
}

/// Read an unsigned integer field of an object payload.
pub fn field_u32(stream: &str, value: &serde_json::Value, field: &str) -> Result<u32> {
    value
        .get(field)
        .and_then(serde_json::Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            Error::dataset(stream, format!("payload {value} has no integer field '{field}'"))
        })
}
