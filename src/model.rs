use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One run start timestamp as submitted to the generation service.
/// All fields are plain integers; array position is the only identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Wire body for the generation request: `{ "times": [ ... ] }`,
/// array order = submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub times: Vec<TimeEntry>,
}

/// The six editable fields of an entry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// Display order of the fields; also the validation order.
pub const FIELDS: [Field; 6] = [
    Field::Year,
    Field::Month,
    Field::Day,
    Field::Hour,
    Field::Minute,
    Field::Second,
];

impl Field {
    /// Inclusive bounds for the field. The year is bounded only by what
    /// parses into an i32; the day's 1-31 range is tightened further by the
    /// calendar check once all fields are individually valid.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Field::Year => (i64::from(i32::MIN), i64::from(i32::MAX)),
            Field::Month => (1, 12),
            Field::Day => (1, 31),
            Field::Hour => (0, 23),
            Field::Minute => (0, 59),
            Field::Second => (0, 59),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Year => "Year",
            Field::Month => "Month",
            Field::Day => "Day",
            Field::Hour => "Hour",
            Field::Minute => "Minute",
            Field::Second => "Second",
        }
    }

    /// Position within [`FIELDS`].
    pub fn pos(self) -> usize {
        match self {
            Field::Year => 0,
            Field::Month => 1,
            Field::Day => 2,
            Field::Hour => 3,
            Field::Minute => 4,
            Field::Second => 5,
        }
    }

    pub fn next(self) -> Field {
        FIELDS[(self.pos() + 1) % FIELDS.len()]
    }

    pub fn prev(self) -> Field {
        FIELDS[(self.pos() + FIELDS.len() - 1) % FIELDS.len()]
    }
}

/// Settings for one export exchange, built from CLI arguments.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
}

/// Events emitted by the orchestrator and consumed by UI/CLI layers.
#[derive(Debug, Clone)]
pub enum ExportEvent {
    /// A request for `count` entries has been handed to the engine.
    Requesting { count: usize },
    /// The payload was saved under `path`.
    Saved { path: PathBuf },
    /// Generation or save failed; no file is available.
    Failed { message: String },
    Info(InfoEvent),
}

/// Structured info events for status display.
#[derive(Debug, Clone)]
pub enum InfoEvent {
    Message(String),
    /// An export trigger arrived while a request was already outstanding.
    ExportBusy,
}

impl InfoEvent {
    /// Render a human-readable message for UI/CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Message(msg) => msg.clone(),
            InfoEvent::ExportBusy => "Export already in progress".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let req = GenerateRequest {
            times: vec![TimeEntry {
                year: 2024,
                month: 3,
                day: 5,
                hour: 7,
                minute: 8,
                second: 9,
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "times": [
                    {"year": 2024, "month": 3, "day": 5, "hour": 7, "minute": 8, "second": 9}
                ]
            })
        );
    }

    #[test]
    fn request_body_preserves_order() {
        let a = TimeEntry {
            year: 2025,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 59,
        };
        let b = TimeEntry {
            year: 2024,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        };
        let req = GenerateRequest { times: vec![a, b] };
        let parsed: GenerateRequest =
            serde_json::from_str(&serde_json::to_string(&req).unwrap()).unwrap();
        assert_eq!(parsed.times, vec![a, b]);
    }

    #[test]
    fn field_cycling_wraps() {
        assert_eq!(Field::Second.next(), Field::Year);
        assert_eq!(Field::Year.prev(), Field::Second);
        assert_eq!(Field::Month.next(), Field::Day);
    }
}
