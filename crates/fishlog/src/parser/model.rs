use thiserror::Error;
use serde::{Serialize, Deserialize};

use super::{LOST_BAIT_MARKER, UNKNOWN_FISH};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Bite detected, fish and weight are provisional
    Hook,
    /// Confirmed catch with full detail
    Capture,
    /// Line snapped, no detail of its own
    Lost,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Hook => "hook",
            EventKind::Capture => "capture",
            EventKind::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Capture,
    Lost,
}

/// Unit token attached to a weight in the log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Kilograms,
    Grams,
}

impl WeightUnit {
    /// Hook lines use `kg`/`g`, capture lines use `公斤`/`克`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "kg" | "公斤" => Some(WeightUnit::Kilograms),
            "g" | "克" => Some(WeightUnit::Grams),
            _ => None,
        }
    }

    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            WeightUnit::Kilograms => value,
            WeightUnit::Grams => value / 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HookEvent {
    pub timestamp: String,
    pub rod_slot: u32,
    pub fish_name: String,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEvent {
    pub timestamp: String,
    pub rod_slot: u32,
    pub fish_name: String,
    pub weight_kg: f64,
    pub exp_points: u64,
    pub cost_seconds: u64,
    pub bait_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LostEvent {
    pub timestamp: String,
    pub rod_slot: u32,
}

/// Result of classifying a single log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    Hook(HookEvent),
    Capture(CaptureEvent),
    Lost(LostEvent),
    Unrecognized,
}

impl LineEvent {
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            LineEvent::Hook(_) => Some(EventKind::Hook),
            LineEvent::Capture(_) => Some(EventKind::Capture),
            LineEvent::Lost(_) => Some(EventKind::Lost),
            LineEvent::Unrecognized => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Missing field separator")]
    MissingSeparator,

    #[error("No event marker found")]
    NoMarker,

    #[error("Line carries the {} marker but does not match its grammar", .0.as_str())]
    GrammarMismatch(EventKind),

    #[error("Invalid {field} value: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown weight unit: {0:?}")]
    UnknownUnit(String),

    #[error("Parse interrupted before line {line}")]
    Interrupted { line: usize },
}

impl ParseError {
    /// Lines that carried a marker but failed afterwards are worth a debug log;
    /// everything else is ordinary noise.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ParseError::GrammarMismatch(_)
                | ParseError::InvalidNumber { .. }
                | ParseError::UnknownUnit(_)
        )
    }
}

/// A finalized capture or lost record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishingRecord {
    pub record_type: RecordType,
    pub time: String,
    pub rod_slot: u32,
    pub fish_name: String,
    pub weight_kg: f64,
    /// Zero for lost records
    pub exp_points: u64,
    /// Zero for lost records
    pub cost_seconds: u64,
    /// Always `脱钩` for lost records
    pub bait_name: String,
}

impl FishingRecord {
    /// Build a capture record from the capture line's own fields.
    pub fn capture(event: CaptureEvent) -> Self {
        Self {
            record_type: RecordType::Capture,
            time: event.timestamp,
            rod_slot: event.rod_slot,
            fish_name: event.fish_name,
            weight_kg: event.weight_kg,
            exp_points: event.exp_points,
            cost_seconds: event.cost_seconds,
            bait_name: event.bait_name,
        }
    }

    pub fn lost(rod_slot: u32, time: String, fish_name: String, weight_kg: f64) -> Self {
        Self {
            record_type: RecordType::Lost,
            time,
            rod_slot,
            fish_name,
            weight_kg,
            exp_points: 0,
            cost_seconds: 0,
            bait_name: LOST_BAIT_MARKER.to_string(),
        }
    }

    /// Lost record for a rod that had no pending hook.
    pub fn lost_unknown(rod_slot: u32, time: String) -> Self {
        Self::lost(rod_slot, time, UNKNOWN_FISH.to_string(), 0.0)
    }

    pub fn is_lost(&self) -> bool {
        self.record_type == RecordType::Lost
    }

    pub fn is_unknown_fish(&self) -> bool {
        self.weight_kg == 0.0 && self.fish_name == UNKNOWN_FISH
    }

    /// Elapsed time as written in the log, e.g. `30秒`.
    pub fn cost(&self) -> String {
        match self.record_type {
            RecordType::Capture => format!("{}秒", self.cost_seconds),
            RecordType::Lost => String::new(),
        }
    }

    pub fn formatted_weight(&self) -> String {
        if self.weight_kg > 0.0 {
            format!("{:.3}kg", self.weight_kg)
        } else {
            "？".to_string()
        }
    }

    pub fn formatted_exp(&self) -> String {
        if self.exp_points > 0 {
            format!("经验{}", self.exp_points)
        } else {
            String::new()
        }
    }
}
