use serde::Serialize;

use super::model::EventKind;

/// Counters for one parse pass, returned by value when the pass ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines visited (including skipped ones)
    pub lines: u64,
    pub hooks: u64,
    pub captures: u64,
    pub losses: u64,
    /// Captures that consumed a pending hook on the same rod
    pub matched_captures: u64,
    /// Losses with no pending hook (unknown fish)
    pub orphan_losses: u64,
    /// Hooks replaced by a newer hook on the same rod
    pub superseded_hooks: u64,
    /// Hooks still pending when the input ended
    pub abandoned_hooks: u64,
    /// Lines with no separator or no event marker
    pub unrecognized: u64,
    /// Lines carrying a marker whose detail failed to parse
    pub malformed: u64,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_event(&mut self, kind: EventKind) {
        match kind {
            EventKind::Hook => self.hooks += 1,
            EventKind::Capture => self.captures += 1,
            EventKind::Lost => self.losses += 1,
        }
    }

    /// Finalized records emitted by the pass
    pub fn records(&self) -> u64 {
        self.captures + self.losses
    }

    /// Lines skipped for any reason
    pub fn skipped(&self) -> u64 {
        self.unrecognized + self.malformed
    }
}
