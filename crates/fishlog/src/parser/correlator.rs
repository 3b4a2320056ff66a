use std::collections::HashMap;

use super::model::{FishingRecord, HookEvent};

/// Provisional bite data waiting for a capture or lost event.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHook {
    pub time: String,
    pub fish_name: String,
    pub weight_kg: f64,
}

impl From<HookEvent> for PendingHook {
    fn from(event: HookEvent) -> Self {
        Self {
            time: event.timestamp,
            fish_name: event.fish_name,
            weight_kg: event.weight_kg,
        }
    }
}

/// Per-rod correlation table
///
/// Holds at most one pending hook per rod slot. A newer hook for the same
/// rod replaces the older one (last writer wins). The table is owned by a
/// single parse pass and dropped with it.
#[derive(Debug, Default)]
pub struct RodCorrelator {
    /// rod_slot → pending hook
    pending: HashMap<u32, PendingHook>,
    superseded: u64,
}

impl RodCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a hook for `rod`, replacing any unresolved one.
    pub fn record_hook(&mut self, rod: u32, hook: PendingHook) {
        if let Some(previous) = self.pending.insert(rod, hook) {
            tracing::trace!(rod, fish = %previous.fish_name, "pending hook superseded");
            self.superseded += 1;
        }
    }

    /// Drop the pending hook for `rod`. Returns whether one existed.
    pub fn resolve_capture(&mut self, rod: u32) -> bool {
        self.pending.remove(&rod).is_some()
    }

    /// Finalize a lost event for `rod`.
    ///
    /// With a pending hook the record carries the hook's time, fish and
    /// weight. Without one it is an unknown fish at `fallback_time`.
    pub fn resolve_lost(&mut self, rod: u32, fallback_time: &str) -> FishingRecord {
        match self.pending.remove(&rod) {
            Some(hook) => FishingRecord::lost(rod, hook.time, hook.fish_name, hook.weight_kg),
            None => FishingRecord::lost_unknown(rod, fallback_time.to_string()),
        }
    }

    pub fn is_pending(&self, rod: u32) -> bool {
        self.pending.contains_key(&rod)
    }

    pub fn pending(&self, rod: u32) -> Option<&PendingHook> {
        self.pending.get(&rod)
    }

    /// Number of rods with an unresolved hook
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Hooks that were overwritten before resolution
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    /// Take every hook still unresolved at end of input, ordered by rod.
    ///
    /// These never become records; the table is empty afterwards.
    pub fn drain_abandoned(&mut self) -> Vec<(u32, PendingHook)> {
        let mut abandoned: Vec<_> = self.pending.drain().collect();
        abandoned.sort_unstable_by_key(|(rod, _)| *rod);
        abandoned
    }
}
