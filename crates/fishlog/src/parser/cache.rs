use std::collections::{HashMap, VecDeque};

use sha2::{Digest, Sha256};

use super::model::FishingRecord;

/// Content fingerprint used as the cache key.
///
/// Surrounding whitespace does not change the key, matching what the parser
/// actually reads.
pub fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.trim().as_bytes());
    hex::encode(digest)
}

/// Parse result cache
///
/// Fixed capacity, evicts the oldest inserted key first regardless of how
/// recently it was read (FIFO, not LRU). Owned by the session that drives
/// repeated parses and passed around explicitly.
#[derive(Debug)]
pub struct RecordCache {
    capacity: usize,
    /// fingerprint → records
    entries: HashMap<String, Vec<FishingRecord>>,
    /// insertion order, oldest at the front
    order: VecDeque<String>,
    stats: CacheStats,
}

impl RecordCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity.min(1024)),
            order: VecDeque::with_capacity(capacity.min(1024)),
            stats: CacheStats::default(),
        }
    }

    /// Get the cached records for a fingerprint
    pub fn get(&mut self, key: &str) -> Option<&[FishingRecord]> {
        match self.entries.get(key) {
            Some(records) => {
                self.stats.hits += 1;
                Some(records.as_slice())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Read without touching hit/miss counters
    pub fn peek(&self, key: &str) -> Option<&[FishingRecord]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Store records for a fingerprint
    pub fn set(&mut self, key: String, records: Vec<FishingRecord>) {
        if self.capacity == 0 {
            return;
        }

        // Replacing an existing key keeps its place in the queue
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = records;
            return;
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
            tracing::debug!(key = %oldest, "record cache evicted oldest entry");
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, records);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            ..self.stats.clone()
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}
