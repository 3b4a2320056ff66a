/// Fishing log parsing and correlation module
///
/// This module turns raw, line-oriented minigame logs into finalized
/// capture and lost records in a single streaming pass.
///
/// # Architecture
///
/// - `traits.rs`: Core trait implemented by each event grammar
/// - `formats/`: Hook, capture and lost line grammars
/// - `classifier.rs`: Marker-driven line classification
/// - `correlator.rs`: Per-rod pending hook table
/// - `stream.rs`: The streaming fold that emits records
/// - `cache.rs`: FIFO cache of parse results keyed by content fingerprint
/// - `metrics.rs`: Per-pass parse counters
///
/// # Safety Guarantees
///
/// - Bounded state (one pending hook per open rod slot)
/// - A bad line never aborts the pass, it is skipped
/// - Interruptible only at line boundaries

pub mod traits;
pub mod model;
pub mod formats;
pub mod classifier;
pub mod correlator;
pub mod stream;
pub mod cache;
pub mod metrics;

// Re-export commonly used types
pub use model::{EventKind, FishingRecord, LineEvent, ParseError, RecordType};
pub use classifier::LineClassifier;
pub use correlator::RodCorrelator;
pub use stream::{LogParser, ParseOutcome};
pub use cache::{fingerprint, RecordCache};
pub use metrics::ParseStats;

// Constants
pub const FIELD_SEPARATOR: &str = " : ";
pub const MAX_FISH_NAME_CHARS: usize = 10;
pub const UNKNOWN_FISH: &str = "?";
pub const LOST_BAIT_MARKER: &str = "脱钩";
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;
pub const DEFAULT_YIELD_INTERVAL: usize = 1000;
