//! Streaming fold over a log text.
//!
//! Each pass owns a fresh [`RodCorrelator`], visits lines in order and emits
//! capture and lost records as soon as their own line is seen. Hooks only
//! ever live in the correlator.

use std::ops::ControlFlow;

use super::classifier::LineClassifier;
use super::correlator::{PendingHook, RodCorrelator};
use super::metrics::ParseStats;
use super::model::{FishingRecord, LineEvent, ParseError};

/// Records and counters produced by one pass.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<FishingRecord>,
    pub stats: ParseStats,
    /// Line index the pass stopped before, if the yield hook broke it off
    pub interrupted_at: Option<usize>,
}

impl ParseOutcome {
    pub fn is_complete(&self) -> bool {
        self.interrupted_at.is_none()
    }
}

pub struct LogParser {
    classifier: LineClassifier,
}

impl LogParser {
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
        }
    }

    /// Parse a whole text into records, in finalization order.
    ///
    /// Empty or whitespace-only text yields no records.
    pub fn parse(&self, text: &str) -> Vec<FishingRecord> {
        self.run(text, usize::MAX, |_| ControlFlow::Continue(())).records
    }

    /// Parse and return the pass counters alongside the records.
    pub fn parse_outcome(&self, text: &str) -> ParseOutcome {
        self.run(text, usize::MAX, |_| ControlFlow::Continue(()))
    }

    /// Parse with a cooperative check-and-yield hook.
    ///
    /// `on_yield` is called with the line index before every `yield_every`-th
    /// line (never before the first). Returning `ControlFlow::Break` stops the
    /// pass at that boundary and yields `ParseError::Interrupted`.
    pub fn parse_with<F>(
        &self,
        text: &str,
        yield_every: usize,
        on_yield: F,
    ) -> Result<ParseOutcome, ParseError>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        let outcome = self.run(text, yield_every, on_yield);
        match outcome.interrupted_at {
            Some(line) => Err(ParseError::Interrupted { line }),
            None => Ok(outcome),
        }
    }

    fn run<F>(&self, text: &str, yield_every: usize, mut on_yield: F) -> ParseOutcome
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        let yield_every = yield_every.max(1);
        let mut correlator = RodCorrelator::new();
        let mut outcome = ParseOutcome::default();

        for (idx, line) in text.trim().lines().enumerate() {
            if idx > 0 && idx % yield_every == 0 && on_yield(idx).is_break() {
                tracing::debug!(line = idx, "parse interrupted");
                outcome.interrupted_at = Some(idx);
                break;
            }

            outcome.stats.lines += 1;

            let event = match self.classifier.try_classify(line) {
                Ok(event) => event,
                Err(err) => {
                    if err.is_malformed() {
                        tracing::debug!(line = idx + 1, error = %err, "skipping malformed event line");
                        outcome.stats.malformed += 1;
                    } else {
                        tracing::trace!(line = idx + 1, error = %err, "skipping line");
                        outcome.stats.unrecognized += 1;
                    }
                    continue;
                }
            };

            if let Some(kind) = event.kind() {
                outcome.stats.record_event(kind);
            }

            match event {
                LineEvent::Hook(hook) => {
                    correlator.record_hook(hook.rod_slot, PendingHook::from(hook));
                }
                LineEvent::Capture(capture) => {
                    if correlator.resolve_capture(capture.rod_slot) {
                        outcome.stats.matched_captures += 1;
                    }
                    outcome.records.push(FishingRecord::capture(capture));
                }
                LineEvent::Lost(lost) => {
                    let record = correlator.resolve_lost(lost.rod_slot, &lost.timestamp);
                    if record.is_unknown_fish() {
                        outcome.stats.orphan_losses += 1;
                    }
                    outcome.records.push(record);
                }
                LineEvent::Unrecognized => {
                    outcome.stats.unrecognized += 1;
                }
            }
        }

        outcome.stats.superseded_hooks = correlator.superseded();
        for (rod, hook) in correlator.drain_abandoned() {
            tracing::debug!(rod, fish = %hook.fish_name, time = %hook.time, "hook never resolved");
            outcome.stats.abandoned_hooks += 1;
        }
        outcome
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::RecordType;

    const HOOK_1: &str = "10:00 : 鱼上钩了！鱼竿：1，鱼信息:【鲤鱼】2.5kg";
    const CAPTURE_1: &str = "10:01 : 捕获：鱼竿:1,【鲤鱼】2500克,总经验:100,耗时:30秒,鱼饵:蚯蚓";

    #[test]
    fn test_end_to_end_hook_then_capture() {
        let parser = LogParser::new();
        let text = format!("{}\n{}", HOOK_1, CAPTURE_1);
        let records = parser.parse(&text);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.record_type, RecordType::Capture);
        assert_eq!(record.rod_slot, 1);
        assert_eq!(record.fish_name, "鲤鱼");
        assert_eq!(record.weight_kg, 2.5);
        assert_eq!(record.exp_points, 100);
        assert_eq!(record.cost(), "30秒");
        assert_eq!(record.bait_name, "蚯蚓");
        assert_eq!(record.time, "10:01");
    }

    #[test]
    fn test_capture_uses_its_own_fields() {
        let parser = LogParser::new();
        let text = "\
09:00 : 鱼上钩了！鱼竿：2，鱼信息:【小鱼】100g
09:01 : 捕获：鱼竿:2,【大青鱼】3公斤,总经验:50,耗时:8秒,鱼饵:面包";
        let records = parser.parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fish_name, "大青鱼");
        assert_eq!(records[0].weight_kg, 3.0);
        assert_eq!(records[0].time, "09:01");
    }

    #[test]
    fn test_hook_then_lost_uses_hook_data() {
        let parser = LogParser::new();
        let text = "\
10:00 : 鱼上钩了！鱼竿：3，鱼信息:【黑鱼】800g
10:04 : 鱼脱钩了！鱼竿：3";
        let records = parser.parse(text);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.record_type, RecordType::Lost);
        assert_eq!(record.time, "10:00");
        assert_eq!(record.fish_name, "黑鱼");
        assert_eq!(record.weight_kg, 0.8);
        assert_eq!(record.bait_name, "脱钩");
    }

    #[test]
    fn test_lost_without_hook() {
        let parser = LogParser::new();
        let records = parser.parse("10:04 : 鱼脱钩了！鱼竿：5");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fish_name, "?");
        assert_eq!(records[0].weight_kg, 0.0);
        assert_eq!(records[0].time, "10:04");
        assert_eq!(records[0].rod_slot, 5);
    }

    #[test]
    fn test_second_hook_supersedes_first() {
        let parser = LogParser::new();
        let text = "\
10:00 : 鱼上钩了！鱼竿：1，鱼信息:【鲫鱼】300g
10:02 : 鱼上钩了！鱼竿：1，鱼信息:【鲈鱼】1.5kg
10:03 : 鱼脱钩了！鱼竿：1";
        let outcome = parser.parse_outcome(text);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].fish_name, "鲈鱼");
        assert_eq!(outcome.records[0].time, "10:02");
        assert_eq!(outcome.stats.superseded_hooks, 1);
    }

    #[test]
    fn test_output_follows_finalizing_line_order() {
        let parser = LogParser::new();
        let text = "\
10:00 : 鱼上钩了！鱼竿：1，鱼信息:【一号鱼】1kg
10:01 : 鱼上钩了！鱼竿：2，鱼信息:【二号鱼】2kg
10:02 : 捕获：鱼竿:2,【二号鱼】2公斤,总经验:20,耗时:5秒,鱼饵:虾
10:03 : 鱼脱钩了！鱼竿：1
10:04 : 鱼脱钩了！鱼竿：4";
        let records = parser.parse(text);
        let summary: Vec<(RecordType, u32)> =
            records.iter().map(|r| (r.record_type, r.rod_slot)).collect();
        assert_eq!(
            summary,
            vec![
                (RecordType::Capture, 2),
                (RecordType::Lost, 1),
                (RecordType::Lost, 4),
            ]
        );
        // The rod 1 loss keeps its hook's timestamp even though it finalized later
        assert_eq!(records[1].time, "10:00");
    }

    #[test]
    fn test_garbage_does_not_disturb_state() {
        let parser = LogParser::new();
        let text = "\
10:00 : 鱼上钩了！鱼竿：1，鱼信息:【鲤鱼】2kg
garbage text with no separator
10:01 : 鱼上钩了！坏掉的一行
10:02 : 鱼脱钩了！鱼竿：1";
        let outcome = parser.parse_outcome(text);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].fish_name, "鲤鱼");
        assert_eq!(outcome.stats.unrecognized, 1);
        assert_eq!(outcome.stats.malformed, 1);
        assert_eq!(outcome.stats.lines, 4);
    }

    #[test]
    fn test_idempotent() {
        let parser = LogParser::new();
        let text = format!("{}\n{}\n10:05 : 鱼脱钩了！鱼竿：2", HOOK_1, CAPTURE_1);
        assert_eq!(parser.parse(&text), parser.parse(&text));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let parser = LogParser::new();
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("  \n\t \n").is_empty());
    }

    #[test]
    fn test_abandoned_hooks_emit_nothing() {
        let parser = LogParser::new();
        let text = "\
10:00 : 鱼上钩了！鱼竿：1，鱼信息:【鲤鱼】2kg
10:00 : 鱼上钩了！鱼竿：2，鱼信息:【鲫鱼】200g";
        let outcome = parser.parse_outcome(text);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stats.hooks, 2);
        assert_eq!(outcome.stats.abandoned_hooks, 2);
    }

    #[test]
    fn test_bracketed_name_with_inner_bracket_is_dropped() {
        let parser = LogParser::new();
        let text = "\
10:00 : 鱼上钩了！鱼竿：1，鱼信息:【金】鱼】2kg
10:01 : 鱼脱钩了！鱼竿：1";
        let outcome = parser.parse_outcome(text);
        assert_eq!(outcome.stats.malformed, 1);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].fish_name, "?");
        assert_eq!(outcome.records[0].time, "10:01");
    }

    #[test]
    fn test_fullwidth_rod_digit_yields_nothing() {
        let parser = LogParser::new();
        let outcome = parser.parse_outcome("10:00 : 鱼脱钩了！鱼竿：１");
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stats.malformed, 1);
        assert_eq!(outcome.stats.losses, 0);
    }

    #[test]
    fn test_crlf_lines() {
        let parser = LogParser::new();
        let text = format!("{}\r\n{}\r\n", HOOK_1, CAPTURE_1);
        let records = parser.parse(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bait_name, "蚯蚓");
    }

    #[test]
    fn test_yield_hook_called_at_line_boundaries() {
        let parser = LogParser::new();
        let text = (0..25)
            .map(|i| format!("t{} : 鱼脱钩了！鱼竿：{}", i, i % 5))
            .collect::<Vec<_>>()
            .join("\n");

        let mut seen = Vec::new();
        let outcome = parser
            .parse_with(&text, 10, |line| {
                seen.push(line);
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(seen, vec![10, 20]);
        assert_eq!(outcome.records.len(), 25);
        assert_eq!(outcome.records, parser.parse(&text));
    }

    #[test]
    fn test_yield_hook_can_interrupt() {
        let parser = LogParser::new();
        let text = (0..25)
            .map(|i| format!("t{} : 鱼脱钩了！鱼竿：1", i))
            .collect::<Vec<_>>()
            .join("\n");

        let result = parser.parse_with(&text, 10, |line| {
            if line >= 20 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(result.unwrap_err(), ParseError::Interrupted { line: 20 });
    }

    #[test]
    fn test_large_input_state_stays_bounded() {
        let parser = LogParser::new();
        let mut text = String::new();
        for i in 0..20_000u32 {
            let rod = i % 5 + 1;
            text.push_str(&format!("t{} : 鱼上钩了！鱼竿：{}，鱼信息:【鱼{}】1kg\n", i, rod, i));
        }
        let outcome = parser.parse_outcome(&text);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stats.abandoned_hooks, 5);
        assert_eq!(outcome.stats.superseded_hooks, 20_000 - 5);
    }
}
