use std::sync::LazyLock;

use regex::Regex;

use crate::parser::model::CaptureEvent;
use crate::parser::traits::*;
use super::{parse_number, parse_weight, truncate_name};

pub const CAPTURE_MARKER: &str = "捕获";

// The weight is the first number followed by a unit after the name; the
// other labelled fields only need to appear in order.
static CAPTURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"捕获：鱼竿:([0-9]),【([^】]+)】.*?([0-9.]+)(公斤|克).*?总经验:([0-9]+).*?耗时:([0-9]+)秒.*?鱼饵:(.*)$",
    )
    .expect("capture pattern compiles")
});

/// Confirmed catch:
/// `捕获：鱼竿:1,【鲤鱼】2500克,总经验:100,耗时:30秒,鱼饵:蚯蚓`
pub struct CaptureGrammar;

impl EventGrammar for CaptureGrammar {
    fn marker(&self) -> &'static str {
        CAPTURE_MARKER
    }

    fn parse(&self, timestamp: &str, content: &str) -> Result<LineEvent, ParseError> {
        let caps = CAPTURE_PATTERN
            .captures(content)
            .ok_or(ParseError::GrammarMismatch(EventKind::Capture))?;

        Ok(LineEvent::Capture(CaptureEvent {
            timestamp: timestamp.to_string(),
            rod_slot: parse_number("rod", &caps[1])?,
            fish_name: truncate_name(&caps[2]),
            weight_kg: parse_weight(&caps[3], &caps[4])?,
            exp_points: parse_number("exp", &caps[5])?,
            cost_seconds: parse_number("cost", &caps[6])?,
            bait_name: caps[7].to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(line: &str) -> CaptureEvent {
        match CaptureGrammar.parse("10:01", line).unwrap() {
            LineEvent::Capture(event) => event,
            other => panic!("expected capture, got {:?}", other),
        }
    }

    #[test]
    fn test_capture_full_line() {
        let event = capture("捕获：鱼竿:1,【鲤鱼】2500克,总经验:100,耗时:30秒,鱼饵:蚯蚓");
        assert_eq!(event.timestamp, "10:01");
        assert_eq!(event.rod_slot, 1);
        assert_eq!(event.fish_name, "鲤鱼");
        assert_eq!(event.weight_kg, 2.5);
        assert_eq!(event.exp_points, 100);
        assert_eq!(event.cost_seconds, 30);
        assert_eq!(event.bait_name, "蚯蚓");
    }

    #[test]
    fn test_capture_kilograms_with_extra_fields() {
        let event = capture(
            "捕获：鱼竿:5,【草鱼】重量:1.2公斤,品质:优,本次经验:20,总经验:340,耗时:12秒,鱼饵:玉米粒",
        );
        assert_eq!(event.rod_slot, 5);
        assert_eq!(event.weight_kg, 1.2);
        assert_eq!(event.exp_points, 340);
        assert_eq!(event.cost_seconds, 12);
        assert_eq!(event.bait_name, "玉米粒");
    }

    #[test]
    fn test_capture_empty_bait() {
        let event = capture("捕获：鱼竿:2,【鲢鱼】800克,总经验:5,耗时:9秒,鱼饵:");
        assert_eq!(event.bait_name, "");
        assert_eq!(event.weight_kg, 0.8);
    }

    #[test]
    fn test_capture_missing_exp_is_mismatch() {
        let result = CaptureGrammar.parse("10:01", "捕获：鱼竿:1,【鲤鱼】2500克,耗时:30秒,鱼饵:蚯蚓");
        assert_eq!(result, Err(ParseError::GrammarMismatch(EventKind::Capture)));
    }

    #[test]
    fn test_capture_name_truncated() {
        let event = capture("捕获：鱼竿:1,【abcdefghijklmnop】1公斤,总经验:1,耗时:1秒,鱼饵:x");
        assert_eq!(event.fish_name, "abcdefghij");
    }
}
