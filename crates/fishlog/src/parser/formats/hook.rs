use std::sync::LazyLock;

use regex::Regex;

use crate::parser::model::HookEvent;
use crate::parser::traits::*;
use super::{parse_number, parse_weight, truncate_name};

pub const HOOK_MARKER: &str = "鱼上钩了";

static HOOK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"鱼上钩了！鱼竿：([0-9])，鱼信息:【([^】]+)】([0-9.]+)(kg|g)")
        .expect("hook pattern compiles")
});

/// Bite notification: `鱼上钩了！鱼竿：1，鱼信息:【鲤鱼】2.5kg`
pub struct HookGrammar;

impl EventGrammar for HookGrammar {
    fn marker(&self) -> &'static str {
        HOOK_MARKER
    }

    fn parse(&self, timestamp: &str, content: &str) -> Result<LineEvent, ParseError> {
        let caps = HOOK_PATTERN
            .captures(content)
            .ok_or(ParseError::GrammarMismatch(EventKind::Hook))?;

        Ok(LineEvent::Hook(HookEvent {
            timestamp: timestamp.to_string(),
            rod_slot: parse_number("rod", &caps[1])?,
            fish_name: truncate_name(&caps[2]),
            weight_kg: parse_weight(&caps[3], &caps[4])?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook(line: &str) -> HookEvent {
        match HookGrammar.parse("10:00", line).unwrap() {
            LineEvent::Hook(event) => event,
            other => panic!("expected hook, got {:?}", other),
        }
    }

    #[test]
    fn test_hook_kilograms() {
        let event = hook("鱼上钩了！鱼竿：1，鱼信息:【鲤鱼】2.5kg");
        assert_eq!(event.timestamp, "10:00");
        assert_eq!(event.rod_slot, 1);
        assert_eq!(event.fish_name, "鲤鱼");
        assert_eq!(event.weight_kg, 2.5);
    }

    #[test]
    fn test_hook_grams() {
        let event = hook("鱼上钩了！鱼竿：4，鱼信息:【小鲫鱼】500g");
        assert_eq!(event.rod_slot, 4);
        assert_eq!(event.weight_kg, 0.5);
    }

    #[test]
    fn test_hook_with_prefix_and_suffix_text() {
        let event = hook("[系统] 鱼上钩了！鱼竿：2，鱼信息:【草鱼】1.2kg 快收线");
        assert_eq!(event.rod_slot, 2);
        assert_eq!(event.fish_name, "草鱼");
        assert_eq!(event.weight_kg, 1.2);
    }

    #[test]
    fn test_hook_name_truncated() {
        let event = hook("鱼上钩了！鱼竿：3，鱼信息:【传说中的金色巨型锦鲤王】9kg");
        assert_eq!(event.fish_name, "传说中的金色巨型锦鲤");
    }

    #[test]
    fn test_hook_missing_weight() {
        let result = HookGrammar.parse("10:00", "鱼上钩了！鱼竿：1，鱼信息:【鲤鱼】");
        assert_eq!(result, Err(ParseError::GrammarMismatch(EventKind::Hook)));
    }

    #[test]
    fn test_hook_name_stops_at_first_closing_bracket() {
        let result = HookGrammar.parse("10:00", "鱼上钩了！鱼竿：1，鱼信息:【金】鱼】2kg");
        assert_eq!(result, Err(ParseError::GrammarMismatch(EventKind::Hook)));
    }

    #[test]
    fn test_hook_invalid_number() {
        let result = HookGrammar.parse("10:00", "鱼上钩了！鱼竿：1，鱼信息:【鲤鱼】1.2.3kg");
        assert!(matches!(result, Err(ParseError::InvalidNumber { field: "weight", .. })));
    }
}
