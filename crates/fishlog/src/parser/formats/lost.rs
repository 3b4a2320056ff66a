use std::sync::LazyLock;

use regex::Regex;

use crate::parser::model::LostEvent;
use crate::parser::traits::*;
use super::parse_number;

pub const LOST_MARKER: &str = "鱼脱钩了";

static LOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"鱼脱钩了！鱼竿：([0-9])").expect("lost pattern compiles")
});

/// Snapped line: `鱼脱钩了！鱼竿：3`
pub struct LostGrammar;

impl EventGrammar for LostGrammar {
    fn marker(&self) -> &'static str {
        LOST_MARKER
    }

    fn parse(&self, timestamp: &str, content: &str) -> Result<LineEvent, ParseError> {
        let caps = LOST_PATTERN
            .captures(content)
            .ok_or(ParseError::GrammarMismatch(EventKind::Lost))?;

        Ok(LineEvent::Lost(LostEvent {
            timestamp: timestamp.to_string(),
            rod_slot: parse_number("rod", &caps[1])?,
        }))
    }
}
