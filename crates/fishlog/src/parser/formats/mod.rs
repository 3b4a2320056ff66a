/// Line grammars for the three event kinds

pub mod hook;
pub mod capture;
pub mod lost;

use std::str::FromStr;

use super::model::{ParseError, WeightUnit};
use super::MAX_FISH_NAME_CHARS;

// Re-export grammar implementations
pub use hook::HookGrammar;
pub use capture::CaptureGrammar;
pub use lost::LostGrammar;

/// Keep the first `MAX_FISH_NAME_CHARS` characters (not bytes).
pub(crate) fn truncate_name(name: &str) -> String {
    match name.char_indices().nth(MAX_FISH_NAME_CHARS) {
        Some((idx, _)) => name[..idx].to_string(),
        None => name.to_string(),
    }
}

pub(crate) fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Convert a captured value/unit pair to kilograms.
pub(crate) fn parse_weight(value: &str, unit: &str) -> Result<f64, ParseError> {
    let unit = WeightUnit::from_token(unit)
        .ok_or_else(|| ParseError::UnknownUnit(unit.to_string()))?;
    let value: f64 = parse_number("weight", value)?;
    if !value.is_finite() {
        return Err(ParseError::InvalidNumber {
            field: "weight",
            value: value.to_string(),
        });
    }
    Ok(unit.to_kg(value))
}
