use super::traits::*;
use super::formats::*;
use super::FIELD_SEPARATOR;

/// Line classifier with marker-driven dispatch
/// 1. Split timestamp from content on the first separator
/// 2. Pick the first grammar whose marker occurs in the content
/// 3. Run only that grammar
pub struct LineClassifier {
    grammars: Vec<Box<dyn EventGrammar>>,
}

impl LineClassifier {
    pub fn new() -> Self {
        let grammars: Vec<Box<dyn EventGrammar>> = vec![
            // Order matters! Marker priority is hook, capture, lost
            Box::new(HookGrammar),
            Box::new(CaptureGrammar),
            Box::new(LostGrammar),
        ];

        Self { grammars }
    }

    /// Classify a line, folding every failure into `Unrecognized`.
    pub fn classify(&self, line: &str) -> LineEvent {
        self.try_classify(line).unwrap_or(LineEvent::Unrecognized)
    }

    /// Classify a line, reporting why it was not recognized.
    pub fn try_classify(&self, line: &str) -> Result<LineEvent, ParseError> {
        let (timestamp, content) = line
            .split_once(FIELD_SEPARATOR)
            .ok_or(ParseError::MissingSeparator)?;

        let grammar = self
            .grammars
            .iter()
            .find(|grammar| content.contains(grammar.marker()))
            .ok_or(ParseError::NoMarker)?;

        grammar.parse(timestamp.trim(), content)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
