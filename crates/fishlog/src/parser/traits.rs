pub use super::model::{EventKind, LineEvent, ParseError};

pub trait EventGrammar: Send + Sync {
    /// substring that selects this grammar for a line
    fn marker(&self) -> &'static str;

    /// extract the event fields from the content after the separator
    fn parse(&self, timestamp: &str, content: &str) -> Result<LineEvent, ParseError>;
}
