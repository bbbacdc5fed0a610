//! Line parsers for diagnostic tool output.
//!
//! Each parser turns one line of stdout into at most one [`ParsedEvent`].
//! Lines that are not recognised produce `Ok(None)`.

mod event;
mod mtr;
mod ping;

pub use event::*;
pub use mtr::*;
pub use ping::*;

/// Error for a recognised line whose numeric field does not parse.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid {field} value: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// A parser for one tool's line-oriented output.
pub trait LineParser: Send + Sync {
    /// Parse a single line with its line terminator removed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` only when the parser chooses to report a bad
    /// field instead of skipping the line.
    fn parse(&self, line: &str) -> Result<Option<ParsedEvent>, ParseError>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

impl<T: LineParser + ?Sized> LineParser for Box<T> {
    fn parse(&self, line: &str) -> Result<Option<ParsedEvent>, ParseError> {
        (**self).parse(line)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
