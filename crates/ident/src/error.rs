// ABOUTME: Error types for lenient timestamp parsing.
// ABOUTME: Provides TimeParseError with Empty, MissingComponents, and Invalid variants.

use thiserror::Error;

/// Errors that can occur while interpreting a feed timestamp.
///
/// A failure here means the item's publish date is unknown; callers must
/// handle the absence rather than fabricate a date.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    /// The input contained nothing but whitespace.
    #[error("empty date string")]
    Empty,

    /// Classification finished without a full day/month/year/time set.
    #[error("date string is missing required components")]
    MissingComponents,

    /// The reassembled date was rejected by the fixed-format parse.
    #[error("unparseable date: {0:?}")]
    Invalid(String),
}
