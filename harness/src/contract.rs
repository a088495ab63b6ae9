//! World contract: how the harness turns text into a problem or game.
//!
//! Worlds own parsing and domain data only. Running algorithms, building
//! records and persisting results are runner concerns.

use std::path::Path;

/// Typed failure while loading a world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldParseError {
    /// Reading the world file failed.
    Io { detail: String },
    /// A line of a text world could not be parsed (1-based line number).
    Syntax { line: usize, detail: String },
    /// A JSON world is not valid JSON or does not match the node schema.
    Json { detail: String },
    /// The world parsed but is not well formed (e.g. no start state).
    Invalid { detail: String },
}

impl std::fmt::Display for WorldParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "world read failed: {detail}"),
            Self::Syntax { line, detail } => write!(f, "line {line}: {detail}"),
            Self::Json { detail } => write!(f, "world JSON error: {detail}"),
            Self::Invalid { detail } => write!(f, "invalid world: {detail}"),
        }
    }
}

impl std::error::Error for WorldParseError {}

/// A world loadable from a text description.
pub trait WorldSource: Sized {
    /// Stable identifier used in run records (e.g. `"graph"`).
    const WORLD_ID: &'static str;

    /// Parse a world from its text form.
    ///
    /// # Errors
    ///
    /// Returns [`WorldParseError`] if the text is malformed.
    fn from_text(text: &str) -> Result<Self, WorldParseError>;

    /// Read and parse a world file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldParseError::Io`] if the file cannot be read, otherwise
    /// as [`Self::from_text`].
    fn from_file(path: impl AsRef<Path>) -> Result<Self, WorldParseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| WorldParseError::Io {
            detail: format!("{}: {e}", path.display()),
        })?;
        Self::from_text(&text)
    }
}
