//! Typed game-search errors. Only configuration can fail; every tree
//! search returns a value.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSearchError {
    /// A raw depth below `-1`.
    InvalidDepth { raw: i64 },
    /// An algorithm name did not match any known game search.
    UnknownKind { name: String },
}

impl std::fmt::Display for GameSearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDepth { raw } => {
                write!(f, "invalid max depth {raw}: expected -1 (unbounded) or >= 0")
            }
            Self::UnknownKind { name } => write!(f, "unknown game search: {name}"),
        }
    }
}

impl std::error::Error for GameSearchError {}
