//! Typed CSP errors.
//!
//! Only malformed input and structurally invalid problems are errors.
//! Unsolvable problems and infeasible branches are ordinary outcomes of
//! [`crate::solver::solve`].

/// Typed failure for building or loading a CSP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CspError {
    /// Puzzle text did not match the expected grammar.
    Parse { input: String, detail: String },
    /// Reading a puzzle file failed.
    Io { detail: String },
    /// A variable name was declared twice.
    DuplicateVariable { variable: String },
    /// A declared variable has no entry in the domain map.
    MissingDomain { variable: String },
    /// A constraint references a variable that was never declared.
    UnknownVariable {
        constraint_index: usize,
        variable: String,
    },
}

impl std::fmt::Display for CspError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { input, detail } => write!(f, "failed to parse {input:?}: {detail}"),
            Self::Io { detail } => write!(f, "puzzle read failed: {detail}"),
            Self::DuplicateVariable { variable } => {
                write!(f, "variable declared twice: {variable}")
            }
            Self::MissingDomain { variable } => write!(f, "variable has no domain: {variable}"),
            Self::UnknownVariable {
                constraint_index,
                variable,
            } => write!(
                f,
                "constraint {constraint_index} references undeclared variable {variable}"
            ),
        }
    }
}

impl std::error::Error for CspError {}
