//! CSP data model: variables, domains, constraints and assignments.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use crate::error::CspError;

/// Variable name to assigned value. Grows on assignment, shrinks on
/// backtrack (by dropping the child copy).
pub type Assignment<V> = BTreeMap<String, V>;

/// Variable name to candidate values.
pub type Domains<V> = BTreeMap<String, BTreeSet<V>>;

/// Predicate over one variable's value.
pub type UnaryCondition<V> = Box<dyn Fn(&V) -> bool>;

/// Predicate over an ordered pair of values.
pub type BinaryCondition<V> = Box<dyn Fn(&V, &V) -> bool>;

/// A constraint is a pure predicate over the values it names.
pub enum Constraint<V> {
    Unary {
        variable: String,
        condition: UnaryCondition<V>,
    },
    /// `condition` receives values in the order of `variables`.
    Binary {
        variables: (String, String),
        condition: BinaryCondition<V>,
    },
}

impl<V> Constraint<V> {
    pub fn unary(variable: impl Into<String>, condition: impl Fn(&V) -> bool + 'static) -> Self {
        Self::Unary {
            variable: variable.into(),
            condition: Box::new(condition),
        }
    }

    pub fn binary(
        first: impl Into<String>,
        second: impl Into<String>,
        condition: impl Fn(&V, &V) -> bool + 'static,
    ) -> Self {
        Self::Binary {
            variables: (first.into(), second.into()),
            condition: Box::new(condition),
        }
    }

    /// Names of the variables this constraint reads.
    pub fn variables(&self) -> Vec<&str> {
        match self {
            Self::Unary { variable, .. } => vec![variable.as_str()],
            Self::Binary { variables, .. } => vec![variables.0.as_str(), variables.1.as_str()],
        }
    }

    #[must_use]
    pub fn is_unary(&self) -> bool {
        matches!(self, Self::Unary { .. })
    }

    /// For a binary constraint touching `variable`, the other variable.
    #[must_use]
    pub fn other(&self, variable: &str) -> Option<&str> {
        match self {
            Self::Unary { .. } => None,
            Self::Binary { variables, .. } => {
                if variables.0 == variable {
                    Some(variables.1.as_str())
                } else if variables.1 == variable {
                    Some(variables.0.as_str())
                } else {
                    None
                }
            }
        }
    }

    /// Whether the constraint holds under `assignment`. Vacuously true
    /// while any of its variables is unassigned.
    pub fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        match self {
            Self::Unary {
                variable,
                condition,
            } => match assignment.get(variable) {
                Some(value) => condition(value),
                None => true,
            },
            Self::Binary {
                variables,
                condition,
            } => match (assignment.get(&variables.0), assignment.get(&variables.1)) {
                (Some(first), Some(second)) => condition(first, second),
                _ => true,
            },
        }
    }

    /// Evaluate a binary constraint with `variable = value` and the other
    /// side set to `candidate`. Returns `true` for constraints that do not
    /// link `variable`.
    pub fn allows(&self, variable: &str, value: &V, candidate: &V) -> bool {
        match self {
            Self::Unary { .. } => true,
            Self::Binary {
                variables,
                condition,
            } => {
                if variables.0 == variable {
                    condition(value, candidate)
                } else if variables.1 == variable {
                    condition(candidate, value)
                } else {
                    true
                }
            }
        }
    }
}

impl<V> fmt::Debug for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary { variable, .. } => f.debug_tuple("Unary").field(variable).finish(),
            Self::Binary { variables, .. } => f
                .debug_tuple("Binary")
                .field(&variables.0)
                .field(&variables.1)
                .finish(),
        }
    }
}

/// A constraint-satisfaction problem.
///
/// `domains` is narrowed once by 1-consistency and otherwise left alone;
/// the solver threads its own copies through the recursion.
#[derive(Debug)]
pub struct CspProblem<V> {
    /// Declaration order; MRV ties are broken by it.
    pub variables: Vec<String>,
    pub domains: Domains<V>,
    pub constraints: Vec<Constraint<V>>,
}

impl<V> Default for CspProblem<V> {
    fn default() -> Self {
        Self {
            variables: Vec::new(),
            domains: BTreeMap::new(),
            constraints: Vec::new(),
        }
    }
}

impl<V: Ord + Clone> CspProblem<V> {
    /// Declare a variable with its initial domain.
    pub fn add_variable(&mut self, name: impl Into<String>, domain: impl IntoIterator<Item = V>) {
        let name = name.into();
        self.domains.insert(name.clone(), domain.into_iter().collect());
        self.variables.push(name);
    }

    pub fn add_constraint(&mut self, constraint: Constraint<V>) {
        self.constraints.push(constraint);
    }

    /// Every declared variable has a value.
    #[must_use]
    pub fn is_complete(&self, assignment: &Assignment<V>) -> bool {
        self.variables.iter().all(|v| assignment.contains_key(v))
    }

    /// Every constraint whose variables are all assigned holds.
    #[must_use]
    pub fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }

    /// A complete, consistent assignment whose values lie in the declared
    /// domains.
    #[must_use]
    pub fn is_solution(&self, assignment: &Assignment<V>) -> bool {
        self.is_complete(assignment)
            && self.is_consistent(assignment)
            && assignment.iter().all(|(variable, value)| {
                self.domains
                    .get(variable)
                    .is_some_and(|domain| domain.contains(value))
            })
    }

    /// Structural checks: unique variable names, a domain for every
    /// variable, constraints over declared variables only.
    ///
    /// # Errors
    ///
    /// Returns the first structural defect found.
    pub fn validate(&self) -> Result<(), CspError> {
        let mut seen = HashSet::new();
        for variable in &self.variables {
            if !seen.insert(variable.as_str()) {
                return Err(CspError::DuplicateVariable {
                    variable: variable.clone(),
                });
            }
            if !self.domains.contains_key(variable) {
                return Err(CspError::MissingDomain {
                    variable: variable.clone(),
                });
            }
        }
        for (constraint_index, constraint) in self.constraints.iter().enumerate() {
            if let Some(unknown) = constraint
                .variables()
                .into_iter()
                .find(|v| !seen.contains(v))
            {
                return Err(CspError::UnknownVariable {
                    constraint_index,
                    variable: unknown.to_string(),
                });
            }
        }
        Ok(())
    }
}
