//! Cryptarithmetic puzzles (`"SEND + MORE = MONEY"`) as CSPs.
//!
//! The encoding uses unary and binary constraints only:
//!
//! - one digit variable per distinct letter, pairwise distinct, with the
//!   leading letter of every word non-zero;
//! - one column variable per column (`#0` is the rightmost) whose values are
//!   every `(lhs0, lhs1, carry_in, result, carry_out)` tuple with
//!   `lhs0 + lhs1 + carry_in = result + 10 * carry_out`;
//! - a binary link from each letter to the column component it occupies;
//! - a binary link from each column's `carry_out` to the next column's
//!   `carry_in`;
//! - unary constraints zeroing digits a word does not reach, the carry into
//!   `#0` and the carry out of the leftmost column.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use crate::error::CspError;
use crate::problem::{Assignment, Constraint, CspProblem};

/// One column of the long addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnDigits {
    pub lhs0: u8,
    pub lhs1: u8,
    pub carry_in: u8,
    pub result: u8,
    pub carry_out: u8,
}

impl ColumnDigits {
    /// Every arithmetically valid column.
    pub fn all() -> impl Iterator<Item = ColumnDigits> {
        (0..10u8).flat_map(|lhs0| {
            (0..10u8).flat_map(move |lhs1| {
                (0..2u8).map(move |carry_in| {
                    let sum = lhs0 + lhs1 + carry_in;
                    ColumnDigits {
                        lhs0,
                        lhs1,
                        carry_in,
                        result: sum % 10,
                        carry_out: sum / 10,
                    }
                })
            })
        })
    }
}

/// Value of a puzzle variable: a letter's digit or a column tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CryptValue {
    Digit(u8),
    Column(ColumnDigits),
}

impl CryptValue {
    #[must_use]
    pub fn digit(&self) -> Option<u8> {
        match self {
            Self::Digit(d) => Some(*d),
            Self::Column(_) => None,
        }
    }

    #[must_use]
    pub fn column(&self) -> Option<ColumnDigits> {
        match self {
            Self::Digit(_) => None,
            Self::Column(c) => Some(*c),
        }
    }
}

/// Which component of a column a letter occupies.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Lhs0,
    Lhs1,
    Result,
}

impl Slot {
    fn of(self, column: ColumnDigits) -> u8 {
        match self {
            Self::Lhs0 => column.lhs0,
            Self::Lhs1 => column.lhs1,
            Self::Result => column.result,
        }
    }
}

/// A puzzle `LHS0 + LHS1 = RHS` over upper-case letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptarithmeticPuzzle {
    pub lhs: (String, String),
    pub rhs: String,
}

impl CryptarithmeticPuzzle {
    /// Parse `"LHS0 + LHS1 = RHS"`. Letters are case-insensitive and
    /// whitespace around the terms is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CspError::Parse`] if the text does not have that shape.
    pub fn from_text(text: &str) -> Result<Self, CspError> {
        let parse_error = |detail: &str| CspError::Parse {
            input: text.to_string(),
            detail: detail.to_string(),
        };
        let (lhs, rhs) = text.split_once('=').ok_or_else(|| parse_error("missing '='"))?;
        let (lhs0, lhs1) = lhs.split_once('+').ok_or_else(|| parse_error("missing '+'"))?;

        let mut terms = [lhs0, lhs1, rhs].into_iter().map(|term| {
            let term = term.trim();
            if term.is_empty() {
                Err(parse_error("empty term"))
            } else if !term.chars().all(|c| c.is_ascii_alphabetic()) {
                Err(parse_error("terms must be letters only"))
            } else {
                Ok(term.to_ascii_uppercase())
            }
        });
        let (Some(lhs0), Some(lhs1), Some(rhs)) = (terms.next(), terms.next(), terms.next()) else {
            return Err(parse_error("expected three terms"));
        };
        Ok(Self {
            lhs: (lhs0?, lhs1?),
            rhs: rhs?,
        })
    }

    /// Read and parse a puzzle file.
    ///
    /// # Errors
    ///
    /// Returns [`CspError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_text`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CspError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CspError::Io {
            detail: format!("{}: {e}", path.display()),
        })?;
        Self::from_text(&text)
    }

    /// The three words, in formula order.
    fn words(&self) -> [&str; 3] {
        [&self.lhs.0, &self.lhs.1, &self.rhs]
    }

    /// Distinct letters in order of first appearance.
    #[must_use]
    pub fn letters(&self) -> Vec<char> {
        let mut seen = BTreeSet::new();
        self.words()
            .into_iter()
            .flat_map(str::chars)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Number of columns: the length of the longest word.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.words().into_iter().map(str::len).max().unwrap_or(0)
    }

    /// Encode the puzzle as a CSP.
    #[must_use]
    pub fn to_problem(&self) -> CspProblem<CryptValue> {
        let mut problem = CspProblem::default();
        let letters = self.letters();

        for letter in &letters {
            problem.add_variable(letter.to_string(), (0..10).map(CryptValue::Digit));
        }
        let columns = self.column_count();
        for index in 0..columns {
            problem.add_variable(column_name(index), ColumnDigits::all().map(CryptValue::Column));
        }

        for (i, a) in letters.iter().enumerate() {
            for b in &letters[i + 1..] {
                problem.add_constraint(Constraint::binary(
                    a.to_string(),
                    b.to_string(),
                    |x: &CryptValue, y: &CryptValue| x != y,
                ));
            }
        }

        let leading: BTreeSet<char> = self.words().iter().filter_map(|w| w.chars().next()).collect();
        for letter in leading {
            problem.add_constraint(Constraint::unary(letter.to_string(), |v: &CryptValue| {
                v.digit().is_some_and(|d| d != 0)
            }));
        }

        for (word, slot) in self.words().into_iter().zip([Slot::Lhs0, Slot::Lhs1, Slot::Result]) {
            for (index, letter) in word.chars().rev().enumerate() {
                problem.add_constraint(Constraint::binary(
                    letter.to_string(),
                    column_name(index),
                    move |digit: &CryptValue, column: &CryptValue| {
                        matches!(
                            (digit.digit(), column.column()),
                            (Some(d), Some(c)) if slot.of(c) == d
                        )
                    },
                ));
            }
            for index in word.len()..columns {
                problem.add_constraint(Constraint::unary(column_name(index), move |v: &CryptValue| {
                    v.column().is_some_and(|c| slot.of(c) == 0)
                }));
            }
        }

        if columns > 0 {
            problem.add_constraint(Constraint::unary(column_name(0), |v: &CryptValue| {
                v.column().is_some_and(|c| c.carry_in == 0)
            }));
            problem.add_constraint(Constraint::unary(column_name(columns - 1), |v: &CryptValue| {
                v.column().is_some_and(|c| c.carry_out == 0)
            }));
        }
        for index in 1..columns {
            problem.add_constraint(Constraint::binary(
                column_name(index - 1),
                column_name(index),
                |right: &CryptValue, left: &CryptValue| {
                    matches!(
                        (right.column(), left.column()),
                        (Some(r), Some(l)) if r.carry_out == l.carry_in
                    )
                },
            ));
        }

        problem
    }

    /// Digits assigned to letters; unassigned letters are omitted.
    #[must_use]
    pub fn letter_digits(&self, assignment: &Assignment<CryptValue>) -> BTreeMap<char, u8> {
        self.letters()
            .into_iter()
            .filter_map(|letter| {
                assignment
                    .get(&letter.to_string())
                    .and_then(CryptValue::digit)
                    .map(|d| (letter, d))
            })
            .collect()
    }

    /// The formula with every assigned letter replaced by its digit,
    /// e.g. `9567 + 1085 = 10652`.
    #[must_use]
    pub fn format_assignment(&self, assignment: &Assignment<CryptValue>) -> String {
        let digits = self.letter_digits(assignment);
        format!("{} + {} = {}", self.lhs.0, self.lhs.1, self.rhs)
            .chars()
            .map(|c| digits.get(&c).map_or(c, |d| char::from(b'0' + d)))
            .collect()
    }

    /// Whether `digits` is a valid answer: every letter has a distinct digit,
    /// no word starts with zero and the sum holds.
    #[must_use]
    pub fn is_solved_by(&self, digits: &BTreeMap<char, u8>) -> bool {
        let letters = self.letters();
        let distinct: BTreeSet<u8> = digits.values().copied().collect();
        if letters.iter().any(|l| !digits.contains_key(l)) || distinct.len() != digits.len() {
            return false;
        }
        let value = |word: &str| -> Option<u128> {
            if word.chars().next().and_then(|c| digits.get(&c)) == Some(&0) {
                return None;
            }
            word.chars().try_fold(0u128, |acc, c| {
                acc.checked_mul(10)?.checked_add(u128::from(*digits.get(&c)?))
            })
        };
        match (value(&self.lhs.0), value(&self.lhs.1), value(&self.rhs)) {
            (Some(a), Some(b), Some(r)) => a.checked_add(b) == Some(r),
            _ => false,
        }
    }
}

impl FromStr for CryptarithmeticPuzzle {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

fn column_name(index: usize) -> String {
    format!("#{index}")
}
