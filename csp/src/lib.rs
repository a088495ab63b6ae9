//! Athena CSP: backtracking search for constraint-satisfaction problems.
//!
//! A [`CspProblem`](problem::CspProblem) holds ordered variables, finite
//! domains and unary/binary [`Constraint`](problem::Constraint)s. The
//! [`solver`] applies 1-consistency once, then runs backtracking with
//! forward checking, MRV variable ordering and least-constraining-value
//! ordering. Per-branch domain copies make backtracking safe without an
//! undo log.
//!
//! [`cryptarithmetic`] encodes `"SEND + MORE = MONEY"`-style puzzles using
//! unary and binary constraints only.

#![forbid(unsafe_code)]

pub mod cryptarithmetic;
pub mod error;
pub mod problem;
pub mod report;
pub mod solver;
