//! Harness runner: executes one algorithm against one world and produces a
//! JSON run record.
//!
//! Every record carries a `kind`, the world and algorithm names, the answer, the
//! algorithm's own report and a `record_id`: the content hash of the
//! canonical record (without `record_id`) under the `RunRecord` domain.
//!
//! # Pipeline
//!
//! ```text
//! CaseSpec → load world → parse algorithm/policy → run → record → seal
//! ```

use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use athena_csp::cryptarithmetic::CryptarithmeticPuzzle;
use athena_csp::error::CspError;
use athena_csp::solver::solve_with_report;
use athena_games::contract::Game;
use athena_games::error::GameSearchError;
use athena_games::policy::{DepthLimit, GameSearchKind};
use athena_games::search::run_game_search;
use athena_kernel::proof::canon::canonical_json_bytes;
use athena_kernel::proof::hash::canonical_hash;
use athena_kernel::proof::hash_domain::HashDomain;
use athena_search::contract::Problem;
use athena_search::error::SearchError;
use athena_search::policy::{Algorithm, SearchPolicy};
use athena_search::search::search;

use crate::contract::{WorldParseError, WorldSource};
use crate::results::ResultsMap;
use crate::worlds::graph::{graph_heuristic, GraphProblem};
use crate::worlds::parking::{parking_heuristic, ParkingProblem};
use crate::worlds::tree_game::{tree_heuristic, TreeGame};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The world description could not be loaded.
    World(WorldParseError),
    /// Search pre-flight validation failed.
    Search(SearchError),
    /// The puzzle could not be parsed.
    Csp(CspError),
    /// Game search configuration was invalid.
    Game(GameSearchError),
    /// A search or game case named no algorithm.
    MissingAlgorithm { case: String },
    /// Two cases in one suite share a name.
    DuplicateCase { name: String },
    /// The suite description is not a JSON array of cases.
    SuiteParse { detail: String },
    /// Serializing the record failed.
    Canon { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::World(e) => write!(f, "world error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Csp(e) => write!(f, "csp error: {e}"),
            Self::Game(e) => write!(f, "game search error: {e}"),
            Self::MissingAlgorithm { case } => write!(f, "case {case:?} names no algorithm"),
            Self::DuplicateCase { name } => write!(f, "duplicate case name {name:?}"),
            Self::SuiteParse { detail } => write!(f, "suite parse error: {detail}"),
            Self::Canon { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<WorldParseError> for RunError {
    fn from(e: WorldParseError) -> Self {
        Self::World(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CspError> for RunError {
    fn from(e: CspError) -> Self {
        Self::Csp(e)
    }
}

impl From<GameSearchError> for RunError {
    fn from(e: GameSearchError) -> Self {
        Self::Game(e)
    }
}

/// Which world a case loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldKind {
    Graph,
    Parking,
    Cryptarithmetic,
    TreeGame,
}

/// One case of a suite, as read from JSON.
///
/// `source` is the world's text form. `algorithm` is required for graph,
/// parking and tree-game cases; cryptarithmetic cases always use the CSP
/// solver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaseSpec {
    pub name: String,
    pub world: WorldKind,
    pub source: String,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub max_expansions: Option<u64>,
    #[serde(default = "unbounded_depth")]
    pub max_depth: i64,
    #[serde(default)]
    pub seed: u64,
}

fn unbounded_depth() -> i64 {
    DepthLimit::Unbounded.as_raw()
}

/// Parse a suite: a JSON array of [`CaseSpec`].
///
/// # Errors
///
/// Returns [`RunError::SuiteParse`] if the JSON does not match.
pub fn parse_suite(text: &str) -> Result<Vec<CaseSpec>, RunError> {
    serde_json::from_str(text).map_err(|e| RunError::SuiteParse {
        detail: e.to_string(),
    })
}

/// Run every case, keyed by case name.
///
/// # Errors
///
/// Returns the first case error, or [`RunError::DuplicateCase`].
pub fn run_suite(cases: &[CaseSpec]) -> Result<ResultsMap, RunError> {
    let mut results = ResultsMap::new();
    for case in cases {
        if results.contains_key(&case.name) {
            return Err(RunError::DuplicateCase {
                name: case.name.clone(),
            });
        }
        results.insert(case.name.clone(), run_case(case)?);
    }
    Ok(results)
}

/// Load the case's world and run its algorithm.
///
/// # Errors
///
/// Returns [`RunError`] if the world, algorithm name or policy is invalid.
pub fn run_case(case: &CaseSpec) -> Result<serde_json::Value, RunError> {
    let algorithm_name = || {
        case.algorithm
            .as_deref()
            .ok_or_else(|| RunError::MissingAlgorithm {
                case: case.name.clone(),
            })
    };
    let policy = SearchPolicy {
        max_expansions: case.max_expansions,
    };

    match case.world {
        WorldKind::Graph => {
            let problem = GraphProblem::from_text(&case.source)?;
            let algorithm = Algorithm::from_str(algorithm_name()?)?;
            run_search_case(&problem, algorithm, graph_heuristic, &policy)
        }
        WorldKind::Parking => {
            let problem = ParkingProblem::from_text(&case.source)?;
            let algorithm = Algorithm::from_str(algorithm_name()?)?;
            run_search_case(&problem, algorithm, parking_heuristic, &policy)
        }
        WorldKind::Cryptarithmetic => {
            let puzzle = CryptarithmeticPuzzle::from_text(&case.source)?;
            run_csp_case(&puzzle)
        }
        WorldKind::TreeGame => {
            let game = TreeGame::from_text(&case.source)?;
            let kind = GameSearchKind::from_str(algorithm_name()?)?;
            let depth = DepthLimit::from_raw(case.max_depth)?;
            run_game_case(&game, &TreeGame::ROOT, kind, tree_heuristic, depth, case.seed)
        }
    }
}

/// Run a graph search from the problem's initial state.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the policy is invalid.
pub fn run_search_case<P, H>(
    problem: &P,
    algorithm: Algorithm,
    heuristic: H,
    policy: &SearchPolicy,
) -> Result<serde_json::Value, RunError>
where
    P: Problem + WorldSource,
    P::Action: Serialize,
    H: Fn(&P, &P::State) -> f64,
{
    let initial = problem.initial_state();
    let result = search(problem, &initial, algorithm, heuristic, policy)?;
    let solution = serde_json::to_value(&result.solution).map_err(canon_error)?;
    seal(serde_json::json!({
        "algorithm": algorithm.as_str(),
        "kind": "search",
        "report": result.report.to_json_value(),
        "solution": solution,
        "world": P::WORLD_ID,
    }))
}

/// Solve a cryptarithmetic puzzle.
///
/// # Errors
///
/// Returns [`RunError::Csp`] if the generated problem is structurally
/// invalid, or [`RunError::Canon`] if the record cannot be canonicalized.
pub fn run_csp_case(puzzle: &CryptarithmeticPuzzle) -> Result<serde_json::Value, RunError> {
    let mut problem = puzzle.to_problem();
    problem.validate()?;
    let outcome = solve_with_report(&mut problem);
    let (solution, formatted) = match &outcome.solution {
        Some(assignment) => {
            let digits: serde_json::Map<String, serde_json::Value> = puzzle
                .letter_digits(assignment)
                .into_iter()
                .map(|(letter, digit)| (letter.to_string(), serde_json::json!(digit)))
                .collect();
            (
                serde_json::Value::Object(digits),
                serde_json::Value::String(puzzle.format_assignment(assignment)),
            )
        }
        None => (serde_json::Value::Null, serde_json::Value::Null),
    };
    seal(serde_json::json!({
        "algorithm": "backtracking_fc_mrv_lcv",
        "formatted": formatted,
        "kind": "csp",
        "puzzle": format!("{} + {} = {}", puzzle.lhs.0, puzzle.lhs.1, puzzle.rhs),
        "report": outcome.report.to_json_value(),
        "solution": solution,
        "world": "cryptarithmetic",
    }))
}

/// Run a game-tree search. `seed` drives expectimax's chance-node choices.
///
/// # Errors
///
/// Returns [`RunError::Canon`] if the record cannot be canonicalized.
pub fn run_game_case<G, H>(
    game: &G,
    state: &G::State,
    kind: GameSearchKind,
    heuristic: H,
    max_depth: DepthLimit,
    seed: u64,
) -> Result<serde_json::Value, RunError>
where
    G: Game + WorldSource,
    G::Action: Serialize,
    H: Fn(&G, &G::State, usize) -> f64,
{
    let mut rng = SmallRng::seed_from_u64(seed);
    let decision = run_game_search(kind, game, state, heuristic, max_depth, &mut rng);
    let action = serde_json::to_value(&decision.action).map_err(canon_error)?;
    seal(serde_json::json!({
        "action": action,
        "algorithm": kind.as_str(),
        "kind": "game",
        "max_depth": max_depth.as_raw(),
        "stats": decision.stats.to_json_value(),
        "value": decision.value,
        "world": G::WORLD_ID,
    }))
}

/// Attach `record_id` to a record.
fn seal(mut record: serde_json::Value) -> Result<serde_json::Value, RunError> {
    let bytes = canonical_json_bytes(&record).map_err(canon_error)?;
    let record_id = canonical_hash(HashDomain::RunRecord, &bytes);
    if let serde_json::Value::Object(map) = &mut record {
        map.insert("record_id".into(), record_id.as_str().into());
    }
    Ok(record)
}

fn canon_error(e: impl std::fmt::Display) -> RunError {
    RunError::Canon {
        detail: e.to_string(),
    }
}
