//! `ParkingProblem`: cars on a grid must each reach their own slot.
//!
//! Text form, one row per line:
//!
//! ```text
//! #######
//! #A.#1.#
//! #..B.0#
//! #######
//! ```
//!
//! `#` is a wall, `.` a free cell, `A`..`J` are cars 0..9 and `0`..`9` are
//! the slots of cars 0..9. Cars and slots stand on passable cells.
//!
//! A move slides one car one cell onto a passable, unoccupied cell. It costs
//! 1, or 101 when the car enters a slot that belongs to another car.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use athena_search::contract::Problem;

use crate::contract::{WorldParseError, WorldSource};

/// Extra cost of parking in someone else's slot.
pub const WRONG_SLOT_PENALTY: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Grid delta; `y` grows downward.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// Move car `car` one cell in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ParkingMove {
    pub car: usize,
    pub direction: Direction,
}

/// State: position of every car, indexed by car.
pub type ParkingState = Vec<Point>;

#[derive(Debug, Clone)]
pub struct ParkingProblem {
    pub passages: HashSet<Point>,
    pub cars: ParkingState,
    /// Slot cell to the car it belongs to.
    pub slots: HashMap<Point, usize>,
    /// Slot cell of each car, indexed by car.
    pub slot_of_car: Vec<Point>,
    pub width: usize,
    pub height: usize,
}

impl ParkingProblem {
    /// Sum over cars of the Manhattan distance to their slot. Admissible and
    /// consistent: every move shifts one car by one cell for at least 1.
    #[must_use]
    pub fn manhattan_estimate(&self, state: &ParkingState) -> f64 {
        state
            .iter()
            .zip(&self.slot_of_car)
            .map(|(car, slot)| f64::from(car.manhattan(*slot)))
            .sum()
    }
}

/// Heuristic adapter for [`athena_search::search::search`].
#[allow(clippy::ptr_arg)]
pub fn parking_heuristic(problem: &ParkingProblem, state: &ParkingState) -> f64 {
    problem.manhattan_estimate(state)
}

impl Problem for ParkingProblem {
    type State = ParkingState;
    type Action = ParkingMove;

    fn initial_state(&self) -> ParkingState {
        self.cars.clone()
    }

    fn is_goal(&self, state: &ParkingState) -> bool {
        state
            .iter()
            .enumerate()
            .all(|(car, position)| self.slots.get(position) == Some(&car))
    }

    fn actions(&self, state: &ParkingState) -> Vec<ParkingMove> {
        let mut moves = Vec::new();
        for (car, position) in state.iter().enumerate() {
            for direction in Direction::ALL {
                let target = position.step(direction);
                if self.passages.contains(&target) && !state.contains(&target) {
                    moves.push(ParkingMove { car, direction });
                }
            }
        }
        moves
    }

    fn successor(&self, state: &ParkingState, action: &ParkingMove) -> ParkingState {
        let mut next = state.clone();
        if let Some(position) = next.get_mut(action.car) {
            *position = position.step(action.direction);
        }
        next
    }

    fn cost(&self, state: &ParkingState, action: &ParkingMove) -> f64 {
        let Some(position) = state.get(action.car) else {
            return f64::INFINITY;
        };
        match self.slots.get(&position.step(action.direction)) {
            Some(owner) if *owner != action.car => 1.0 + WRONG_SLOT_PENALTY,
            _ => 1.0,
        }
    }
}

impl WorldSource for ParkingProblem {
    const WORLD_ID: &'static str = "parking";

    fn from_text(text: &str) -> Result<Self, WorldParseError> {
        let mut passages = HashSet::new();
        let mut cars: BTreeMap<usize, Point> = BTreeMap::new();
        let mut slots: BTreeMap<usize, Point> = BTreeMap::new();

        let rows: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        for (y, (line_no, row)) in rows.iter().enumerate() {
            for (x, tile) in row.chars().enumerate() {
                let point = Point {
                    x: to_coord(x, *line_no)?,
                    y: to_coord(y, *line_no)?,
                };
                let (table, index) = match tile {
                    '#' => continue,
                    '.' => {
                        passages.insert(point);
                        continue;
                    }
                    'A'..='J' => (&mut cars, usize::from(tile as u8 - b'A')),
                    '0'..='9' => (&mut slots, usize::from(tile as u8 - b'0')),
                    other => {
                        return Err(WorldParseError::Syntax {
                            line: *line_no,
                            detail: format!("unexpected tile {other:?}"),
                        })
                    }
                };
                passages.insert(point);
                if table.insert(index, point).is_some() {
                    return Err(WorldParseError::Syntax {
                        line: *line_no,
                        detail: format!("tile {tile:?} appears twice"),
                    });
                }
            }
        }

        let car_count = cars.len();
        if cars.keys().copied().ne(0..car_count) {
            return Err(WorldParseError::Invalid {
                detail: "cars must be lettered consecutively from A".into(),
            });
        }
        let slot_of_car = (0..car_count)
            .map(|car| {
                slots.get(&car).copied().ok_or_else(|| WorldParseError::Invalid {
                    detail: format!("car {} has no slot", char::from(b'A' + car as u8)),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            passages,
            cars: cars.into_values().collect(),
            slots: slots.into_iter().map(|(car, point)| (point, car)).collect(),
            slot_of_car,
            width: rows.iter().map(|(_, row)| row.len()).max().unwrap_or(0),
            height: rows.len(),
        })
    }
}

fn to_coord(value: usize, line: usize) -> Result<i32, WorldParseError> {
    i32::try_from(value).map_err(|_| WorldParseError::Syntax {
        line,
        detail: "grid too large".into(),
    })
}
