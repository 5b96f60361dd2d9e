//! `NPuzzle`: the rows x columns sliding-tile puzzle.
//!
//! Tiles are numbered `1..rows*cols`; `0` is the blank. Operations move the
//! blank one cell. Heuristics are measured toward the layout of the *other*
//! state, so any board can serve as the finish, not only the canonical goal.
//!
//! | `heuristic_param` | heuristic |
//! |---|---|
//! | 0 (and unknown values) | none (always 0) |
//! | 1 | misplaced tiles, blank excluded |
//! | 2 | Manhattan distance |
//! | 3 | Manhattan distance plus linear conflicts |

use std::fmt;

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use lodestar_kernel::capability::{Equatable, Generative, Hashable, Heuristical};
use lodestar_kernel::hash::{stable_hash32, HashDomain};

use crate::contract::{SearchFixture, WorldError};

pub const HEURISTIC_NONE: i32 = 0;
pub const HEURISTIC_MISPLACED: i32 = 1;
pub const HEURISTIC_MANHATTAN: i32 = 2;
pub const HEURISTIC_LINEAR_CONFLICT: i32 = 3;

/// Direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleMove {
    Left,
    Right,
    Up,
    Down,
}

impl PuzzleMove {
    pub const ALL: [PuzzleMove; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NPuzzle {
    rows: u8,
    cols: u8,
    tiles: Vec<u8>,
    blank: usize,
}

impl NPuzzle {
    /// The solved board: tiles in reading order, blank last.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidPuzzle`] if a dimension is zero or the board has
    /// more than 256 cells.
    pub fn goal(rows: u8, cols: u8) -> Result<Self, WorldError> {
        let cells = check_dimensions(rows, cols)?;
        let mut tiles: Vec<u8> = (1..cells).filter_map(|t| u8::try_from(t).ok()).collect();
        tiles.push(0);
        Self::from_tiles(rows, cols, tiles)
    }

    /// A board from tiles in reading order.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidPuzzle`] unless `tiles` is a permutation of
    /// `0..rows*cols`.
    pub fn from_tiles(rows: u8, cols: u8, tiles: Vec<u8>) -> Result<Self, WorldError> {
        let cells = check_dimensions(rows, cols)?;
        if tiles.len() != cells {
            return Err(invalid(format!(
                "{rows}x{cols} board needs {cells} tiles, got {}",
                tiles.len()
            )));
        }
        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let slot = seen
                .get_mut(usize::from(tile))
                .ok_or_else(|| invalid(format!("tile {tile} out of range 0..{cells}")))?;
            if *slot {
                return Err(invalid(format!("tile {tile} appears twice")));
            }
            *slot = true;
        }
        let blank = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or_else(|| invalid("board has no blank".to_owned()))?;
        Ok(Self {
            rows,
            cols,
            tiles,
            blank,
        })
    }

    #[must_use]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Tiles in reading order.
    #[must_use]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// `(row, col)` of the blank.
    #[must_use]
    pub fn blank(&self) -> (usize, usize) {
        let cols = usize::from(self.cols);
        (self.blank / cols, self.blank % cols)
    }

    /// Whether the canonical goal is reachable from this board.
    ///
    /// Inversion parity test; boards with a single row or column are
    /// solvable only if already ordered.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let inversions = self.inversions();
        if self.rows == 1 || self.cols == 1 {
            return inversions == 0;
        }
        if self.cols % 2 == 1 {
            inversions % 2 == 0
        } else {
            let row_from_bottom = usize::from(self.rows) - self.blank().0;
            (inversions + row_from_bottom) % 2 == 1
        }
    }

    /// Random walk of `moves` blank moves that never undoes the previous
    /// move unless it is the only one available.
    #[must_use]
    pub fn shuffle<R: Rng + ?Sized>(&self, moves: u32, rng: &mut R) -> Self {
        let mut board = self.clone();
        let mut previous: Option<PuzzleMove> = None;
        for _ in 0..moves {
            let legal: Vec<(PuzzleMove, NPuzzle)> = PuzzleMove::ALL
                .iter()
                .filter_map(|&m| board.generate(&m).map(|next| (m, next)))
                .collect();
            let forward: Vec<&(PuzzleMove, NPuzzle)> = legal
                .iter()
                .filter(|(m, _)| previous != Some(m.inverse()))
                .collect();
            let pick = if forward.is_empty() {
                legal.choose(rng)
            } else {
                forward.choose(rng).copied()
            };
            let Some((m, next)) = pick else {
                break;
            };
            previous = Some(*m);
            board = next.clone();
        }
        board
    }

    fn inversions(&self) -> usize {
        let numbered: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        numbered
            .iter()
            .enumerate()
            .map(|(i, a)| numbered[i + 1..].iter().filter(|b| a > *b).count())
            .sum()
    }

    /// `target[tile]` = cell index of `tile` on `other`.
    fn targets(other: &Self) -> Vec<usize> {
        let mut target = vec![0; other.tiles.len()];
        for (cell, &tile) in other.tiles.iter().enumerate() {
            target[usize::from(tile)] = cell;
        }
        target
    }

    fn misplaced(&self, other: &Self) -> usize {
        self.tiles
            .iter()
            .zip(&other.tiles)
            .filter(|&(&a, &b)| a != 0 && a != b)
            .count()
    }

    fn manhattan(&self, target: &[usize]) -> usize {
        let cols = usize::from(self.cols);
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(cell, &tile)| {
                let goal = target[usize::from(tile)];
                (cell / cols).abs_diff(goal / cols) + (cell % cols).abs_diff(goal % cols)
            })
            .sum()
    }

    /// Extra moves forced by tiles that sit in their goal row (or column)
    /// in reversed order.
    fn linear_conflicts(&self, target: &[usize]) -> usize {
        let rows = usize::from(self.rows);
        let cols = usize::from(self.cols);
        let goal_of = |cell: usize| {
            let tile = self.tiles[cell];
            (tile != 0).then(|| target[usize::from(tile)])
        };

        let mut extra = 0;
        for r in 0..rows {
            let line: Vec<usize> = (0..cols)
                .filter_map(|c| goal_of(r * cols + c))
                .filter(|goal| goal / cols == r)
                .map(|goal| goal % cols)
                .collect();
            extra += resolve_conflicts(&line);
        }
        for c in 0..cols {
            let line: Vec<usize> = (0..rows)
                .filter_map(|r| goal_of(r * cols + c))
                .filter(|goal| goal % cols == c)
                .map(|goal| goal / cols)
                .collect();
            extra += resolve_conflicts(&line);
        }
        extra
    }
}

/// `goals` lists goal offsets of one line's tiles in current order. Removes
/// the most conflicted tile until no pair is reversed; each removal costs
/// two moves.
fn resolve_conflicts(goals: &[usize]) -> usize {
    let n = goals.len();
    let mut removed = vec![false; n];
    let mut extra = 0;
    loop {
        let worst = (0..n)
            .filter(|&i| !removed[i])
            .map(|i| {
                let count = (0..n)
                    .filter(|&j| !removed[j] && j != i && (j < i) == (goals[j] > goals[i]))
                    .count();
                (count, i)
            })
            .max();
        match worst {
            Some((count, i)) if count > 0 => {
                removed[i] = true;
                extra += 2;
            }
            _ => return extra,
        }
    }
}

fn check_dimensions(rows: u8, cols: u8) -> Result<usize, WorldError> {
    let cells = usize::from(rows) * usize::from(cols);
    if cells == 0 || cells > 256 {
        return Err(invalid(format!("{rows}x{cols} is not a playable board")));
    }
    Ok(cells)
}

fn invalid(detail: String) -> WorldError {
    WorldError::InvalidPuzzle { detail }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl Equatable for NPuzzle {
    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl Hashable for NPuzzle {
    fn stable_hash(&self) -> u32 {
        let mut bytes = Vec::with_capacity(self.tiles.len() + 2);
        bytes.push(self.rows);
        bytes.push(self.cols);
        bytes.extend_from_slice(&self.tiles);
        stable_hash32(HashDomain::StateIdentity, &bytes)
    }
}

impl Generative for NPuzzle {
    type Op = PuzzleMove;

    fn operations(&self) -> Vec<PuzzleMove> {
        PuzzleMove::ALL.to_vec()
    }

    fn generate(&self, op: &PuzzleMove) -> Option<Self> {
        let (row, col) = self.blank();
        let cols = usize::from(self.cols);
        let target = match op {
            PuzzleMove::Left => (col > 0).then(|| self.blank - 1),
            PuzzleMove::Right => (col + 1 < cols).then(|| self.blank + 1),
            PuzzleMove::Up => (row > 0).then(|| self.blank - cols),
            PuzzleMove::Down => (row + 1 < usize::from(self.rows)).then(|| self.blank + cols),
        }?;
        let mut next = self.clone();
        next.tiles.swap(self.blank, target);
        next.blank = target;
        Some(next)
    }
}

impl Heuristical for NPuzzle {
    /// Boards of different shape are never compared by the searches; they
    /// score 0.
    fn heuristic_distance(&self, other: &Self, param: i32) -> u32 {
        if self.rows != other.rows || self.cols != other.cols {
            return 0;
        }
        match param {
            HEURISTIC_MISPLACED => to_u32(self.misplaced(other)),
            HEURISTIC_MANHATTAN => to_u32(self.manhattan(&Self::targets(other))),
            HEURISTIC_LINEAR_CONFLICT => {
                let target = Self::targets(other);
                to_u32(self.manhattan(&target) + self.linear_conflicts(&target))
            }
            _ => 0,
        }
    }
}

impl fmt::Display for NPuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.tiles.chunks(usize::from(self.cols)).enumerate() {
            if r > 0 {
                f.write_str("/")?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|&t| if t == 0 { "_".to_owned() } else { t.to_string() })
                .collect();
            f.write_str(&cells.join(" "))?;
        }
        Ok(())
    }
}

/// A seeded scramble of the canonical goal, solved back to the goal.
#[derive(Debug, Clone)]
pub struct PuzzleFixture {
    id: String,
    start: NPuzzle,
    finish: NPuzzle,
    heuristic_param: i32,
}

impl PuzzleFixture {
    /// Scramble the `rows x cols` goal with `moves` random moves drawn from
    /// a generator seeded with `seed`.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidPuzzle`] for an unplayable board shape.
    pub fn scrambled(rows: u8, cols: u8, moves: u32, seed: u64) -> Result<Self, WorldError> {
        let finish = NPuzzle::goal(rows, cols)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let start = finish.shuffle(moves, &mut rng);
        Ok(Self {
            id: format!("npuzzle_{rows}x{cols}_m{moves}_s{seed}"),
            start,
            finish,
            heuristic_param: HEURISTIC_LINEAR_CONFLICT,
        })
    }

    #[must_use]
    pub fn with_heuristic(mut self, param: i32) -> Self {
        self.heuristic_param = param;
        self
    }
}

impl SearchFixture for PuzzleFixture {
    type State = NPuzzle;

    fn fixture_id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> NPuzzle {
        self.start.clone()
    }

    fn finish(&self) -> NPuzzle {
        self.finish.clone()
    }

    fn heuristic_param(&self) -> i32 {
        self.heuristic_param
    }

    fn describe(&self) -> serde_json::Value {
        serde_json::json!({
            "world": "npuzzle",
            "rows": self.start.rows,
            "cols": self.start.cols,
            "start": self.start.to_string(),
            "heuristic_param": self.heuristic_param,
        })
    }
}
