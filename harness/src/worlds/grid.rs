//! `GridWorld`: a 4-connected grid with walls, unit moves.
//!
//! Grids are parsed from ASCII: `#` is a wall, `.` open floor, `S` and `G`
//! open cells marking a fixture's start and goal. Coordinates are `(x, y)`
//! with `y` growing downward. The heuristic is Manhattan distance, which is
//! admissible and consistent for unit moves.

use std::collections::VecDeque;
use std::sync::Arc;

use lodestar_kernel::capability::{Equatable, Generative, Hashable, Heuristical};
use lodestar_kernel::hash::{stable_hash32, HashDomain};

use crate::contract::{SearchFixture, WorldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridMove {
    North,
    East,
    South,
    West,
}

impl GridMove {
    pub const ALL: [GridMove; 4] = [Self::North, Self::East, Self::South, Self::West];

    fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    walls: Vec<bool>,
    start: Option<(u32, u32)>,
    goal: Option<(u32, u32)>,
}

impl Grid {
    /// # Errors
    ///
    /// [`WorldError::InvalidGrid`] for an empty grid, ragged rows, an
    /// unknown character or a repeated `S`/`G` marker.
    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = lines.first().map_or(0, |line| line.chars().count());
        if width == 0 {
            return Err(invalid("grid is empty".to_owned()));
        }

        let mut walls = Vec::with_capacity(width * lines.len());
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(invalid(format!("row {y} is not {width} cells wide")));
            }
            for (x, cell) in line.chars().enumerate() {
                let at = (to_u32(x)?, to_u32(y)?);
                match cell {
                    '#' => walls.push(true),
                    '.' => walls.push(false),
                    'S' => {
                        mark(&mut start, at, 'S')?;
                        walls.push(false);
                    }
                    'G' => {
                        mark(&mut goal, at, 'G')?;
                        walls.push(false);
                    }
                    other => return Err(invalid(format!("unknown cell {other:?} at {x},{y}"))),
                }
            }
        }
        Ok(Self {
            width: to_u32(width)?,
            height: to_u32(lines.len())?,
            walls,
            start,
            goal,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell position of the `S` marker.
    #[must_use]
    pub fn start_marker(&self) -> Option<(u32, u32)> {
        self.start
    }

    /// Cell position of the `G` marker.
    #[must_use]
    pub fn goal_marker(&self) -> Option<(u32, u32)> {
        self.goal
    }

    #[must_use]
    pub fn is_open(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && !self.walls[self.index(x, y)]
    }

    /// Shortest move count from `(x, y)` to every cell, `None` where
    /// unreachable. Plain breadth-first flood used as a reference oracle.
    #[must_use]
    pub fn distances_from(&self, x: u32, y: u32) -> Vec<Option<u32>> {
        let mut distances = vec![None; self.walls.len()];
        if !self.is_open(x, y) {
            return distances;
        }
        let mut queue = VecDeque::from([(x, y)]);
        distances[self.index(x, y)] = Some(0);
        while let Some((cx, cy)) = queue.pop_front() {
            let here = distances[self.index(cx, cy)].unwrap_or(0);
            for step in GridMove::ALL {
                if let Some((nx, ny)) = self.neighbour(cx, cy, step) {
                    let slot = &mut distances[self.index(nx, ny)];
                    if slot.is_none() {
                        *slot = Some(here + 1);
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        distances
    }

    /// Distance between two cells per [`Grid::distances_from`].
    #[must_use]
    pub fn distance(&self, from: (u32, u32), to: (u32, u32)) -> Option<u32> {
        if !self.is_open(to.0, to.1) {
            return None;
        }
        self.distances_from(from.0, from.1)[self.index(to.0, to.1)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn neighbour(&self, x: u32, y: u32, step: GridMove) -> Option<(u32, u32)> {
        let (dx, dy) = step.offset();
        let nx = u32::try_from(i64::from(x) + dx).ok()?;
        let ny = u32::try_from(i64::from(y) + dy).ok()?;
        self.is_open(nx, ny).then_some((nx, ny))
    }
}

fn mark(slot: &mut Option<(u32, u32)>, at: (u32, u32), marker: char) -> Result<(), WorldError> {
    if slot.is_some() {
        return Err(invalid(format!("marker {marker} appears twice")));
    }
    *slot = Some(at);
    Ok(())
}

fn to_u32(n: usize) -> Result<u32, WorldError> {
    u32::try_from(n).map_err(|_| invalid(format!("grid dimension {n} too large")))
}

fn invalid(detail: String) -> WorldError {
    WorldError::InvalidGrid { detail }
}

/// A position on a shared [`Grid`].
#[derive(Debug, Clone)]
pub struct GridState {
    pub x: u32,
    pub y: u32,
    grid: Arc<Grid>,
}

impl GridState {
    /// # Errors
    ///
    /// [`WorldError::InvalidGrid`] if `(x, y)` is a wall or off the grid.
    pub fn new(grid: Arc<Grid>, x: u32, y: u32) -> Result<Self, WorldError> {
        if !grid.is_open(x, y) {
            return Err(invalid(format!("{x},{y} is not an open cell")));
        }
        Ok(Self { x, y, grid })
    }

    #[must_use]
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }
}

impl Equatable for GridState {
    fn is_equal(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Hashable for GridState {
    fn stable_hash(&self) -> u32 {
        let mut bytes = [0u8; 8];
        bytes[..4].copy_from_slice(&self.x.to_le_bytes());
        bytes[4..].copy_from_slice(&self.y.to_le_bytes());
        stable_hash32(HashDomain::StateIdentity, &bytes)
    }
}

impl Generative for GridState {
    type Op = GridMove;

    fn operations(&self) -> Vec<GridMove> {
        GridMove::ALL.to_vec()
    }

    fn generate(&self, op: &GridMove) -> Option<Self> {
        let (x, y) = self.grid.neighbour(self.x, self.y, *op)?;
        Some(Self {
            x,
            y,
            grid: Arc::clone(&self.grid),
        })
    }
}

impl Heuristical for GridState {
    fn heuristic_distance(&self, other: &Self, _param: i32) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// A grid with `S` and `G` markers.
#[derive(Debug, Clone)]
pub struct GridFixture {
    id: String,
    grid: Arc<Grid>,
    start: GridState,
    finish: GridState,
}

impl GridFixture {
    /// # Errors
    ///
    /// [`WorldError::InvalidGrid`] if the text does not parse or lacks a
    /// marker.
    pub fn parse(id: &str, text: &str) -> Result<Self, WorldError> {
        let grid = Arc::new(Grid::parse(text)?);
        let (sx, sy) = grid
            .start_marker()
            .ok_or_else(|| invalid("no S marker".to_owned()))?;
        let (gx, gy) = grid
            .goal_marker()
            .ok_or_else(|| invalid("no G marker".to_owned()))?;
        Ok(Self {
            id: id.to_owned(),
            start: GridState::new(Arc::clone(&grid), sx, sy)?,
            finish: GridState::new(Arc::clone(&grid), gx, gy)?,
            grid,
        })
    }

    #[must_use]
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// True shortest move count between the markers.
    #[must_use]
    pub fn shortest_distance(&self) -> Option<u32> {
        self.grid
            .distance((self.start.x, self.start.y), (self.finish.x, self.finish.y))
    }
}

impl SearchFixture for GridFixture {
    type State = GridState;

    fn fixture_id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> GridState {
        self.start.clone()
    }

    fn finish(&self) -> GridState {
        self.finish.clone()
    }

    fn describe(&self) -> serde_json::Value {
        serde_json::json!({
            "world": "grid",
            "width": self.grid.width,
            "height": self.grid.height,
            "start": [self.start.x, self.start.y],
            "goal": [self.finish.x, self.finish.y],
        })
    }
}
