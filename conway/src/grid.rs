// grid.rs - Double-buffered cell grid for Conway's Game of Life
//
// Both buffers are flat, row-major `Vec<u8>` holding 0 (dead) or 1 (alive) so
// the engine can sum neighbours directly. The outermost ring of cells is never
// evaluated by the engine and always comes out dead.

use std::fmt;

use rand::Rng;

use crate::error::GridError;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// Cell coordinate as `(x, y)`, column first.
pub type CellPos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    fn to_byte(self) -> u8 {
        match self {
            CellState::Dead  => DEAD,
            CellState::Alive => ALIVE,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

/// How a freshly allocated grid is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Each cell alive with probability 0.5.
    Random,
    Empty,
}

/// Borrowed view of both buffers for one generation step: read `current`,
/// write `next`.
pub struct Buffers<'a> {
    pub current: &'a [u8],
    pub next: &'a mut [u8],
    pub width: usize,
    pub height: usize,
}

#[derive(Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    current: Vec<u8>,
    next: Vec<u8>,
}

impl Grid {
    /// Allocates `current` with `fill` and an empty `next`. The two buffers
    /// never alias.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        fill: Fill,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let len = Self::cell_count(width, height)?;

        let mut current = alloc(len)?;
        if fill == Fill::Random {
            current.iter_mut().for_each(|c| *c = rng.gen_bool(0.5) as u8);
        }
        let next = alloc(len)?;

        Ok(Self { width, height, current, next })
    }

    pub fn empty(width: usize, height: usize) -> Result<Self, GridError> {
        let len = Self::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            current: alloc(len)?,
            next: alloc(len)?,
        })
    }

    /// Repopulates `current` in place with `fill` and clears `next`. Same
    /// result as building a fresh grid of this size, without reallocating.
    pub fn refill<R: Rng + ?Sized>(&mut self, fill: Fill, rng: &mut R) {
        match fill {
            Fill::Random => self.current.iter_mut().for_each(|c| *c = rng.gen_bool(0.5) as u8),
            Fill::Empty => self.current.fill(DEAD),
        }
        self.next.fill(DEAD);
    }

    fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
        width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(GridError::Dimensions { width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    /// Out-of-bounds reads are dead.
    pub fn get(&self, x: isize, y: isize) -> CellState {
        match self.index(x, y) {
            Some(i) => CellState::from(self.current[i] == ALIVE),
            None => CellState::Dead,
        }
    }

    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: isize, y: isize, state: CellState) {
        if let Some(i) = self.index(x, y) {
            self.current[i] = state.to_byte();
        }
    }

    /// Promotes `next` to `current`. Swaps ownership of the two buffers, no
    /// cells are copied.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn buffers(&mut self) -> Buffers<'_> {
        Buffers {
            current: &self.current,
            next: &mut self.next,
            width: self.width,
            height: self.height,
        }
    }

    pub fn population(&self) -> usize {
        self.current.iter().filter(|&&c| c == ALIVE).count()
    }

    /// Live cells of `current` in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        let width = self.width;
        self.current
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == ALIVE)
            .map(move |(i, _)| (i % width, i / width))
    }
}

fn alloc(len: usize) -> Result<Vec<u8>, GridError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| GridError::Allocation { cells: len, source })?;
    buf.resize(len, DEAD);
    Ok(buf)
}

/// Grids are equal when their visible generations are. The scratch `next`
/// buffer is ignored.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.current == other.current
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.current.chunks(self.width).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for &c in row {
                f.write_str(if c == ALIVE { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("population", &self.population())
            .finish()
    }
}
