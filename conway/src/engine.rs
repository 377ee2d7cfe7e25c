// engine.rs - Generation step for Conway's Game of Life
//
// Only interior cells (1..width-1, 1..height-1) are evaluated. The outer ring of
// `next` is always written dead, so live cells touching the edge die next tick.

use crate::grid::{ALIVE, Buffers, CellPos, DEAD, Grid};

/// A generation backend. Reads `buffers.current`, overwrites every cell of
/// `buffers.next` and replaces `live` with the cells left alive in `next`, in
/// row-major order. Must never read from `next`.
pub trait Stepper {
    fn advance(&mut self, buffers: Buffers<'_>, live: &mut Vec<CellPos>);
}

/// B3/S23
#[inline(always)]
pub fn next_state(alive: bool, neighbours: u8) -> bool {
    match (alive, neighbours) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Evolves row `y` of `current` into `out`, appending live cells to `live`.
///
/// `y` must be an interior row and `out` exactly one row long.
#[inline]
fn evolve_row(current: &[u8], width: usize, y: usize, out: &mut [u8], live: &mut Vec<CellPos>) {
    let above = &current[(y - 1) * width..y * width];
    let row = &current[y * width..(y + 1) * width];
    let below = &current[(y + 1) * width..(y + 2) * width];

    out[0] = DEAD;
    out[width - 1] = DEAD;

    let windows = above.windows(3).zip(row.windows(3)).zip(below.windows(3));
    for (i, ((a, r), b)) in windows.enumerate() {
        let neighbours = a[0] + a[1] + a[2] + r[0] + r[2] + b[0] + b[1] + b[2];
        let alive = next_state(r[1] == ALIVE, neighbours);

        out[i + 1] = alive as u8;
        if alive {
            live.push((i + 1, y));
        }
    }
}

/// Clears the first and last row of `next`. Returns false when the grid has no
/// interior, in which case all of `next` has been cleared.
fn prepare(buffers: &mut Buffers<'_>, live: &mut Vec<CellPos>) -> bool {
    let (width, height) = (buffers.width, buffers.height);
    let next = &mut *buffers.next;

    live.clear();
    if width < 3 || height < 3 {
        next.fill(DEAD);
        return false;
    }

    next[..width].fill(DEAD);
    next[(height - 1) * width..].fill(DEAD);
    true
}

/// Single pass over the whole grid with flat slices.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarStepper;

impl Stepper for ScalarStepper {
    fn advance(&mut self, mut buffers: Buffers<'_>, live: &mut Vec<CellPos>) {
        if !prepare(&mut buffers, live) {
            return;
        }

        let Buffers { current, next, width, height } = buffers;
        let interior = next[width..(height - 1) * width].chunks_exact_mut(width);
        for (y, out) in (1..height - 1).zip(interior) {
            evolve_row(current, width, y, out, live);
        }
    }
}

/// Runs the scalar backend over `grid` without swapping.
pub fn advance(grid: &mut Grid, live: &mut Vec<CellPos>) {
    ScalarStepper.advance(grid.buffers(), live);
}

#[cfg(feature = "row-tasks")]
pub use row_tasks::RowTaskStepper;

#[cfg(feature = "row-tasks")]
mod row_tasks {
    use futures::future::join_all;
    use tokio::runtime::{Builder, Runtime};

    use super::{Stepper, evolve_row, prepare};
    use crate::grid::{Buffers, CellPos};

    /// Evolves each interior row as its own future on a current-thread runtime.
    ///
    /// Every row future borrows `current` and its own row of `next`, so rows
    /// are written in place and no future can see another's output.
    pub struct RowTaskStepper {
        runtime: Runtime,
    }

    impl RowTaskStepper {
        pub fn new() -> std::io::Result<Self> {
            let runtime = Builder::new_current_thread().build()?;
            Ok(Self { runtime })
        }
    }

    async fn process_row(current: &[u8], width: usize, y: usize, out: &mut [u8]) -> Vec<CellPos> {
        tokio::task::yield_now().await;  // Cooperative yielding

        let mut live = Vec::new();
        evolve_row(current, width, y, out, &mut live);
        live
    }

    impl Stepper for RowTaskStepper {
        fn advance(&mut self, mut buffers: Buffers<'_>, live: &mut Vec<CellPos>) {
            if !prepare(&mut buffers, live) {
                return;
            }

            let Buffers { current, next, width, height } = buffers;
            let rows = next[width..(height - 1) * width]
                .chunks_exact_mut(width)
                .zip(1..height - 1)
                .map(move |(out, y)| process_row(current, width, y, out));

            // join_all keeps input order, so `live` stays row-major.
            let found = self.runtime.block_on(join_all(rows));
            live.extend(found.into_iter().flatten());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;
    use proptest::prelude::*;

    fn grid_from(rows: &[&str]) -> Grid {
        let mut grid = Grid::empty(rows[0].len(), rows.len()).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    grid.set(x as isize, y as isize, CellState::Alive);
                }
            }
        }
        grid
    }

    fn step(grid: &mut Grid) -> Vec<CellPos> {
        let mut live = Vec::new();
        advance(grid, &mut live);
        grid.swap();
        live
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let horizontal = grid_from(&[".....", ".....", ".###.", ".....", "....."]);
        let vertical = grid_from(&[".....", "..#..", "..#..", "..#..", "....."]);

        let mut grid = horizontal.clone();
        let live = step(&mut grid);
        assert_eq!(grid.to_string(), vertical.to_string());
        assert_eq!(live, vec![(2, 1), (2, 2), (2, 3)]);

        let live = step(&mut grid);
        assert_eq!(grid.to_string(), horizontal.to_string());
        assert_eq!(live, vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn empty_grid_is_a_fixed_point() {
        let mut grid = Grid::empty(10, 7).unwrap();
        for _ in 0..5 {
            assert!(step(&mut grid).is_empty());
            assert_eq!(grid.population(), 0);
        }
    }

    #[test]
    fn isolated_cells_die() {
        let mut grid = grid_from(&["......", ".#....", "......", "...##.", "......"]);
        let live = step(&mut grid);
        assert!(live.is_empty());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn dead_cell_with_three_neighbours_is_born() {
        let mut grid = grid_from(&[".....", ".#.#.", ".....", "..#..", "....."]);
        step(&mut grid);
        assert_eq!(grid.get(2, 2), CellState::Alive);
    }

    #[test]
    fn border_cells_are_never_evaluated() {
        // A full grid: every interior cell is overcrowded, every border cell
        // must still come out dead.
        let mut grid = grid_from(&["####", "####", "####", "####"]);
        let live = step(&mut grid);
        assert!(live.is_empty());
        assert_eq!(grid.to_string(), "....\n....\n....\n....");
    }

    #[test]
    fn block_in_the_border_is_not_stable() {
        // A block is a still life, but touching the edge kills its border half.
        let mut grid = grid_from(&["##...", "##...", ".....", ".....", "....."]);
        step(&mut grid);
        assert_eq!(grid.get(0, 0), CellState::Dead);
        assert_eq!(grid.get(1, 0), CellState::Dead);
        assert_eq!(grid.get(0, 1), CellState::Dead);
    }

    #[test]
    fn recycled_buffer_border_is_cleared() {
        // After a swap, `next` holds the previous generation, including any
        // live border cells. They must not leak through.
        let mut grid = grid_from(&["#####", "#...#", "#...#", "#...#", "#####"]);
        step(&mut grid);
        step(&mut grid);
        for x in 0..5 {
            assert_eq!(grid.get(x, 0), CellState::Dead);
            assert_eq!(grid.get(x, 4), CellState::Dead);
            assert_eq!(grid.get(0, x), CellState::Dead);
            assert_eq!(grid.get(4, x), CellState::Dead);
        }
    }

    #[test]
    fn grid_without_interior_comes_out_empty() {
        let mut grid = grid_from(&["##", "##"]);
        let live = step(&mut grid);
        assert!(live.is_empty());
        assert_eq!(grid.population(), 0);

        let mut strip = grid_from(&["#####"]);
        assert!(step(&mut strip).is_empty());
    }

    fn arbitrary_grid() -> impl Strategy<Value = Grid> {
        (1usize..24, 1usize..24).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<bool>(), w * h).prop_map(move |cells| {
                let mut grid = Grid::empty(w, h).unwrap();
                for (i, alive) in cells.into_iter().enumerate() {
                    let (x, y) = ((i % w) as isize, (i / w) as isize);
                    grid.set(x, y, CellState::from(alive));
                }
                grid
            })
        })
    }

    proptest! {
        #[test]
        fn border_is_dead_after_advance(grid in arbitrary_grid()) {
            let mut grid = grid;
            step(&mut grid);
            let (w, h) = (grid.width() as isize, grid.height() as isize);
            for x in 0..w {
                prop_assert_eq!(grid.get(x, 0), CellState::Dead);
                prop_assert_eq!(grid.get(x, h - 1), CellState::Dead);
            }
            for y in 0..h {
                prop_assert_eq!(grid.get(0, y), CellState::Dead);
                prop_assert_eq!(grid.get(w - 1, y), CellState::Dead);
            }
        }

        #[test]
        fn live_list_matches_swapped_grid(grid in arbitrary_grid()) {
            let mut grid = grid;
            let live = step(&mut grid);
            let scanned: Vec<_> = grid.live_cells().collect();
            prop_assert_eq!(live, scanned);
        }
    }

    #[cfg(feature = "row-tasks")]
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn row_tasks_match_scalar(grid in arbitrary_grid()) {
            let mut scalar = grid.clone();
            let mut scalar_live = Vec::new();
            ScalarStepper.advance(scalar.buffers(), &mut scalar_live);
            scalar.swap();

            let mut rows = grid;
            let mut rows_live = Vec::new();
            let mut stepper = RowTaskStepper::new().unwrap();
            stepper.advance(rows.buffers(), &mut rows_live);
            rows.swap();

            prop_assert_eq!(scalar_live, rows_live);
            prop_assert_eq!(scalar.to_string(), rows.to_string());
        }
    }

    #[cfg(feature = "row-tasks")]
    #[test]
    fn row_tasks_write_rows_in_place_and_in_order() {
        let mut scalar = grid_from(&[
            "##########",
            "#..#......",
            "...#..##..",
            "...#..##..",
            "......#..#",
            ".#.#......",
            "..##....##",
            "##########",
        ]);
        let mut rows = scalar.clone();
        let mut stepper = RowTaskStepper::new().unwrap();

        for _ in 0..6 {
            let scalar_live = step(&mut scalar);

            let mut rows_live = vec![(99, 99)];
            stepper.advance(rows.buffers(), &mut rows_live);
            rows.swap();

            assert_eq!(rows_live, scalar_live);
            assert_eq!(rows.to_string(), scalar.to_string());
            assert_eq!(rows_live, rows.live_cells().collect::<Vec<_>>());
        }
    }
}
