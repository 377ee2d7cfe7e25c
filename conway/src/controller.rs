// controller.rs - Simulation state and the commands that drive it

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::{Backend, Config};
use crate::engine::{ScalarStepper, Stepper};
use crate::error::Error;
use crate::grid::{CellPos, CellState, Fill, Grid};
use crate::palette::Palette;
use crate::patterns::{PATTERNS, Pattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// One discrete user action, as decoded by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Step,
    Reset,
    Clear,
    SelectPalette(Palette),
    /// Index into [`PATTERNS`]
    LoadPattern(usize),
    /// Primary pointer held at screen pixel `(x, y)`
    Revive { x: i32, y: i32 },
    /// Secondary pointer held at screen pixel `(x, y)`
    Kill { x: i32, y: i32 },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Simulation {
    config: Config,
    grid: Grid,
    stepper: Box<dyn Stepper>,
    state: RunState,
    palette: Palette,
    pending: Vec<CellPos>,  // Cells the renderer draws this frame
    generation: u64,
    redraw: bool,
    rng: StdRng,
}

impl Simulation {
    /// Builds the stepper named by `config.backend` and starts from a random
    /// grid already advanced to generation 1.
    pub fn new(config: Config) -> Result<Self, Error> {
        let stepper: Box<dyn Stepper> = match config.backend {
            Backend::Scalar => Box::new(ScalarStepper),
            #[cfg(feature = "row-tasks")]
            Backend::RowTasks => {
                Box::new(crate::engine::RowTaskStepper::new().map_err(Error::Runtime)?)
            }
        };
        Self::with_stepper(config, stepper)
    }

    pub fn with_stepper(config: Config, stepper: Box<dyn Stepper>) -> Result<Self, Error> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = Grid::new(config.grid_width(), config.grid_height(), Fill::Random, &mut rng)?;

        info!(
            width = grid.width(),
            height = grid.height(),
            backend = ?config.backend,
            seed = ?config.seed,
            "simulation created"
        );

        let mut sim = Self {
            palette: config.palette,
            config,
            grid,
            stepper,
            state: RunState::Running,
            pending: Vec::new(),
            generation: 0,
            redraw: true,
            rng,
        };
        sim.step_once();
        Ok(sim)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cells to draw: the last generation's live cells plus edits since.
    pub fn live_cells(&self) -> &[CellPos] {
        &self.pending
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether anything changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::TogglePause => self.toggle_pause(),
            Command::Step => self.step_once(),
            Command::Reset => self.reset_random(),
            Command::Clear => self.clear(),
            Command::SelectPalette(palette) => self.set_palette(palette),
            Command::LoadPattern(index) => {
                if let Some(pattern) = PATTERNS.get(index) {
                    self.load_pattern(pattern);
                }
            }
            Command::Revive { x, y } => self.toggle_cell_alive(x, y),
            Command::Kill { x, y } => self.toggle_cell_dead(x, y),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        debug!(state = ?self.state, "pause toggled");
    }

    /// Advances when running. Returns whether a generation was computed.
    pub fn tick(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }
        self.step_once();
        true
    }

    /// Advances one generation regardless of the run state.
    pub fn step_once(&mut self) {
        self.stepper.advance(self.grid.buffers(), &mut self.pending);
        self.grid.swap();
        self.generation += 1;
        self.redraw = true;

        trace!(generation = self.generation, population = self.pending.len(), "step");
    }

    pub fn reset_random(&mut self) {
        self.replace_grid(Fill::Random);
        info!("grid reset to random");
        self.step_once();
    }

    pub fn clear(&mut self) {
        self.replace_grid(Fill::Empty);
        info!("grid cleared");
        self.step_once();
    }

    fn replace_grid(&mut self, fill: Fill) {
        self.grid.refill(fill, &mut self.rng);
        self.generation = 0;
    }

    /// Clears the grid and stamps `pattern` in its centre. The pattern is
    /// shown as authored, without advancing.
    pub fn load_pattern(&mut self, pattern: &Pattern) {
        self.replace_grid(Fill::Empty);

        let (x, y) = pattern.centred_origin(&self.grid);
        pattern.stamp(&mut self.grid, x, y);

        self.pending.clear();
        self.pending.extend(self.grid.live_cells());
        self.redraw = true;

        info!(pattern = pattern.name, "pattern loaded");
    }

    fn cell_at(&self, screen_x: i32, screen_y: i32) -> (isize, isize) {
        let size = self.config.cell_size as i32;
        (screen_x.div_euclid(size) as isize, screen_y.div_euclid(size) as isize)
    }

    fn in_bounds(&self, x: isize, y: isize) -> Option<CellPos> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.grid.width())?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.grid.height())?;
        Some((x, y))
    }

    /// Revives the cell under a screen pixel. Idempotent.
    pub fn toggle_cell_alive(&mut self, screen_x: i32, screen_y: i32) {
        let (x, y) = self.cell_at(screen_x, screen_y);
        let Some(pos) = self.in_bounds(x, y) else {
            return;
        };

        if !self.pending.contains(&pos) {
            self.pending.push(pos);
            self.grid.set(x, y, CellState::Alive);
            self.redraw = true;
        }
    }

    /// Kills the cell under a screen pixel. Cells not on screen are ignored.
    pub fn toggle_cell_dead(&mut self, screen_x: i32, screen_y: i32) {
        let (x, y) = self.cell_at(screen_x, screen_y);
        let Some(pos) = self.in_bounds(x, y) else {
            return;
        };

        if let Some(i) = self.pending.iter().position(|&p| p == pos) {
            self.pending.remove(i);
            self.redraw = true;
        }
        self.grid.set(x, y, CellState::Dead);
    }

    pub fn set_palette(&mut self, palette: Palette) {
        if self.palette != palette {
            debug!(from = %self.palette, to = %palette, "palette changed");
        }
        self.palette = palette;
        self.redraw = true;
    }
}
