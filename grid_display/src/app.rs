// app.rs - eframe application: feeds input to the simulation and draws it

use std::time::Instant;

use conway::{Command, Flow, PATTERNS, Simulation};
use egui::Pos2;
use rand::rngs::ThreadRng;
use tracing::info;

use crate::fps::FpsCounter;
use crate::input::{self, Action};
use crate::render;

pub const TITLE: &str = "Game Of Life";

pub struct LifeApp {
    sim: Simulation,
    last_tick: Instant,
    fps: FpsCounter,
    origin: Pos2,           // Top-left of the drawing area, from the previous frame
    next_pattern: usize,
    rng: ThreadRng,
}

impl LifeApp {
    pub fn new(sim: Simulation) -> Self {
        let now = Instant::now();
        Self {
            sim,
            last_tick: now,
            fps: FpsCounter::new(now),
            origin: Pos2::ZERO,
            next_pattern: 0,
            rng: rand::thread_rng(),
        }
    }

    /// Returns false when the user asked to quit.
    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        for action in input::collect(ctx, self.origin) {
            let command = match action {
                Action::Sim(command) => command,
                Action::NextPattern => {
                    let index = self.next_pattern;
                    self.next_pattern = (index + 1) % PATTERNS.len();
                    Command::LoadPattern(index)
                }
            };

            if self.sim.apply(command) == Flow::Quit {
                return false;
            }
        }
        true
    }

    fn tick(&mut self, ctx: &egui::Context, now: Instant) {
        let interval = self.sim.config().tick_interval();
        let elapsed = now.duration_since(self.last_tick);

        if elapsed >= interval {
            self.sim.tick();
            self.last_tick = now;
        }

        if !self.sim.is_paused() {
            ctx.request_repaint_after(interval.saturating_sub(now.duration_since(self.last_tick)));
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if !self.handle_input(ctx) {
            info!("quit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.tick(ctx, now);

        if self.sim.take_redraw() {
            ctx.request_repaint();
        }

        if let Some(fps) = self.fps.frame(now) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!("{TITLE} {fps} FPS")));
        }

        let panel = egui::Frame::none().fill(render::background());
        egui::CentralPanel::default().frame(panel).show(ctx, |ui| {
            self.origin = ui.max_rect().min;
            let painter = ui.painter();
            let config = self.sim.config();

            render::draw_lines(painter, self.origin, config);
            render::draw_cells(
                painter,
                self.origin,
                config.cell_size,
                self.sim.live_cells(),
                self.sim.palette(),
                &mut self.rng,
            );
        });
    }
}
