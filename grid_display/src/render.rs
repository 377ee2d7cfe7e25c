// render.rs - Draws grid lines and live cells with egui's painter

use conway::config::{BACKGROUND, GRID_LINES};
use conway::{CellPos, Config, Palette, Rgb};
use egui::{Color32, Painter, Pos2, Rect, Stroke, pos2, vec2};
use rand::Rng;

pub fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

pub fn background() -> Color32 {
    color(BACKGROUND)
}

/// Lines stop one cell short of each window edge.
pub fn draw_lines(painter: &Painter, origin: Pos2, config: &Config) {
    let stroke = Stroke::new(1.0, color(GRID_LINES));
    let cell = config.cell_size as f32;
    let (w, h) = (config.window_width as f32, config.window_height as f32);

    for x in (0..config.window_width).step_by(config.cell_size as usize) {
        let x = origin.x + x as f32;
        painter.line_segment([pos2(x, origin.y + cell), pos2(x, origin.y + h - cell)], stroke);
    }
    for y in (0..config.window_height).step_by(config.cell_size as usize) {
        let y = origin.y + y as f32;
        painter.line_segment([pos2(origin.x + cell, y), pos2(origin.x + w - cell, y)], stroke);
    }
}

/// Screen rectangle of a cell, inset one pixel so grid lines stay visible.
pub fn cell_rect(origin: Pos2, cell_size: u32, (x, y): CellPos) -> Rect {
    let size = cell_size as f32;
    Rect::from_min_size(
        pos2(origin.x + x as f32 * size + 1.0, origin.y + y as f32 * size + 1.0),
        vec2(size - 1.0, size - 1.0),
    )
}

/// Each cell gets a shade picked fresh on every call.
pub fn draw_cells<R: Rng + ?Sized>(
    painter: &Painter,
    origin: Pos2,
    cell_size: u32,
    cells: &[CellPos],
    palette: Palette,
    rng: &mut R,
) {
    for &cell in cells {
        let rect = cell_rect(origin, cell_size, cell);
        painter.rect_filled(rect, 0.0, color(palette.pick(rng)));
    }
}
