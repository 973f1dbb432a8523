/// Terminal rendering backend. All terminal I/O lives here.
///
/// `TerminalSurface` rasterises world-space draw calls into a grid of
/// character cells; `present` then writes the grid out with crossterm.
/// No game logic is performed here.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    QueueableCommand,
};

use crate::surface::{Align, Color, ImageId, Surface, TextStyle};
use crate::vector::Vector2;

const FILL: char = '█';
const DOT: char = '•';
const BLANK: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    ch: BLANK,
    color: Color::BLACK,
};

pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    world: Vector2,
    cells: Vec<Cell>,
    images: HashMap<ImageId, (char, Color)>,
}

impl TerminalSurface {
    /// A `cols` x `rows` grid showing a `world`-sized canvas.
    pub fn new(cols: u16, rows: u16, world: Vector2) -> Self {
        TerminalSurface {
            cols,
            rows,
            world,
            cells: vec![EMPTY; cols as usize * rows as usize],
            images: HashMap::new(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![EMPTY; cols as usize * rows as usize];
    }

    /// Glyph used to fill the box of an image blit.
    pub fn register_image(&mut self, image: ImageId, glyph: char, color: Color) {
        self.images.insert(image, (glyph, color));
    }

    pub fn glyph_at(&self, col: u16, row: u16) -> Option<char> {
        self.index(col as i32, row as i32).map(|i| self.cells[i].ch)
    }

    /// Write the grid to `out`, one colour run at a time.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + self.cols as usize];
            let mut run = String::new();
            let mut run_color = None;
            for cell in line {
                if run_color != Some(cell.color) && !run.is_empty() {
                    write_run(out, &run, run_color)?;
                    run.clear();
                }
                run_color = Some(cell.color);
                run.push(cell.ch);
            }
            write_run(out, &run, run_color)?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    // ── Coordinate mapping ───────────────────────────────────────────────────

    fn scale(&self) -> Vector2 {
        Vector2::new(
            self.cols as f32 / self.world.x.max(1.0),
            self.rows as f32 / self.world.y.max(1.0),
        )
    }

    fn to_cell(&self, p: Vector2) -> (i32, i32) {
        let s = self.scale();
        ((p.x * s.x).floor() as i32, (p.y * s.y).floor() as i32)
    }

    /// World-space centre of a cell.
    fn cell_center(&self, col: i32, row: i32) -> Vector2 {
        let s = self.scale();
        Vector2::new((col as f32 + 0.5) / s.x, (row as f32 + 0.5) / s.y)
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    fn plot(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { ch, color };
        }
    }

    /// Plot every cell whose centre passes `inside`; if none does, mark
    /// the cell under `fallback` so small shapes stay visible.
    fn fill_where(
        &mut self,
        min: Vector2,
        max: Vector2,
        fallback: Vector2,
        ch: char,
        color: Color,
        inside: impl Fn(Vector2) -> bool,
    ) {
        let (c0, r0) = self.to_cell(min);
        let (c1, r1) = self.to_cell(max);
        let mut any = false;
        for row in r0.max(0)..=r1.min(self.rows as i32 - 1) {
            for col in c0.max(0)..=c1.min(self.cols as i32 - 1) {
                if inside(self.cell_center(col, row)) {
                    self.plot(col, row, ch, color);
                    any = true;
                }
            }
        }
        if !any {
            let (col, row) = self.to_cell(fallback);
            self.plot(col, row, DOT, color);
        }
    }
}

fn write_run<W: Write>(out: &mut W, run: &str, color: Option<Color>) -> std::io::Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    if let Some(c) = color {
        out.queue(style::SetForegroundColor(style::Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }))?;
    }
    out.queue(Print(run))?;
    Ok(())
}

fn edge(a: Vector2, b: Vector2, p: Vector2) -> f32 {
    (b - a).perp_dot(p - a)
}

impl Surface for TerminalSurface {
    fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    fn fill_rect(&mut self, position: Vector2, size: Vector2, color: Color) {
        let max = position + size;
        self.fill_where(position, max, position + size / 2.0, FILL, color, |p| {
            p.x >= position.x && p.x <= max.x && p.y >= position.y && p.y <= max.y
        });
    }

    fn fill_triangle(&mut self, a: Vector2, b: Vector2, c: Vector2, color: Color) {
        let min = a.min(b).min(c);
        let max = a.max(b).max(c);
        let centroid = (a + b + c) / 3.0;
        self.fill_where(min, max, centroid, FILL, color, |p| {
            let (d1, d2, d3) = (edge(a, b, p), edge(b, c, p), edge(c, a, p));
            let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            !(has_neg && has_pos)
        });
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        let r = Vector2::splat(radius);
        self.fill_where(center - r, center + r, center, FILL, color, |p| {
            p.distance(center) <= radius
        });
    }

    fn draw_image(&mut self, image: &ImageId, position: Vector2, size: Vector2) {
        let (glyph, color) = self.images.get(image).copied().unwrap_or(('?', Color::WHITE));
        let max = position + size;
        self.fill_where(position, max, position, glyph, color, |p| {
            p.x >= position.x && p.x <= max.x && p.y >= position.y && p.y <= max.y
        });
    }

    fn fill_text(&mut self, text: &str, position: Vector2, style: &TextStyle) {
        let (col, row) = self.to_cell(position);
        let len = text.chars().count() as i32;
        let start = match style.align {
            Align::Left => col,
            Align::Center => col - len / 2,
            Align::Right => col - len,
        };
        for (i, ch) in text.chars().enumerate() {
            self.plot(start + i as i32, row, ch, style.color);
        }
    }
}
