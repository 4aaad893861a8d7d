//! Terminal presentation: all crossterm output lives here.
//!
//! Draw commands are rasterised into a square `Canvas` of palette indices,
//! two pixels per character cell (upper-half blocks), and then written to
//! the terminal.  No game rules are evaluated here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use rand::Rng;

use crate::constants::SCREEN_SIZE;
use crate::draw::{Align, DrawCommand, COL_GREY, COL_NAVY};

// ── Colour palette ────────────────────────────────────────────────────────────

const PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x2b, 0x33, 0x5f),
    (0x7e, 0x20, 0x72),
    (0x19, 0x95, 0x9c),
    (0x8b, 0x48, 0x52),
    (0x39, 0x5c, 0x98),
    (0xa9, 0xc1, 0xff),
    (0xee, 0xee, 0xee),
    (0xd4, 0x18, 0x6c),
    (0xd3, 0x84, 0x41),
    (0xe9, 0xc3, 0x5b),
    (0x70, 0xc6, 0xa9),
    (0x76, 0x96, 0xde),
    (0xa3, 0xa3, 0xa3),
    (0xff, 0x97, 0x98),
    (0xed, 0xc7, 0xb0),
];

pub fn palette_color(index: u8) -> Color {
    let (r, g, b) = PALETTE[index as usize % PALETTE.len()];
    Color::Rgb { r, g, b }
}

// ── Backdrop ──────────────────────────────────────────────────────────────────

/// Static star backdrop, painted right after every `Clear`.
#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<(f32, f32, u8)>,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let stars = (0..count)
            .map(|_| {
                let x = rng.gen_range(0.0..SCREEN_SIZE);
                let y = rng.gen_range(0.0..SCREEN_SIZE);
                let color = if rng.gen_bool(0.7) { COL_NAVY } else { COL_GREY };
                (x, y, color)
            })
            .collect();
        Starfield { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct TextCell {
    col: u16,
    row: u16,
    text: String,
    color: u8,
}

/// Square pixel buffer sized to the terminal.
#[derive(Clone, Debug)]
pub struct Canvas {
    side: usize,
    pixels: Vec<u8>,
    texts: Vec<TextCell>,
}

impl Canvas {
    /// `side` is rounded up to an even number so every cell holds two rows.
    pub fn new(side: usize) -> Self {
        let side = (side.max(2) + 1) & !1;
        Canvas {
            side,
            pixels: vec![0; side * side],
            texts: Vec::new(),
        }
    }

    /// Largest square that fits a `cols`×`rows` terminal.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        let side = (cols as usize).min(rows as usize * 2) & !1;
        Canvas::new(side)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.side && y < self.side {
            Some(self.pixels[y * self.side + x])
        } else {
            None
        }
    }

    fn scale(&self) -> f32 {
        self.side as f32 / SCREEN_SIZE
    }

    fn set(&mut self, x: i64, y: i64, color: u8) {
        if x >= 0 && y >= 0 && (x as usize) < self.side && (y as usize) < self.side {
            self.pixels[y as usize * self.side + x as usize] = color;
        }
    }

    /// Rasterise a full frame of commands.
    pub fn draw(&mut self, cmds: &[DrawCommand], backdrop: Option<&Starfield>) {
        for cmd in cmds {
            self.apply(cmd);
            if let (DrawCommand::Clear(_), Some(stars)) = (cmd, backdrop) {
                for &(x, y, color) in &stars.stars {
                    let s = self.scale();
                    self.set((x * s) as i64, (y * s) as i64, color);
                }
            }
        }
    }

    pub fn apply(&mut self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Clear(color) => {
                self.pixels.fill(*color);
                self.texts.clear();
            }
            DrawCommand::Rect { x, y, w, h, color } => self.fill_rect(*x, *y, *w, *h, *color),
            DrawCommand::Circle { x, y, r, color } => self.fill_circle(*x, *y, *r, *color),
            DrawCommand::Text {
                x,
                y,
                text,
                color,
                align,
            } => {
                let s = self.scale();
                // One glyph per terminal column, whatever the canvas scale.
                let left = match align {
                    Align::Left => x * s,
                    Align::Center => x * s - text.chars().count() as f32 / 2.0,
                };
                self.texts.push(TextCell {
                    col: left.round().max(0.0) as u16,
                    row: (y * s / 2.0).max(0.0) as u16,
                    text: text.clone(),
                    color: *color,
                });
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u8) {
        let s = self.scale();
        let x0 = (x * s).floor() as i64;
        let y0 = (y * s).floor() as i64;
        // Never let a visible shape vanish below one pixel.
        let x1 = ((x + w) * s).ceil().max(x0 as f32 + 1.0) as i64;
        let y1 = ((y + h) * s).ceil().max(y0 as f32 + 1.0) as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                self.set(px, py, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: u8) {
        if r <= 0.0 {
            return;
        }
        let s = self.scale();
        let (cx, cy, r) = (cx * s, cy * s, r * s);
        if r < 0.5 {
            self.set(cx as i64, cy as i64, color);
            return;
        }
        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.set(px, py, color);
                }
            }
        }
    }

    /// Write the canvas to the terminal, horizontally centred in `cols`.
    pub fn present<W: Write>(&self, out: &mut W, cols: u16) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        let left = cols.saturating_sub(self.side as u16) / 2;

        for row in 0..self.side / 2 {
            out.queue(cursor::MoveTo(left, row as u16))?;
            for col in 0..self.side {
                let top = self.pixels[(row * 2) * self.side + col];
                let bottom = self.pixels[(row * 2 + 1) * self.side + col];
                out.queue(style::SetForegroundColor(palette_color(top)))?;
                out.queue(style::SetBackgroundColor(palette_color(bottom)))?;
                out.queue(Print('▀'))?;
            }
        }

        for cell in &self.texts {
            out.queue(cursor::MoveTo(left + cell.col, cell.row))?;
            out.queue(style::SetForegroundColor(palette_color(cell.color)))?;
            out.queue(style::SetBackgroundColor(palette_color(0)))?;
            out.queue(Print(&cell.text))?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, (self.side / 2) as u16))?;
        out.flush()?;
        Ok(())
    }
}
