//! The four pads on a character grid, and the [`Boundary`] that keeps them up to date.

use crate::{Boundary, Color, Cue, FlashKind};

/// A rectangle of character cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        (self.x..self.x + self.w).contains(&col) && (self.y..self.y + self.h).contains(&row)
    }
}

/// Rows above the pads, for the title and status.
const HEADER: u16 = 2;
/// Rows below the pads, for the key help.
const FOOTER: u16 = 1;

/// Where each pad goes on the grid, reading order: green and red on top, yellow and blue below.
pub const PAD_ORDER: [Color; 4] = [Color::Green, Color::Red, Color::Yellow, Color::Blue];

/// Lay out the four pads in a 2x2 grid on a screen of the given size, with a one-cell border and gap.
pub fn layout(cols: u16, rows: u16) -> [(Color, Rect); 4] {
    let area_h = rows.saturating_sub(HEADER + FOOTER);
    let w = cols.saturating_sub(3) / 2;
    let h = area_h.saturating_sub(1) / 2;
    let rect = |i: u16| Rect {
        x: 1 + (i % 2) * (w + 1),
        y: HEADER + (i / 2) * (h + 1),
        w,
        h,
    };
    [
        (PAD_ORDER[0], rect(0)),
        (PAD_ORDER[1], rect(1)),
        (PAD_ORDER[2], rect(2)),
        (PAD_ORDER[3], rect(3)),
    ]
}

/// Which pad, if any, is under a given cell.
pub fn pad_at(cols: u16, rows: u16, col: u16, row: u16) -> Option<Color> {
    layout(cols, rows)
        .into_iter()
        .find(|(_, r)| r.contains(col, row))
        .map(|(c, _)| c)
}

fn idx(color: Color) -> usize {
    match color {
        Color::Red => 0,
        Color::Blue => 1,
        Color::Green => 2,
        Color::Yellow => 3,
    }
}

/// Everything the terminal needs to know to draw the game, as told by the engine.
#[derive(Clone, Debug, Default)]
pub struct Board {
    lit: [u8; 4],
    error: bool,
    level: usize,
    cue: Option<Cue>,
    bell: bool,
    tainted: bool,
}

impl Board {
    pub fn new() -> Self {
        Self {
            tainted: true,
            ..Default::default()
        }
    }

    pub fn is_lit(&self, color: Color) -> bool {
        self.lit[idx(color)] > 0
    }

    pub fn error_shown(&self) -> bool {
        self.error
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// The last sound the engine asked for, shown as a note since a terminal can't play tones.
    pub fn last_cue(&self) -> Option<Cue> {
        self.cue
    }

    /// Whether the bell should be rung. Resets after checking.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    /// Whether anything visible changed since the last check. Resets after checking.
    pub fn take_tainted(&mut self) -> bool {
        std::mem::take(&mut self.tainted)
    }
}

impl Boundary for Board {
    fn on_flash(&mut self, color: Color, _kind: FlashKind) {
        self.lit[idx(color)] += 1;
        self.tainted = true;
    }

    fn on_flash_end(&mut self, color: Color) {
        let count = &mut self.lit[idx(color)];
        *count = count.saturating_sub(1);
        self.tainted = true;
    }

    fn on_sound(&mut self, cue: Cue) {
        if cue == Cue::Wrong {
            self.bell = true;
        }
        self.cue = Some(cue);
        self.tainted = true;
    }

    fn on_level_changed(&mut self, level: usize) {
        self.level = level;
        self.tainted = true;
    }

    fn on_game_over(&mut self) {
        self.tainted = true;
    }

    fn on_game_restart(&mut self) {
        self.cue = None;
        self.tainted = true;
    }

    fn on_error(&mut self, shown: bool) {
        self.error = shown;
        self.tainted = true;
    }
}
