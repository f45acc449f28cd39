// Board geometry and pointer hit-testing
// Maps terminal coordinates to board cells below the header band

use ratatui::layout::Rect;

use crate::xtm_game::{GRID_SIZE, Square};

/// Terminal rows reserved above the board for status text
pub const HEADER_ROWS: u16 = 3;

/// Upper bound on a board cell's height in terminal rows
pub const MAX_CELL_HEIGHT: u16 = 3;

const GRID: u16 = GRID_SIZE as u16;

/// Where the header and the board sit on the current terminal
///
/// Board cells are twice as wide as they are tall so that they look
/// square with typical terminal fonts. The board is centred horizontally
/// and starts right below the header band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    area: Rect,
    left: u16,
    top: u16,
    cell_w: u16,
    cell_h: u16,
}

impl BoardGeometry {
    /// Lay out the largest board that fits in `area`
    /// Returns None if not even one-row cells fit
    pub fn fit(area: Rect) -> Option<Self> {
        let by_height = area.height.saturating_sub(HEADER_ROWS) / GRID;
        let by_width = area.width / (GRID * 2);
        let cell_h = by_height.min(by_width).min(MAX_CELL_HEIGHT);
        if cell_h == 0 {
            return None;
        }
        let cell_w = cell_h * 2;
        Some(BoardGeometry {
            area,
            left: area.x + (area.width - cell_w * GRID) / 2,
            top: area.y + HEADER_ROWS,
            cell_w,
            cell_h,
        })
    }

    /// Smallest terminal (width, height) that `fit` accepts
    pub fn min_terminal_size() -> (u16, u16) {
        (GRID * 2, HEADER_ROWS + GRID)
    }

    /// Map a pointer position to the board cell under it
    /// None for the header band and anything off the board
    pub fn locate(&self, column: u16, row: u16) -> Option<Square> {
        if row < self.top || column < self.left {
            return None;
        }
        let r = ((row - self.top) / self.cell_h) as usize;
        let c = ((column - self.left) / self.cell_w) as usize;
        if r < GRID_SIZE && c < GRID_SIZE {
            Some((r, c))
        } else {
            None
        }
    }

    pub fn cell_rect(&self, (row, col): Square) -> Rect {
        Rect::new(
            self.left + col as u16 * self.cell_w,
            self.top + row as u16 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    pub fn board_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.cell_w * GRID, self.cell_h * GRID)
    }

    /// Full-width band above the board
    pub fn header_rect(&self) -> Rect {
        Rect::new(self.area.x, self.area.y, self.area.width, HEADER_ROWS)
    }
}
