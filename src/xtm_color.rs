use ratatui::style::Color;
use term_color_support::ColorSupport;

use crate::xtm_game::Square;

/// An sRGB triple
pub type Rgb = (u8, u8, u8);

// Board palette
pub const LIGHT: Rgb = (240, 217, 181);
pub const DARK: Rgb = (181, 136, 99);
pub const MOLE_COLOR: Rgb = (250, 80, 80);
pub const BG_COLOR: Rgb = (205, 205, 205);
pub const TEXT_COLOR: Rgb = (15, 15, 15);
pub const HOVER_COLOR: Rgb = (255, 255, 0);
pub const HOVER_ALPHA: u8 = 60;

/// How much darker a revealed miss is than its base colour, per channel
pub const SHADE_STEP: u8 = 50;

/// Colour capability of the terminal we draw on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Ansi256,
    Basic,
}

impl ColorDepth {
    /// Probe stdout for 24-bit, then 256-colour support
    pub fn detect() -> Self {
        let support = ColorSupport::stdout();
        if support.has_16m {
            ColorDepth::TrueColor
        } else if support.has_256 {
            ColorDepth::Ansi256
        } else {
            ColorDepth::Basic
        }
    }
}

/// Convert a palette colour into something the terminal can show.
pub trait DepthMatch {
    fn depth_match(self, depth: ColorDepth) -> Color;
}

impl DepthMatch for Rgb {
    fn depth_match(self, depth: ColorDepth) -> Color {
        match depth {
            ColorDepth::TrueColor => Color::Rgb(self.0, self.1, self.2),
            ColorDepth::Ansi256 => Color::Indexed(ansi256_index(self)),
            ColorDepth::Basic => nearest_basic(self),
        }
    }
}

/// Nominal xterm values for the 16 basic ANSI colours
const BASIC: [(Color, Rgb); 16] = [
    (Color::Black, (0, 0, 0)),
    (Color::Red, (205, 0, 0)),
    (Color::Green, (0, 205, 0)),
    (Color::Yellow, (205, 205, 0)),
    (Color::Blue, (0, 0, 238)),
    (Color::Magenta, (205, 0, 205)),
    (Color::Cyan, (0, 205, 205)),
    (Color::Gray, (229, 229, 229)),
    (Color::DarkGray, (127, 127, 127)),
    (Color::LightRed, (255, 0, 0)),
    (Color::LightGreen, (0, 255, 0)),
    (Color::LightYellow, (255, 255, 0)),
    (Color::LightBlue, (92, 92, 255)),
    (Color::LightMagenta, (255, 0, 255)),
    (Color::LightCyan, (0, 255, 255)),
    (Color::White, (255, 255, 255)),
];

fn distance(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| (x as i32 - y as i32).pow(2) as u32;
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

fn nearest_basic(rgb: Rgb) -> Color {
    BASIC
        .iter()
        .min_by_key(|(_, v)| distance(rgb, *v))
        .map(|(c, _)| *c)
        .unwrap_or(Color::Reset)
}

/// Channel value -> level 0..=5 of the xterm 6x6x6 cube
fn cube_level(v: u8) -> u8 {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        (v - 35) / 40
    }
}

fn cube_value(level: u8) -> u8 {
    if level == 0 { 0 } else { 55 + level * 40 }
}

/// Pick the closer of the colour-cube entry and the grey-ramp entry
fn ansi256_index(rgb: Rgb) -> u8 {
    let (r, g, b) = (cube_level(rgb.0), cube_level(rgb.1), cube_level(rgb.2));
    let cube_idx = 16 + 36 * r + 6 * g + b;
    let cube_rgb = (cube_value(r), cube_value(g), cube_value(b));

    let avg = ((rgb.0 as u16 + rgb.1 as u16 + rgb.2 as u16) / 3) as u8;
    let step = if avg < 8 { 0 } else { ((avg - 8) / 10).min(23) };
    let grey = 8 + step * 10;

    if distance(rgb, (grey, grey, grey)) < distance(rgb, cube_rgb) {
        232 + step
    } else {
        cube_idx
    }
}

/// Darken each channel by SHADE_STEP, stopping at zero
pub fn shade(rgb: Rgb) -> Rgb {
    (
        rgb.0.saturating_sub(SHADE_STEP),
        rgb.1.saturating_sub(SHADE_STEP),
        rgb.2.saturating_sub(SHADE_STEP),
    )
}

/// Alpha-composite `over` onto `base`, alpha in 0..=255
pub fn blend(base: Rgb, over: Rgb, alpha: u8) -> Rgb {
    let mix = |b: u8, o: u8| {
        let a = alpha as u16;
        ((o as u16 * a + b as u16 * (255 - a) + 127) / 255) as u8
    };
    (mix(base.0, over.0), mix(base.1, over.1), mix(base.2, over.2))
}

/// Board and header colours resolved for one terminal
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    depth: ColorDepth,
}

impl Theme {
    pub fn new(depth: ColorDepth) -> Self {
        Theme { depth }
    }

    pub fn color(&self, rgb: Rgb) -> Color {
        rgb.depth_match(self.depth)
    }

    /// Checkerboard base colour; the top-left cell is light
    pub fn base(&self, (row, col): Square) -> Rgb {
        if (row + col) % 2 == 0 { LIGHT } else { DARK }
    }

    /// Hover tint over `base`. Basic terminals cannot show the translucent
    /// mix apart from the base, so they get the plain highlight colour.
    pub fn hover(&self, base: Rgb) -> Rgb {
        match self.depth {
            ColorDepth::Basic => HOVER_COLOR,
            ColorDepth::TrueColor | ColorDepth::Ansi256 => blend(base, HOVER_COLOR, HOVER_ALPHA),
        }
    }
}
