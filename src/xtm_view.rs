// Frame rendering
// Header and board widgets drawn from the current game, geometry and pointer

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::xtm_color::{BG_COLOR, MOLE_COLOR, TEXT_COLOR, Theme, shade};
use crate::xtm_game::{GRID_SIZE, Game, Status};
use crate::xtm_input::BoardGeometry;
use crate::xtm_lang::Lang;

/// Glyphs drawn on top of cell colours, so results stay readable on
/// terminals with few colours
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub mole: &'static str,
    pub miss: &'static str,
}

impl Glyphs {
    pub fn new(ascii: bool) -> Self {
        if ascii {
            Glyphs { mole: "M", miss: "x" }
        } else {
            Glyphs { mole: "●", miss: "·" }
        }
    }
}

/// Status line text for the current game
pub fn header_message(game: &Game, lang: &Lang) -> String {
    match game.status() {
        Status::Playing => lang.attempts_left(game.attempts()),
        Status::Won => lang.assets.status_won.to_string(),
        Status::Lost => lang.lost(game.mole()),
    }
}

/// Write `text` centred on row `y` of `area`, clipped to its width
fn put_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    if area.width == 0 || y < area.y || y >= area.bottom() {
        return;
    }
    let w = text.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    buf.set_stringn(x, y, text, (area.right() - x) as usize, style);
}

/// Status band above the board
pub struct HeaderView<'a> {
    game: &'a Game,
    lang: &'a Lang,
    theme: &'a Theme,
}

impl<'a> HeaderView<'a> {
    pub fn new(game: &'a Game, lang: &'a Lang, theme: &'a Theme) -> Self {
        HeaderView { game, lang, theme }
    }
}

impl Widget for HeaderView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(*buf.area());
        let bg = self.theme.color(BG_COLOR);
        buf.set_style(area, Style::default().bg(bg));
        let style = Style::default()
            .fg(self.theme.color(TEXT_COLOR))
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        let msg = header_message(self.game, self.lang);
        put_centered(buf, area, area.y + area.height / 2, &msg, style);
    }
}

/// The 8x8 board
///
/// Layers, bottom to top: checkerboard base, darkened revealed misses,
/// the mole once the game is decided, the hover tint while playing.
pub struct BoardView<'a> {
    game: &'a Game,
    geometry: &'a BoardGeometry,
    pointer: Option<(u16, u16)>,
    theme: &'a Theme,
    glyphs: Glyphs,
}

impl<'a> BoardView<'a> {
    pub fn new(
        game: &'a Game,
        geometry: &'a BoardGeometry,
        pointer: Option<(u16, u16)>,
        theme: &'a Theme,
        glyphs: Glyphs,
    ) -> Self {
        BoardView { game, geometry, pointer, theme, glyphs }
    }
}

impl Widget for BoardView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let game = self.game;
        let hover = match game.status() {
            Status::Playing => self.pointer.and_then(|(x, y)| self.geometry.locate(x, y)),
            Status::Won | Status::Lost => None,
        };
        let text_fg = self.theme.color(TEXT_COLOR);

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let sq = (row, col);
                let base = self.theme.base(sq);
                let (mut fill, glyph) = if game.status().is_over() && sq == game.mole() {
                    (MOLE_COLOR, Some(self.glyphs.mole))
                } else if game.is_revealed(sq) {
                    (shade(base), Some(self.glyphs.miss))
                } else {
                    (base, None)
                };
                if hover == Some(sq) {
                    fill = self.theme.hover(fill);
                }

                let rect = self.geometry.cell_rect(sq).intersection(*buf.area());
                if rect.width == 0 || rect.height == 0 {
                    continue;
                }
                let style = Style::default().bg(self.theme.color(fill));
                let blank = " ".repeat(rect.width as usize);
                for y in rect.top()..rect.bottom() {
                    buf.set_string(rect.x, y, &blank, style);
                }
                if let Some(g) = glyph {
                    put_centered(buf, rect, rect.y + rect.height / 2, g, style.fg(text_fg));
                }
            }
        }
    }
}

/// Shown instead of the game while the terminal cannot fit the board
pub struct TooSmallView<'a> {
    lang: &'a Lang,
}

impl<'a> TooSmallView<'a> {
    pub fn new(lang: &'a Lang) -> Self {
        TooSmallView { lang }
    }
}

impl Widget for TooSmallView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(*buf.area());
        if area.height == 0 {
            return;
        }
        let mid = area.y + area.height / 2;
        let need = self.lang.min_size(BoardGeometry::min_terminal_size());
        let bold = Style::default().add_modifier(Modifier::BOLD);
        put_centered(buf, area, mid.saturating_sub(1), self.lang.assets.tsmsg_line1, bold);
        put_centered(buf, area, mid, &need, Style::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xtm_color::{ColorDepth, DARK, HOVER_ALPHA, HOVER_COLOR, LIGHT, blend};
    use crate::xtm_game::Square;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::style::Color;

    const AREA: Rect = Rect { x: 0, y: 0, width: 80, height: 24 };

    fn setup(seed: u64) -> (Game, BoardGeometry, Theme) {
        let game = Game::with_rng(&mut StdRng::seed_from_u64(seed));
        let geometry = BoardGeometry::fit(AREA).unwrap();
        (game, geometry, Theme::new(ColorDepth::TrueColor))
    }

    fn rgb(c: (u8, u8, u8)) -> Color {
        Color::Rgb(c.0, c.1, c.2)
    }

    fn draw_board(
        game: &Game,
        geometry: &BoardGeometry,
        pointer: Option<(u16, u16)>,
        theme: &Theme,
    ) -> Buffer {
        let mut buf = Buffer::empty(AREA);
        BoardView::new(game, geometry, pointer, theme, Glyphs::new(false))
            .render(geometry.board_rect(), &mut buf);
        buf
    }

    fn bg_at(buf: &Buffer, geometry: &BoardGeometry, sq: Square) -> Color {
        let r = geometry.cell_rect(sq);
        buf.get(r.x, r.y).bg
    }

    fn center(geometry: &BoardGeometry, sq: Square) -> (u16, u16) {
        let r = geometry.cell_rect(sq);
        (r.x + (r.width - 1) / 2, r.y + r.height / 2)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area().width).map(|x| buf.get(x, y).symbol.as_str()).collect()
    }

    /// Some cell other than the mole
    fn miss(game: &Game) -> Square {
        if game.mole() == (0, 0) { (0, 1) } else { (0, 0) }
    }

    #[test]
    fn fresh_board_is_a_checkerboard_hiding_the_mole() {
        let (game, geometry, theme) = setup(5);
        let buf = draw_board(&game, &geometry, None, &theme);
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let want = if (row + col) % 2 == 0 { LIGHT } else { DARK };
                assert_eq!(bg_at(&buf, &geometry, (row, col)), rgb(want));
            }
        }
    }

    #[test]
    fn revealed_miss_is_darkened_and_marked() {
        let (mut game, geometry, theme) = setup(6);
        let sq = miss(&game);
        game.reveal(sq);
        let buf = draw_board(&game, &geometry, None, &theme);
        assert_eq!(bg_at(&buf, &geometry, sq), rgb(shade(theme.base(sq))));
        let (x, y) = center(&geometry, sq);
        assert_eq!(buf.get(x, y).symbol, "·");
    }

    #[test]
    fn mole_is_shown_once_the_game_is_lost() {
        let (mut game, geometry, theme) = setup(8);
        let mole = game.mole();
        let wrong: Vec<Square> = (0..GRID_SIZE)
            .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
            .filter(|sq| *sq != mole)
            .take(5)
            .collect();
        for sq in &wrong[..4] {
            game.reveal(*sq);
        }
        let buf = draw_board(&game, &geometry, None, &theme);
        assert_eq!(bg_at(&buf, &geometry, mole), rgb(theme.base(mole)));

        game.reveal(wrong[4]);
        assert_eq!(game.status(), Status::Lost);
        let buf = draw_board(&game, &geometry, None, &theme);
        assert_eq!(bg_at(&buf, &geometry, mole), rgb(MOLE_COLOR));
        let (x, y) = center(&geometry, mole);
        assert_eq!(buf.get(x, y).symbol, "●");
    }

    #[test]
    fn hover_tints_only_while_playing() {
        let (mut game, geometry, theme) = setup(10);
        let sq = miss(&game);
        let (x, y) = center(&geometry, sq);
        let buf = draw_board(&game, &geometry, Some((x, y)), &theme);
        assert_eq!(bg_at(&buf, &geometry, sq), rgb(blend(theme.base(sq), HOVER_COLOR, HOVER_ALPHA)));

        // pointer over the header highlights nothing
        let buf = draw_board(&game, &geometry, Some((x, 0)), &theme);
        assert_eq!(bg_at(&buf, &geometry, sq), rgb(theme.base(sq)));

        game.reveal(game.mole());
        let buf = draw_board(&game, &geometry, Some((x, y)), &theme);
        assert_eq!(bg_at(&buf, &geometry, sq), rgb(theme.base(sq)));
    }

    #[test]
    fn header_shows_attempts_then_result() {
        let (mut game, geometry, theme) = setup(12);
        let lang = Lang::new("en");
        let header = geometry.header_rect();

        let mut buf = Buffer::empty(AREA);
        HeaderView::new(&game, &lang, &theme).render(header, &mut buf);
        let line = row_text(&buf, 1);
        let msg = "Attempts left: 5";
        assert_eq!(line.find(msg), Some((80 - msg.len()) / 2));
        assert_eq!(buf.get(0, 0).bg, rgb(BG_COLOR));

        game.reveal(game.mole());
        let mut buf = Buffer::empty(AREA);
        HeaderView::new(&game, &lang, &theme).render(header, &mut buf);
        assert!(row_text(&buf, 1).contains("You found the mole! Press R to play again."));
    }

    #[test]
    fn loss_message_names_the_mole_one_indexed() {
        let (mut game, _, _) = setup(13);
        let lang = Lang::new("en");
        let mole = game.mole();
        let wrong: Vec<Square> = (0..GRID_SIZE)
            .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
            .filter(|sq| *sq != mole)
            .take(5)
            .collect();
        for sq in wrong {
            game.reveal(sq);
        }
        assert_eq!(
            header_message(&game, &lang),
            format!("You lost! Mole was at ({},{}). Press R to retry.", mole.0 + 1, mole.1 + 1)
        );
    }

    #[test]
    fn too_small_view_names_minimum_size() {
        let lang = Lang::new("en");
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        TooSmallView::new(&lang).render(area, &mut buf);
        assert!(row_text(&buf, 2).contains("Terminal too small"));
        assert!(row_text(&buf, 3).contains("Minimum size required: 16 x 11"));
    }
}
