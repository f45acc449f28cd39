use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::{Frame, Terminal};
use std::io;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::xtm_color::Theme;
use crate::xtm_config::Config;
use crate::xtm_error::AppError;
use crate::xtm_game::{Game, RevealOutcome};
use crate::xtm_input::BoardGeometry;
use crate::xtm_lang::Lang;
use crate::xtm_view::{BoardView, Glyphs, HeaderView, TooSmallView};

/// Target frames per second
pub const FRAME_RATE: u32 = 60;

/// What the loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the loop owns between frames
#[derive(Debug)]
pub struct Session {
    pub game: Game,
    pub pointer: Option<(u16, u16)>, // last known mouse position (column, row)
    pub geometry: Option<BoardGeometry>, // layout of the last drawn frame
}

impl Session {
    pub fn new() -> Self {
        Session::with_game(Game::new())
    }

    pub fn with_game(game: Game) -> Self {
        Session {
            game,
            pointer: None,
            geometry: None,
        }
    }

    /// Throw the current game away and start a fresh one
    pub fn restart(&mut self) {
        self.game = Game::new();
        info!(mole = ?self.game.mole(), "new game");
    }

    /// Apply one input event
    /// - Esc, q or Ctrl+C quits; r restarts
    /// - Mouse motion tracks the pointer for hover
    /// - A left press on the board reveals the cell under it
    pub fn handle_event(&mut self, ev: &Event) -> Flow {
        match ev {
            // only presses; some terminals report releases too
            Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => match code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Flow::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Flow::Quit,
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.restart();
                    Flow::Continue
                }
                _ => Flow::Continue,
            },
            Event::Mouse(me) => {
                match me.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        self.pointer = Some((me.column, me.row));
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pointer = Some((me.column, me.row));
                        self.click(me.column, me.row);
                    }
                    _ => {}
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let Some(sq) = self.geometry.and_then(|g| g.locate(column, row)) else {
            return;
        };
        let outcome = self.game.reveal(sq);
        debug!(
            row = sq.0,
            col = sq.1,
            ?outcome,
            attempts = self.game.attempts(),
            revealed = self.game.revealed_count(),
            "reveal"
        );
        match outcome {
            RevealOutcome::Found => info!(mole = ?self.game.mole(), "mole found"),
            RevealOutcome::Exhausted => info!(mole = ?self.game.mole(), "out of attempts"),
            RevealOutcome::Miss | RevealOutcome::Ignored => {}
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

/// Sleeps away whatever is left of each frame
struct FrameClock {
    period: Duration,
    last: Instant,
}

impl FrameClock {
    fn new(rate: u32) -> Self {
        FrameClock {
            period: Duration::from_secs(1) / rate,
            last: Instant::now(),
        }
    }

    fn tick(&mut self) {
        if let Some(rest) = self.period.checked_sub(self.last.elapsed()) {
            thread::sleep(rest);
        }
        self.last = Instant::now();
    }
}

fn draw<B: Backend>(
    f: &mut Frame<B>,
    session: &Session,
    theme: &Theme,
    glyphs: Glyphs,
    lang: &Lang,
) {
    match &session.geometry {
        Some(geometry) => {
            f.render_widget(HeaderView::new(&session.game, lang, theme), geometry.header_rect());
            let board = BoardView::new(&session.game, geometry, session.pointer, theme, glyphs);
            f.render_widget(board, geometry.board_rect());
        }
        None => f.render_widget(TooSmallView::new(lang), f.size()),
    }
}

fn game_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    glyphs: Glyphs,
    lang: &Lang,
) -> Result<(), AppError> {
    let mut session = Session::new();
    info!(mole = ?session.game.mole(), "new game");
    let mut clock = FrameClock::new(FRAME_RATE);

    loop {
        while event::poll(Duration::ZERO)? {
            if session.handle_event(&event::read()?) == Flow::Quit {
                info!("quit requested");
                return Ok(());
            }
        }

        terminal.draw(|f| {
            // clicks are mapped against the layout the player last saw
            session.geometry = BoardGeometry::fit(f.size());
            draw(f, &session, theme, glyphs, lang);
        })?;

        clock.tick();
    }
}

pub fn run(cfg: &Config, lang: &Lang) -> Result<(), AppError> {
    let depth = cfg.color_mode.resolve();
    debug!(?depth, ascii = cfg.ascii_icons, "display settings");
    let theme = Theme::new(depth);
    let glyphs = Glyphs::new(cfg.ascii_icons);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // restore the terminal even when the loop fails
    let result = game_loop(&mut terminal, &theme, glyphs, lang);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
