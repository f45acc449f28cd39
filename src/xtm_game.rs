// Core game state and rules
// Holds the hidden mole, the revealed cells and the attempt counter

use rand::prelude::*;

/// Board side length (the board is always GRID_SIZE x GRID_SIZE)
pub const GRID_SIZE: usize = 8;

/// Wrong guesses allowed before the game is lost
pub const ATTEMPTS: u32 = 5;

/// A board cell as (row, col), both in [0, GRID_SIZE)
pub type Square = (usize, usize);

/// Game status; only Playing accepts reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    /// True once the game has been decided either way
    pub fn is_over(self) -> bool {
        !matches!(self, Status::Playing)
    }
}

/// What a single reveal did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Game already decided or cell already revealed; nothing changed
    Ignored,
    /// Wrong cell, attempts remain
    Miss,
    /// Wrong cell and the last attempt was used up
    Exhausted,
    /// The mole was found
    Found,
}

/// Main game state
#[derive(Debug, Clone)]
pub struct Game {
    mole: Square,
    revealed: Vec<bool>, // GRID_SIZE * GRID_SIZE reveal flags
    attempts: u32,
    status: Status,
}

impl Game {
    /// Start a new game with the mole placed by the thread-local RNG
    pub fn new() -> Self {
        Game::with_rng(&mut thread_rng())
    }

    /// Start a new game drawing the mole position from `rng`
    pub fn with_rng<R: Rng>(rng: &mut R) -> Self {
        let mole = (rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));
        Game {
            mole,
            revealed: vec![false; GRID_SIZE * GRID_SIZE],
            attempts: ATTEMPTS,
            status: Status::Playing,
        }
    }

    /// Convert (row, col) to flat array index
    fn index(&self, (row, col): Square) -> usize {
        row * GRID_SIZE + col
    }

    pub fn mole(&self) -> Square {
        self.mole
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_revealed(&self, sq: Square) -> bool {
        self.revealed[self.index(sq)]
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    /// Reveal a cell that is known to lie on the board
    /// - Ignored once the game is decided or when the cell is already open
    /// - Finding the mole wins immediately, whatever attempts remain
    /// - Otherwise one attempt is spent; the game is lost when none remain
    pub fn reveal(&mut self, sq: Square) -> RevealOutcome {
        let idx = self.index(sq);
        if self.status != Status::Playing || self.revealed[idx] {
            return RevealOutcome::Ignored;
        }
        self.revealed[idx] = true;
        if sq == self.mole {
            self.status = Status::Won;
            return RevealOutcome::Found;
        }
        // attempts is never zero while Playing, saturate anyway
        self.attempts = self.attempts.saturating_sub(1);
        if self.attempts == 0 {
            self.status = Status::Lost;
            RevealOutcome::Exhausted
        } else {
            RevealOutcome::Miss
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
