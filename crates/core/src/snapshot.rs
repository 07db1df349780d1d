use serde::Serialize;

use crate::best_score::BestScores;
use crate::types::{Difficulty, MAX_BOARD_SIDE};

/// Read-only copy of everything a front end draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Row-major grid; only the top-left `side` x `side` block is in play
    pub board: [[u64; MAX_BOARD_SIDE]; MAX_BOARD_SIDE],
    pub side: usize,
    pub score: u64,
    pub best_score: u64,
    pub best_scores: BestScores,
    pub highest_tile: u64,
    pub game_over: bool,
    pub has_won: bool,
    pub winning_score: u64,
    pub difficulty: Difficulty,
    pub paused: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0; MAX_BOARD_SIDE]; MAX_BOARD_SIDE];
        self.side = Difficulty::default().board_side();
        self.score = 0;
        self.best_score = 0;
        self.best_scores = BestScores::new();
        self.highest_tile = 0;
        self.game_over = false;
        self.has_won = false;
        self.winning_score = Difficulty::default().winning_score();
        self.difficulty = Difficulty::default();
        self.paused = false;
    }

    /// Rows currently in play
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.board[..self.side].iter().map(move |row| &row[..self.side])
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0; MAX_BOARD_SIDE]; MAX_BOARD_SIDE],
            side: 0,
            score: 0,
            best_score: 0,
            best_scores: BestScores::new(),
            highest_tile: 0,
            game_over: false,
            has_won: false,
            winning_score: 0,
            difficulty: Difficulty::default(),
            paused: false,
        };
        s.clear();
        s
    }
}
