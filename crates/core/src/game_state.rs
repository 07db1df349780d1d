//! Game state module - the aggregate the front end renders
//!
//! This module ties together the board, score, best scores and flags.
//! Every operation takes `&self` and returns a fresh value: the state is a
//! plain `Copy` struct, so committing a transition is a single assignment and
//! no reader can observe a board from one move next to the score of another.

use rand::Rng;

use crate::best_score::{BestScores, NewBest};
use crate::board::Board;
use crate::engine::apply_move;
use crate::rng::spawn_tile;
use crate::snapshot::GameSnapshot;
use crate::types::{Difficulty, Direction, GameAction, INITIAL_TILES};

/// Result of feeding one action to the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the action
    pub state: GameState,
    /// Set when the action beat the best score for the current side
    pub new_best: Option<NewBest>,
    /// Score earned by this action (moves only)
    pub score_gained: u64,
    /// Whether a move changed the board
    pub moved: bool,
}

impl Transition {
    fn unchanged(state: GameState) -> Self {
        Self {
            state,
            new_best: None,
            score_gained: 0,
            moved: false,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    score: u64,
    best_scores: BestScores,
    paused: bool,
    difficulty: Difficulty,
    game_over: bool,
    winning_score: u64,
}

/// Empty board for `difficulty` with the opening tiles placed
pub fn starting_board<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Board {
    let mut board = Board::for_difficulty(difficulty);
    for _ in 0..INITIAL_TILES {
        spawn_tile(&mut board, rng);
    }
    board
}

impl GameState {
    /// Create the launch state: Easy board, paused until resumed
    pub fn new<R: Rng + ?Sized>(best_scores: BestScores, rng: &mut R) -> Self {
        Self::with_difficulty(Difficulty::default(), best_scores, rng)
    }

    /// Create a paused game at `difficulty`
    pub fn with_difficulty<R: Rng + ?Sized>(
        difficulty: Difficulty,
        best_scores: BestScores,
        rng: &mut R,
    ) -> Self {
        Self {
            board: starting_board(difficulty, rng),
            score: 0,
            best_scores,
            paused: true,
            difficulty,
            game_over: false,
            winning_score: difficulty.winning_score(),
        }
    }

    /// Resume a game from an existing board (difficulty follows the board side)
    pub fn from_board(board: Board, score: u64, best_scores: BestScores) -> Self {
        let difficulty = Difficulty::from_side(board.side()).unwrap_or_default();
        Self {
            board,
            score,
            best_scores,
            paused: false,
            difficulty,
            game_over: crate::terminal::is_game_over(&board),
            winning_score: difficulty.winning_score(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_scores(&self) -> &BestScores {
        &self.best_scores
    }

    /// Best score for the side currently in play
    pub fn best_score(&self) -> u64 {
        self.best_scores.get(self.board.side())
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn winning_score(&self) -> u64 {
        self.winning_score
    }

    /// Whether the score reached the winning threshold
    pub fn has_won(&self) -> bool {
        self.score >= self.winning_score
    }

    /// Swipe the board.
    ///
    /// No-op once the game is over.
    pub fn apply_move<R: Rng + ?Sized>(&self, direction: Direction, rng: &mut R) -> Transition {
        if self.game_over {
            return Transition::unchanged(*self);
        }

        let result = apply_move(&self.board, direction, rng);

        let mut next = *self;
        next.board = result.board;
        next.score = self.score.saturating_add(result.score_gained);
        next.game_over = result.is_terminal;

        let side = next.board.side();
        let new_best = if next.best_scores.record(side, next.score) {
            Some(NewBest {
                side,
                score: next.score,
            })
        } else {
            None
        };

        Transition {
            state: next,
            new_best,
            score_gained: result.score_gained,
            moved: result.moved,
        }
    }

    /// Start over at the current difficulty
    pub fn new_game<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            board: starting_board(self.difficulty, rng),
            score: 0,
            game_over: false,
            winning_score: self.difficulty.winning_score(),
            ..*self
        }
    }

    /// Same as [`GameState::new_game`]; reached from the menu and game-over screen
    pub fn reset_game_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        self.new_game(rng)
    }

    /// Switch difficulty and start over on the matching board
    pub fn set_difficulty<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> Self {
        Self {
            difficulty,
            ..*self
        }
        .reset_game_state(rng)
    }

    /// Leave the paused state; the board is untouched
    pub fn resume_game(&self) -> Self {
        Self {
            paused: false,
            ..*self
        }
    }

    /// Apply any game action
    pub fn reduce<R: Rng + ?Sized>(&self, action: GameAction, rng: &mut R) -> Transition {
        match action {
            GameAction::Move(direction) => self.apply_move(direction, rng),
            GameAction::NewGame => Transition::unchanged(self.new_game(rng)),
            GameAction::ResetGameState => Transition::unchanged(self.reset_game_state(rng)),
            GameAction::SetDifficulty(difficulty) => {
                Transition::unchanged(self.set_difficulty(difficulty, rng))
            }
            GameAction::ResumeGame => Transition::unchanged(self.resume_game()),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.side = self.board.side();
        out.score = self.score;
        out.best_score = self.best_score();
        out.best_scores = self.best_scores;
        out.highest_tile = self.board.highest_tile();
        out.game_over = self.game_over;
        out.has_won = self.has_won();
        out.winning_score = self.winning_score;
        out.difficulty = self.difficulty;
        out.paused = self.paused;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn state_from(rows: &[[u64; 4]; 4], score: u64) -> GameState {
        GameState::from_board(Board::from_rows(rows).unwrap(), score, BestScores::new())
    }

    #[test]
    fn test_new_game_state() {
        let mut rng = SimpleRng::new(12345);
        let state = GameState::new(BestScores::new(), &mut rng);

        assert_eq!(state.difficulty, Difficulty::Easy);
        assert_eq!(state.board.side(), 4);
        assert_eq!(state.board.count_tiles(), 2);
        assert_eq!(state.score, 0);
        assert!(state.paused);
        assert!(!state.game_over);
        assert_eq!(state.winning_score, 4096);
    }

    #[test]
    fn test_resume_only_clears_pause() {
        let mut rng = SimpleRng::new(1);
        let state = GameState::new(BestScores::new(), &mut rng);
        let resumed = state.resume_game();
        assert!(!resumed.paused);
        assert_eq!(resumed.board, state.board);
        assert_eq!(resumed.score, state.score);
    }

    #[test]
    fn test_move_adds_score_and_records_best() {
        let mut rng = SimpleRng::new(7);
        let state = state_from(&[[2, 2, 0, 0], [4, 4, 0, 0], [0; 4], [0; 4]], 10);
        let t = state.apply_move(Direction::Left, &mut rng);

        assert!(t.moved);
        assert_eq!(t.score_gained, 12);
        assert_eq!(t.state.score, 22);
        assert_eq!(t.new_best, Some(NewBest { side: 4, score: 22 }));
        assert_eq!(t.state.best_score(), 22);
        // The input state is untouched.
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_move_below_best_does_not_record() {
        let mut rng = SimpleRng::new(7);
        let mut best = BestScores::new();
        best.record(4, 1000);
        let board = Board::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let state = GameState::from_board(board, 0, best);
        let t = state.apply_move(Direction::Left, &mut rng);
        assert_eq!(t.state.score, 4);
        assert_eq!(t.new_best, None);
        assert_eq!(t.state.best_score(), 1000);
    }

    #[test]
    fn test_move_after_game_over_is_noop() {
        let mut rng = SimpleRng::new(3);
        let state = state_from(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]], 500);
        assert!(state.game_over);
        for dir in Direction::ALL {
            let t = state.apply_move(dir, &mut rng);
            assert_eq!(t.state, state);
            assert_eq!(t.new_best, None);
            assert!(!t.moved);
        }
    }

    #[test]
    fn test_new_game_keeps_best_and_difficulty() {
        let mut rng = SimpleRng::new(9);
        let state = state_from(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        let played = state.apply_move(Direction::Left, &mut rng).state;
        let fresh = played.new_game(&mut rng);

        assert_eq!(fresh.score, 0);
        assert!(!fresh.game_over);
        assert_eq!(fresh.board.count_tiles(), 2);
        assert_eq!(fresh.best_score(), 4);
        assert_eq!(fresh.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_set_difficulty_resizes_board() {
        let mut rng = SimpleRng::new(11);
        let state = GameState::new(BestScores::new(), &mut rng);

        let medium = state.set_difficulty(Difficulty::Medium, &mut rng);
        assert_eq!(medium.board.side(), 5);
        assert_eq!(medium.winning_score, 2048);
        assert_eq!(medium.board.count_tiles(), 2);

        let expert = medium.set_difficulty(Difficulty::Expert, &mut rng);
        assert_eq!(expert.board.side(), 6);
        assert_eq!(expert.winning_score, 8192);
        assert_eq!(expert.score, 0);
    }

    #[test]
    fn test_has_won_at_threshold() {
        let state = state_from(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 4096);
        assert!(state.has_won());
        let state = state_from(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 4095);
        assert!(!state.has_won());
    }

    #[test]
    fn test_reduce_dispatch() {
        let mut rng = SimpleRng::new(5);
        let state = GameState::new(BestScores::new(), &mut rng);

        let t = state.reduce(GameAction::ResumeGame, &mut rng);
        assert!(!t.state.paused);

        let t = t.state.reduce(GameAction::SetDifficulty(Difficulty::Expert), &mut rng);
        assert_eq!(t.state.difficulty, Difficulty::Expert);
        assert!(!t.state.paused);

        let t = t.state.reduce(GameAction::ResetGameState, &mut rng);
        assert_eq!(t.state.board.side(), 6);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let state = state_from(&[[2, 4, 0, 0], [0; 4], [0; 4], [0, 0, 0, 64]], 36);
        let snap = state.snapshot();
        assert_eq!(snap.side, 4);
        assert_eq!(snap.board[0][..4], [2, 4, 0, 0]);
        assert_eq!(snap.board[3][3], 64);
        assert_eq!(snap.highest_tile, 64);
        assert_eq!(snap.score, 36);
        assert!(!snap.game_over);
        assert!(snap.playable());
    }
}
