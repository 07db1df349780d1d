//! Session - owns the live game and its injected capabilities
//!
//! A session pairs a [`GameState`] with the random source used for spawns and
//! the [`BestScoreStore`] used for persistence. Front ends call
//! [`Session::dispatch`] once per input event and redraw from
//! [`Session::snapshot`].
//!
//! Callers must not dispatch concurrently; the session is a plain `&mut`
//! state machine. A store failure is logged and dropped: persistence never
//! interrupts play.

use rand::Rng;

use crate::best_score::{BestScoreStore, BestScores, NewBest};
use crate::game_state::{GameState, Transition};
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

pub struct Session<R, S> {
    state: GameState,
    rng: R,
    store: S,
}

impl<R: Rng, S: BestScoreStore> Session<R, S> {
    /// Load best scores from `store` and open the launch state
    pub fn new(mut rng: R, store: S) -> Self {
        let best_scores = BestScores::load_from(&store);
        let state = GameState::new(best_scores, &mut rng);
        log::info!(
            "session started on {} ({}x{})",
            state.difficulty().as_str(),
            state.board().side(),
            state.board().side()
        );
        Self { state, rng, store }
    }

    /// Wrap an existing state (best scores are taken as-is)
    pub fn from_state(state: GameState, rng: R, store: S) -> Self {
        Self { state, rng, store }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Feed one action through the reducer and commit the result
    pub fn dispatch(&mut self, action: GameAction) -> &GameState {
        let transition = self.state.reduce(action, &mut self.rng);
        self.commit(action, transition);
        &self.state
    }

    fn commit(&mut self, action: GameAction, transition: Transition) {
        let was_over = self.state.game_over();
        self.state = transition.state;

        match action {
            GameAction::Move(direction) => {
                log::debug!(
                    "move {}: moved={} gained={} score={}",
                    direction.as_str(),
                    transition.moved,
                    transition.score_gained,
                    self.state.score()
                );
                if self.state.game_over() && !was_over {
                    log::info!(
                        "game over at {} (best {})",
                        self.state.score(),
                        self.state.best_score()
                    );
                }
            }
            GameAction::NewGame | GameAction::ResetGameState => {
                log::info!("new game on {}", self.state.difficulty().as_str());
            }
            GameAction::SetDifficulty(difficulty) => {
                log::info!(
                    "difficulty set to {} ({}x{})",
                    difficulty.as_str(),
                    self.state.board().side(),
                    self.state.board().side()
                );
            }
            GameAction::ResumeGame => {}
        }

        if let Some(best) = transition.new_best {
            self.persist(best);
        }
    }

    fn persist(&self, best: NewBest) {
        log::info!("new best {} on side {}", best.score, best.side);
        if let Err(e) = self.store.save_best_score(best.side, best.score) {
            log::warn!("could not save best score for side {}: {}", best.side, e);
        }
    }

    pub fn into_parts(self) -> (GameState, R, S) {
        (self.state, self.rng, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::{MemoryStore, StoreError};
    use crate::board::Board;
    use crate::rng::SimpleRng;
    use crate::types::{Difficulty, Direction};

    struct RejectingStore;

    impl BestScoreStore for RejectingStore {
        fn load_best_score(&self, _side: usize) -> Result<Option<u64>, StoreError> {
            Err(StoreError::Unavailable("disk full".to_string()))
        }

        fn save_best_score(&self, _side: usize, _score: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk full".to_string()))
        }
    }

    #[test]
    fn test_session_loads_best_scores() {
        let store = MemoryStore::new().with_score(4, 512);
        let session = Session::new(SimpleRng::new(1), store);
        assert_eq!(session.state().best_score(), 512);
        assert!(session.state().paused());
    }

    #[test]
    fn test_new_best_is_saved() {
        let board = Board::from_rows(&[[8, 8, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let state = GameState::from_board(board, 0, BestScores::new());
        let mut session = Session::from_state(state, SimpleRng::new(1), MemoryStore::new());

        session.dispatch(GameAction::Move(Direction::Left));
        assert_eq!(session.state().score(), 16);
        assert_eq!(session.store().load_best_score(4).unwrap(), Some(16));
    }

    #[test]
    fn test_store_failure_does_not_stop_play() {
        let mut session = Session::new(SimpleRng::new(3), RejectingStore);
        assert_eq!(session.state().best_score(), 0);

        session.dispatch(GameAction::ResumeGame);
        for dir in Direction::ALL.iter().cycle().take(40) {
            session.dispatch(GameAction::Move(*dir));
        }
        // Best tracking continues in memory.
        assert_eq!(session.state().best_score(), session.state().score());
    }

    #[test]
    fn test_difficulty_change_through_session() {
        let mut session = Session::new(SimpleRng::new(8), MemoryStore::new());
        let state = session.dispatch(GameAction::SetDifficulty(Difficulty::Medium));
        assert_eq!(state.board().side(), 5);
        assert_eq!(state.winning_score(), 2048);
    }
}
