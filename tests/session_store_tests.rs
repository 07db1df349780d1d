//! Sessions wired to real stores

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use slabs::core::{BestScoreStore, BestScores, Board, GameState, MemoryStore, Session, SimpleRng};
use slabs::store::{BackgroundStore, JsonFileStore, StoreConfig};
use slabs::types::{Difficulty, Direction, GameAction};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("slabs-it-{}-{}-{}", tag, std::process::id(), nanos))
}

fn mergeable_state() -> GameState {
    let board = Board::from_rows(&[[2, 2, 0, 0], [8, 8, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]).unwrap();
    GameState::from_board(board, 0, BestScores::new())
}

#[test]
fn test_session_loads_best_scores_at_start() {
    let store = MemoryStore::new().with_score(4, 500).with_score(6, 20);
    let session = Session::new(SimpleRng::new(1), store);

    let state = session.state();
    assert_eq!(state.best_score(), 500);
    assert_eq!(state.best_scores().get(6), 20);
    assert_eq!(state.best_scores().entry(5), None);
    assert!(state.paused());
}

#[test]
fn test_session_persists_new_best() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::from_state(mergeable_state(), SimpleRng::new(2), Arc::clone(&store));

    let state = session.dispatch(GameAction::Move(Direction::Left));
    assert_eq!(state.score(), 20);
    assert_eq!(store.load_best_score(4).unwrap(), Some(20));

    // The stored best tracks the session's best from here on.
    let best = session.dispatch(GameAction::Move(Direction::Up)).best_score();
    assert!(best >= 20);
    assert_eq!(store.load_best_score(4).unwrap(), Some(best));
}

#[test]
fn test_file_store_survives_restart() {
    let dir = temp_dir("restart");
    let config = StoreConfig {
        data_dir: dir.clone(),
        ..StoreConfig::default()
    };

    {
        let store = BackgroundStore::start_with_config(&config).expect("store enabled");
        let mut session = Session::from_state(mergeable_state(), SimpleRng::new(3), store);
        session.dispatch(GameAction::Move(Direction::Left));
        let (state, _rng, store) = session.into_parts();
        assert_eq!(state.score(), 20);
        assert_eq!(store.shutdown(), 1);
    }

    let reopened = JsonFileStore::new(config.path());
    assert_eq!(reopened.load_best_score(4).unwrap(), Some(20));

    let session = Session::new(SimpleRng::new(4), reopened);
    assert_eq!(session.state().best_score(), 20);

    let text = fs::read_to_string(config.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["bestScore_4"], 20);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_disabled_store_falls_back_to_memory() {
    let config = StoreConfig::from_lookup(|key| match key {
        "SLABS_STORE_DISABLED" => Some("1".to_string()),
        _ => None,
    });
    assert!(BackgroundStore::start_with_config(&config).is_none());

    let mut session = Session::new(SimpleRng::new(5), MemoryStore::new());
    session.dispatch(GameAction::ResumeGame);
    session.dispatch(GameAction::SetDifficulty(Difficulty::Expert));
    assert_eq!(session.state().board().side(), 6);
    assert!(!session.state().paused());
}

#[test]
fn test_corrupt_file_starts_fresh() {
    let dir = temp_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("best_scores.json");
    fs::write(&path, "{ not json").unwrap();

    let session = Session::new(SimpleRng::new(6), JsonFileStore::new(&path));
    assert_eq!(session.state().best_scores().iter().count(), 0);

    let _ = fs::remove_dir_all(dir);
}
