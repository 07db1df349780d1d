use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use slabs::core::{BestScores, GameSnapshot, GameState, SimpleRng};
use slabs::types::{Difficulty, Direction, GameAction};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn reducer_hot_paths_do_not_allocate() {
    let mut rng = SimpleRng::new(1);
    let mut state = GameState::new(BestScores::new(), &mut rng);
    let mut snap = GameSnapshot::default();

    // Warm-up.
    state = state.reduce(GameAction::ResumeGame, &mut rng).state;
    state.snapshot_into(&mut snap);

    let allocs = with_alloc_counting(|| {
        for i in 0..2000 {
            let dir = Direction::ALL[i % 4];
            state = state.reduce(GameAction::Move(dir), &mut rng).state;
            state.snapshot_into(&mut snap);
            if state.game_over() {
                let next = match state.difficulty() {
                    Difficulty::Easy => Difficulty::Medium,
                    Difficulty::Medium => Difficulty::Expert,
                    Difficulty::Expert => Difficulty::Easy,
                };
                state = state
                    .reduce(GameAction::SetDifficulty(next), &mut rng)
                    .state;
            }
        }
    });

    assert_eq!(allocs, 0);
}
