//! Merge-grid engine tests - sliding, merging, scoring, and lifecycle

use std::collections::HashSet;

use puzzle_engines::core::rng::seeded;
use puzzle_engines::core::{BestScoreStore, MemoryStore, MergeConfig, MergeGame};
use puzzle_engines::types::{Direction, MergeStatus};

fn game(values: [[u32; 4]; 4]) -> MergeGame {
    MergeGame::from_values(values, seeded(2024), MergeConfig::default(), 0)
}

fn row_without_spawn(g: &MergeGame, row: usize) -> [u32; 4] {
    let mut out = g.grid().values()[row];
    for t in g.grid().tiles().filter(|t| t.is_new && t.row as usize == row) {
        out[t.col as usize] = 0;
    }
    out
}

#[test]
fn test_two_equal_tiles_merge_left() {
    let mut g = game([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let outcome = g.apply(Direction::Left);

    assert!(outcome.moved);
    assert_eq!(outcome.score_added, 4);
    assert_eq!(g.score(), 4);

    let merged = g.grid().tile(0, 0).expect("merged tile");
    assert_eq!(merged.value, 4);
    assert!(merged.is_merge_result());

    // Exactly one new tile, somewhere other than the merge cell
    assert_eq!(g.grid().tile_count(), 2);
    let spawned: Vec<_> = g.grid().tiles().filter(|t| t.is_new).collect();
    assert_eq!(spawned.len(), 1);
    assert_ne!((spawned[0].row, spawned[0].col), (0, 0));
}

#[test]
fn test_merge_sources_point_at_merge_cell() {
    let mut g = game([[0, 0, 0, 0], [0, 8, 0, 8], [0; 4], [0; 4]]);
    g.apply(Direction::Right);

    let merged = g.grid().tile(1, 3).expect("merged tile");
    let (a, b) = merged.merged_from.as_deref().expect("sources");
    assert_eq!((a.row, a.col), (1, 3));
    assert_eq!((b.row, b.col), (1, 3));
    assert_eq!(a.value + b.value, 16);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_merged_tile_does_not_merge_again() {
    let mut g = game([[4, 4, 8, 0], [0; 4], [0; 4], [0; 4]]);
    let outcome = g.apply(Direction::Left);
    assert_eq!(outcome.score_added, 8);
    assert_eq!(row_without_spawn(&g, 0), [8, 8, 0, 0]);
}

#[test]
fn test_two_pairs_in_one_row() {
    let mut g = game([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
    let outcome = g.apply(Direction::Left);
    assert_eq!(outcome.score_added, 12);
    assert_eq!(row_without_spawn(&g, 0), [4, 8, 0, 0]);
}

#[test]
fn test_vertical_moves() {
    let mut g = game([[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0; 4]]);
    g.apply(Direction::Down);
    let values = g.grid().values();
    assert_eq!(values[3][0], 4);
    assert_eq!(values[2][0], 4);
    assert_eq!(g.score(), 4);

    let mut g = game([[0; 4], [0, 0, 0, 16], [0; 4], [0, 0, 0, 16]]);
    let outcome = g.apply(Direction::Up);
    assert_eq!(outcome.score_added, 32);
    assert_eq!(g.grid().tile(0, 3).map(|t| t.value), Some(32));
}

#[test]
fn test_blocked_move_is_noop() {
    let mut g = game([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let before = g.snapshot();
    let outcome = g.apply(Direction::Left);

    assert!(!outcome.moved);
    assert_eq!(outcome.score_added, 0);
    assert_eq!(outcome.new_best, None);
    assert_eq!(g.snapshot(), before);
}

#[test]
fn test_packed_grid_ends_only_after_attempt() {
    let mut g = game([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ]);
    assert_eq!(g.status(), MergeStatus::Playing);

    let values = g.grid().values();
    let outcome = g.apply(Direction::Up);
    assert!(!outcome.moved);
    assert_eq!(outcome.status, MergeStatus::Over);
    assert_eq!(g.status(), MergeStatus::Over);
    assert_eq!(g.grid().values(), values);
    assert_eq!(g.score(), 0);

    for dir in Direction::ALL {
        assert!(!g.apply(dir).moved);
    }
}

#[test]
fn test_accepted_move_into_dead_position_ends_game() {
    let mut g = game([
        [0, 2, 4, 8],
        [32, 64, 128, 16],
        [2, 4, 8, 32],
        [64, 128, 256, 512],
    ]);
    let outcome = g.apply(Direction::Left);
    assert!(outcome.moved);
    assert!(g.grid().is_full());
    assert_eq!(outcome.status, MergeStatus::Over);
    assert!(!g.snapshot().playable());
}

#[test]
fn test_reaching_win_value_wins_once() {
    let mut g = game([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let outcome = g.apply(Direction::Left);
    assert_eq!(outcome.status, MergeStatus::Won);
    assert!(g.has_won());
    assert_eq!(g.score(), 2048);
    assert_eq!(outcome.new_best, Some(2048));

    let values = g.grid().values();
    let again = g.apply(Direction::Right);
    assert!(!again.moved);
    assert_eq!(again.status, MergeStatus::Won);
    assert_eq!(g.grid().values(), values);
}

#[test]
fn test_custom_win_value() {
    let config = MergeConfig {
        win_value: 16,
        ..MergeConfig::default()
    };
    let mut g = MergeGame::from_values([[8, 8, 0, 0], [0; 4], [0; 4], [0; 4]], seeded(1), config, 0);
    assert_eq!(g.apply(Direction::Left).status, MergeStatus::Won);
}

#[test]
fn test_values_conserved_plus_spawn() {
    let mut g = MergeGame::new(7, 0);
    let mut score = 0;
    for step in 0..300 {
        if g.status() != MergeStatus::Playing {
            break;
        }
        let dir = Direction::ALL[step % 4];
        let before = g.grid().value_sum();
        let outcome = g.apply(dir);
        let after = g.grid().value_sum();
        if outcome.moved {
            let spawned = after - before;
            assert!(spawned == 2 || spawned == 4, "spawned {}", spawned);
        } else {
            assert_eq!(after, before);
        }
        assert!(g.score() >= score);
        assert_eq!(g.score(), score + outcome.score_added);
        score = g.score();
    }
}

#[test]
fn test_tile_ids_unique() {
    let mut g = MergeGame::new(99, 0);
    let mut seen = HashSet::new();
    for step in 0..200 {
        g.apply(Direction::ALL[(step * 3) % 4]);
        let ids: Vec<_> = g.grid().tiles().map(|t| t.id).collect();
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
        seen.extend(ids);
    }
    assert!(seen.len() > 2);
}

#[test]
fn test_reset_keeps_best_score() {
    let mut g = game([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    g.apply(Direction::Left);
    assert_eq!(g.best_score(), 4);

    g.reset();
    assert_eq!(g.score(), 0);
    assert_eq!(g.best_score(), 4);
    assert_eq!(g.status(), MergeStatus::Playing);
    assert_eq!(g.grid().tile_count(), 2);
}

#[test]
fn test_best_score_only_rises() {
    let mut g = MergeGame::from_values(
        [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]],
        seeded(5),
        MergeConfig::default(),
        1000,
    );
    let outcome = g.apply(Direction::Left);
    assert_eq!(outcome.new_best, None);
    assert_eq!(g.best_score(), 1000);
}

#[test]
fn test_persist_best_writes_only_improvements() {
    let mut g = game([[16, 16, 0, 0], [0; 4], [0; 4], [0; 4]]);
    g.apply(Direction::Left);

    let mut store = MemoryStore::new(10);
    assert!(g.persist_best(&mut store).expect("memory store"));
    assert_eq!(store.load().expect("memory store"), 32);

    let mut higher = MemoryStore::new(500);
    assert!(!g.persist_best(&mut higher).expect("memory store"));
    assert_eq!(higher.load().expect("memory store"), 500);
}

#[test]
fn test_transition_leaves_input_untouched() {
    let g = game([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let before = g.snapshot();

    let next = g.transition(Direction::Left);
    assert_eq!(g.snapshot(), before);
    assert_eq!(next.score(), 4);

    let mut applied = g.clone();
    applied.apply(Direction::Left);
    assert_eq!(applied.snapshot(), next.snapshot());
}

#[test]
fn test_spawn_random_tile_conserves_values() {
    let mut g = game([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 8]]);
    let id = g.spawn_random_tile().expect("room for a tile");
    assert_eq!(g.grid().tile_count(), 3);
    let spawned = g.grid().tiles().find(|t| t.id == id).expect("spawned tile");
    assert!(spawned.is_new);
    assert!(spawned.value == 2 || spawned.value == 4);
    assert_eq!(g.grid().value_sum(), 10 + spawned.value as u64);

    let mut full = game([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ]);
    assert_eq!(full.spawn_random_tile(), None);
    assert_eq!(full.grid().tile_count(), 16);
}
