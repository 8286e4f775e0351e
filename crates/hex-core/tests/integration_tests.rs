//! Integration tests for the Hex engine.
//!
//! These tests drive a board through placements, removals and undo and check
//! the connectivity analysis against an independent component count.

use hex_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashSet, VecDeque};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn loc(row: i32, col: i32) -> Coordinate {
    Coordinate::new(row, col)
}

/// Members of the chain holding `at`, sorted
fn group_of(board: &Board, at: Coordinate) -> Vec<Coordinate> {
    let id = board.id_at(at).expect("stone should have an id");
    let mut members = board.group_members(id).expect("id should have members").to_vec();
    members.sort();
    members
}

/// Every chain the analysis knows about, as sorted member lists
fn chains(board: &Board) -> BTreeSet<Vec<Coordinate>> {
    board
        .analysis()
        .chains()
        .map(|(_, members)| {
            let mut members = members.to_vec();
            members.sort();
            members
        })
        .collect()
}

/// Connected components computed from the grid alone, treating all stones on
/// one of their color's goal edges as touching each other
fn components(board: &Board) -> BTreeSet<Vec<Coordinate>> {
    let size = board.size();
    let stones: Vec<Coordinate> = (0..size as i32)
        .flat_map(|row| (0..size as i32).map(move |col| loc(row, col)))
        .filter(|at| board.occupant(*at).is_stone())
        .collect();

    let mut seen = HashSet::new();
    let mut result = BTreeSet::new();
    for start in &stones {
        if !seen.insert(*start) {
            continue;
        }
        let color = board.occupant(*start);
        let mut component = vec![*start];
        let mut queue = VecDeque::from([*start]);
        while let Some(current) = queue.pop_front() {
            let edge = color.goal_side_at(current, size);
            let linked = stones.iter().copied().filter(|other| {
                board.occupant(*other) == color
                    && (current.is_adjacent_to(other)
                        || (edge.is_some() && color.goal_side_at(*other, size) == edge))
            });
            for next in linked.collect::<Vec<_>>() {
                if seen.insert(next) {
                    component.push(next);
                    queue.push_back(next);
                }
            }
        }
        component.sort();
        result.insert(component);
    }
    result
}

fn assert_consistent(board: &Board) {
    assert_eq!(chains(board), components(board));
    assert_eq!(
        board.group_count(PlayerColor::Unoccupied),
        components(board).len()
    );
    for (id, members) in board.analysis().chains() {
        for member in members {
            assert_eq!(board.id_at(*member), Some(id));
        }
    }
}

fn empty_cells(board: &Board) -> Vec<Coordinate> {
    let size = board.size() as i32;
    (0..size)
        .flat_map(|row| (0..size).map(move |col| loc(row, col)))
        .filter(|at| !board.occupant(*at).is_stone())
        .collect()
}

fn stones(board: &Board) -> Vec<Coordinate> {
    let size = board.size() as i32;
    (0..size)
        .flat_map(|row| (0..size).map(move |col| loc(row, col)))
        .filter(|at| board.occupant(*at).is_stone())
        .collect()
}

#[test]
fn test_singleton_group() {
    init_tracing();
    let mut board = Board::new(11).unwrap();
    let at = loc(6, 6);
    board.place_stone(at, PlayerColor::White).unwrap();
    assert_eq!(group_of(&board, at), vec![at]);
    assert_eq!(board.group_count(PlayerColor::White), 1);
    assert_eq!(board.group_count(PlayerColor::Black), 0);
}

#[test]
fn test_merge_and_split() {
    init_tracing();
    let mut board = Board::new(11).unwrap();
    board.place_stone(loc(6, 6), PlayerColor::White).unwrap();
    board.place_stone(loc(8, 6), PlayerColor::White).unwrap();
    assert_eq!(board.group_count(PlayerColor::Unoccupied), 2);
    assert_eq!(group_of(&board, loc(6, 6)), vec![loc(6, 6)]);
    assert_eq!(group_of(&board, loc(8, 6)), vec![loc(8, 6)]);

    board.place_stone(loc(7, 6), PlayerColor::White).unwrap();
    assert_eq!(board.group_count(PlayerColor::Unoccupied), 1);
    assert_eq!(
        group_of(&board, loc(6, 6)),
        vec![loc(6, 6), loc(7, 6), loc(8, 6)]
    );

    let undone = board.undo().unwrap();
    assert_eq!(
        undone,
        Some(BoardChange::Placement {
            location: loc(7, 6),
            previous_player: PlayerColor::White,
        })
    );
    assert_eq!(board.group_count(PlayerColor::Unoccupied), 2);
    assert_eq!(group_of(&board, loc(6, 6)), vec![loc(6, 6)]);
    assert_eq!(group_of(&board, loc(8, 6)), vec![loc(8, 6)]);
    assert_eq!(board.id_at(loc(7, 6)), None);
}

#[test]
fn test_edge_sentinels() {
    init_tracing();
    let cases = [
        ((0, 0), PlayerColor::White, Side::WhiteTop),
        ((0, 0), PlayerColor::Black, Side::BlackLeft),
        ((10, 0), PlayerColor::White, Side::WhiteBottom),
        ((10, 0), PlayerColor::Black, Side::BlackLeft),
        ((10, 10), PlayerColor::White, Side::WhiteBottom),
        ((10, 10), PlayerColor::Black, Side::BlackRight),
        ((0, 10), PlayerColor::White, Side::WhiteTop),
        ((0, 10), PlayerColor::Black, Side::BlackRight),
    ];

    let mut board = Board::new(11).unwrap();
    for ((row, col), color, side) in cases {
        let at = loc(row, col);
        assert_eq!(
            board.place_stone(at, color).unwrap(),
            StoneOutcome::Grouped(ChainId::edge(side))
        );
        assert_eq!(board.id_at(at), Some(ChainId::edge(side)), "{color:?} at {at}");

        board.remove_stone(at).unwrap();
        assert_eq!(board.group_count(PlayerColor::Unoccupied), 0);
        assert_eq!(board.id_at(at), None);
    }
}

#[test]
fn test_win_by_play() {
    init_tracing();
    let mut board = Board::new(4).unwrap();
    // White runs down column 1 while Black lines up on the right edge
    let moves = [
        (loc(0, 1), StoneOutcome::Grouped(ChainId::edge(Side::WhiteTop))),
        (loc(3, 3), StoneOutcome::Grouped(ChainId::edge(Side::BlackRight))),
        (loc(1, 1), StoneOutcome::Grouped(ChainId::edge(Side::WhiteTop))),
        (loc(2, 3), StoneOutcome::Grouped(ChainId::edge(Side::BlackRight))),
        (loc(2, 1), StoneOutcome::Grouped(ChainId::edge(Side::WhiteTop))),
        (loc(1, 3), StoneOutcome::Grouped(ChainId::edge(Side::BlackRight))),
        (loc(3, 1), StoneOutcome::Won),
    ];
    for (at, expected) in moves {
        assert_eq!(board.play(at).unwrap(), expected, "{at}");
    }
    assert_eq!(board.winner(), PlayerColor::White);
    assert_eq!(board.play(loc(0, 0)).unwrap_err(), HexError::GameOver);

    // Undo brings the game back to before the winning move
    board.undo().unwrap();
    assert_eq!(board.winner(), PlayerColor::Unoccupied);
    assert_eq!(board.current_player(), PlayerColor::White);
    assert_consistent(&board);
}

#[test]
fn test_removals_after_win() {
    init_tracing();
    let mut board = Board::new(4).unwrap();
    for at in [loc(0, 1), loc(3, 3), loc(1, 1), loc(2, 3), loc(2, 1), loc(1, 3)] {
        board.play(at).unwrap();
    }
    assert_eq!(board.play(loc(3, 1)).unwrap(), StoneOutcome::Won);

    // An unrelated Black stone comes off; the game stays won
    board.remove_stone(loc(1, 3)).unwrap();
    assert_eq!(board.winner(), PlayerColor::White);
    assert_eq!(board.id_at(loc(3, 1)), None);
    assert_eq!(group_of(&board, loc(2, 3)), vec![loc(2, 3), loc(3, 3)]);
    assert_eq!(
        group_of(&board, loc(0, 1)),
        vec![loc(0, 1), loc(1, 1), loc(2, 1)]
    );
    assert_eq!(board.group_count(PlayerColor::White), 1);
    assert_eq!(board.group_count(PlayerColor::Black), 1);

    // Taking the winning stone itself off does not reopen the game either
    let before = chains(&board);
    board.remove_stone(loc(3, 1)).unwrap();
    assert_eq!(board.winner(), PlayerColor::White);
    assert_eq!(chains(&board), before);
    assert_eq!(board.play(loc(0, 0)).unwrap_err(), HexError::GameOver);

    // Putting the winning stone back wins again, without an id
    board.undo().unwrap();
    assert_eq!(board.occupant(loc(3, 1)), PlayerColor::White);
    assert_eq!(board.winner(), PlayerColor::White);
    assert_eq!(board.id_at(loc(3, 1)), None);

    board.undo().unwrap();
    assert_eq!(board.occupant(loc(1, 3)), PlayerColor::Black);
    assert_eq!(board.winner(), PlayerColor::White);

    // Undoing the winning placement leaves a consistent, unfinished game
    board.undo().unwrap();
    assert_eq!(board.winner(), PlayerColor::Unoccupied);
    assert_eq!(board.current_player(), PlayerColor::White);
    assert_consistent(&board);
}

#[test]
fn test_black_wins_left_to_right() {
    let mut board = Board::new(3).unwrap();
    board.place_stone(loc(1, 0), PlayerColor::Black).unwrap();
    board.place_stone(loc(1, 2), PlayerColor::Black).unwrap();
    assert_eq!(board.group_count(PlayerColor::Black), 2);
    assert_eq!(
        board.place_stone(loc(1, 1), PlayerColor::Black).unwrap(),
        StoneOutcome::Won
    );
    assert_eq!(board.winner(), PlayerColor::Black);
}

#[test]
fn test_removal_and_undo_of_removal() {
    init_tracing();
    let mut board = Board::new(11).unwrap();
    // (4,5) is the only link between three stones around it
    for at in [loc(4, 4), loc(4, 5), loc(3, 6), loc(5, 5)] {
        board.place_stone(at, PlayerColor::Black).unwrap();
    }
    let before = chains(&board);

    assert_eq!(board.remove_stone(loc(4, 5)).unwrap(), PlayerColor::Black);
    assert_consistent(&board);
    assert_eq!(board.group_count(PlayerColor::Black), 3);

    let undone = board.undo().unwrap().unwrap();
    assert!(!undone.is_placement());
    assert_eq!(board.occupant(loc(4, 5)), PlayerColor::Black);
    assert_eq!(chains(&board), before);
}

#[test]
fn test_random_play_matches_components() {
    init_tracing();
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new(11).unwrap();

        for _ in 0..150 {
            let roll: f64 = rng.gen();
            if roll < 0.65 {
                let empty = empty_cells(&board);
                let Some(at) = empty.choose(&mut rng) else {
                    break;
                };
                let color = if rng.gen_bool(0.5) {
                    PlayerColor::Black
                } else {
                    PlayerColor::White
                };
                if board.place_stone(*at, color).unwrap() == StoneOutcome::Won {
                    // Keep the game going so the analysis stays fully merged
                    board.undo().unwrap();
                }
            } else if roll < 0.9 {
                let occupied = stones(&board);
                if let Some(at) = occupied.choose(&mut rng) {
                    board.remove_stone(*at).unwrap();
                }
            } else {
                board.undo().unwrap();
            }
            assert_consistent(&board);
        }
    }
}

#[test]
fn test_place_then_remove_round_trip() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(42);
    let mut board = Board::new(9).unwrap();

    for _ in 0..60 {
        let empty = empty_cells(&board);
        let at = *empty.choose(&mut rng).unwrap();
        let color = if rng.gen_bool(0.5) {
            PlayerColor::Black
        } else {
            PlayerColor::White
        };

        let before = chains(&board);
        let count = board.group_count(PlayerColor::Unoccupied);
        if board.place_stone(at, color).unwrap() == StoneOutcome::Won {
            board.undo().unwrap();
            continue;
        }
        board.remove_stone(at).unwrap();
        assert_eq!(chains(&board), before);
        assert_eq!(board.group_count(PlayerColor::Unoccupied), count);

        // Undoing the removal keeps the stone for the next round
        board.undo().unwrap();
        assert_eq!(board.occupant(at), color);
        assert_consistent(&board);
    }
}

#[test]
fn test_undo_replays_log_to_empty() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new(7).unwrap();
    for _ in 0..30 {
        let empty = empty_cells(&board);
        let at = *empty.choose(&mut rng).unwrap();
        if board.play(at).unwrap() == StoneOutcome::Won {
            break;
        }
    }

    while board.undo().unwrap().is_some() {
        assert_consistent(&board);
    }
    assert!(stones(&board).is_empty());
    assert_eq!(board.group_count(PlayerColor::Unoccupied), 0);
    assert_eq!(board.current_player(), PlayerColor::White);
}

#[test]
fn test_board_state_serializes() {
    let mut board = Board::new(5).unwrap();
    board.play(loc(2, 2)).unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.occupant(loc(2, 2)), PlayerColor::White);
    assert_eq!(restored.moves(), board.moves());
    assert_eq!(restored.id_at(loc(2, 2)), board.id_at(loc(2, 2)));
}
