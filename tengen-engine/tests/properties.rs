use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tengen_engine::territory::ownership;
use tengen_engine::{
    Board, Difficulty, History, IllegalMove, KoGuard, Move, MoveRecord, Stone,
    group_and_liberties, pick_move, try_play,
};

const SIZE: u8 = 9;

/// Play the attempted points in order with alternating colors, dropping the
/// illegal ones. Returns the final board, the ko guard and who is to move.
fn build(attempts: &[(u8, u8)]) -> (Board, KoGuard, Stone) {
    let mut board = Board::empty(SIZE);
    let mut ko = KoGuard::cleared();
    let mut stone = Stone::Black;
    for &p in attempts {
        if let Ok(placement) = try_play(&board, p, stone, &ko) {
            ko = KoGuard::after_move(&board, placement.captured);
            board = placement.board;
            stone = -stone;
        }
    }
    (board, ko, stone)
}

fn attempts() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0..SIZE, 0..SIZE), 0..120)
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

proptest! {
    #[test]
    fn occupied_points_are_always_rejected(moves in attempts()) {
        let (board, ko, _) = build(&moves);
        for p in board.points().filter(|&p| board.get(p).is_some()) {
            for stone in [Stone::Black, Stone::White] {
                prop_assert_eq!(
                    try_play(&board, p, stone, &ko).map(|_| ()),
                    Err(IllegalMove::Occupied)
                );
            }
        }
    }

    #[test]
    fn every_group_keeps_a_liberty(moves in attempts()) {
        let (board, _, _) = build(&moves);
        for p in board.points().filter(|&p| board.get(p).is_some()) {
            let group = group_and_liberties(&board, p);
            prop_assert!(!group.liberties.is_empty(), "dead group at {:?}", p);
        }
    }

    #[test]
    fn automated_move_is_always_legal(
        moves in attempts(),
        seed in any::<u64>(),
        difficulty in difficulty(),
    ) {
        let (board, ko, stone) = build(&moves);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        match pick_move(&board, stone, difficulty, &ko, &mut rng) {
            Move::Play(p) => prop_assert!(try_play(&board, p, stone, &ko).is_ok()),
            Move::Pass => {
                for p in board.points() {
                    prop_assert!(try_play(&board, p, stone, &ko).is_err());
                }
            }
        }
    }

    #[test]
    fn ownership_only_marks_empty_points(moves in attempts()) {
        let (board, _, _) = build(&moves);
        let owners = ownership(&board);
        for (i, p) in board.points().enumerate() {
            if board.get(p).is_some() {
                prop_assert_eq!(owners[i], 0);
            }
        }
    }

    #[test]
    fn undo_restores_earlier_boards(moves in attempts(), back in 0usize..10) {
        let mut history = History::new(Board::empty(SIZE));
        let mut ko = KoGuard::cleared();
        for &p in &moves {
            let stone = history.next_player();
            let before = history.current().clone();
            if let Ok(placement) = try_play(&before, p, stone, &ko) {
                ko = KoGuard::after_move(&before, placement.captured);
                let record = MoveRecord::play(stone, p, placement.captured as u32, placement.board);
                history.push(before, record);
            }
        }

        let len = history.len();
        let expected = history.board_at(len.saturating_sub(back)).cloned();
        let undone = history.undo(back);
        prop_assert_eq!(undone, back.min(len));
        prop_assert_eq!(Some(history.current().clone()), expected);
    }
}
