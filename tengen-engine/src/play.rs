use crate::Point;
use crate::board::Board;
use crate::error::IllegalMove;
use crate::group::{Group, group_from, has_liberty, liberties_of};
use crate::ko::KoGuard;
use crate::stone::Stone;

/// The result of a legal stone placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub captured: usize,
    pub captured_positions: Vec<Point>,
}

/// Place `stone` at `point`, resolve captures, and check suicide and ko.
///
/// Opponent chains left without liberties are removed together, so a single
/// move can capture several independent groups. Self-capture is only legal
/// when it captures something. Passing never goes through here.
pub fn try_play(
    board: &Board,
    point: Point,
    stone: Stone,
    ko: &KoGuard,
) -> Result<Placement, IllegalMove> {
    if !board.on_board(point) {
        return Err(IllegalMove::OutOfBounds);
    }

    if board.get(point).is_some() {
        return Err(IllegalMove::Occupied);
    }

    let placed = board.with_stone(point, stone);

    // Find opponent chains with no liberties left
    let opponent = stone.opp();
    let mut visited = vec![false; placed.cells().len()];
    let mut dead_stones = Vec::new();
    for n in placed.neighbors(point) {
        if placed.get(n) != Some(opponent) || visited[placed.idx(n)] {
            continue;
        }
        let stones = group_from(&placed, n, &mut visited);
        let group = Group {
            liberties: liberties_of(&placed, &stones),
            stones,
        };
        if group.is_dead() {
            dead_stones.extend(group.stones);
        }
    }

    let result = placed.without_stones(&dead_stones);

    if dead_stones.is_empty() && !has_liberty(&result, point) {
        return Err(IllegalMove::Suicide);
    }

    if ko.forbids(&result) {
        return Err(IllegalMove::Ko);
    }

    Ok(Placement {
        board: result,
        captured: dead_stones.len(),
        captured_positions: dead_stones,
    })
}

pub fn is_legal(board: &Board, point: Point, stone: Stone, ko: &KoGuard) -> bool {
    try_play(board, point, stone, ko).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(rows: &[&str]) -> Board {
        Board::from_layout(rows).unwrap()
    }

    fn play(board: &Board, point: Point, stone: Stone) -> Result<Placement, IllegalMove> {
        try_play(board, point, stone, &KoGuard::cleared())
    }

    #[test]
    fn places_stone_on_empty_point() {
        let board = Board::empty(9);
        let placement = play(&board, (4, 4), Stone::Black).unwrap();
        assert_eq!(placement.board.get((4, 4)), Some(Stone::Black));
        assert_eq!(placement.captured, 0);
        assert!(board.is_empty());
    }

    #[test]
    fn rejects_off_board() {
        let board = Board::empty(9);
        assert_eq!(play(&board, (9, 0), Stone::Black), Err(IllegalMove::OutOfBounds));
        assert_eq!(play(&board, (0, 255), Stone::Black), Err(IllegalMove::OutOfBounds));
    }

    #[test]
    fn prevents_overwrite() {
        let board = Board::empty(9).with_stone((0, 0), Stone::Black);
        assert_eq!(play(&board, (0, 0), Stone::White), Err(IllegalMove::Occupied));
        assert_eq!(play(&board, (0, 0), Stone::Black), Err(IllegalMove::Occupied));
    }

    #[test]
    fn captures_surrounded_stone() {
        let board = Board::empty(9)
            .with_stone((1, 2), Stone::Black)
            .with_stone((3, 2), Stone::Black)
            .with_stone((2, 1), Stone::Black)
            .with_stone((2, 2), Stone::White);
        let placement = play(&board, (2, 3), Stone::Black).unwrap();
        assert_eq!(placement.captured, 1);
        assert_eq!(placement.captured_positions, vec![(2, 2)]);
        assert_eq!(placement.board.get((2, 2)), None);
    }

    #[test]
    fn captures_corner_stone() {
        let board = layout(&["WB+", "+++", "+++"]);
        let placement = play(&board, (0, 1), Stone::Black).unwrap();
        assert_eq!(placement.captured, 1);
        assert_eq!(placement.board.get((0, 0)), None);
    }

    #[test]
    fn chain_with_a_liberty_left_survives() {
        let board = layout(&["WW+", "+++", "+++"]);
        let placement = play(&board, (0, 1), Stone::Black).unwrap();
        assert_eq!(placement.captured, 0);
        assert_eq!(placement.board.get((0, 0)), Some(Stone::White));
        assert_eq!(placement.board.get((1, 0)), Some(Stone::White));
    }

    #[test]
    fn captures_stone_chain() {
        let board = layout(&["+BB+", "BWWB", "W+WB", "WWB+"]);
        let placement = play(&board, (1, 2), Stone::Black).unwrap();
        assert_eq!(placement.captured, 6);
    }

    #[test]
    fn captures_several_groups_at_once() {
        // Black at (1, 1) takes the last liberty of both white stones.
        let board = layout(&["BWB+", "W+B+", "B+++", "++++"]);
        let placement = play(&board, (1, 1), Stone::Black).unwrap();
        assert_eq!(placement.captured, 2);
        assert_eq!(placement.board.get((1, 0)), None);
        assert_eq!(placement.board.get((0, 1)), None);
    }

    #[test]
    fn prevents_suicide() {
        let board = layout(&["+B++", "B+++", "++++", "++++"]);
        assert_eq!(play(&board, (0, 0), Stone::White), Err(IllegalMove::Suicide));
    }

    #[test]
    fn prevents_group_suicide() {
        // White's last liberty is shared with the point being filled.
        let board = layout(&["+WB+", "WWB+", "BB++", "++++"]);
        assert_eq!(play(&board, (0, 0), Stone::White), Err(IllegalMove::Suicide));
    }

    #[test]
    fn self_atari_capture_is_legal() {
        // Filling its own last liberty is fine when it captures.
        let board = layout(&["+WB+", "WB++", "B+++", "++++"]);
        let placement = play(&board, (0, 0), Stone::Black).unwrap();
        assert_eq!(placement.captured, 2);
    }

    #[test]
    fn prevents_immediate_ko_recapture() {
        let board = layout(&["+BW+", "BW+W", "+BW+", "++++"]);
        let take = play(&board, (2, 1), Stone::Black).unwrap();
        assert_eq!(take.captured, 1);

        let guard = KoGuard::after_move(&board, take.captured);
        let retake = try_play(&take.board, (1, 1), Stone::White, &guard);
        assert_eq!(retake, Err(IllegalMove::Ko));

        // Same point without the guard is an ordinary capture.
        assert!(is_legal(&take.board, (1, 1), Stone::White, &KoGuard::cleared()));
    }

    #[test]
    fn ko_guard_only_blocks_identical_board() {
        let board = layout(&["+BW+", "BW+W", "+BW+", "++++"]);
        let guard = KoGuard::forbidding(board.clone());
        assert!(is_legal(&board, (3, 3), Stone::Black, &guard));
    }
}
