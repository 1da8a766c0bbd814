use crate::board::Board;

/// The single board position that the next move may not recreate.
///
/// Set to the pre-move board after a move that captured exactly one stone,
/// cleared after anything else. This only catches immediate single-stone
/// recaptures, not superko.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KoGuard {
    board: Option<Board>,
}

impl KoGuard {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn forbidding(board: Board) -> Self {
        Self { board: Some(board) }
    }

    /// Guard to use after a legal move played on `before` that captured `captured` stones.
    pub fn after_move(before: &Board, captured: usize) -> Self {
        if captured == 1 {
            Self::forbidding(before.clone())
        } else {
            Self::cleared()
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.board.is_some()
    }

    /// Would `result` repeat the guarded position?
    pub fn forbids(&self, result: &Board) -> bool {
        self.board.as_ref().is_some_and(|b| b == result)
    }
}
