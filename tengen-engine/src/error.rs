use thiserror::Error;

/// Why a proposed stone placement was rejected. Never fatal: the caller
/// decides what feedback to give.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("point is off the board")]
    OutOfBounds,

    #[error("point is already occupied")]
    Occupied,

    #[error("move would capture its own group")]
    Suicide,

    #[error("move recreates the position forbidden by ko")]
    Ko,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GoError {
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),

    #[error("game is over")]
    GameOver,

    #[error("waiting for the automated player to move")]
    AwaitingAutomatedMove,

    #[error("the automated player is not due to move")]
    NotAutomatedTurn,

    #[error("unsupported board size {0}")]
    UnsupportedBoardSize(u8),

    #[error("board rows must all have the board's width")]
    MalformedBoard,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure to read a transcript document as a whole. Individual bad moves
/// inside a readable document are skipped during replay instead.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("malformed JSON transcript: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed SGF at byte {pos}: {reason}")]
    Sgf { pos: usize, reason: String },

    #[error("board must be square, got {0}x{1}")]
    NonSquareBoard(u8, u8),
}
