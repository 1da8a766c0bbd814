pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod group;
pub mod history;
pub mod ko;
pub mod play;
pub mod star_points;
pub mod stone;
pub mod territory;
pub mod transcript;
pub mod turn;

/// Board coordinate as `(col, row)`, 0-indexed from the top-left corner.
pub type Point = (u8, u8);

pub use ai::{Difficulty, pick_move};
pub use board::Board;
pub use config::{GameMode, GameSettings};
pub use error::{GoError, IllegalMove, TranscriptError};
pub use game::{Game, GameStatus, Outcome, ReplayReport};
pub use group::{Group, group_and_liberties};
pub use history::{Captures, History};
pub use ko::KoGuard;
pub use play::{Placement, is_legal, try_play};
pub use stone::Stone;
pub use territory::{GameScore, Winner};
pub use transcript::Transcript;
pub use turn::{Move, MoveRecord};
