//! Text rendering of the board and game status.

use tengen_engine::star_points::star_points;
use tengen_engine::{Game, GameScore, GameStatus, Stone};

use crate::command::{column_label, format_point};

/// The board with coordinates on all sides. The last stone played is
/// flagged with `>` in front of it.
pub fn render_board(game: &Game) -> String {
    let board = game.board();
    let size = board.size();
    let stars = star_points(size);
    let last = game.last_move();

    let mut labels = String::from("   ");
    for col in 0..size {
        labels.push(' ');
        labels.push(column_label(col));
    }

    let mut out = String::new();
    out.push_str(&labels);
    out.push('\n');
    for row in 0..size {
        out.push_str(&format!("{:2} ", size - row));
        for col in 0..size {
            let p = (col, row);
            out.push(if last == Some(p) { '>' } else { ' ' });
            out.push(match board.get(p) {
                Some(Stone::Black) => 'X',
                Some(Stone::White) => 'O',
                None if stars.contains(&p) => '+',
                None => '.',
            });
        }
        out.push_str(&format!(" {}\n", size - row));
    }
    out.push_str(&labels);
    out
}

pub fn render_status(game: &Game) -> String {
    let captures = game.captures();
    let mut out = format!(
        "captures: X {}  O {}",
        captures.get(Stone::Black),
        captures.get(Stone::White)
    );
    if let Some(p) = game.last_move() {
        out.push_str(&format!("  last: {}", format_point(p, game.board().size())));
    }
    out.push('\n');
    match game.status() {
        GameStatus::Playing => {
            let who = game.current_player();
            let tag = if game.ai_color() == Some(who) {
                " (computer)"
            } else {
                ""
            };
            out.push_str(&format!("{who} to move{tag}"));
            if game.pass_count() == 1 {
                out.push_str(", opponent passed");
            }
        }
        GameStatus::Finished(score) => {
            out.push_str("game over\n");
            out.push_str(&render_score(score));
        }
    }
    out
}

pub fn render_score(score: &GameScore) -> String {
    let komi = |stone: Stone| {
        if stone == score.komi_color {
            format!(" + {} komi", score.komi)
        } else {
            String::new()
        }
    };
    format!(
        "Black: {} territory + {} captures{} = {}\n\
         White: {} territory + {} captures{} = {}\n\
         result: {}",
        score.black.territory,
        score.black.captures,
        komi(Stone::Black),
        score.black_total(),
        score.white.territory,
        score.white.captures,
        komi(Stone::White),
        score.white_total(),
        score.result(),
    )
}
