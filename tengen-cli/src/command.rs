//! Parsing of the line commands read from stdin.

use std::path::PathBuf;

use tengen_engine::Point;

/// Column letters as printed on the board; `I` is skipped.
const COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Point),
    Pass,
    Undo,
    Reset,
    Resize(u8),
    Score,
    Save(PathBuf),
    Load(PathBuf),
    Help,
    Quit,
}

impl Command {
    /// Commands that spend the player's turn and are subject to the clock.
    pub fn is_move(&self) -> bool {
        matches!(self, Command::Play(_) | Command::Pass)
    }
}

pub const HELP: &str = "\
commands:
  d4 | 3,5      place a stone (letter and row from the bottom, or col,row from the top-left)
  pass          pass the turn
  undo          take back the last move (and the reply, against the computer)
  reset         start over
  resize N      start over on an N x N board
  score         show the current score
  save PATH     write the game (.sgf or .json)
  load PATH     replay a saved game (.sgf or .json)
  help          show this text
  quit          leave";

pub fn parse(line: &str, size: u8) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".into());
    };
    let arg = words.next();

    let cmd = match (head.to_ascii_lowercase().as_str(), arg) {
        ("pass", None) => Command::Pass,
        ("undo", None) => Command::Undo,
        ("reset", None) => Command::Reset,
        ("score", None) => Command::Score,
        ("help" | "?", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        ("resize", Some(n)) => Command::Resize(
            n.parse()
                .map_err(|_| format!("not a board size: {n}"))?,
        ),
        ("save", Some(path)) => Command::Save(PathBuf::from(path)),
        ("load", Some(path)) => Command::Load(PathBuf::from(path)),
        (_, None) => Command::Play(parse_point(head, size)?),
        (_, Some(_)) => return Err(format!("unexpected argument to {head}")),
    };
    if words.next().is_some() {
        return Err(format!("too many arguments to {head}"));
    }
    Ok(cmd)
}

/// Accepts `d4` style (rows counted from the bottom) or `col,row`.
pub fn parse_point(s: &str, size: u8) -> Result<Point, String> {
    if let Some((x, y)) = s.split_once(',') {
        let x = x.trim().parse().map_err(|_| format!("bad column in {s}"))?;
        let y = y.trim().parse().map_err(|_| format!("bad row in {s}"))?;
        return Ok((x, y));
    }

    let mut chars = s.chars();
    let letter = chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .ok_or_else(|| format!("unknown command: {s}"))?;
    let col = COLUMNS
        .iter()
        .position(|&c| c as char == letter)
        .ok_or_else(|| format!("unknown command: {s}"))?;
    let number: u8 = chars
        .as_str()
        .parse()
        .map_err(|_| format!("unknown command: {s}"))?;
    if number == 0 || number > size {
        return Err(format!("row {number} is off the board"));
    }
    Ok((col as u8, size - number))
}

/// Board label for a point, the inverse of `parse_point`'s letter form.
pub fn format_point((col, row): Point, size: u8) -> String {
    let letter = COLUMNS.get(col as usize).map_or('?', |&c| c as char);
    format!("{letter}{}", size.saturating_sub(row))
}

pub fn column_label(col: u8) -> char {
    COLUMNS.get(col as usize).map_or('?', |&c| c as char)
}
