//! A small SGF (FF[4]) reader and writer covering what a transcript holds:
//! board size, komi and the main line of B/W moves.
//!
//! Only the first child is followed at every branch; other variations are
//! skipped. Unknown properties are ignored.

use crate::error::TranscriptError;
use crate::stone::Stone;

use super::{Transcript, TranscriptMove};

const DEFAULT_SIZE: u8 = 19;

struct Property {
    ident: String,
    values: Vec<String>,
    pos: usize,
}

type Node = Vec<Property>;

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> TranscriptError {
        TranscriptError::Sgf {
            pos: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, ch: u8) -> Result<(), TranscriptError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b) if b == ch => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(self.error(format!("expected '{}', found '{}'", ch as char, b as char))),
            None => Err(self.error(format!("expected '{}', found end of input", ch as char))),
        }
    }

    /// Nodes of the first game tree's main line: its own sequence, then the
    /// first variation at every branch. Later variations are skipped unread.
    /// Nesting is walked with a depth counter, not recursion.
    fn main_line(&mut self) -> Result<Vec<Node>, TranscriptError> {
        self.expect(b'(')?;
        let mut depth = 1usize;
        let mut nodes = Vec::new();
        loop {
            // GameTree = '(' Node+ GameTree* ')'
            let before = nodes.len();
            loop {
                self.skip_whitespace();
                if self.peek() != Some(b';') {
                    break;
                }
                nodes.push(self.node()?);
            }
            if nodes.len() == before {
                return Err(self.error("game tree has no nodes"));
            }

            self.skip_whitespace();
            if self.peek() == Some(b'(') {
                self.pos += 1;
                depth += 1;
                continue;
            }

            while depth > 0 {
                self.skip_whitespace();
                if self.peek() == Some(b'(') {
                    self.skip_tree()?;
                } else {
                    self.expect(b')')?;
                    depth -= 1;
                }
            }
            return Ok(nodes);
        }
    }

    /// Step over a whole game tree by bracket matching.
    fn skip_tree(&mut self) -> Result<(), TranscriptError> {
        self.expect(b'(')?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                None => return Err(self.error("unterminated game tree")),
                Some(b'[') => {
                    self.value()?;
                }
                Some(b) => {
                    self.pos += 1;
                    match b {
                        b'(' => depth += 1,
                        b')' => depth -= 1,
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn node(&mut self) -> Result<Node, TranscriptError> {
        self.expect(b';')?;
        let mut props = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b) if b.is_ascii_alphabetic() => props.push(self.property()?),
                _ => break,
            }
        }
        Ok(props)
    }

    fn property(&mut self) -> Result<Property, TranscriptError> {
        let pos = self.pos;
        // FF[3] and older allow lowercase letters inside identifiers; only
        // the uppercase ones name the property.
        let mut ident = String::new();
        while let Some(b) = self.peek().filter(u8::is_ascii_alphabetic) {
            if b.is_ascii_uppercase() {
                ident.push(b as char);
            }
            self.pos += 1;
        }
        if ident.is_empty() {
            return Err(self.error("property identifier has no uppercase letter"));
        }

        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'[') {
                break;
            }
            values.push(self.value()?);
        }
        if values.is_empty() {
            return Err(self.error(format!("property {ident} has no value")));
        }
        Ok(Property { ident, values, pos })
    }

    fn value(&mut self) -> Result<String, TranscriptError> {
        self.expect(b'[')?;
        let mut value = Vec::new();
        loop {
            match self.advance() {
                None => return Err(self.error("unterminated property value")),
                Some(b'\\') => match self.advance() {
                    None => return Err(self.error("unterminated property value")),
                    // Soft line break: dropped along with its pair.
                    Some(b'\n') => {
                        if self.peek() == Some(b'\r') {
                            self.pos += 1;
                        }
                    }
                    Some(b'\r') => {
                        if self.peek() == Some(b'\n') {
                            self.pos += 1;
                        }
                    }
                    Some(ch) => value.push(ch),
                },
                Some(b']') => break,
                Some(ch) => value.push(ch),
            }
        }
        Ok(String::from_utf8_lossy(&value).into_owned())
    }
}

/// Read the first game tree of an SGF collection.
pub fn parse(input: &str) -> Result<Transcript, TranscriptError> {
    let mut parser = Parser::new(input);
    let main_line = parser.main_line()?;

    let mut board_size = DEFAULT_SIZE;
    let mut komi = 0.0;
    let mut moves = Vec::new();

    // Root properties come first, so SZ is known before any move is read.
    for node in &main_line {
        for prop in node {
            let value = prop.values[0].trim();
            match prop.ident.as_str() {
                "SZ" => board_size = parse_size(value, prop.pos)?,
                "KM" => {
                    komi = value.parse().map_err(|_| TranscriptError::Sgf {
                        pos: prop.pos,
                        reason: format!("invalid komi {value:?}"),
                    })?
                }
                "B" => moves.push(parse_move(Stone::Black, value, board_size)),
                "W" => moves.push(parse_move(Stone::White, value, board_size)),
                _ => {}
            }
        }
    }

    tracing::debug!(board_size, komi, moves = moves.len(), "SGF transcript read");
    Ok(Transcript {
        board_size,
        komi,
        moves,
    })
}

fn parse_size(value: &str, pos: usize) -> Result<u8, TranscriptError> {
    let malformed = || TranscriptError::Sgf {
        pos,
        reason: format!("invalid board size {value:?}"),
    };
    match value.split_once(':') {
        Some((cols, rows)) => {
            let cols: u8 = cols.trim().parse().map_err(|_| malformed())?;
            let rows: u8 = rows.trim().parse().map_err(|_| malformed())?;
            if cols != rows {
                return Err(TranscriptError::NonSquareBoard(cols, rows));
            }
            Ok(cols)
        }
        None => value.parse().map_err(|_| malformed()),
    }
}

/// Anything that is not a pass or two lowercase letters becomes an entry
/// that will fail to replay.
fn parse_move(player: Stone, value: &str, board_size: u8) -> TranscriptMove {
    let pass = TranscriptMove {
        player,
        x: -1,
        y: -1,
        is_pass: true,
    };
    if value.is_empty() || (value == "tt" && board_size <= 19) {
        return pass;
    }
    match value.as_bytes() {
        &[c, r] if c.is_ascii_lowercase() && r.is_ascii_lowercase() => TranscriptMove {
            player,
            x: (c - b'a') as i32,
            y: (r - b'a') as i32,
            is_pass: false,
        },
        _ => {
            tracing::warn!(%player, value, "malformed SGF move");
            TranscriptMove {
                is_pass: false,
                ..pass
            }
        }
    }
}

/// Write a transcript as a single-variation SGF game. Entries that name no
/// representable point are left out.
pub fn serialize(transcript: &Transcript) -> String {
    let mut out = format!(
        "(;GM[1]FF[4]CA[UTF-8]SZ[{}]KM[{}]",
        transcript.board_size, transcript.komi
    );
    for entry in &transcript.moves {
        let Some(mv) = entry.to_move() else {
            continue;
        };
        let coord = match mv.point() {
            None => String::new(),
            Some((x, y)) if x < 26 && y < 26 => {
                format!("{}{}", (b'a' + x) as char, (b'a' + y) as char)
            }
            Some(_) => continue,
        };
        out.push_str(&format!(";{}[{coord}]", entry.player.letter()));
    }
    out.push(')');
    out
}
