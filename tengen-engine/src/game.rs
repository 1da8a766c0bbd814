use rand::Rng;

use crate::Point;
use crate::ai::pick_move;
use crate::board::Board;
use crate::config::{GameSettings, validate_board_size};
use crate::error::GoError;
use crate::history::{Captures, History};
use crate::ko::KoGuard;
use crate::play::{Placement, try_play};
use crate::stone::Stone;
use crate::territory::{GameScore, score};
use crate::transcript::{Transcript, TranscriptMove};
use crate::turn::{Move, MoveRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameStatus {
    Playing,
    /// Both players passed in a row.
    Finished(GameScore),
}

impl GameStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStatus::Playing)
    }
}

/// What happened when a move was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Placed {
        point: Point,
        captured_positions: Vec<Point>,
    },
    Passed {
        /// Set when this pass ended the game.
        finished: Option<GameScore>,
    },
}

/// Moves applied and skipped while rebuilding a game from a transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    /// Indices into the transcript's move list.
    pub skipped: Vec<usize>,
}

/// A game in progress: the caller-owned board history, ko guard and status.
///
/// Nothing here is shared or global; every operation is a synchronous
/// computation over this value.
#[derive(Debug, Clone)]
pub struct Game {
    settings: GameSettings,
    history: History,
    ko: KoGuard,
    pass_count: usize,
    status: GameStatus,
}

impl Game {
    pub fn new(settings: GameSettings) -> Result<Self, GoError> {
        settings.validate()?;
        let history = History::new(Board::empty(settings.board_size));
        Ok(Game {
            settings,
            history,
            ko: KoGuard::cleared(),
            pass_count: 0,
            status: GameStatus::Playing,
        })
    }

    /// Rebuild a game from a transcript, taking its board size and komi.
    ///
    /// Each entry is played by its recorded player. Entries that are illegal
    /// or malformed are skipped and the rest are applied to the unchanged
    /// board.
    pub fn replay(
        settings: GameSettings,
        transcript: &Transcript,
    ) -> Result<(Self, ReplayReport), GoError> {
        let settings = GameSettings {
            board_size: transcript.board_size,
            komi: transcript.komi,
            ..settings
        };
        let mut game = Game::new(settings)?;
        let mut report = ReplayReport::default();

        for (i, entry) in transcript.moves.iter().enumerate() {
            let applied = match entry.to_move() {
                Some(Move::Pass) => {
                    game.record_pass(entry.player);
                    true
                }
                Some(Move::Play(point)) => game.apply_play(entry.player, point).is_ok(),
                None => false,
            };

            if applied {
                report.applied += 1;
            } else {
                tracing::warn!(index = i, player = %entry.player, x = entry.x, y = entry.y, "skipping unplayable transcript move");
                report.skipped.push(i);
            }
        }

        // A transcript that ends on two passes is a finished game.
        game.pass_count = game.history.trailing_passes();
        game.status = if game.pass_count >= 2 {
            GameStatus::Finished(game.score())
        } else {
            GameStatus::Playing
        };

        tracing::debug!(
            applied = report.applied,
            skipped = report.skipped.len(),
            "transcript replayed"
        );
        Ok((game, report))
    }

    // -- Accessors --

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ko_guard(&self) -> &KoGuard {
        &self.ko
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    pub fn current_player(&self) -> Stone {
        self.history.next_player()
    }

    pub fn last_move(&self) -> Option<Point> {
        self.history.last_play()
    }

    pub fn captures(&self) -> Captures {
        self.history.captures()
    }

    pub fn ai_color(&self) -> Option<Stone> {
        self.settings.ai_color()
    }

    /// Is it the automated player's turn in a running game?
    pub fn awaiting_ai(&self) -> bool {
        self.status.is_playing() && self.ai_color() == Some(self.current_player())
    }

    /// Whether the player to move may place a stone at `point` right now.
    pub fn is_legal(&self, point: Point) -> bool {
        self.status.is_playing()
            && !self.awaiting_ai()
            && try_play(self.board(), point, self.current_player(), &self.ko).is_ok()
    }

    /// Score the current board.
    pub fn score(&self) -> GameScore {
        score(
            self.board(),
            &self.captures(),
            self.settings.komi,
            self.settings.komi_color,
        )
    }

    // -- Game actions --

    /// Place a stone for the human player to move.
    pub fn place(&mut self, point: Point) -> Result<Outcome, GoError> {
        self.check_human_turn()?;
        self.apply_play(self.current_player(), point)
    }

    /// Pass for the human player to move.
    pub fn pass(&mut self) -> Result<Outcome, GoError> {
        self.check_human_turn()?;
        Ok(self.record_pass(self.current_player()))
    }

    /// The clock ran out: pass on behalf of whoever is to move.
    pub fn clock_expired(&mut self) -> Result<Outcome, GoError> {
        if !self.status.is_playing() {
            return Err(GoError::GameOver);
        }
        tracing::debug!(player = %self.current_player(), "clock expired");
        Ok(self.record_pass(self.current_player()))
    }

    /// Ask the automated player for a move without applying it.
    pub fn ai_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Move {
        pick_move(
            self.board(),
            self.current_player(),
            self.settings.difficulty,
            &self.ko,
            rng,
        )
    }

    /// Apply a move computed by `ai_move`. Fails if it is no longer the
    /// automated player's turn, so a stale result can simply be dropped.
    pub fn apply_ai_move(&mut self, mv: Move) -> Result<Outcome, GoError> {
        if !self.status.is_playing() {
            return Err(GoError::GameOver);
        }
        let stone = self.current_player();
        if self.ai_color() != Some(stone) {
            return Err(GoError::NotAutomatedTurn);
        }
        match mv {
            Move::Play(point) => self.apply_play(stone, point),
            Move::Pass => Ok(self.record_pass(stone)),
        }
    }

    /// Undo one request's worth of plies: one in local mode, two in ai mode.
    pub fn undo(&mut self) -> usize {
        self.undo_plies(self.settings.mode.undo_plies())
    }

    /// Undo up to `plies` plies. Returns how many were undone.
    ///
    /// Captures and the player to move are rederived from the remaining
    /// records. The ko guard is always cleared, since its earlier value
    /// cannot be recovered from the truncated tail.
    pub fn undo_plies(&mut self, plies: usize) -> usize {
        let undone = self.history.undo(plies);
        if undone > 0 {
            self.ko = KoGuard::cleared();
            self.pass_count = self.history.trailing_passes();
            self.status = GameStatus::Playing;
        }
        undone
    }

    /// Start over on an empty board with the same settings.
    pub fn reset(&mut self) {
        self.history = History::new(Board::empty(self.settings.board_size));
        self.ko = KoGuard::cleared();
        self.pass_count = 0;
        self.status = GameStatus::Playing;
    }

    /// Switch to a new board size and start over.
    pub fn resize(&mut self, size: u8) -> Result<(), GoError> {
        validate_board_size(size)?;
        self.settings.board_size = size;
        self.reset();
        Ok(())
    }

    pub fn to_transcript(&self) -> Transcript {
        Transcript {
            board_size: self.settings.board_size,
            komi: self.settings.komi,
            moves: self
                .history
                .records()
                .iter()
                .map(|r| TranscriptMove::new(r.stone, r.mv))
                .collect(),
        }
    }

    // -- Internal helpers --

    fn check_human_turn(&self) -> Result<(), GoError> {
        if !self.status.is_playing() {
            return Err(GoError::GameOver);
        }
        if self.awaiting_ai() {
            return Err(GoError::AwaitingAutomatedMove);
        }
        Ok(())
    }

    fn apply_play(&mut self, stone: Stone, point: Point) -> Result<Outcome, GoError> {
        let before = self.board().clone();
        let Placement {
            board,
            captured,
            captured_positions,
        } = try_play(&before, point, stone, &self.ko)?;

        self.ko = KoGuard::after_move(&before, captured);
        self.pass_count = 0;
        self.history.push(
            before,
            MoveRecord::play(stone, point, captured as u32, board),
        );
        tracing::debug!(%stone, ?point, captured, "stone placed");

        Ok(Outcome::Placed {
            point,
            captured_positions,
        })
    }

    fn record_pass(&mut self, stone: Stone) -> Outcome {
        let board = self.board().clone();
        self.history
            .push(board.clone(), MoveRecord::pass(stone, board));
        self.ko = KoGuard::cleared();
        self.pass_count += 1;

        if self.pass_count >= 2 {
            let final_score = self.score();
            self.status = GameStatus::Finished(final_score);
            tracing::debug!(result = %final_score.result(), "game finished");
            Outcome::Passed {
                finished: Some(final_score),
            }
        } else {
            Outcome::Passed { finished: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameMode;
    use crate::territory::Winner;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn local_game() -> Game {
        Game::new(GameSettings::default()).unwrap()
    }

    fn ai_game() -> Game {
        Game::new(GameSettings {
            mode: GameMode::Ai,
            ..GameSettings::default()
        })
        .unwrap()
    }

    // -- Initialization --

    #[test]
    fn starts_empty_with_black() {
        let game = local_game();
        assert!(game.board().is_empty());
        assert_eq!(game.board().size(), 9);
        assert_eq!(game.current_player(), Stone::Black);
        assert_eq!(game.status(), &GameStatus::Playing);
        assert_eq!(game.captures(), Captures::new());
    }

    #[test]
    fn rejects_invalid_settings() {
        let result = Game::new(GameSettings {
            board_size: 4,
            ..GameSettings::default()
        });
        assert!(matches!(result, Err(GoError::UnsupportedBoardSize(4))));
    }

    // -- Turn management --

    #[test]
    fn alternates_turns() {
        let mut game = local_game();
        game.place((2, 2)).unwrap();
        assert_eq!(game.current_player(), Stone::White);
        game.place((3, 3)).unwrap();
        assert_eq!(game.current_player(), Stone::Black);
        assert_eq!(game.last_move(), Some((3, 3)));
    }

    #[test]
    fn illegal_move_leaves_state_alone() {
        let mut game = local_game();
        game.place((2, 2)).unwrap();
        let err = game.place((2, 2)).unwrap_err();
        assert_eq!(err, GoError::Illegal(crate::IllegalMove::Occupied));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.current_player(), Stone::White);
    }

    #[test]
    fn capture_updates_totals() {
        let mut game = local_game();
        game.place((1, 2)).unwrap(); // B
        game.place((2, 2)).unwrap(); // W
        game.place((3, 2)).unwrap(); // B
        game.place((8, 8)).unwrap(); // W
        game.place((2, 1)).unwrap(); // B
        game.place((8, 7)).unwrap(); // W
        let outcome = game.place((2, 3)).unwrap(); // B captures

        assert_eq!(
            outcome,
            Outcome::Placed {
                point: (2, 3),
                captured_positions: vec![(2, 2)]
            }
        );
        assert_eq!(game.captures().black, 1);
        assert_eq!(game.board().get((2, 2)), None);
        assert!(game.ko_guard().is_set());
    }

    // -- Passing --

    #[test]
    fn single_pass_keeps_playing() {
        let mut game = local_game();
        game.place((4, 4)).unwrap();
        let outcome = game.pass().unwrap();
        assert_eq!(outcome, Outcome::Passed { finished: None });
        assert_eq!(game.pass_count(), 1);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.last_move(), None);
        assert!(game.status().is_playing());
    }

    #[test]
    fn two_passes_finish_and_score() {
        let mut game = local_game();
        game.place((4, 4)).unwrap();
        game.pass().unwrap();
        let outcome = game.pass().unwrap();

        let Outcome::Passed { finished: Some(score) } = outcome else {
            panic!("expected the game to finish");
        };
        // Black owns the whole board except its stone.
        assert_eq!(score.black.territory, 80);
        assert_eq!(score.winner, Winner::Black);
        assert_eq!(game.status(), &GameStatus::Finished(score));
        assert_eq!(game.place((0, 0)), Err(GoError::GameOver));
    }

    #[test]
    fn play_between_passes_resets_count() {
        let mut game = local_game();
        game.pass().unwrap();
        game.place((4, 4)).unwrap();
        assert_eq!(game.pass_count(), 0);
        game.pass().unwrap();
        assert!(game.status().is_playing());
    }

    #[test]
    fn clock_expiry_passes_for_player_to_move() {
        let mut game = ai_game();
        game.place((4, 4)).unwrap();
        assert!(game.awaiting_ai());
        game.clock_expired().unwrap();
        assert_eq!(game.history().records()[1].stone, Stone::White);
        assert_eq!(game.current_player(), Stone::Black);
    }

    // -- Undo --

    #[test]
    fn undo_in_local_mode_takes_one_ply() {
        let mut game = local_game();
        game.place((2, 2)).unwrap();
        let after_first = game.board().clone();
        game.place((3, 3)).unwrap();

        assert_eq!(game.undo(), 1);
        assert_eq!(game.board(), &after_first);
        assert_eq!(game.current_player(), Stone::White);
    }

    #[test]
    fn undo_in_ai_mode_takes_two_plies() {
        let mut game = ai_game();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        game.place((2, 2)).unwrap();
        let mv = game.ai_move(&mut rng);
        game.apply_ai_move(mv).unwrap();

        assert_eq!(game.undo(), 2);
        assert!(game.board().is_empty());
        assert_eq!(game.current_player(), Stone::Black);
    }

    #[test]
    fn undo_on_fresh_game_is_noop() {
        let mut game = local_game();
        assert_eq!(game.undo(), 0);
        assert!(game.board().is_empty());
    }

    #[test]
    fn undo_reopens_finished_game() {
        let mut game = local_game();
        game.pass().unwrap();
        game.pass().unwrap();
        assert!(!game.status().is_playing());

        game.undo();
        assert!(game.status().is_playing());
        assert_eq!(game.pass_count(), 1);
    }

    #[test]
    fn undo_does_not_restore_ko_guard() {
        let mut game = local_game();
        game.place((1, 2)).unwrap();
        game.place((2, 2)).unwrap();
        game.place((3, 2)).unwrap();
        game.place((8, 8)).unwrap();
        game.place((2, 1)).unwrap();
        game.place((8, 7)).unwrap();
        game.place((2, 3)).unwrap();
        assert!(game.ko_guard().is_set());

        // The retained tail ends on a single capture, but the guard stays cleared.
        game.place((7, 8)).unwrap();
        game.undo();
        assert_eq!(game.history().records().last().unwrap().captured, 1);
        assert!(!game.ko_guard().is_set());
    }

    // -- Automated player --

    #[test]
    fn human_cannot_move_on_ai_turn() {
        let mut game = ai_game();
        game.place((4, 4)).unwrap();
        assert_eq!(game.place((3, 3)), Err(GoError::AwaitingAutomatedMove));
        assert_eq!(game.pass(), Err(GoError::AwaitingAutomatedMove));
        assert!(!game.is_legal((3, 3)));
    }

    #[test]
    fn ai_move_is_not_applied_until_asked() {
        let mut game = ai_game();
        game.place((4, 4)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mv = game.ai_move(&mut rng);
        assert_eq!(game.history().len(), 1);

        game.apply_ai_move(mv).unwrap();
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.current_player(), Stone::Black);
    }

    #[test]
    fn stale_ai_move_is_rejected_after_reset() {
        let mut game = ai_game();
        game.place((4, 4)).unwrap();
        let mv = game.ai_move(&mut ChaCha8Rng::seed_from_u64(2));
        game.reset();
        assert!(game.apply_ai_move(mv).is_err());
        assert!(game.board().is_empty());
    }

    #[test]
    fn ai_plays_first_when_human_is_white() {
        let game = Game::new(GameSettings {
            mode: GameMode::Ai,
            human_color: Stone::White,
            ..GameSettings::default()
        })
        .unwrap();
        assert!(game.awaiting_ai());
    }

    // -- Reset and resize --

    #[test]
    fn resize_starts_new_board() {
        let mut game = local_game();
        game.place((2, 2)).unwrap();
        game.resize(13).unwrap();
        assert_eq!(game.board().size(), 13);
        assert!(game.history().is_empty());
        assert_eq!(game.resize(12), Err(GoError::UnsupportedBoardSize(12)));
        assert_eq!(game.board().size(), 13);
    }

    // -- Transcripts --

    #[test]
    fn transcript_round_trips_through_replay() {
        let mut game = local_game();
        game.place((2, 2)).unwrap();
        game.pass().unwrap();
        game.place((6, 6)).unwrap();

        let transcript = game.to_transcript();
        let (replayed, report) = Game::replay(GameSettings::default(), &transcript).unwrap();
        assert_eq!(report.applied, 3);
        assert!(report.skipped.is_empty());
        assert_eq!(replayed.board(), game.board());
        assert_eq!(replayed.current_player(), game.current_player());
    }

    #[test]
    fn replay_skips_illegal_entries() {
        let transcript = Transcript {
            board_size: 9,
            komi: 0.5,
            moves: vec![
                TranscriptMove::new(Stone::Black, Move::Play((4, 4))),
                TranscriptMove::new(Stone::White, Move::Play((4, 4))),
                TranscriptMove { player: Stone::White, x: 40, y: 2, is_pass: false },
                TranscriptMove::new(Stone::White, Move::Play((3, 3))),
            ],
        };
        let (game, report) = Game::replay(GameSettings::default(), &transcript).unwrap();
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped, vec![1, 2]);
        assert_eq!(game.board().get((3, 3)), Some(Stone::White));
        assert_eq!(game.settings().komi, 0.5);
    }

    #[test]
    fn replay_of_finished_game_is_finished() {
        let transcript = Transcript {
            board_size: 9,
            komi: 6.5,
            moves: vec![
                TranscriptMove::new(Stone::Black, Move::Play((4, 4))),
                TranscriptMove::new(Stone::White, Move::Pass),
                TranscriptMove::new(Stone::Black, Move::Pass),
            ],
        };
        let (game, _) = Game::replay(GameSettings::default(), &transcript).unwrap();
        assert!(matches!(game.status(), GameStatus::Finished(_)));
        assert_eq!(game.pass_count(), 2);
    }
}
