//! Terminal front end for the tengen Go engine.
//!
//! Plays a game on stdin/stdout, either between two people sharing the
//! terminal or against the built-in automated player.

mod command;
mod render;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tengen_engine::config::STANDARD_SIZES;
use tengen_engine::{
    Difficulty, Game, GameMode, GameSettings, GoError, Outcome, Stone, Transcript,
};

use command::Command;

#[derive(Parser, Debug)]
#[command(name = "tengen", about = "Play Go in the terminal", version)]
struct Args {
    /// Board size (odd, 5 to 25)
    #[arg(short, long)]
    size: Option<u8>,

    /// Points added to the komi color's score
    #[arg(short, long)]
    komi: Option<f64>,

    /// `local` for two players, `ai` to play the computer
    #[arg(short, long)]
    mode: Option<GameMode>,

    /// Strength of the computer player: easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Your color against the computer
    #[arg(long)]
    human: Option<Stone>,

    /// Seconds allowed per move; 0 disables the clock
    #[arg(short, long)]
    time_per_move: Option<u32>,

    /// Seed for the computer player's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay a saved game (.json or .sgf) before starting
    #[arg(short, long)]
    load: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> Result<GameSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                GameSettings::from_json(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GameSettings::default(),
        };

        if let Some(size) = self.size {
            settings.board_size = size;
        }
        if let Some(komi) = self.komi {
            settings.komi = komi;
        }
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty;
        }
        if let Some(human) = self.human {
            settings.human_color = human;
        }
        if let Some(secs) = self.time_per_move {
            settings.time_per_move = secs;
        }
        settings.validate().context("invalid settings")?;
        Ok(settings)
    }
}

struct Session {
    game: Game,
    rng: ChaCha8Rng,
}

impl Session {
    fn clock(&self) -> Option<Duration> {
        match self.game.settings().time_per_move {
            0 => None,
            secs => Some(Duration::from_secs(secs.into())),
        }
    }

    /// Let the computer answer while it is its turn.
    fn ai_reply(&mut self) -> Result<()> {
        if !self.game.awaiting_ai() {
            return Ok(());
        }
        let mv = self.game.ai_move(&mut self.rng);
        let outcome = self
            .game
            .apply_ai_move(mv)
            .context("applying the computer's move")?;
        let size = self.game.board().size();
        match &outcome {
            Outcome::Placed { point, .. } => {
                println!("computer plays {}", command::format_point(*point, size))
            }
            Outcome::Passed { .. } => println!("computer passes"),
        }
        report(&outcome);
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let transcript = self.game.to_transcript();
        let text = if is_sgf(path) {
            transcript.to_sgf()
        } else {
            transcript.to_json()?
        };
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), moves = transcript.moves.len(), "game saved");
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let transcript = if is_sgf(path) {
            Transcript::from_sgf(&text)
        } else {
            Transcript::from_json(&text)
        }
        .with_context(|| format!("parsing {}", path.display()))?;

        let (game, replay) = Game::replay(self.game.settings().clone(), &transcript)
            .with_context(|| format!("replaying {}", path.display()))?;
        self.game = game;
        if !replay.skipped.is_empty() {
            println!(
                "skipped {} unplayable moves (at {:?})",
                replay.skipped.len(),
                replay.skipped
            );
        }
        tracing::info!(
            path = %path.display(),
            applied = replay.applied,
            skipped = replay.skipped.len(),
            "game loaded"
        );
        Ok(())
    }

    /// Run one command. Returns `false` when the player wants to leave.
    fn execute(&mut self, cmd: Command, late: bool) -> Result<bool> {
        if late && cmd.is_move() {
            println!("time is up, your move was not played");
            let outcome = self.game.clock_expired()?;
            report(&outcome);
            self.ai_reply()?;
            return Ok(true);
        }

        match cmd {
            Command::Play(point) => match self.game.place(point) {
                Ok(outcome) => {
                    report(&outcome);
                    self.ai_reply()?;
                }
                Err(e) => println!("{e}"),
            },
            Command::Pass => match self.game.pass() {
                Ok(outcome) => {
                    report(&outcome);
                    self.ai_reply()?;
                }
                Err(e) => println!("{e}"),
            },
            Command::Undo => {
                if self.game.undo() == 0 {
                    println!("nothing to undo");
                }
                self.ai_reply()?;
            }
            Command::Reset => {
                self.game.reset();
                self.ai_reply()?;
            }
            Command::Resize(size) => match self.game.resize(size) {
                Ok(()) => {
                    if !STANDARD_SIZES.contains(&size) {
                        tracing::info!(size, "playing on a non-standard board size");
                    }
                    self.ai_reply()?;
                }
                Err(e) => println!("{e}"),
            },
            Command::Score => println!("{}", render::render_score(&self.game.score())),
            Command::Save(path) => match self.save(&path) {
                Ok(()) => println!("saved to {}", path.display()),
                Err(e) => println!("{e:#}"),
            },
            Command::Load(path) => match self.load(&path) {
                Ok(()) => self.ai_reply()?,
                Err(e) => println!("{e:#}"),
            },
            Command::Help => println!("{}", command::HELP),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Placed {
            captured_positions, ..
        } if !captured_positions.is_empty() => {
            println!("captured {}", captured_positions.len());
        }
        Outcome::Passed {
            finished: Some(score),
        } => {
            println!("both players passed, game over");
            println!("{}", render::render_score(score));
        }
        _ => {}
    }
}

fn is_sgf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sgf"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tengen=info,tengen_engine=info".into()),
        )
        .init();

    let args = Args::parse();
    let settings = args.settings()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(
        size = settings.board_size,
        mode = %settings.mode,
        difficulty = %settings.difficulty,
        seed,
        "starting game"
    );

    let mut session = Session {
        game: Game::new(settings).context("creating game")?,
        rng: ChaCha8Rng::seed_from_u64(seed),
    };
    if let Some(path) = &args.load {
        session.load(path)?;
    }
    session.ai_reply()?;

    println!("type `help` for commands");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("{}", render::render_board(&session.game));
        println!("{}", render::render_status(&session.game));
        print!("> ");
        io::stdout().flush().context("flushing stdout")?;

        let asked = Instant::now();
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let late = session
            .clock()
            .is_some_and(|limit| asked.elapsed() > limit);

        let size = session.game.board().size();
        let cmd = match command::parse(&line, size) {
            Ok(cmd) => cmd,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        match session.execute(cmd, late) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => match e.downcast_ref::<GoError>() {
                Some(GoError::GameOver) => println!("the game is over; `undo` or `reset` to continue"),
                _ => return Err(e),
            },
        }
    }
    Ok(())
}
