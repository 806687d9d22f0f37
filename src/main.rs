//! Headless runner (default binary).
//!
//! Plays one seeded session at a fixed 60 Hz timestep with a scripted player
//! (random rotation and column, then hard drop) and reports the result. There
//! is no renderer; everything observable goes through `tracing`.

use anyhow::{anyhow, bail, Result};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use tetrino::core::{Game, GameConfig, PlayField, SimpleRng};
use tetrino::types::{GamePhase, MoveType, PieceSlot, MAX_PIECE_DIM, SECONDS_PER_FRAME};

const USAGE: &str = "usage: tetrino [--seed N] [--start-level N] [--frames N] \
[--width N] [--height N] [--verbose]";

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    seed: u32,
    frames: u64,
    game: GameConfig,
    verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            frames: 60 * 60 * 10,
            game: GameConfig::default(),
            verbose: false,
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T> {
    let v = args
        .get(i)
        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

/// Parse command line flags. `Ok(None)` means usage was requested.
fn parse_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                config.seed = parse_value(args, i, "--seed")?;
            }
            "--start-level" => {
                i += 1;
                config.game.start_level = parse_value(args, i, "--start-level")?;
            }
            "--frames" => {
                i += 1;
                config.frames = parse_value(args, i, "--frames")?;
            }
            "--width" => {
                i += 1;
                config.game.width = parse_value(args, i, "--width")?;
            }
            "--height" => {
                i += 1;
                config.game.height = parse_value(args, i, "--height")?;
            }
            "--verbose" | "-v" => config.verbose = true,
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {}\n{}", other, USAGE),
        }
        i += 1;
    }

    // Every piece must fit at its spawn point.
    if config.game.width < MAX_PIECE_DIM || config.game.height < MAX_PIECE_DIM {
        bail!(
            "board must be at least {}x{}, got {}x{}",
            MAX_PIECE_DIM,
            MAX_PIECE_DIM,
            config.game.width,
            config.game.height
        );
    }
    Ok(Some(config))
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

/// Placement the player is steering the current piece towards
#[derive(Debug, Clone, Copy)]
struct Plan {
    target_col: i32,
    turns: u32,
    last_col: Option<i32>,
}

/// Picks a random rotation and column for each piece, then hard drops
struct ScriptedPlayer {
    rng: SimpleRng,
    plan: Option<Plan>,
}

impl ScriptedPlayer {
    fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed.wrapping_add(0x9e37_79b9)),
            plan: None,
        }
    }

    fn next_move(&mut self, field: &dyn PlayField) -> MoveType {
        match field.phase() {
            GamePhase::Start => return MoveType::Confirm,
            GamePhase::LineClear | GamePhase::GameOver => return MoveType::None,
            GamePhase::Play => {}
        }
        let Some(active) = field.piece(PieceSlot::Active) else {
            return MoveType::None;
        };

        if self.plan.is_none() {
            let width = field.board().width() as u32;
            self.plan = Some(Plan {
                target_col: self.rng.next_range(width) as i32 - 1,
                turns: self.rng.next_range(4),
                last_col: None,
            });
        }
        let Some(plan) = self.plan.as_mut() else {
            return MoveType::None;
        };

        if plan.turns > 0 {
            plan.turns -= 1;
            return MoveType::RotateCw;
        }

        let col = active.offset_col;
        // Reached the target, or the last move was blocked.
        if col == plan.target_col || plan.last_col == Some(col) {
            self.plan = None;
            return MoveType::HardDrop;
        }
        plan.last_col = Some(col);
        if col < plan.target_col {
            MoveType::Right
        } else {
            MoveType::Left
        }
    }
}

fn run(config: &RunConfig) -> Game {
    let mut game = Game::with_seed(config.game, config.seed);
    let mut player = ScriptedPlayer::new(config.seed);

    info!(
        seed = config.seed,
        start_level = config.game.start_level,
        width = config.game.width,
        height = config.game.height,
        "session start"
    );

    for frame in 0..config.frames {
        let now = frame as f64 * SECONDS_PER_FRAME;
        let input = player.next_move(&game);
        game.update(input, now);

        if game.phase() == GamePhase::GameOver {
            info!(frame, "game over");
            break;
        }
    }
    game
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    init_logging(config.verbose);

    let game = run(&config);
    let progress = game.progress();
    info!(
        phase = game.phase().as_str(),
        points = progress.points,
        level = progress.level,
        lines = progress.cleared_line_count,
        seconds = game.time_duration(),
        "session end"
    );
    Ok(())
}
