//! Headless autoplay runner (default binary).
//!
//! Plays a full session with the move-finding AI, printing the event stream
//! either as human-readable lines or as JSON (one object per line).

use std::fs;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use candy_crunch::ai::{find_move, Difficulty};
use candy_crunch::core::GameState;
use candy_crunch::events::GameEvent;
use candy_crunch::save::{self, save_session};
use candy_crunch::types::GameMode;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    seed: u32,
    mode: GameMode,
    target: Option<u32>,
    moves: Option<u32>,
    difficulty: Difficulty,
    json: bool,
    load: Option<String>,
    save: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            mode: GameMode::Classic,
            target: None,
            moves: None,
            difficulty: Difficulty::Hard,
            json: false,
            load: None,
            save: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--mode" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --mode"))?;
                config.mode = match v.as_str() {
                    "classic" => GameMode::Classic,
                    "timed" => GameMode::Timed,
                    other => return Err(anyhow!("unknown --mode value: {}", other)),
                };
            }
            "--target" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --target"))?;
                config.target = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --target value: {}", v))?,
                );
            }
            "--moves" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --moves"))?;
                config.moves = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --moves value: {}", v))?,
                );
            }
            "--difficulty" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --difficulty"))?;
                config.difficulty = match v.as_str() {
                    "easy" => Difficulty::Easy,
                    "medium" => Difficulty::Medium,
                    "hard" => Difficulty::Hard,
                    other => return Err(anyhow!("unknown --difficulty value: {}", other)),
                };
            }
            "--json" => {
                config.json = true;
            }
            "--load" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --load"))?;
                config.load = Some(v.clone());
            }
            "--save" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --save"))?;
                config.save = Some(v.clone());
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn print_events(state: &mut GameState, json: bool) -> Result<()> {
    for event in state.drain_events() {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            match event {
                GameEvent::Selected { pos } => println!("selected {},{}", pos.row, pos.col),
                GameEvent::Deselected => println!("deselected"),
                GameEvent::InvalidMove => println!("invalid move"),
                GameEvent::Match { positions } => println!("match of {}", positions.len()),
                GameEvent::Remove {
                    positions,
                    score_delta,
                } => println!("removed {} for {}", positions.len(), score_delta),
                GameEvent::Collapse => println!("collapse"),
                GameEvent::Stable => println!("stable"),
                GameEvent::Win => println!("win"),
                GameEvent::Lose => println!("lose"),
                GameEvent::NoMoves => println!("no moves left"),
            }
        }
    }
    Ok(())
}

fn run(config: &RunConfig) -> Result<()> {
    let mut state = GameState::with_mode(config.seed, config.mode);
    if let Some(path) = &config.load {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
        let saved = save::load_from_str(&text).with_context(|| format!("loading {}", path))?;
        state.restore(saved.board, saved.score);
    }
    if let Some(target) = config.target {
        state.set_target_score(target);
    }
    if let Some(moves) = config.moves {
        state.set_moves_left(moves);
    }

    info!(
        seed = config.seed,
        mode = ?config.mode,
        difficulty = ?config.difficulty,
        "session start"
    );

    while !state.game_over() {
        let mv = {
            let (board, rng) = state.board_and_rng_mut();
            find_move(board, rng, config.difficulty)
        };
        let Some((a, b)) = mv else {
            // The session notices dead boards itself on the next swap
            // attempt; with no move to make, just stop here.
            break;
        };

        state.select(a.row as i16, a.col as i16);
        state.select(b.row as i16, b.col as i16);
        print_events(&mut state, config.json)?;

        if config.mode == GameMode::Timed {
            state.tick_time(1);
            print_events(&mut state, config.json)?;
        }
    }
    print_events(&mut state, config.json)?;

    println!(
        "final score {} ({})",
        state.score(),
        if state.game_won() { "won" } else { "lost" }
    );

    if let Some(path) = &config.save {
        let text = save_session(&state).context("serializing the session")?;
        fs::write(path, text).with_context(|| format!("writing {}", path))?;
        info!(%path, "session saved");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    run(&config)
}
