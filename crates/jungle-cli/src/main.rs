//! Jungle - play Dou Shou Qi in the terminal.
//!
//! Reads commands from stdin, one per line, and prints the board and the
//! result of each move. Both players share the same prompt.

mod command;
mod render;

use anyhow::Context;
use clap::Parser;
use command::{Command, HELP};
use jungle_engine::{EngineConfig, GameSession};
use render::{describe, BoardView};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Jungle - play Dou Shou Qi in the terminal.
#[derive(Parser)]
#[command(name = "jungle")]
#[command(about = "Play Jungle (Dou Shou Qi) in the terminal")]
struct Args {
    /// Engine config file; defaults apply if it does not exist
    #[arg(long, default_value = "jungle.toml")]
    config: PathBuf,

    /// Log engine decisions at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Print move outcomes as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    tracing::info!("Config: {:?}", args.config);

    let mut game = GameSession::from_config(&config).context("setting up game")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut game, stdin.lock(), stdout.lock(), args.json)
}

/// Runs the command loop until `quit` or end of input.
fn run(
    game: &mut GameSession,
    input: impl BufRead,
    mut out: impl Write,
    json: bool,
) -> anyhow::Result<()> {
    write!(out, "{}", BoardView::new(game))?;
    prompt(game, &mut out)?;

    for line in input.lines() {
        let command = match Command::parse(&line?) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                prompt(game, &mut out)?;
                continue;
            }
        };

        match command {
            Command::Select(cell) => match game.select_piece_at(cell) {
                Ok(destinations) => {
                    write!(out, "{}", BoardView::new(game))?;
                    writeln!(out, "destinations: {:?}", destinations.to_indices())?;
                }
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Command::Move(cell) => match game.select_cell(cell) {
                Ok(outcome) => {
                    if json {
                        writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
                    } else {
                        writeln!(out, "{}", describe(game, &outcome))?;
                    }
                    if outcome.moved {
                        write!(out, "{}", BoardView::new(game))?;
                    }
                    if let Some(winner) = outcome.winner {
                        writeln!(out, "{} wins. Type 'reset' to play again.", winner)?;
                    }
                }
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Command::Board => write!(out, "{}", BoardView::new(game))?,
            Command::Reset => {
                game.reset_game();
                write!(out, "{}", BoardView::new(game))?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(text) => {
                writeln!(out, "unknown command '{}', try 'help'", text)?;
            }
        }
        prompt(game, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn prompt(game: &GameSession, out: &mut impl Write) -> io::Result<()> {
    if game.is_game_over() {
        write!(out, "> ")?;
    } else {
        write!(out, "{}> ", game.active_player())?;
    }
    out.flush()
}
