use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use minegrid_core::{
    Board, BoardConfig, Coord, DensityGenerator, MarkOutcome, RevealOutcome,
};

use crate::command::{Command, HELP};
use crate::render::render_board;

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows
    #[arg(short = 'H', long, default_value_t = 10)]
    height: Coord,

    /// Number of columns
    #[arg(short = 'W', long, default_value_t = 10)]
    width: Coord,

    /// Chance for each cell to be a mine, in percent (1-99)
    #[arg(short, long, default_value_t = 10)]
    density: u8,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = BoardConfig::new(args.height, args.width, args.density)
        .context("Could not set up the board")?;
    let seed = args
        .seed
        .unwrap_or_else(|| DensityGenerator::from_entropy().seed());
    log::debug!("seed: {}", seed);

    let board = Board::generate_seeded(config, seed);
    play(board, io::stdin().lock(), io::stdout().lock())
}

/// Runs the command loop until the game ends, the player quits or input runs out.
fn play(mut board: Board, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    writeln!(output, "{}\n\n{}", HELP, render_board(&board))?;

    for line in input.lines() {
        let line = line.context("Could not read input")?;

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        log::trace!("command: {:?}", command);

        match command {
            Command::Reveal(coords) => match board.reveal(coords) {
                Ok(report) => {
                    writeln!(output, "{}", render_board(&board))?;
                    match report.outcome {
                        RevealOutcome::Won => {
                            writeln!(output, "Congratulations! You won!")?;
                            break;
                        }
                        RevealOutcome::Lost => {
                            writeln!(output, "Boom! Game over!")?;
                            break;
                        }
                        RevealOutcome::NoChange | RevealOutcome::Continue => {}
                    }
                }
                Err(err) => writeln!(output, "{err}")?,
            },
            Command::Flag(coords) => match board.toggle_flag(coords) {
                Ok(MarkOutcome::Changed) => writeln!(output, "{}", render_board(&board))?,
                Ok(MarkOutcome::NoChange) => {
                    writeln!(output, "Revealed cells cannot be flagged")?
                }
                Err(err) => writeln!(output, "{err}")?,
            },
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
        }
    }

    Ok(())
}
