use std::process::ExitCode;

use clap::{Parser, Subcommand};
use horsey_position::game::{action::Move, fen::STARTING_FEN, position::Position};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows a position (DEFAULT)
    Show {
        /// Position as a FEN string.
        #[arg(short, long, default_value = STARTING_FEN)]
        fen: String,
    },
    /// Plays a sequence of moves from a position and shows the result
    Play {
        /// Starting position as a FEN string.
        #[arg(short, long, default_value = STARTING_FEN)]
        fen: String,
        /// Only prints the resulting FEN string
        #[arg(long)]
        no_board: bool,
        /// Moves in coordinate notation, e.g. e2e4 or e7e8q
        moves: Vec<String>,
    },
}

fn parse_position(fen: &str) -> Option<Position> {
    match fen.parse::<Position>() {
        Ok(position) => Some(position),
        Err(e) => {
            log::error!("Invalid FEN {fen:?}: {e}");
            None
        }
    }
}

pub fn main() -> ExitCode {
    let args = Arguments::parse();
    env_logger::init();

    let command = args.command.unwrap_or(Command::Show {
        fen: STARTING_FEN.to_string(),
    });
    match command {
        Command::Show { fen } => {
            let Some(position) = parse_position(&fen) else {
                return ExitCode::FAILURE;
            };
            println!("{position}");
        }
        Command::Play {
            fen,
            no_board,
            moves,
        } => {
            let Some(mut position) = parse_position(&fen) else {
                return ExitCode::FAILURE;
            };

            let mut played = 0;
            for (i, s) in moves.iter().enumerate() {
                let mv: Move = match s.parse() {
                    Ok(mv) => mv,
                    Err(e) => {
                        log::error!("Invalid move #{} {s:?}: {e}", i + 1);
                        return ExitCode::FAILURE;
                    }
                };
                if position.seventy_five_move_rule() {
                    log::info!("Game already drawn by the seventy-five-move rule, ignoring {mv}");
                    break;
                }
                position.apply(mv);
                played += 1;
            }
            log::info!("Played {played} of {} moves", moves.len());

            if no_board {
                println!("{}", position.fen());
            } else {
                println!("{position}");
            }
            if position.seventy_five_move_rule() {
                println!("Draw by the seventy-five-move rule");
            } else if position.fifty_move_rule_claimable() {
                println!("Draw claimable under the fifty-move rule");
            }
        }
    }
    ExitCode::SUCCESS
}
