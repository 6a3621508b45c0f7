//! Pawnboard CLI - Command-line interface
//!
//! Commands:
//! - show: Print a board
//! - moves: List legal destinations for a pawn
//! - apply: Apply a single move
//! - playout: Play random legal moves

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pawnboard_core::{allowed_moves, move_pawn, render, Board, BoardError, Position};

mod playout;

#[derive(Parser)]
#[command(name = "pawnboard")]
#[command(about = "Pawn board rule engine driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board
    Show {
        /// Board JSON file (defaults to the standard 8x8 layout)
        #[arg(long, value_name = "FILE")]
        board: Option<PathBuf>,
    },
    /// List legal destinations for a pawn
    Moves {
        #[arg(long, value_name = "FILE")]
        board: Option<PathBuf>,
        /// Pawn id, e.g. L9
        #[arg(long)]
        pawn: String,
    },
    /// Apply a single move and print the resulting board
    Apply {
        #[arg(long, value_name = "FILE")]
        board: Option<PathBuf>,
        /// Pawn id, e.g. L9
        #[arg(long)]
        pawn: String,
        /// Destination row
        #[arg(long)]
        row: i16,
        /// Destination column
        #[arg(long)]
        col: i16,
        /// Write the resulting board as JSON
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Play random legal moves until one side has none left
    Playout(playout::PlayoutArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { board } => {
            let board = load_board(board.as_deref())?;
            print!("{}", render(&board));
            Ok(())
        }
        Commands::Moves { board, pawn } => {
            let board = load_board(board.as_deref())?;
            run_moves(&board, &pawn)
        }
        Commands::Apply {
            board,
            pawn,
            row,
            col,
            output,
        } => {
            let board = load_board(board.as_deref())?;
            run_apply(&board, &pawn, Position::new(row, col), output.as_deref())
        }
        Commands::Playout(args) => {
            let board = load_board(args.board.as_deref())?;
            playout::run(board, &args)
        }
    }
}

/// Load a board from JSON, or fall back to the standard layout
fn load_board(path: Option<&std::path::Path>) -> Result<Board> {
    match path {
        Some(path) => Board::load(path)
            .with_context(|| format!("Failed to load board: {}", path.display())),
        None => Ok(Board::standard()),
    }
}

fn run_moves(board: &Board, id: &str) -> Result<()> {
    let pawn = board
        .pawn(id)
        .ok_or(BoardError::PawnNotFound(id.to_string()))?;

    let moves = allowed_moves(pawn, board);
    if moves.is_empty() {
        println!("{} has no legal moves", id);
    } else {
        for mv in moves {
            println!("{}", mv);
        }
    }
    Ok(())
}

fn run_apply(
    board: &Board,
    id: &str,
    target: Position,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let before = board.pawn_count();
    let outcome = move_pawn(board, id, target)?;

    tracing::info!(
        "Moved {} to {}{}",
        id,
        target,
        if outcome.board.pawn_count() < before {
            " (capture)"
        } else {
            ""
        }
    );

    print!("{}", render(&outcome.board));

    if let Some(path) = output {
        outcome
            .board
            .save(path)
            .with_context(|| format!("Failed to save board: {}", path.display()))?;
    }

    Ok(())
}
