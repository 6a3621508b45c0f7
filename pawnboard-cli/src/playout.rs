//! Playout command - play random legal moves until one side runs dry

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use pawnboard_core::{allowed_moves, move_pawn, render, Board, Color, PawnId, Position};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayoutArgs {
    /// Board JSON file (defaults to the standard 8x8 layout)
    #[arg(long, value_name = "FILE")]
    pub board: Option<PathBuf>,

    /// RNG seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many half-moves
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of a finished playout
#[derive(Clone, Debug, serde::Serialize)]
struct PlayoutReport {
    moves_played: usize,
    captures: usize,
    light_pawns: usize,
    dark_pawns: usize,
    stalled_color: Option<String>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run playout command: alternate colors from Light, each half-move picking
/// uniformly among that color's legal moves, until a side has none or the
/// move cap is reached.
pub fn run(board: Board, args: &PlayoutArgs) -> Result<()> {
    let mut rng = create_rng(args.seed);

    tracing::info!(
        "Starting playout: {} pawns, max {} half-moves",
        board.pawn_count(),
        args.max_moves
    );

    let (final_board, report) = play(board, args.max_moves, &mut rng);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&final_board));
        print_text_report(&report);
    }

    Ok(())
}

// ============================================================================
// PLAYOUT LOOP
// ============================================================================

fn play<R: Rng>(board: Board, max_moves: usize, rng: &mut R) -> (Board, PlayoutReport) {
    let mut board = board;
    let mut to_move = Color::Light;
    let mut moves_played = 0;
    let mut captures = 0;
    let mut stalled = None;

    while moves_played < max_moves {
        let candidates = collect_moves(&board, to_move);
        if candidates.is_empty() {
            stalled = Some(to_move);
            break;
        }

        let (id, target) = &candidates[rng.gen_range(0..candidates.len())];
        let before = board.pawn_count();
        let outcome = move_pawn(&board, id, *target)
            .expect("collected moves are legal for the board they came from");

        if outcome.board.pawn_count() < before {
            captures += 1;
        }

        board = outcome.board;
        moves_played += 1;
        to_move = to_move.opponent();
    }

    let report = PlayoutReport {
        moves_played,
        captures,
        light_pawns: board.pawns().filter(|p| p.color == Color::Light).count(),
        dark_pawns: board.pawns().filter(|p| p.color == Color::Dark).count(),
        stalled_color: stalled.map(|c| format!("{:?}", c)),
    };

    (board, report)
}

/// All legal (pawn, destination) pairs for one color, sorted by pawn id so
/// a seeded playout is reproducible.
fn collect_moves(board: &Board, color: Color) -> Vec<(PawnId, Position)> {
    let mut candidates: Vec<(PawnId, Position)> = board
        .pawns()
        .filter(|p| p.color == color)
        .flat_map(|p| {
            allowed_moves(p, board)
                .into_iter()
                .map(|target| (p.id.clone(), target))
        })
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    candidates
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Create RNG from seed or entropy
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_text_report(report: &PlayoutReport) {
    println!("\n=== Playout Report ===");
    println!("Half-moves:  {}", report.moves_played);
    println!("Captures:    {}", report.captures);
    println!("Light pawns: {}", report.light_pawns);
    println!("Dark pawns:  {}", report.dark_pawns);
    if let Some(color) = &report.stalled_color {
        println!("{} ran out of moves", color);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_moves_standard_board() {
        let board = Board::standard();
        // Row-0 pawns are boxed in; each of the 8 row-1 pawns has two
        // forward destinations.
        let light = collect_moves(&board, Color::Light);
        assert_eq!(light.len(), 16);
        assert!(light.iter().all(|(id, _)| id.starts_with('L')));

        let dark = collect_moves(&board, Color::Dark);
        assert_eq!(dark.len(), 16);
    }

    #[test]
    fn test_collect_moves_sorted() {
        let board = Board::standard();
        let moves = collect_moves(&board, Color::Light);
        let ids: Vec<_> = moves.iter().map(|(id, _)| id.clone()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_playout_deterministic_with_seed() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));

        let (board1, report1) = play(Board::standard(), 40, &mut rng1);
        let (board2, report2) = play(Board::standard(), 40, &mut rng2);

        assert_eq!(report1.moves_played, report2.moves_played);
        assert_eq!(report1.captures, report2.captures);
        assert_eq!(render(&board1), render(&board2));
    }

    #[test]
    fn test_playout_respects_move_cap() {
        let mut rng = create_rng(Some(7));
        let (_, report) = play(Board::standard(), 10, &mut rng);
        assert!(report.moves_played <= 10);
    }

    #[test]
    fn test_playout_stalls_on_empty_color() {
        // Dark has no pawns, Light moves first and plays one half-move,
        // then Dark stalls immediately.
        let mut board = Board::empty(8, 8);
        board.add_pawn(Color::Light, 1, 3).unwrap();

        let mut rng = create_rng(Some(1));
        let (_, report) = play(board, 100, &mut rng);
        assert_eq!(report.stalled_color.as_deref(), Some("Dark"));
        assert_eq!(report.moves_played, 1);
    }
}
