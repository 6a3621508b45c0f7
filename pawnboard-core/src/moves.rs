//! Move rules and move execution

use crate::board::{Board, Position};
use crate::error::BoardError;
use crate::pawn::Pawn;

/// Result of a committed move: the new board snapshot and the relocated pawn
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    pub board: Board,
    pub pawn: Pawn,
}

/// Compute the legal destinations for `pawn` on `board`.
///
/// Pure: neither argument is mutated. The order is fixed so that callers
/// picking the first legal move behave deterministically: forward one,
/// forward two (first move only), diagonal-left capture, diagonal-right
/// capture. Diagonal steps are capture-only; a diagonal onto an empty
/// square is never offered.
pub fn allowed_moves(pawn: &Pawn, board: &Board) -> Vec<Position> {
    let mut moves = Vec::new();
    let dir = pawn.color.forward();

    let forward = pawn.position.offset(dir, 0);
    if board.is_empty(forward) {
        moves.push(forward);

        if !pawn.has_moved {
            let double = pawn.position.offset(2 * dir, 0);
            if board.is_empty(double) {
                moves.push(double);
            }
        }
    }

    for d_col in [-1, 1] {
        let diagonal = pawn.position.offset(dir, d_col);
        if let Some(occupant) = board.occupant(diagonal) {
            if occupant.color != pawn.color {
                moves.push(diagonal);
            }
        }
    }

    moves
}

/// Validate and apply one move, returning a new board snapshot.
///
/// The input board is never mutated; add/remove on the returned board
/// cannot leak back into it. Legality is re-derived here rather than
/// trusted from the caller.
pub fn move_pawn(board: &Board, id: &str, target: Position) -> Result<MoveOutcome, BoardError> {
    let pawn = board
        .pawn(id)
        .ok_or_else(|| BoardError::PawnNotFound(id.to_string()))?;

    if !allowed_moves(pawn, board).contains(&target) {
        return Err(BoardError::IllegalMove {
            id: id.to_string(),
            target,
        });
    }

    let mut next = board.clone();
    let moved = next.commit_move(id, target);

    Ok(MoveOutcome { board: next, pawn: moved })
}
