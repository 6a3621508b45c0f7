//! Engine error types

use crate::board::Position;
use crate::pawn::PawnId;

/// Failures surfaced by board operations.
///
/// Validation always precedes mutation, so a failed operation leaves the
/// board exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("square {0} is already occupied")]
    OccupiedSquare(Position),

    #[error("no pawn with id {0}")]
    PawnNotFound(PawnId),

    #[error("pawn {id} cannot move to {target}")]
    IllegalMove { id: PawnId, target: Position },
}
