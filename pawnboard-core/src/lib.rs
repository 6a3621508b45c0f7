//! Pawnboard Core - pawn board rule-and-state engine
//!
//! This crate provides:
//! - Board state (grid + pawn registry) with bounds and occupancy invariants
//! - Standard 8x8 initial layout and empty-board construction
//! - Legal-move generation for pawns (forward steps, diagonal captures)
//! - Move execution producing independent board snapshots
//! - In-place add/remove/place setup operations

pub mod board;
pub mod error;
pub mod moves;
pub mod pawn;
pub mod render;

// Re-exports for convenient access
pub use board::{Board, Position, PAWNS_PER_COLOR, STANDARD_SIZE};
pub use error::BoardError;
pub use moves::{allowed_moves, move_pawn, MoveOutcome};
pub use pawn::{Color, Pawn, PawnId};
pub use render::render;
