//! Pawn and color definitions

use serde::{Deserialize, Serialize};

use crate::board::Position;

/// Stable pawn identifier (key into the board's registry)
pub type PawnId = String;

/// Pawn color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta for a forward step. Light advances toward higher rows.
    pub fn forward(self) -> i16 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Id prefix used when synthesizing pawn ids
    pub fn prefix(self) -> char {
        match self {
            Color::Light => 'L',
            Color::Dark => 'D',
        }
    }
}

/// A pawn on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    pub id: PawnId,
    pub color: Color,
    pub position: Position,
    pub has_moved: bool,
}

impl Pawn {
    pub fn new(id: impl Into<PawnId>, color: Color, position: Position) -> Self {
        Self {
            id: id.into(),
            color,
            position,
            has_moved: false,
        }
    }
}
