//! Text rendering of a board (convenience, not part of the engine contract)

use crate::board::{Board, Position};
use crate::pawn::Color;

/// Render the board as text, top row (highest index) first.
///
/// '.' empty square, 'L' light pawn, 'D' dark pawn.
pub fn render(board: &Board) -> String {
    let mut out = String::new();

    for row in (0..board.height() as i16).rev() {
        for col in 0..board.width() as i16 {
            let symbol = match board.occupant(Position::new(row, col)) {
                Some(pawn) => match pawn.color {
                    Color::Light => 'L',
                    Color::Dark => 'D',
                },
                None => '.',
            };
            out.push(symbol);
            if col + 1 < board.width() as i16 {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    out
}
