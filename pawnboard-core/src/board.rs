//! Board state: grid, pawn registry, and in-place mutation ops

use std::fmt;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::pawn::{Color, Pawn, PawnId};

/// Standard board edge length
pub const STANDARD_SIZE: u8 = 8;

/// Pawns per color on the standard board
pub const PAWNS_PER_COLOR: u32 = 16;

/// A row/col square address, 0-indexed
///
/// Signed so that off-board move candidates (row -1 and friends) are
/// representable before bounds filtering; i16 covers every row/col a
/// u8-dimensioned board can have, with room for step offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i16,
    pub col: i16,
}

impl Position {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Position shifted by (d_row, d_col), saturating at the i16 range
    /// so a shift can never panic; saturated results fail bounds checks.
    pub fn offset(&self, d_row: i16, d_col: i16) -> Position {
        Position::new(self.row.saturating_add(d_row), self.col.saturating_add(d_col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board state (clone to snapshot)
///
/// Invariant: `grid[r][c]` holds id X exactly when `pawns[X].position` is
/// (r, c), and no two pawns share a square. Every mutating operation
/// validates before touching either side of that pairing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,

    /// Registry: id -> pawn
    pawns: FxHashMap<PawnId, Pawn>,

    /// Occupancy: grid[row][col] -> occupant id
    grid: Vec<Vec<Option<PawnId>>>,

    /// Serial for synthesized ids (shared across colors)
    next_serial: u32,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an empty width x height board
    pub fn empty(width: u8, height: u8) -> Self {
        let grid = vec![vec![None; width as usize]; height as usize];
        Self {
            width,
            height,
            pawns: FxHashMap::default(),
            grid,
            next_serial: 1,
        }
    }

    /// Create the standard 8x8 board: 16 Light pawns on rows 0-1, 16 Dark
    /// pawns on rows 6-7.
    ///
    /// Ids come from one counter shared across both colors, in placement
    /// order: L1..L16 then D17..D32. Callers rely on this exact numbering.
    pub fn standard() -> Self {
        let mut board = Board::empty(STANDARD_SIZE, STANDARD_SIZE);

        for (color, rows) in [(Color::Light, [0i16, 1]), (Color::Dark, [6, 7])] {
            for row in rows {
                for col in 0..STANDARD_SIZE as i16 {
                    let id = board.fresh_id(color);
                    let pawn = Pawn::new(id, color, Position::new(row, col));
                    board
                        .place_pawn(pawn)
                        .expect("standard layout places onto empty in-bounds squares");
                }
            }
        }

        board
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check if a position lies on the board
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.row < self.height as i16
            && pos.col >= 0
            && pos.col < self.width as i16
    }

    /// Get pawn by id
    pub fn pawn(&self, id: &str) -> Option<&Pawn> {
        self.pawns.get(id)
    }

    /// Get the pawn occupying a square, if any
    pub fn occupant(&self, pos: Position) -> Option<&Pawn> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.grid[pos.row as usize][pos.col as usize]
            .as_deref()
            .and_then(|id| self.pawns.get(id))
    }

    /// Whether a square is in bounds and empty
    pub fn is_empty(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.grid[pos.row as usize][pos.col as usize].is_none()
    }

    /// Iterate pawns in the registry (no particular order)
    pub fn pawns(&self) -> impl Iterator<Item = &Pawn> {
        self.pawns.values()
    }

    pub fn pawn_count(&self) -> usize {
        self.pawns.len()
    }

    // ========================================================================
    // MUTATION OPS (in place; callers needing snapshots clone first)
    // ========================================================================

    /// Insert a pawn into the registry and grid.
    ///
    /// Fails with `OutOfBounds` or `OccupiedSquare` before any mutation.
    /// The pawn's id must not already be registered on this board;
    /// reusing one would leave a stale grid cell pointing at the old
    /// entry. Ids from `add_pawn` satisfy this automatically.
    pub fn place_pawn(&mut self, pawn: Pawn) -> Result<(), BoardError> {
        debug_assert!(
            !self.pawns.contains_key(&pawn.id),
            "pawn id {} is already registered",
            pawn.id
        );
        let pos = pawn.position;
        if !self.in_bounds(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        if self.grid[pos.row as usize][pos.col as usize].is_some() {
            return Err(BoardError::OccupiedSquare(pos));
        }

        self.grid[pos.row as usize][pos.col as usize] = Some(pawn.id.clone());
        self.pawns.insert(pawn.id.clone(), pawn);
        Ok(())
    }

    /// Create a fresh pawn of `color` at (row, col) and place it.
    ///
    /// The id comes from the board's serial counter, so it never collides
    /// with an id this board handed out before.
    pub fn add_pawn(&mut self, color: Color, row: i16, col: i16) -> Result<Pawn, BoardError> {
        let pos = Position::new(row, col);
        if !self.in_bounds(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        if self.grid[pos.row as usize][pos.col as usize].is_some() {
            return Err(BoardError::OccupiedSquare(pos));
        }

        let pawn = Pawn::new(self.fresh_id(color), color, pos);
        self.place_pawn(pawn.clone())?;
        Ok(pawn)
    }

    /// Remove a pawn from the registry and clear its square.
    ///
    /// Unknown ids are a no-op, not an error.
    pub fn remove_pawn(&mut self, id: &str) {
        if let Some(pawn) = self.pawns.remove(id) {
            self.grid[pawn.position.row as usize][pawn.position.col as usize] = None;
        }
    }

    fn fresh_id(&mut self, color: Color) -> PawnId {
        let id = format!("{}{}", color.prefix(), self.next_serial);
        self.next_serial += 1;
        id
    }

    // ========================================================================
    // EXECUTOR SUPPORT (crate-internal; legality lives in `moves`)
    // ========================================================================

    /// Relocate a pawn already validated by the move rules: clear its source
    /// square, capture any occupant at `target`, write it back at `target`
    /// with `has_moved` set.
    pub(crate) fn commit_move(&mut self, id: &str, target: Position) -> Pawn {
        let mut pawn = self
            .pawns
            .remove(id)
            .expect("commit_move called for a registered pawn");

        self.grid[pawn.position.row as usize][pawn.position.col as usize] = None;

        if let Some(captured_id) = self.grid[target.row as usize][target.col as usize].take() {
            self.pawns.remove(&captured_id);
        }

        pawn.position = target;
        pawn.has_moved = true;
        self.grid[target.row as usize][target.col as usize] = Some(pawn.id.clone());
        self.pawns.insert(pawn.id.clone(), pawn.clone());
        pawn
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Load a board from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let board: Board = serde_json::from_str(&content)?;
        Ok(board)
    }

    /// Save the board to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consistency_check(board: &Board) {
        for pawn in board.pawns() {
            let cell = &board.grid[pawn.position.row as usize][pawn.position.col as usize];
            assert_eq!(cell.as_deref(), Some(pawn.id.as_str()), "grid cell must hold {}", pawn.id);
        }
        let occupied = board
            .grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(occupied, board.pawn_count());
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty(5, 3);
        assert_eq!(board.width(), 5);
        assert_eq!(board.height(), 3);
        assert_eq!(board.pawn_count(), 0);
        for row in 0..3 {
            for col in 0..5 {
                assert!(board.is_empty(Position::new(row, col)));
            }
        }
    }

    #[test]
    fn test_bounds() {
        let board = Board::empty(8, 8);
        assert!(board.in_bounds(Position::new(0, 0)));
        assert!(board.in_bounds(Position::new(7, 7)));
        assert!(!board.in_bounds(Position::new(-1, 0)));
        assert!(!board.in_bounds(Position::new(0, 8)));
        assert!(!board.in_bounds(Position::new(8, 0)));
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        assert_eq!(board.pawn_count(), 32);
        assert_eq!(
            board.pawns().filter(|p| p.color == Color::Light).count(),
            PAWNS_PER_COLOR as usize
        );
        assert_eq!(
            board.pawns().filter(|p| p.color == Color::Dark).count(),
            PAWNS_PER_COLOR as usize
        );
        assert!(board.pawns().all(|p| !p.has_moved));
        assert!(board
            .pawns()
            .all(|p| matches!(p.position.row, 0 | 1 | 6 | 7)));
        consistency_check(&board);
    }

    #[test]
    fn test_standard_id_numbering() {
        let board = Board::standard();
        // Shared counter across colors: L1..L16 then D17..D32
        assert_eq!(board.occupant(Position::new(0, 0)).unwrap().id, "L1");
        assert_eq!(board.occupant(Position::new(1, 7)).unwrap().id, "L16");
        assert_eq!(board.occupant(Position::new(6, 0)).unwrap().id, "D17");
        assert_eq!(board.occupant(Position::new(7, 7)).unwrap().id, "D32");
        assert!(board.pawn("D16").is_none());
    }

    #[test]
    fn test_tall_board_bounds() {
        // Dimensions are u8, so rows past the i8 range must still work.
        let board = Board::empty(8, 200);
        assert!(board.in_bounds(Position::new(127, 0)));
        assert!(board.in_bounds(Position::new(199, 7)));
        assert!(!board.in_bounds(Position::new(200, 0)));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_place_pawn_rejects_duplicate_id() {
        let mut board = Board::empty(8, 8);
        board
            .place_pawn(Pawn::new("L1", Color::Light, Position::new(0, 0)))
            .unwrap();
        let _ = board.place_pawn(Pawn::new("L1", Color::Light, Position::new(1, 1)));
    }

    #[test]
    fn test_place_pawn_rejects_out_of_bounds() {
        let mut board = Board::empty(8, 8);
        let pawn = Pawn::new("L1", Color::Light, Position::new(8, 0));
        assert_eq!(
            board.place_pawn(pawn),
            Err(BoardError::OutOfBounds(Position::new(8, 0)))
        );
        assert_eq!(board.pawn_count(), 0);
    }

    #[test]
    fn test_place_pawn_rejects_occupied() {
        let mut board = Board::empty(8, 8);
        board
            .place_pawn(Pawn::new("L1", Color::Light, Position::new(3, 3)))
            .unwrap();
        let err = board
            .place_pawn(Pawn::new("D2", Color::Dark, Position::new(3, 3)))
            .unwrap_err();
        assert_eq!(err, BoardError::OccupiedSquare(Position::new(3, 3)));
        assert_eq!(board.pawn_count(), 1);
        consistency_check(&board);
    }

    #[test]
    fn test_add_pawn() {
        let mut board = Board::empty(8, 8);
        let pawn = board.add_pawn(Color::Dark, 4, 2).unwrap();
        assert_eq!(pawn.color, Color::Dark);
        assert_eq!(pawn.position, Position::new(4, 2));
        assert!(!pawn.has_moved);
        assert_eq!(board.pawn(&pawn.id), Some(&pawn));
        consistency_check(&board);
    }

    #[test]
    fn test_add_pawn_ids_unique() {
        let mut board = Board::empty(8, 8);
        let a = board.add_pawn(Color::Light, 0, 0).unwrap();
        let b = board.add_pawn(Color::Light, 0, 1).unwrap();
        let c = board.add_pawn(Color::Dark, 0, 2).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_add_pawn_failure_leaves_board_unchanged() {
        let mut board = Board::empty(8, 8);
        board.add_pawn(Color::Light, 2, 2).unwrap();

        assert!(matches!(
            board.add_pawn(Color::Dark, 2, 2),
            Err(BoardError::OccupiedSquare(_))
        ));
        assert!(matches!(
            board.add_pawn(Color::Dark, 9, 0),
            Err(BoardError::OutOfBounds(_))
        ));
        assert_eq!(board.pawn_count(), 1);
        consistency_check(&board);
    }

    #[test]
    fn test_remove_pawn() {
        let mut board = Board::empty(8, 8);
        let pawn = board.add_pawn(Color::Light, 5, 5).unwrap();
        board.remove_pawn(&pawn.id);
        assert_eq!(board.pawn_count(), 0);
        assert!(board.is_empty(Position::new(5, 5)));
    }

    #[test]
    fn test_remove_missing_pawn_is_noop() {
        let mut board = Board::standard();
        board.remove_pawn("Z99");
        assert_eq!(board.pawn_count(), 32);
        consistency_check(&board);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Board::standard();
        let mut copy = original.clone();
        copy.remove_pawn("L1");
        assert_eq!(original.pawn_count(), 32);
        assert_eq!(copy.pawn_count(), 31);
        assert!(original.pawn("L1").is_some());
    }

    #[test]
    fn test_json_round_trip() {
        let board = Board::standard();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.pawn_count(), 32);
        assert_eq!(restored.occupant(Position::new(0, 0)).unwrap().id, "L1");
        consistency_check(&restored);
    }
}
