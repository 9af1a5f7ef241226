use thiserror::Error;

use super::{Color, NUM_SQUARES, Piece, PieceKind, Square};

/// Error type for board setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),
    #[error("a board holds at most {max} pieces", max = Board::MAX_PIECES)]
    TooManyPieces,
}

/// Piece placement with O(1) lookup by square.
///
/// The piece list is the source of truth for iteration; `index` maps every
/// occupied square to its slot in that list and is updated in the same call
/// as every mutation.
#[derive(Clone)]
pub struct Board {
    pieces: Vec<Piece>,
    index: [Option<u8>; NUM_SQUARES],
}

impl Board {
    pub const MAX_PIECES: usize = 32;

    /// A board without any pieces.
    pub fn empty() -> Self {
        Self {
            pieces: Vec::with_capacity(Self::MAX_PIECES),
            index: [None; NUM_SQUARES],
        }
    }

    /// The standard 16 + 16 starting layout.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (col, kind) in (0u8..).zip(BACK_RANK) {
                board.place_unchecked(kind, color, color.home_row(), col);
                board.place_unchecked(PieceKind::Pawn, color, color.pawn_row(), col);
            }
        }
        board
    }

    fn place_unchecked(&mut self, kind: PieceKind, color: Color, row: u8, col: u8) {
        let square = Square { row, col };
        self.index[square.index()] = Some(self.pieces.len() as u8);
        self.pieces.push(Piece::new(kind, color, square));
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.index[square.index()].map(|slot| &self.pieces[slot as usize])
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.index[square.index()].is_some()
    }

    /// Adds a piece on its own square.
    pub fn place(&mut self, piece: Piece) -> Result<(), BoardError> {
        if self.is_occupied(piece.square) {
            return Err(BoardError::SquareOccupied(piece.square));
        }
        if self.pieces.len() >= Self::MAX_PIECES {
            return Err(BoardError::TooManyPieces);
        }
        self.index[piece.square.index()] = Some(self.pieces.len() as u8);
        self.pieces.push(piece);
        Ok(())
    }

    /// Removes and returns the piece at `square`.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.take(square).map(|(_, piece)| piece)
    }

    /// Relocates the piece on `from` to the empty square `to`.
    ///
    /// # Panics
    /// If `from` is empty or `to` is occupied; both mean the caller lost
    /// track of the position.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let slot = self.index[from.index()]
            .unwrap_or_else(|| panic!("no piece to move on {from}"));
        assert!(
            !self.is_occupied(to),
            "cannot move {from} onto occupied square {to}"
        );
        self.index[from.index()] = None;
        self.index[to.index()] = Some(slot);
        self.pieces[slot as usize].square = to;
    }

    /// Removes the piece at `square`, returning its slot so that
    /// [`Board::restore`] can put it back exactly.
    pub(crate) fn take(&mut self, square: Square) -> Option<(usize, Piece)> {
        let slot = self.index[square.index()]? as usize;
        self.index[square.index()] = None;
        let piece = self.pieces.swap_remove(slot);
        if let Some(moved) = self.pieces.get(slot) {
            self.index[moved.square.index()] = Some(slot as u8);
        }
        Some((slot, piece))
    }

    /// Inverse of [`Board::take`]. Must be called in reverse order of takes.
    pub(crate) fn restore(&mut self, slot: usize, piece: Piece) {
        assert!(
            !self.is_occupied(piece.square),
            "cannot restore onto occupied square {}",
            piece.square
        );
        self.pieces.push(piece);
        let last = self.pieces.len() - 1;
        self.pieces.swap(slot, last);
        self.index[self.pieces[slot].square.index()] = Some(slot as u8);
        self.index[self.pieces[last].square.index()] = Some(last as u8);
    }

    pub(crate) fn set_has_moved(&mut self, square: Square, has_moved: bool) {
        if let Some(piece) = self.piece_at_mut(square) {
            piece.has_moved = has_moved;
        }
    }

    pub(crate) fn set_kind(&mut self, square: Square, kind: PieceKind) {
        if let Some(piece) = self.piece_at_mut(square) {
            piece.kind = kind;
        }
    }

    fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.index[square.index()].map(|slot| &mut self.pieces[slot as usize])
    }

    /// All live pieces, in no particular order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Every piece keyed by its square, ordered a8..h1.
    pub fn snapshot(&self) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|sq| self.piece_at(sq).map(|p| (sq, *p)))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Boards are equal when the same pieces stand on the same squares,
/// regardless of list order.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl Eq for Board {}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        for row in 0..8 {
            for col in 0..8 {
                let symbol = Square::new(row, col)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
