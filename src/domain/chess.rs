//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use std::fmt;

use shakmaty::{Color as SColor, File, Rank, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.char() == ch)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn char(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'w' => Some(PieceColor::White),
            'b' => Some(PieceColor::Black),
            _ => None,
        }
    }
}

/// A piece identifier, written as a two character code such as `wp` or `bk`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    /// Every piece identifier, white first.
    pub const ALL: [Piece; 12] = {
        use PieceColor::*;
        use PieceKind::*;
        [
            Piece::new(White, Pawn),
            Piece::new(White, Rook),
            Piece::new(White, Knight),
            Piece::new(White, Bishop),
            Piece::new(White, Queen),
            Piece::new(White, King),
            Piece::new(Black, Pawn),
            Piece::new(Black, Rook),
            Piece::new(Black, Knight),
            Piece::new(Black, Bishop),
            Piece::new(Black, Queen),
            Piece::new(Black, King),
        ]
    };

    pub const fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { kind, color }
    }

    /// Two character code: color then kind.
    pub fn code(&self) -> String {
        [self.color.char(), self.kind.char()].iter().collect()
    }

    /// Parse a two character code. Anything else is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = PieceColor::from_char(chars.next()?)?;
        let kind = PieceKind::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Piece::new(color, kind))
    }

    /// Default sprite location, relative to the asset root.
    pub fn default_asset_path(&self) -> &'static str {
        use PieceColor::*;
        use PieceKind::*;
        match (self.color, self.kind) {
            (White, Pawn) => "img/peaobranco.png",
            (White, Rook) => "img/torrebranca.png",
            (White, Knight) => "img/cavalobranco.png",
            (White, Bishop) => "img/bispo_branco.png",
            (White, Queen) => "img/rainhabranca.png",
            (White, King) => "img/reibranco.png",
            (Black, Pawn) => "img/peaopreto.png",
            (Black, Rook) => "img/torrepreta.png",
            (Black, Knight) => "img/cavalopreto.png",
            (Black, Bishop) => "img/bisporeto.png",
            (Black, Queen) => "img/rainhapreta.png",
            (Black, King) => "img/reipreto.png",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.char(), self.kind.char())
    }
}

/// Convert row/col (0-indexed, row 0 = rank 8) to shakmaty Square
pub fn to_square(row: usize, col: usize) -> Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    Square::from_coords(file, rank)
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    let color = match piece.color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    };
    Piece { kind, color }
}
