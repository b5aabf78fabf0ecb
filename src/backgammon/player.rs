use std::{fmt, ops::RangeInclusive};

/// Side of the table. Doubles as the stable index into per-player arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    pub fn opposite(&self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    /// White travels from point 23 towards 0, black from 0 towards 23.
    pub fn direction(&self) -> i8 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    pub fn home_board(&self) -> RangeInclusive<u8> {
        match self {
            Player::White => 0..=5,
            Player::Black => 18..=23,
        }
    }

    /// Points in the order the player's checkers travel over them.
    pub fn travel_order(self) -> impl Iterator<Item = u8> {
        let forward = self == Player::Black;
        (0..24u8).map(move |i| if forward { i } else { 23 - i })
    }

    /// Die value that carries a checker on `point` exactly past the board edge.
    pub fn bear_off_distance(&self, point: u8) -> u8 {
        match self {
            Player::White => point + 1,
            Player::Black => 24 - point,
        }
    }

    /// Point a checker re-enters on from the bar with the given die.
    pub fn entry_point(&self, die: u8) -> Option<u8> {
        if !(1..=6).contains(&die) {
            return None;
        }
        match self {
            Player::White => Some(24 - die),
            Player::Black => Some(die - 1),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Ai,
}

/// A named participant seated at one side of the board.
///
/// Participants compare equal when their names match, regardless of color.
#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    color: Player,
    kind: PlayerKind,
}

impl Participant {
    pub fn new(name: impl Into<String>, color: Player, kind: PlayerKind) -> Self {
        Participant { name: name.into(), color, kind }
    }

    pub fn human(name: impl Into<String>, color: Player) -> Self {
        Self::new(name, color, PlayerKind::Human)
    }

    pub fn ai(name: impl Into<String>, color: Player) -> Self {
        Self::new(name, color, PlayerKind::Ai)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_ai(&self) -> bool {
        self.kind == PlayerKind::Ai
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Participant {}
