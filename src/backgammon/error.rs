use std::fmt;

use crate::backgammon::{Destination, Player, Source};

/// Recoverable failures reported by the board and the game. None of them
/// leaves state half-modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move breaks the rules for the current position and dice.
    IllegalMove { from: Source, to: Option<Destination>, die: Option<u8> },
    /// Point index outside 0..=23.
    OutOfRange(usize),
    /// Hand-set dice: more than four values, or a value outside 1..=6.
    InvalidDice(Vec<u8>),
    /// More checkers than a player owns placed on one point.
    TooManyCheckers(u8),
    /// The die is not among the pending values.
    DieUnavailable { die: u8, pending: Vec<u8> },
    /// A participant was seated on the side of the other color.
    WrongColor { name: String, expected: Player },
}

impl GameError {
    pub(crate) fn illegal_die(from: Source, die: u8) -> Self {
        GameError::IllegalMove { from, to: None, die: Some(die) }
    }

    pub(crate) fn illegal_target(from: Source, to: Destination) -> Self {
        GameError::IllegalMove { from, to: Some(to), die: None }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalMove { from, to, die } => {
                write!(f, "illegal move from {from}")?;
                if let Some(to) = to {
                    write!(f, " to {to}")?;
                }
                if let Some(die) = die {
                    write!(f, " with die {die}")?;
                }
                Ok(())
            }
            GameError::OutOfRange(index) => write!(f, "point index {index} is outside 0..=23"),
            GameError::InvalidDice(values) => write!(f, "invalid dice {values:?}"),
            GameError::TooManyCheckers(count) => {
                write!(f, "cannot place {count} checkers on one point")
            }
            GameError::DieUnavailable { die, pending } => {
                write!(f, "die value {die} not available in {pending:?}")
            }
            GameError::WrongColor { name, expected } => {
                write!(f, "{name} must play the {expected} checkers")
            }
        }
    }
}

impl std::error::Error for GameError {}
