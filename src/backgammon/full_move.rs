use std::{fmt::Debug, ops::Deref};

use crate::{backgammon::HalfMove, misc::TinyVec};

/// The ordered half moves of one turn. At most four, reached on a double.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Move {
    half_moves: TinyVec<HalfMove, 4>,
}

impl Move {
    pub fn new() -> Self {
        Move {
            half_moves: TinyVec::new(),
        }
    }

    pub fn add_half_move(&mut self, half_move: HalfMove) {
        self.half_moves.push(half_move);
    }
}

impl Deref for Move {
    type Target = TinyVec<HalfMove, 4>;

    fn deref(&self) -> &Self::Target {
        &self.half_moves
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move: ")?;
        for (i, half_move) in self.half_moves.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", half_move)?;
        }
        Ok(())
    }
}
