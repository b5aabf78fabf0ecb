use std::fmt::Debug;

use crate::backgammon::{Destination, Source};

/// One checker moved with one die.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfMove {
    from: Source,
    to: Destination,
}

impl HalfMove {
    pub fn new(from: Source, to: Destination) -> Self {
        HalfMove { from, to }
    }

    pub fn from(&self) -> Source {
        self.from
    }

    pub fn to(&self) -> Destination {
        self.to
    }
}

impl Debug for HalfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {:?}", self.from, self.to)
    }
}
