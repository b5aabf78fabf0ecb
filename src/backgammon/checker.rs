use crate::backgammon::Player;

/// A single checker. Move-only: a checker changes hands by being popped from
/// one container and pushed into another, never by copying.
#[derive(Debug, PartialEq, Eq)]
pub struct Checker {
    owner: Player,
}

impl Checker {
    pub(crate) fn new(owner: Player) -> Self {
        Checker { owner }
    }

    pub fn owner(&self) -> Player {
        self.owner
    }
}
