use std::fmt::Debug;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{backgammon::GameError, misc::TinyVec};

/// Pending die values of a turn. Two entries, or four equal ones on a double.
pub type DiceValues = TinyVec<u8, 4>;

/// Checks hand-set die values: at most four, each in 1..=6.
pub(crate) fn checked_values(values: &[u8]) -> Result<DiceValues, GameError> {
    if values.len() > 4 || values.iter().any(|die| !(1..=6).contains(die)) {
        return Err(GameError::InvalidDice(values.to_vec()));
    }
    Ok(DiceValues::from_slice(values))
}

/// Draws two dice. Doubles are expanded to four entries.
pub fn roll_pair<R: Rng + ?Sized>(rng: &mut R) -> DiceValues {
    let die1 = rng.random_range(1..=6);
    let die2 = rng.random_range(1..=6);
    if die1 == die2 {
        DiceValues::from_slice(&[die1; 4])
    } else {
        DiceValues::from_slice(&[die1, die2])
    }
}

/// The dice of a game: a random source plus the values still to be spent this turn.
///
/// Values are only consumed through [`Dice::remove_value`]; moving a checker on the
/// [`crate::backgammon::Board`] never touches them.
#[derive(Clone)]
pub struct Dice {
    values: DiceValues,
    rng: StdRng,
}

impl Dice {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic dice, for tests and reproducible simulations.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Dice { values: DiceValues::new(), rng }
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn roll(&mut self) -> &[u8] {
        self.values = roll_pair(&mut self.rng);
        &self.values
    }

    /// Single draw, used only to decide who opens the game.
    pub fn roll_one(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn set_values(&mut self, values: &[u8]) -> Result<(), GameError> {
        self.values = checked_values(values)?;
        Ok(())
    }

    pub(crate) fn pending(&self) -> DiceValues {
        self.values
    }

    pub(crate) fn replace_values(&mut self, values: DiceValues) {
        self.values = values;
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn remove_value(&mut self, die: u8) -> Result<(), GameError> {
        if self.values.remove_first(&die) {
            Ok(())
        } else {
            Err(GameError::DieUnavailable { die, pending: self.values.to_vec() })
        }
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dice({:?})", &*self.values)
    }
}
