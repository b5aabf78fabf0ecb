use crate::{
    backgammon::{Board, Destination, Dice, DiceValues, GameError, Move, Participant, Player, Source},
    engine::choose_moves,
};

/// A game between two participants. Sequences turns over a [`Board`] and a
/// [`Dice`] without knowing any rules itself.
///
/// The game never rolls or switches turns on its own; whoever drives it decides
/// when to call [`Game::roll_dice`] and [`Game::switch_player`].
pub struct Game {
    board: Board,
    dice: Dice,
    players: [Participant; 2],
    current_player_index: usize,
    initial_rolls: [u8; 2],
    initial_roll_winner: Option<usize>,
}

impl Game {
    /// `white` plays the white checkers and `black` the black ones.
    pub fn new(white: Participant, black: Participant, random_layout: bool) -> Result<Self, GameError> {
        Self::with_dice(white, black, random_layout, Dice::new())
    }

    /// Like [`Game::new`] but every random draw, layout included, comes from `seed`.
    pub fn seeded(white: Participant, black: Participant, random_layout: bool, seed: u64) -> Result<Self, GameError> {
        Self::with_dice(white, black, random_layout, Dice::seeded(seed))
    }

    fn with_dice(white: Participant, black: Participant, random_layout: bool, mut dice: Dice) -> Result<Self, GameError> {
        for (participant, expected) in [(&white, Player::White), (&black, Player::Black)] {
            if participant.color() != expected {
                return Err(GameError::WrongColor { name: participant.name().to_string(), expected });
            }
        }
        let board = if random_layout {
            Board::randomized(dice.rng())
        } else {
            Board::new()
        };
        Ok(Game {
            board,
            dice,
            players: [white, black],
            current_player_index: 0,
            initial_rolls: [0, 0],
            initial_roll_winner: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn dice_mut(&mut self) -> &mut Dice {
        &mut self.dice
    }

    pub fn players(&self) -> &[Participant; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Participant {
        &self.players[self.current_player_index]
    }

    pub fn initial_rolls(&self) -> [u8; 2] {
        self.initial_rolls
    }

    pub fn initial_roll_winner(&self) -> Option<&Participant> {
        self.initial_roll_winner.map(|index| &self.players[index])
    }

    pub fn switch_player(&mut self) {
        self.current_player_index = 1 - self.current_player_index;
        self.board.switch_player();
    }

    /// Rolls the dice for the current turn and mirrors them onto the board.
    pub fn roll_dice(&mut self) -> &[u8] {
        self.dice.roll();
        self.board.sync_dice(self.dice.pending());
        self.dice.values()
    }

    /// Both players roll one die until the rolls differ. The higher roll moves
    /// first and plays the two rolled numbers as its opening dice.
    pub fn determine_first_player(&mut self) -> &Participant {
        let (rolls, winner) = loop {
            let rolls = [self.dice.roll_one(), self.dice.roll_one()];
            if rolls[0] > rolls[1] {
                break (rolls, 0);
            }
            if rolls[1] > rolls[0] {
                break (rolls, 1);
            }
            log::debug!("initial roll tied at {}", rolls[0]);
        };
        self.initial_rolls = rolls;
        self.initial_roll_winner = Some(winner);
        if self.current_player_index != winner {
            self.switch_player();
        }
        self.dice.replace_values(DiceValues::from_slice(&rolls));
        self.board.sync_dice(self.dice.pending());
        log::info!(
            "{} opens the game ({} against {})",
            self.players[winner].name(),
            rolls[winner],
            rolls[1 - winner]
        );
        &self.players[winner]
    }

    /// Die that carries the current player's checker from `from` to `to`.
    fn die_for_move(&self, from: Source, to: Destination) -> Result<u8, GameError> {
        for index in [from.point_index(), to.point_index()].into_iter().flatten() {
            if index > 23 {
                return Err(GameError::OutOfRange(index as usize));
            }
        }
        let player = self.current_player().color();
        let illegal = GameError::illegal_target(from, to);
        let die = match (from, to) {
            (Source::Point(from), Destination::Off) => {
                return self
                    .board
                    .find_die_for_bear_off(from, player, self.dice.values())
                    .ok_or(illegal);
            }
            (Source::Bar, Destination::Off) => return Err(illegal),
            (Source::Bar, Destination::Point(to)) => match player {
                Player::White => 24 - to as i16,
                Player::Black => to as i16 + 1,
            },
            (Source::Point(from), Destination::Point(to)) => {
                (to as i16 - from as i16) * player.direction() as i16
            }
        };
        match u8::try_from(die) {
            Ok(die) if die > 0 && self.dice.values().contains(&die) => Ok(die),
            _ => Err(illegal),
        }
    }

    /// Moves a checker of the current player from `from` to `to`, spending the
    /// die that move implies.
    pub fn make_move(&mut self, from: Source, to: Destination) -> Result<(), GameError> {
        let die = self.die_for_move(from, to)?;
        self.move_with_die(from, die)?;
        Ok(())
    }

    /// Moves a checker of the current player from `from` with an explicit die.
    /// Unlike [`Game::make_move`] this can bear off with a larger die than needed.
    pub fn move_with_die(&mut self, from: Source, die: u8) -> Result<Destination, GameError> {
        if !self.dice.values().contains(&die) {
            return Err(GameError::DieUnavailable { die, pending: self.dice.values().to_vec() });
        }
        let player = self.current_player().color();
        let to = self.board.move_piece(from, die, player)?;
        self.dice.remove_value(die)?;
        self.board.sync_dice(self.dice.pending());
        Ok(to)
    }

    pub fn has_possible_moves(&self, player: Player) -> bool {
        self.board.has_any_valid_moves(player, self.dice.values())
    }

    /// Lets the AI play the current turn with the pending dice.
    ///
    /// Moves are replayed one by one through [`Game::make_move`]. If one of them
    /// turns out to be illegal the rest of the turn is forfeited. Returns the
    /// moves that were actually played; nothing when the current player is human.
    pub fn play_ai_turn(&mut self) -> Move {
        let mut played = Move::new();
        let participant = self.current_player();
        if !participant.is_ai() {
            return played;
        }
        let player = participant.color();
        let plan = choose_moves(&self.board, player, self.dice.values());
        log::debug!("{} plans {:?} with {:?}", participant.name(), plan, self.dice.values());

        for &half_move in plan.iter() {
            if let Err(err) = self.make_move(half_move.from(), half_move.to()) {
                log::warn!(
                    "{} forfeits the rest of the turn after {:?}: {err}",
                    self.current_player().name(),
                    half_move
                );
                break;
            }
            played.add_half_move(half_move);
        }
        played
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn winner(&self) -> Option<&Participant> {
        let winner = self.board.winner()?;
        self.players.iter().find(|participant| participant.color() == winner)
    }
}
