use std::fmt;

use rand::Rng;

use crate::backgammon::{
    Checker, DiceValues, Destination, GameError, Player, Source,
    dice::{checked_values, roll_pair},
};

pub const CHECKERS_PER_PLAYER: u8 = 15;

/// One of the 24 slots. Holds checkers of a single owner only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    owner: Option<Player>,
    count: u8,
}

impl Point {
    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    pub fn len(&self) -> u8 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player)
    }

    /// Two or more opposing checkers keep `player` out.
    pub fn is_blocked_for(&self, player: Player) -> bool {
        self.owner == Some(player.opposite()) && self.count >= 2
    }

    fn pop(&mut self) -> Option<Checker> {
        let owner = self.owner?;
        self.count -= 1;
        if self.count == 0 {
            self.owner = None;
        }
        Some(Checker::new(owner))
    }

    fn push(&mut self, checker: Checker) {
        debug_assert!(self.owner.is_none_or(|owner| owner == checker.owner()));
        self.owner = Some(checker.owner());
        self.count += 1;
    }
}

/// The authoritative backgammon position.
///
/// Points are indexed 0..=23 from white's home edge. Per-player data (bar, borne
/// off checkers) lives in two element arrays indexed by [`Player::index`]. The
/// whole board is a small `Copy` value so move selection can simulate on a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    points: [Point; 24],
    bar: [u8; 2],
    off: [u8; 2],
    current_player: Player,
    winner: Option<Player>,
    dice: DiceValues,
}

impl Board {
    /// Creates a new board with the default starting position.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (index, player, count) in [
            (23, Player::White, 2),
            (12, Player::White, 5),
            (7, Player::White, 3),
            (5, Player::White, 5),
            (0, Player::Black, 2),
            (11, Player::Black, 5),
            (16, Player::Black, 3),
            (18, Player::Black, 5),
        ] {
            board.points[index] = Point { owner: Some(player), count };
        }
        board
    }

    /// Creates an empty board with no checkers on it.
    pub fn empty() -> Self {
        Board {
            points: [Point::default(); 24],
            bar: [0; 2],
            off: [0; 2],
            current_player: Player::White,
            winner: None,
            dice: DiceValues::new(),
        }
    }

    /// Scatters each player's 15 checkers over random points, never onto a point
    /// the other player already holds.
    pub fn randomized<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Board::empty();
        for player in Player::ALL {
            let mut remaining = CHECKERS_PER_PLAYER;
            while remaining > 0 {
                let point = &mut board.points[rng.random_range(0..24)];
                if point.owner.is_none_or(|owner| owner == player) {
                    let count = rng.random_range(1..=remaining);
                    point.owner = Some(player);
                    point.count += count;
                    remaining -= count;
                }
            }
        }
        board
    }

    /// Puts `count` checkers of `player` on a point, replacing what was there.
    /// Meant for setting up positions; the caller keeps the checker total at 15.
    pub fn place(&mut self, index: usize, player: Player, count: u8) -> Result<(), GameError> {
        if count > CHECKERS_PER_PLAYER {
            return Err(GameError::TooManyCheckers(count));
        }
        let point = self.points.get_mut(index).ok_or(GameError::OutOfRange(index))?;
        *point = match count {
            0 => Point::default(),
            _ => Point { owner: Some(player), count },
        };
        Ok(())
    }

    pub fn set_bar(&mut self, player: Player, count: u8) {
        self.bar[player.index()] = count;
    }

    pub fn set_off(&mut self, player: Player, count: u8) {
        self.off[player.index()] = count;
        if count == CHECKERS_PER_PLAYER && self.winner.is_none() {
            self.winner = Some(player);
        }
    }

    pub fn point(&self, index: usize) -> Result<Point, GameError> {
        self.points.get(index).copied().ok_or(GameError::OutOfRange(index))
    }

    pub fn points(&self) -> &[Point; 24] {
        &self.points
    }

    pub fn bar(&self, player: Player) -> u8 {
        self.bar[player.index()]
    }

    pub fn off(&self, player: Player) -> u8 {
        self.off[player.index()]
    }

    pub fn checkers_on_points(&self, player: Player) -> u8 {
        self.points
            .iter()
            .filter(|point| point.is_owned_by(player))
            .fold(0u8, |total, point| total.saturating_add(point.count))
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opposite();
    }

    pub fn dice(&self) -> &[u8] {
        &self.dice
    }

    pub fn set_dice(&mut self, values: &[u8]) -> Result<(), GameError> {
        self.dice = checked_values(values)?;
        Ok(())
    }

    pub(crate) fn sync_dice(&mut self, values: DiceValues) {
        self.dice = values;
    }

    /// Rolls two dice (four values on a double) and keeps them as the board's
    /// pending dice. The game's own [`crate::backgammon::Dice`] is not touched.
    pub fn roll_dice<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &[u8] {
        self.dice = roll_pair(rng);
        &self.dice
    }

    fn owns(&self, index: u8, player: Player) -> bool {
        self.points.get(index as usize).is_some_and(|point| point.is_owned_by(player))
    }

    /// Where a checker from `from` would land with `die`, ignoring legality.
    fn target(from: Source, die: u8, player: Player) -> Option<Destination> {
        let to = match from {
            Source::Bar => return player.entry_point(die).map(Destination::Point),
            Source::Point(index) => index as i16 + die as i16 * player.direction() as i16,
        };
        if (0..24).contains(&to) {
            Some(Destination::Point(to as u8))
        } else {
            Some(Destination::Off)
        }
    }

    /// Sources the player may move from right now: the bar alone while it holds
    /// a checker, otherwise every point the player occupies.
    pub fn movable_sources(&self, player: Player) -> impl Iterator<Item = Source> + '_ {
        let on_bar = self.bar(player) > 0;
        std::iter::once(Source::Bar)
            .filter(move |_| on_bar)
            .chain(
                (0..24u8)
                    .filter(move |&index| !on_bar && self.owns(index, player))
                    .map(Source::Point),
            )
    }

    pub fn is_valid_move(&self, from: Source, die: u8, player: Player) -> bool {
        if !(1..=6).contains(&die) {
            return false;
        }
        let on_bar = self.bar(player) > 0;
        match from {
            Source::Bar if !on_bar => return false,
            Source::Point(_) if on_bar => return false,
            Source::Point(index) if !self.owns(index, player) => return false,
            _ => (),
        }
        match (from, Self::target(from, die, player)) {
            (Source::Point(index), Some(Destination::Off)) => {
                self.is_valid_bear_off_move(index, die, player)
            }
            (_, Some(Destination::Point(to))) => !self.points[to as usize].is_blocked_for(player),
            _ => false,
        }
    }

    /// Applies a single checker move and returns where the checker landed.
    ///
    /// The move is validated first; an illegal move leaves the board untouched.
    pub fn move_piece(&mut self, from: Source, die: u8, player: Player) -> Result<Destination, GameError> {
        if !self.is_valid_move(from, die, player) {
            return Err(GameError::illegal_die(from, die));
        }
        let to = Self::target(from, die, player).ok_or(GameError::illegal_die(from, die))?;

        let checker = match from {
            Source::Bar => {
                self.bar[player.index()] -= 1;
                Checker::new(player)
            }
            Source::Point(index) => self.points[index as usize]
                .pop()
                .ok_or(GameError::illegal_die(from, die))?,
        };

        match to {
            Destination::Off => {
                self.off[player.index()] += 1;
                log::debug!("{player} bears off from {from} with {die}");
                if self.off(player) == CHECKERS_PER_PLAYER && self.winner.is_none() {
                    self.winner = Some(player);
                    log::info!("{player} has borne off all checkers and wins");
                }
            }
            Destination::Point(index) => {
                let point = &mut self.points[index as usize];
                if point.is_owned_by(player.opposite()) {
                    if let Some(hit) = point.pop() {
                        log::debug!("{player} hits a {} blot on {index}", hit.owner());
                        self.bar[hit.owner().index()] += 1;
                    }
                }
                self.points[index as usize].push(checker);
                log::debug!("{player} moves {from} -> {index} with {die}");
            }
        }
        Ok(to)
    }

    pub fn can_player_bear_off(&self, player: Player) -> bool {
        if self.bar(player) > 0 {
            return false;
        }
        let in_home: u8 = player
            .home_board()
            .map(|index| &self.points[index as usize])
            .filter(|point| point.is_owned_by(player))
            .map(|point| point.count)
            .sum();
        in_home + self.off(player) == CHECKERS_PER_PLAYER
    }

    /// An exact die always bears off. A larger die only bears off the checker
    /// farthest from the edge, i.e. when no checker of `player` sits behind `from`.
    pub fn is_valid_bear_off_move(&self, from: u8, die: u8, player: Player) -> bool {
        if !self.can_player_bear_off(player) || !self.owns(from, player) {
            return false;
        }
        let required = player.bear_off_distance(from);
        if die == required {
            return true;
        }
        if die < required {
            return false;
        }
        !player
            .home_board()
            .filter(|&index| player.bear_off_distance(index) > required)
            .any(|index| self.owns(index, player))
    }

    /// Every destination reachable from `from` with one of the distinct `dice` values.
    pub fn get_possible_moves_for_checker(&self, from: Source, player: Player, dice: &[u8]) -> Vec<Destination> {
        let mut moves = Vec::new();
        for die in distinct_values(dice) {
            if !self.is_valid_move(from, die, player) {
                continue;
            }
            if let Some(to) = Self::target(from, die, player) {
                if !moves.contains(&to) {
                    moves.push(to);
                }
            }
        }
        moves
    }

    pub fn has_any_valid_moves(&self, player: Player, dice: &[u8]) -> bool {
        self.movable_sources(player)
            .any(|from| distinct_values(dice).any(|die| self.is_valid_move(from, die, player)))
    }

    /// The exact die that bears a checker off `from`, if it is among `dice` and legal.
    pub fn find_die_for_bear_off(&self, from: u8, player: Player, dice: &[u8]) -> Option<u8> {
        if from > 23 {
            return None;
        }
        let required = player.bear_off_distance(from);
        (dice.contains(&required) && self.is_valid_bear_off_move(from, required, player))
            .then_some(required)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterates the values of `dice` once each, in first-seen order.
pub(crate) fn distinct_values(dice: &[u8]) -> impl Iterator<Item = u8> + '_ {
    dice.iter()
        .enumerate()
        .filter(|&(i, die)| !dice[..i].contains(die))
        .map(|(_, &die)| die)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |index: usize| {
            let point = self.points[index];
            match point.owner {
                Some(Player::White) => format!("{:>2}W", point.count),
                Some(Player::Black) => format!("{:>2}B", point.count),
                None => "  .".to_string(),
            }
        };
        let top: Vec<usize> = (12..24).collect();
        let bottom: Vec<usize> = (0..12).rev().collect();

        for row in [&top, &bottom] {
            let labels: String = row.iter().map(|i| format!(" {:>3}", i)).collect();
            let cells: String = row.iter().map(|&i| format!(" {}", cell(i))).collect();
            if row == &top {
                writeln!(f, "{labels}")?;
                writeln!(f, "{cells}")?;
                writeln!(f, "{}", "=".repeat(48))?;
            } else {
                writeln!(f, "{cells}")?;
                writeln!(f, "{labels}")?;
            }
        }
        write!(
            f,
            "Bar: W {} B {} | Off: W {} B {}",
            self.bar[0], self.bar[1], self.off[0], self.off[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn conserved(board: &Board) -> bool {
        Player::ALL.iter().all(|&p| {
            board.checkers_on_points(p) + board.bar(p) + board.off(p) == CHECKERS_PER_PLAYER
        })
    }

    /// Empty board where `player` has already borne off everything except the
    /// checkers listed in `checkers`.
    fn bear_off_position(player: Player, checkers: &[(usize, u8)]) -> Board {
        let mut board = Board::empty();
        let on_board: u8 = checkers.iter().map(|(_, n)| n).sum();
        for &(index, count) in checkers {
            board.place(index, player, count).unwrap();
        }
        board.set_off(player, CHECKERS_PER_PLAYER - on_board);
        board
    }

    #[test]
    fn standard_layout() {
        let board = Board::new();
        let white: Vec<(usize, u8)> = (0..24)
            .filter(|&i| board.points[i].is_owned_by(Player::White))
            .map(|i| (i, board.points[i].len()))
            .collect();
        assert_eq!(white, vec![(5, 5), (7, 3), (12, 5), (23, 2)]);
        let home: Vec<u8> = (0..6)
            .map(|i| if board.points[i].is_owned_by(Player::White) { board.points[i].len() } else { 0 })
            .collect();
        assert_eq!(home, vec![0, 0, 0, 0, 0, 5]);
        assert!(conserved(&board));
        assert!(!board.can_player_bear_off(Player::White));
        assert!(!board.can_player_bear_off(Player::Black));
        assert_eq!(board.winner(), None);
        assert!(!board.is_game_over());
    }

    #[test]
    fn randomized_layout_conserves_checkers() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let board = Board::randomized(&mut rng);
            assert!(conserved(&board));
            assert!(board.points.iter().all(|p| p.is_empty() == p.owner().is_none()));
        }
    }

    #[test]
    fn point_out_of_range() {
        let board = Board::new();
        assert_eq!(board.point(24), Err(GameError::OutOfRange(24)));
        assert_eq!(board.point(23).unwrap().owner(), Some(Player::White));
        assert!(board.point(1).unwrap().is_empty());
    }

    #[test]
    fn roll_dice_stores_pending_values() {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(5);
        let rolled = board.roll_dice(&mut rng).to_vec();
        assert_eq!(board.dice(), rolled.as_slice());
        assert!(rolled.len() == 2 || rolled.len() == 4);
    }

    #[test]
    fn simple_move_and_ownership() {
        let mut board = Board::new();
        assert!(board.is_valid_move(Source::Point(12), 3, Player::White));
        let to = board.move_piece(Source::Point(12), 3, Player::White).unwrap();
        assert_eq!(to, Destination::Point(9));
        assert!(board.points[9].is_owned_by(Player::White));
        assert_eq!(board.points[12].len(), 4);
        assert!(conserved(&board));
    }

    #[test]
    fn cannot_move_from_foreign_or_empty_point() {
        let board = Board::new();
        assert!(!board.is_valid_move(Source::Point(0), 3, Player::White));
        assert!(!board.is_valid_move(Source::Point(1), 3, Player::White));
        assert!(!board.is_valid_move(Source::Point(30), 3, Player::White));
        assert!(!board.is_valid_move(Source::Point(12), 0, Player::White));
        assert!(!board.is_valid_move(Source::Bar, 3, Player::White));
    }

    #[test]
    fn guarded_point_blocks() {
        let board = Board::new();
        // 12 - 1 = 11 holds five black checkers.
        assert!(!board.is_valid_move(Source::Point(12), 1, Player::White));
        // 0 + 5 = 5 holds five white checkers.
        assert!(!board.is_valid_move(Source::Point(0), 5, Player::Black));
    }

    #[test]
    fn illegal_move_leaves_board_unchanged() {
        let mut board = Board::new();
        let before = board;
        let result = board.move_piece(Source::Point(12), 1, Player::White);
        assert_eq!(result, Err(GameError::illegal_die(Source::Point(12), 1)));
        assert_eq!(board, before);
    }

    #[test]
    fn hitting_a_blot_sends_it_to_the_bar() {
        let mut board = Board::empty();
        board.place(12, Player::White, 2).unwrap();
        board.place(9, Player::Black, 1).unwrap();
        board.move_piece(Source::Point(12), 3, Player::White).unwrap();
        assert_eq!(board.bar(Player::Black), 1);
        assert_eq!(board.points[9].owner(), Some(Player::White));
        assert_eq!(board.points[9].len(), 1);
        assert_eq!(board.points[12].len(), 1);
    }

    #[test]
    fn bar_priority() {
        let mut board = Board::new();
        board.place(23, Player::White, 1).unwrap();
        board.set_bar(Player::White, 1);
        assert!(conserved(&board));

        assert!(board.is_valid_move(Source::Bar, 3, Player::White));
        for die in 1..=6 {
            for index in 0..24 {
                assert!(!board.is_valid_move(Source::Point(index), die, Player::White));
            }
        }
        let sources: Vec<Source> = board.movable_sources(Player::White).collect();
        assert_eq!(sources, vec![Source::Bar]);

        board.move_piece(Source::Bar, 3, Player::White).unwrap();
        assert_eq!(board.bar(Player::White), 0);
        assert!(board.points[21].is_owned_by(Player::White));
        assert!(board.is_valid_move(Source::Point(12), 3, Player::White));
    }

    #[test]
    fn bar_entry_blocked_by_guarded_point() {
        let mut board = Board::new();
        board.place(0, Player::Black, 1).unwrap();
        board.set_bar(Player::Black, 1);
        // Black enters on die - 1; point 5 holds five white checkers.
        assert!(!board.is_valid_move(Source::Bar, 6, Player::Black));
        assert!(board.is_valid_move(Source::Bar, 2, Player::Black));
        assert_eq!(board.get_possible_moves_for_checker(Source::Bar, Player::Black, &[6, 2]),
            vec![Destination::Point(1)]);
    }

    #[test]
    fn bear_off_gating() {
        let mut board = bear_off_position(Player::White, &[(0, 3), (5, 2)]);
        assert!(board.can_player_bear_off(Player::White));

        board.set_bar(Player::White, 1);
        board.place(5, Player::White, 1).unwrap();
        assert!(!board.can_player_bear_off(Player::White));

        let mut board = bear_off_position(Player::White, &[(0, 3), (6, 1)]);
        assert!(!board.can_player_bear_off(Player::White));
        assert!(!board.is_valid_move(Source::Point(0), 1, Player::White));
        board.move_piece(Source::Point(6), 1, Player::White).unwrap();
        assert!(board.can_player_bear_off(Player::White));
        assert!(board.is_valid_move(Source::Point(0), 1, Player::White));
    }

    #[test]
    fn overshoot_rule_white() {
        let board = bear_off_position(Player::White, &[(1, 1), (2, 1)]);
        assert!(board.is_valid_bear_off_move(2, 3, Player::White));
        assert!(board.is_valid_bear_off_move(2, 6, Player::White));
        assert!(!board.is_valid_bear_off_move(2, 2, Player::White));
        assert!(board.is_valid_bear_off_move(1, 2, Player::White));
        assert!(!board.is_valid_bear_off_move(1, 6, Player::White));
        assert!(board.is_valid_move(Source::Point(2), 6, Player::White));
        assert!(!board.is_valid_move(Source::Point(1), 6, Player::White));
    }

    #[test]
    fn overshoot_rule_black() {
        let board = bear_off_position(Player::Black, &[(21, 1), (22, 2)]);
        assert!(board.is_valid_bear_off_move(21, 3, Player::Black));
        assert!(board.is_valid_bear_off_move(21, 5, Player::Black));
        assert!(!board.is_valid_bear_off_move(22, 5, Player::Black));
        assert!(board.is_valid_bear_off_move(22, 2, Player::Black));
        // 22 - 1 lands on 23, an ordinary move.
        assert!(board.is_valid_move(Source::Point(22), 1, Player::Black));
    }

    #[test]
    fn bear_off_requires_own_checker() {
        let board = bear_off_position(Player::White, &[(3, 1)]);
        assert!(!board.is_valid_bear_off_move(0, 1, Player::White));
        assert!(!board.is_valid_bear_off_move(3, 4, Player::Black));
    }

    #[test]
    fn win_detection_is_permanent() {
        let mut board = bear_off_position(Player::White, &[(0, 1)]);
        board.place(23, Player::Black, 15).unwrap();
        assert_eq!(board.move_piece(Source::Point(0), 1, Player::White), Ok(Destination::Off));
        assert_eq!(board.off(Player::White), 15);
        assert_eq!(board.winner(), Some(Player::White));
        assert!(board.is_game_over());

        board.set_off(Player::Black, 15);
        assert_eq!(board.winner(), Some(Player::White));
    }

    #[test]
    fn possible_moves_for_checker() {
        let board = Board::new();
        let moves = board.get_possible_moves_for_checker(Source::Point(12), Player::White, &[3, 1, 3]);
        assert_eq!(moves, vec![Destination::Point(9)]);

        let board = bear_off_position(Player::White, &[(2, 1)]);
        let moves = board.get_possible_moves_for_checker(Source::Point(2), Player::White, &[5, 6]);
        assert_eq!(moves, vec![Destination::Off]);
        let moves = board.get_possible_moves_for_checker(Source::Point(2), Player::White, &[1, 3]);
        assert_eq!(moves, vec![Destination::Point(1), Destination::Off]);
    }

    #[test]
    fn forced_pass() {
        let mut board = Board::new();
        board.place(23, Player::White, 1).unwrap();
        board.set_bar(Player::White, 1);
        // Every entry point 18..=23 is guarded by black.
        board.place(23, Player::Black, 2).unwrap();
        board.place(12, Player::White, 6).unwrap();
        for index in 19..=22 {
            board.place(index, Player::Black, 2).unwrap();
        }
        assert!(!board.has_any_valid_moves(Player::White, &[1, 2]));
        assert!(!board.has_any_valid_moves(Player::White, &[6, 6, 6, 6]));
        assert!(board.has_any_valid_moves(Player::Black, &[1, 2]));
    }

    #[test]
    fn find_die_for_bear_off_needs_exact_die() {
        let board = bear_off_position(Player::White, &[(3, 1)]);
        assert_eq!(board.find_die_for_bear_off(3, Player::White, &[4, 1]), Some(4));
        assert_eq!(board.find_die_for_bear_off(3, Player::White, &[6, 1]), None);
        assert_eq!(board.find_die_for_bear_off(30, Player::White, &[4]), None);

        let board = Board::new();
        assert_eq!(board.find_die_for_bear_off(5, Player::White, &[6]), None);
    }

    #[test]
    fn switch_player_toggles() {
        let mut board = Board::new();
        assert_eq!(board.current_player(), Player::White);
        board.switch_player();
        assert_eq!(board.current_player(), Player::Black);
    }

    #[test]
    fn set_dice_validates_values() {
        let mut board = Board::new();
        board.set_dice(&[5, 2]).unwrap();
        assert_eq!(board.set_dice(&[2, 2, 2, 2, 2]), Err(GameError::InvalidDice(vec![2, 2, 2, 2, 2])));
        assert_eq!(board.set_dice(&[9]), Err(GameError::InvalidDice(vec![9])));
        assert_eq!(board.dice(), &[5, 2]);
    }

    #[test]
    fn place_caps_checker_count() {
        let mut board = Board::empty();
        assert_eq!(board.place(3, Player::White, 16), Err(GameError::TooManyCheckers(16)));
        assert!(board.point(3).unwrap().is_empty());
        board.place(3, Player::White, 15).unwrap();
        assert_eq!(board.checkers_on_points(Player::White), 15);
    }

    #[test]
    fn oversized_setup_does_not_overflow_the_count() {
        let mut board = Board::empty();
        for index in 0..24 {
            board.place(index, Player::Black, 15).unwrap();
        }
        assert_eq!(board.checkers_on_points(Player::Black), u8::MAX);
    }

    #[test]
    fn display_shows_counts() {
        let text = Board::new().to_string();
        assert!(text.contains(" 5W"));
        assert!(text.contains(" 2B"));
        assert!(text.ends_with("Bar: W 0 B 0 | Off: W 0 B 0"));
    }
}
