use hashbrown::HashMap;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::backgammon::{Game, GameError, Participant, Player};

pub const WHITE_NAME: &str = "White AI";
pub const BLACK_NAME: &str = "Black AI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub games: u32,
    /// Game `i` is seeded with `seed + i`.
    pub seed: u64,
    pub random_layout: bool,
    /// Turns after which a game is abandoned as unfinished.
    pub max_turns: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 100,
            seed: 0,
            random_layout: false,
            max_turns: 2_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub winner: Option<Player>,
    pub winner_name: Option<String>,
    pub turns: u32,
    pub moves_played: u32,
    /// Turns where the player could move but ended with dice left over.
    pub forfeited_turns: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SimulationSummary {
    pub games: u32,
    pub wins: HashMap<String, u32>,
    pub unfinished: u32,
    pub total_turns: u64,
}

impl SimulationSummary {
    fn record(&mut self, report: &GameReport) {
        self.games += 1;
        self.total_turns += report.turns as u64;
        match &report.winner_name {
            Some(name) => *self.wins.entry(name.clone()).or_insert(0) += 1,
            None => self.unfinished += 1,
        }
    }

    pub fn wins_of(&self, name: &str) -> u32 {
        self.wins.get(name).copied().unwrap_or(0)
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }
}

/// Plays one AI against AI game to the end, or until `config.max_turns`.
pub fn play_game(seed: u64, config: &SimulationConfig) -> Result<GameReport, GameError> {
    let mut game = Game::seeded(
        Participant::ai(WHITE_NAME, Player::White),
        Participant::ai(BLACK_NAME, Player::Black),
        config.random_layout,
        seed,
    )?;
    game.determine_first_player();

    let mut turns = 0;
    let mut moves_played = 0;
    let mut forfeited_turns = 0;
    while turns < config.max_turns {
        // The opening turn plays the initial roll.
        if turns > 0 {
            game.roll_dice();
        }
        turns += 1;

        let player = game.current_player().color();
        if game.has_possible_moves(player) {
            let played = game.play_ai_turn();
            moves_played += played.len() as u32;
            if !game.dice().is_empty() && game.has_possible_moves(player) && !game.is_game_over() {
                forfeited_turns += 1;
            }
        } else {
            log::debug!("{player} cannot move with {:?} and passes", game.dice().values());
        }
        log::trace!("after turn {turns}:\n{}", game.board());

        if game.is_game_over() {
            break;
        }
        game.switch_player();
    }

    let winner = game.board().winner();
    let winner_name = game.winner().map(|participant| participant.name().to_string());
    match &winner_name {
        Some(name) => log::debug!("game {seed}: {name} wins after {turns} turns"),
        None => log::debug!("game {seed}: unfinished after {turns} turns"),
    }
    Ok(GameReport { winner, winner_name, turns, moves_played, forfeited_turns })
}

/// Plays `config.games` independent games in parallel and tallies the results.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationSummary, GameError> {
    let reports = (0..config.games)
        .into_par_iter()
        .map(|i| play_game(config.seed.wrapping_add(i as u64), config))
        .collect::<Result<Vec<_>, _>>()?;

    let mut summary = SimulationSummary::default();
    for report in &reports {
        summary.record(report);
    }
    log::info!(
        "{} games: {} {} wins, {} {} wins, {} unfinished",
        summary.games,
        WHITE_NAME,
        summary.wins_of(WHITE_NAME),
        BLACK_NAME,
        summary.wins_of(BLACK_NAME),
        summary.unfinished
    );
    Ok(summary)
}
