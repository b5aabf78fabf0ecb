mod board;
pub use board::Board;
pub use board::Point;
pub use board::CHECKERS_PER_PLAYER;

mod checker;
pub use checker::Checker;

mod player;
pub use player::Player;
pub use player::Participant;
pub use player::PlayerKind;

mod position;
pub use position::Source;
pub use position::Destination;

mod error;
pub use error::GameError;

mod game;
pub use game::Game;

mod halfmove;
pub use halfmove::HalfMove;

mod full_move;
pub use full_move::Move;

mod dice;
pub use dice::Dice;
pub use dice::DiceValues;
