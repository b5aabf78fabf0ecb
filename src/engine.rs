use crate::{
    backgammon::{Board, Destination, HalfMove, Move, Player, Source},
    misc::TinyVec,
};

/// Picks the moves of a whole turn with a greedy, single ply heuristic.
///
/// Works on a private copy of `board`: every chosen half move is applied to the
/// copy before the next die is considered, so later choices see captures and
/// vacated points of earlier ones. Re-entering from the bar comes first; after
/// that the largest die is tried on the checker farthest from home, taking an
/// exact bear-off when possible and an ordinary move otherwise. Stops as soon as
/// no remaining die can be used, forfeiting the rest. There is no lookahead, so
/// this can miss a sequence that would have used every die.
pub fn choose_moves(board: &Board, player: Player, dice: &[u8]) -> Move {
    let mut board = *board;
    let mut remaining = working_dice(dice);
    let mut moves = Move::new();

    while !remaining.is_empty() {
        let choice = if board.bar(player) > 0 {
            choose_bar_entry(&board, player, &remaining)
        } else {
            choose_board_move(&board, player, &remaining)
        };
        let Some((half_move, die)) = choice else {
            break;
        };
        if board.move_piece(half_move.from(), die, player).is_err() {
            break;
        }
        remaining.remove_first(&die);
        moves.add_half_move(half_move);
    }
    moves
}

/// Distinct values largest first, or every value when the roll was a double.
fn working_dice(dice: &[u8]) -> TinyVec<u8, 4> {
    let mut values: Vec<u8> = dice.iter().copied().take(4).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    let has_duplicates = values.windows(2).any(|pair| pair[0] == pair[1]);
    if !has_duplicates {
        values.dedup();
    }
    TinyVec::from_slice(&values)
}

fn choose_bar_entry(board: &Board, player: Player, dice: &[u8]) -> Option<(HalfMove, u8)> {
    dice.iter().find_map(|&die| {
        if !board.is_valid_move(Source::Bar, die, player) {
            return None;
        }
        let to = player.entry_point(die)?;
        Some((HalfMove::new(Source::Bar, Destination::Point(to)), die))
    })
}

fn choose_board_move(board: &Board, player: Player, dice: &[u8]) -> Option<(HalfMove, u8)> {
    let can_bear_off = board.can_player_bear_off(player);
    for &die in dice {
        for index in player.travel_order() {
            let from = Source::Point(index);
            if !board.is_valid_move(from, die, player) {
                continue;
            }
            if can_bear_off && player.bear_off_distance(index) == die {
                return Some((HalfMove::new(from, Destination::Off), die));
            }
            let to = index as i16 + die as i16 * player.direction() as i16;
            if (0..24).contains(&to) {
                return Some((HalfMove::new(from, Destination::Point(to as u8)), die));
            }
        }
    }
    None
}
