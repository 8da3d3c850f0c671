//! One-ply move pickers for the bot and the hint display.
//!
//! None of these look past the move itself: a move is scored only by the
//! kind flags the rules engine attached to it.
//!
//! | Tier                    | Choice                                          |
//! |-------------------------|-------------------------------------------------|
//! | Beginner, Intermediate  | uniformly random legal move                     |
//! | Advanced                | first capture in list order, else random move   |
//! | Grand Master            | highest [`move_score`], first move on ties      |

use rand::{Rng, seq::IndexedRandom};

use crate::types::{Difficulty, MoveInfo};

/// 2 for captures (en passant included), 1 for promotions and kingside
/// castling, 0 otherwise.
pub fn move_score(mv: &MoveInfo) -> u8 {
    if mv.is_capture() {
        2
    } else if mv.flags.promotion || mv.flags.kingside_castle {
        1
    } else {
        0
    }
}

/// Pick the bot's reply. Returns `None` when there are no legal moves,
/// which callers treat as a no-op rather than an error.
pub fn choose_bot_move<'a, R>(
    moves: &'a [MoveInfo],
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<&'a MoveInfo>
where
    R: Rng + ?Sized,
{
    match difficulty {
        Difficulty::Beginner | Difficulty::Intermediate => moves.choose(rng),
        Difficulty::Advanced => {
            let fallback = moves.choose(rng)?;
            Some(first_capture(moves).unwrap_or(fallback))
        }
        Difficulty::GrandMaster => highest_scoring(moves),
    }
}

/// Move suggested to the human. Uses the same rule as the Grand Master
/// bot, so both always agree on identical move lists.
pub fn suggest_move(moves: &[MoveInfo]) -> Option<&MoveInfo> {
    highest_scoring(moves)
}

/// Ordered scan: start from the first move and replace the running best
/// only on a strictly greater score.
fn highest_scoring(moves: &[MoveInfo]) -> Option<&MoveInfo> {
    let (first, rest) = moves.split_first()?;
    let mut best = first;
    let mut best_score = move_score(first);
    for mv in rest {
        let score = move_score(mv);
        if score > best_score {
            best = mv;
            best_score = score;
        }
    }
    Some(best)
}

fn first_capture(moves: &[MoveInfo]) -> Option<&MoveInfo> {
    moves.iter().find(|mv| mv.is_capture())
}
