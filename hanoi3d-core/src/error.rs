/// Errors raised by the puzzle model and move sequencer
use thiserror::Error;

use crate::pegs::{Disc, Peg};

/// Failure kinds for peg transfers and sequencer steps.
///
/// `EmptySource`, `IllegalMove` and `NoValidMove` mean the move selection is
/// broken and should be treated as fatal. `PuzzleFinished` is the one a
/// driver is expected to avoid by checking `finished` first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HanoiError {
    #[error("peg {0} has no discs to move")]
    EmptySource(Peg),

    #[error("cannot place disc {disc} on top of smaller disc {onto}")]
    IllegalMove { disc: Disc, onto: Disc },

    #[error("puzzle is already finished")]
    PuzzleFinished,

    #[error("pegs {0} and {1} are both empty")]
    NoValidMove(Peg, Peg),

    #[error("a puzzle needs at least one disc")]
    InvalidDiscCount,

    #[error("no peg with index {0}")]
    InvalidPeg(usize),
}
