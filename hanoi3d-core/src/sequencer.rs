/// Iterative Towers of Hanoi move sequencer
///
/// The solver visits three peg pairs in a fixed cycle whose order depends on
/// the parity of the disc count. For each pair the direction is decided by
/// comparing top discs only, so no recursion or lookahead is needed.
use std::time::Duration;

use log::{debug, error, info};

use crate::error::HanoiError;
use crate::pegs::{Disc, Peg, PegState};

/// Default tween time handed to drivers that don't choose their own.
pub const DEFAULT_TWEEN_TIME: Duration = Duration::from_millis(500);

/// One disc transfer performed by [`MoveSequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub disc: Disc,
    pub from: Peg,
    pub to: Peg,
    /// Whether this move completed the puzzle.
    pub finished: bool,
}

/// Pair of pegs visited at position `move_id` of the three-move cycle.
pub fn peg_pair(move_id: u8, num_discs: usize) -> (Peg, Peg) {
    let odd = num_discs % 2 == 1;
    match move_id {
        0 if odd => (Peg::Left, Peg::Right),
        0 => (Peg::Left, Peg::Middle),
        1 if odd => (Peg::Left, Peg::Middle),
        1 => (Peg::Left, Peg::Right),
        _ => (Peg::Middle, Peg::Right),
    }
}

/// Number of moves an optimal solution of `num_discs` discs takes, or `None`
/// if it doesn't fit in a `u128`.
pub fn minimum_moves(num_discs: usize) -> Option<u128> {
    u32::try_from(num_discs)
        .ok()
        .and_then(|n| 1u128.checked_shl(n))
        .map(|total| total - 1)
}

/// Direction for a transfer between `a` and `b`: the smaller top disc moves.
fn resolve_direction(pegs: &PegState, a: Peg, b: Peg) -> Result<(Peg, Peg), HanoiError> {
    match (pegs.top_disc(a), pegs.top_disc(b)) {
        (None, None) => Err(HanoiError::NoValidMove(a, b)),
        (None, Some(_)) => Ok((b, a)),
        (Some(_), None) => Ok((a, b)),
        (Some(top_a), Some(top_b)) if top_a < top_b => Ok((a, b)),
        (Some(_), Some(_)) => Ok((b, a)),
    }
}

/// Owns a puzzle and steps it one move at a time until it is solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSequencer {
    pegs: PegState,
    move_id: u8,
    finished: bool,
    busy: bool,
    moves_made: u64,
    tween_time: Duration,
}

impl MoveSequencer {
    pub fn new(num_discs: usize) -> Result<Self, HanoiError> {
        Self::with_tween_time(num_discs, DEFAULT_TWEEN_TIME)
    }

    /// Like [`MoveSequencer::new`], also recording the driver's animation
    /// duration. The sequencer itself never reads it.
    pub fn with_tween_time(num_discs: usize, tween_time: Duration) -> Result<Self, HanoiError> {
        Ok(Self {
            pegs: PegState::new(num_discs)?,
            move_id: 0,
            finished: false,
            busy: false,
            moves_made: 0,
            tween_time,
        })
    }

    pub fn pegs(&self) -> &PegState {
        &self.pegs
    }

    pub fn num_discs(&self) -> usize {
        self.pegs.num_discs()
    }

    /// Position within the three-move cycle.
    pub fn move_id(&self) -> u8 {
        self.move_id
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Set by `advance`, cleared by the driver through [`MoveSequencer::settle`].
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Marks the last move as fully presented.
    pub fn settle(&mut self) {
        self.busy = false;
    }

    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    pub fn tween_time(&self) -> Duration {
        self.tween_time
    }

    pub fn set_tween_time(&mut self, tween_time: Duration) {
        self.tween_time = tween_time;
    }

    /// Perform the next move of the solution.
    ///
    /// Fails with [`HanoiError::PuzzleFinished`] once the right peg holds every
    /// disc. Any error leaves the sequencer unchanged.
    pub fn advance(&mut self) -> Result<Move, HanoiError> {
        if self.finished {
            return Err(HanoiError::PuzzleFinished);
        }

        let (a, b) = peg_pair(self.move_id, self.pegs.num_discs());
        let step = resolve_direction(&self.pegs, a, b)
            .and_then(|(from, to)| Ok((self.pegs.transfer(from, to)?, from, to)));
        let (disc, from, to) = match step {
            Ok(step) => step,
            Err(e) => {
                error!(
                    "move {} between pegs {a} and {b} failed: {e}",
                    self.moves_made + 1
                );
                return Err(e);
            }
        };

        self.busy = true;
        self.move_id = (self.move_id + 1) % 3;
        self.moves_made += 1;
        self.finished = self.pegs.is_solved();

        debug!("move {}: disc {disc} from peg {from} to peg {to}", self.moves_made);
        if self.finished {
            info!(
                "solved {} discs in {} moves",
                self.pegs.num_discs(),
                self.moves_made
            );
        }

        Ok(Move {
            disc,
            from,
            to,
            finished: self.finished,
        })
    }

    /// Start over with `num_discs` discs, or the current count if `None`.
    pub fn reset(&mut self, num_discs: Option<usize>) -> Result<(), HanoiError> {
        let num_discs = num_discs.unwrap_or(self.pegs.num_discs());
        *self = Self::with_tween_time(num_discs, self.tween_time)?;
        info!("reset puzzle with {num_discs} discs");
        Ok(())
    }

    /// Change the disc count, which always restarts the puzzle.
    pub fn set_num_discs(&mut self, num_discs: usize) -> Result<(), HanoiError> {
        self.reset(Some(num_discs))
    }

    /// Iterator that keeps advancing until the puzzle is finished or a move
    /// fails. Each move is settled immediately.
    pub fn remaining_moves(&mut self) -> RemainingMoves<'_> {
        RemainingMoves {
            sequencer: self,
            failed: false,
        }
    }
}

/// Returned by [`MoveSequencer::remaining_moves`].
pub struct RemainingMoves<'a> {
    sequencer: &'a mut MoveSequencer,
    failed: bool,
}

impl Iterator for RemainingMoves<'_> {
    type Item = Result<Move, HanoiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.sequencer.is_finished() {
            return None;
        }
        let result = self.sequencer.advance();
        self.sequencer.settle();
        self.failed = result.is_err();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(pegs: &PegState, peg: Peg) -> Vec<usize> {
        pegs.discs(peg).iter().map(|d| d.rank()).collect()
    }

    fn assert_invariants(pegs: &PegState) {
        let mut seen = Vec::new();
        for peg in Peg::ALL {
            let discs = pegs.discs(peg);
            assert!(
                discs.windows(2).all(|w| w[0] > w[1]),
                "peg {peg} out of order: {discs:?}"
            );
            seen.extend(discs.iter().map(|d| d.rank()));
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=pegs.num_discs()).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_disc() {
        let mut seq = MoveSequencer::new(1).unwrap();
        let mv = seq.advance().unwrap();
        assert_eq!(
            mv,
            Move {
                disc: Disc::new(1),
                from: Peg::Left,
                to: Peg::Right,
                finished: true
            }
        );
        assert!(seq.is_finished());
    }

    #[test]
    fn test_two_discs_sequence() {
        let mut seq = MoveSequencer::new(2).unwrap();
        let moves: Vec<_> = (0..3).map(|_| seq.advance().unwrap()).collect();
        let summary: Vec<_> = moves
            .iter()
            .map(|m| (m.disc.rank(), m.from.index(), m.to.index()))
            .collect();
        assert_eq!(summary, vec![(1, 0, 1), (2, 0, 2), (1, 1, 2)]);
        assert!(!moves[0].finished);
        assert!(!moves[1].finished);
        assert!(moves[2].finished);
    }

    #[test]
    fn test_three_discs_finish_in_seven() {
        let mut seq = MoveSequencer::new(3).unwrap();
        for i in 1..=7 {
            assert!(!seq.is_finished(), "finished early after {} moves", i - 1);
            seq.advance().unwrap();
        }
        assert!(seq.is_finished());
        assert_eq!(ranks(seq.pegs(), Peg::Right), vec![3, 2, 1]);
    }

    #[test]
    fn test_advance_after_finish_is_rejected() {
        let mut seq = MoveSequencer::new(3).unwrap();
        seq.remaining_moves().for_each(|m| {
            m.unwrap();
        });
        let before = seq.clone();
        assert_eq!(seq.advance(), Err(HanoiError::PuzzleFinished));
        assert_eq!(seq.advance(), Err(HanoiError::PuzzleFinished));
        assert_eq!(seq, before);
    }

    #[test]
    fn test_reset_matches_fresh_sequencer() {
        let mut seq = MoveSequencer::new(3).unwrap();
        for _ in 0..5 {
            seq.advance().unwrap();
        }
        seq.reset(Some(4)).unwrap();
        assert_eq!(ranks(seq.pegs(), Peg::Left), vec![4, 3, 2, 1]);
        assert!(seq.pegs().is_empty(Peg::Middle));
        assert!(seq.pegs().is_empty(Peg::Right));
        assert_eq!(seq.move_id(), 0);
        assert!(!seq.is_finished());
        assert!(!seq.is_busy());
        assert_eq!(seq, MoveSequencer::new(4).unwrap());
    }

    #[test]
    fn test_reset_keeps_disc_count_and_tween_time() {
        let mut seq = MoveSequencer::with_tween_time(5, Duration::from_millis(150)).unwrap();
        seq.advance().unwrap();
        seq.reset(None).unwrap();
        assert_eq!(seq.num_discs(), 5);
        assert_eq!(seq.tween_time(), Duration::from_millis(150));
        assert_eq!(seq.moves_made(), 0);
    }

    #[test]
    fn test_reset_to_zero_discs_fails_without_change() {
        let mut seq = MoveSequencer::new(3).unwrap();
        seq.advance().unwrap();
        let before = seq.clone();
        assert_eq!(seq.set_num_discs(0), Err(HanoiError::InvalidDiscCount));
        assert_eq!(seq, before);
    }

    #[test]
    fn test_busy_flag() {
        let mut seq = MoveSequencer::new(2).unwrap();
        assert!(!seq.is_busy());
        seq.advance().unwrap();
        assert!(seq.is_busy());
        seq.settle();
        assert!(!seq.is_busy());
    }

    #[test]
    fn test_cycle_counter_wraps() {
        let mut seq = MoveSequencer::new(4).unwrap();
        let ids: Vec<_> = (0..6)
            .map(|_| {
                let id = seq.move_id();
                seq.advance().unwrap();
                id
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_both_pegs_empty() {
        let pegs = PegState::new(1).unwrap();
        assert_eq!(
            resolve_direction(&pegs, Peg::Middle, Peg::Right),
            Err(HanoiError::NoValidMove(Peg::Middle, Peg::Right))
        );
    }

    #[test]
    fn test_peg_pairs_follow_parity() {
        assert_eq!(peg_pair(0, 3), (Peg::Left, Peg::Right));
        assert_eq!(peg_pair(1, 3), (Peg::Left, Peg::Middle));
        assert_eq!(peg_pair(0, 4), (Peg::Left, Peg::Middle));
        assert_eq!(peg_pair(1, 4), (Peg::Left, Peg::Right));
        assert_eq!(peg_pair(2, 4), (Peg::Middle, Peg::Right));
    }

    #[test]
    fn test_minimum_moves() {
        assert_eq!(minimum_moves(1), Some(1));
        assert_eq!(minimum_moves(10), Some(1023));
        assert_eq!(minimum_moves(100), Some((1u128 << 100) - 1));
        assert_eq!(minimum_moves(128), None);
    }

    #[test]
    fn test_every_step_is_legal_up_to_twelve_discs() {
        for n in 1..=12 {
            let mut seq = MoveSequencer::new(n).unwrap();
            let mut count = 0u128;
            while !seq.is_finished() {
                let mut before = seq.pegs().clone();
                let mv = seq.advance().unwrap();
                // The opposite direction must be the illegal one.
                assert!(before.transfer(mv.to, mv.from).is_err());
                assert_invariants(seq.pegs());
                count += 1;
            }
            assert_eq!(Some(count), minimum_moves(n), "n = {n}");
            assert_eq!(seq.pegs().len(Peg::Right), n);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn invariants_hold_along_any_prefix(n in 1usize..=10, steps in 0usize..1100) {
                let mut seq = MoveSequencer::new(n).unwrap();
                let total = minimum_moves(n).unwrap() as usize;
                for _ in 0..steps.min(total) {
                    let mv = seq.advance().unwrap();
                    prop_assert_eq!(mv.finished, seq.is_finished());
                    assert_invariants(seq.pegs());
                }
                prop_assert_eq!(seq.is_finished(), steps >= total);
            }

            #[test]
            fn reset_is_equivalent_to_new(n in 1usize..=8, m in 1usize..=8, steps in 0usize..300) {
                let mut seq = MoveSequencer::new(n).unwrap();
                for mv in seq.remaining_moves().take(steps) {
                    mv.unwrap();
                }
                seq.reset(Some(m)).unwrap();
                prop_assert_eq!(seq, MoveSequencer::new(m).unwrap());
            }
        }
    }
}
