/// Discs, pegs and the stacking invariant
use std::fmt;

use log::trace;

use crate::error::HanoiError;

/// A disc identified by its size rank. Rank 1 is the smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Disc(usize);

impl Disc {
    pub fn new(rank: usize) -> Self {
        Self(rank)
    }

    pub fn rank(self) -> usize {
        self.0
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three pegs, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peg {
    Left,
    Middle,
    Right,
}

impl Peg {
    pub const ALL: [Peg; 3] = [Peg::Left, Peg::Middle, Peg::Right];

    pub fn index(self) -> usize {
        match self {
            Peg::Left => 0,
            Peg::Middle => 1,
            Peg::Right => 2,
        }
    }
}

impl TryFrom<usize> for Peg {
    type Error = HanoiError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Peg::ALL
            .get(index)
            .copied()
            .ok_or(HanoiError::InvalidPeg(index))
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Three stacks of discs. On every peg ranks strictly decrease from bottom to
/// top; `transfer` is the only mutation and never breaks that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PegState {
    pegs: [Vec<Disc>; 3],
    num_discs: usize,
}

impl PegState {
    /// All `num_discs` discs stacked on the left peg, largest at the bottom.
    pub fn new(num_discs: usize) -> Result<Self, HanoiError> {
        if num_discs == 0 {
            return Err(HanoiError::InvalidDiscCount);
        }
        let tower = (1..=num_discs).rev().map(Disc::new).collect();
        Ok(Self {
            pegs: [tower, Vec::new(), Vec::new()],
            num_discs,
        })
    }

    pub fn num_discs(&self) -> usize {
        self.num_discs
    }

    /// Discs on `peg`, bottom first.
    pub fn discs(&self, peg: Peg) -> &[Disc] {
        &self.pegs[peg.index()]
    }

    pub fn len(&self, peg: Peg) -> usize {
        self.pegs[peg.index()].len()
    }

    pub fn is_empty(&self, peg: Peg) -> bool {
        self.pegs[peg.index()].is_empty()
    }

    pub fn top_disc(&self, peg: Peg) -> Option<Disc> {
        self.pegs[peg.index()].last().copied()
    }

    /// True once the right peg holds every disc.
    pub fn is_solved(&self) -> bool {
        self.len(Peg::Right) == self.num_discs
    }

    /// Move the top disc of `source` onto `destination`.
    ///
    /// Both checks run before anything is popped, so a rejected transfer
    /// leaves the state untouched.
    pub fn transfer(&mut self, source: Peg, destination: Peg) -> Result<Disc, HanoiError> {
        let disc = self
            .top_disc(source)
            .ok_or(HanoiError::EmptySource(source))?;
        if let Some(onto) = self.top_disc(destination) {
            if onto < disc {
                return Err(HanoiError::IllegalMove { disc, onto });
            }
        }

        self.pegs[source.index()].pop();
        self.pegs[destination.index()].push(disc);
        trace!("transferred disc {disc} from peg {source} to peg {destination}");
        Ok(disc)
    }
}
