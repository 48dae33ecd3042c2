/// World-space placement of the board, rods and discs
///
/// All sizes derive from the disc count so the scene grows with the puzzle.
/// Distances are in scene units where one disc is [`UNIT`] tall; y points up
/// and the board's centre sits at the origin.
use nalgebra::{Point3, Vector3};

use crate::pegs::{Disc, Peg, PegState};
use crate::sequencer::Move;

/// Height of a disc and of the board.
pub const UNIT: f32 = 20.0;
pub const ROD_RADIUS: f32 = 20.0;
pub const DISC_INNER_RADIUS: f32 = 25.0;
/// How far above the rod tops a disc travels between pegs.
pub const LIFT_CLEARANCE: f32 = 40.0;

/// Leg of a disc's journey from one peg to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPhase {
    Lift,
    Traverse,
    Drop,
}

impl PathPhase {
    pub fn next(self) -> Option<PathPhase> {
        match self {
            PathPhase::Lift => Some(PathPhase::Traverse),
            PathPhase::Traverse => Some(PathPhase::Drop),
            PathPhase::Drop => None,
        }
    }
}

/// Start point and the three waypoints a moved disc passes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscPath {
    pub disc: Disc,
    pub start: Point3<f32>,
    pub lift: Point3<f32>,
    pub traverse: Point3<f32>,
    pub drop: Point3<f32>,
}

impl DiscPath {
    /// Where the disc is once `phase` has completed.
    pub fn waypoint(&self, phase: PathPhase) -> Point3<f32> {
        match phase {
            PathPhase::Lift => self.lift,
            PathPhase::Traverse => self.traverse,
            PathPhase::Drop => self.drop,
        }
    }
}

/// Scene dimensions for a puzzle of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    num_discs: usize,
}

impl SceneLayout {
    pub fn new(num_discs: usize) -> Self {
        Self { num_discs }
    }

    pub fn for_pegs(pegs: &PegState) -> Self {
        Self::new(pegs.num_discs())
    }

    pub fn num_discs(&self) -> usize {
        self.num_discs
    }

    fn span(&self) -> f32 {
        (self.num_discs + 3) as f32
    }

    /// Board width, height and depth.
    pub fn board_size(&self) -> Vector3<f32> {
        Vector3::new(self.span() * 120.0, UNIT, self.span() * 40.0)
    }

    /// y coordinate of the board's top face.
    pub fn board_top(&self) -> f32 {
        UNIT / 2.0
    }

    pub fn rod_height(&self) -> f32 {
        (self.num_discs + 2) as f32 * UNIT
    }

    /// Centre of a rod.
    pub fn rod_position(&self, peg: Peg) -> Point3<f32> {
        let x = (peg.index() as f32 - 1.0) * self.span() * 40.0;
        Point3::new(x, self.board_top() + self.rod_height() / 2.0, 0.0)
    }

    /// Larger discs get wider rings.
    pub fn disc_outer_radius(&self, disc: Disc) -> f32 {
        disc.rank() as f32 * UNIT + 2.0 * UNIT
    }

    /// Centre of a disc resting at `level` (0 = bottom) on `peg`.
    pub fn disc_position(&self, peg: Peg, level: usize) -> Point3<f32> {
        Point3::new(self.rod_position(peg).x, (level + 1) as f32 * UNIT, 0.0)
    }

    /// Resting positions of every disc in `pegs`.
    pub fn disc_positions(&self, pegs: &PegState) -> Vec<(Disc, Point3<f32>)> {
        Peg::ALL
            .iter()
            .flat_map(|&peg| {
                pegs.discs(peg)
                    .iter()
                    .enumerate()
                    .map(move |(level, &disc)| (disc, self.disc_position(peg, level)))
            })
            .collect()
    }

    /// Path for `mv`, given the state *after* the move was applied.
    pub fn move_path(&self, mv: &Move, pegs: &PegState) -> DiscPath {
        let travel_y = self.rod_height() + LIFT_CLEARANCE;
        let from_x = self.rod_position(mv.from).x;
        let to_x = self.rod_position(mv.to).x;
        // The disc sat one level above what is left on the source peg.
        let start = self.disc_position(mv.from, pegs.len(mv.from));
        let drop_level = pegs.len(mv.to).saturating_sub(1);

        DiscPath {
            disc: mv.disc,
            start,
            lift: Point3::new(from_x, travel_y, start.z),
            traverse: Point3::new(to_x, travel_y, start.z),
            drop: self.disc_position(mv.to, drop_level),
        }
    }
}
