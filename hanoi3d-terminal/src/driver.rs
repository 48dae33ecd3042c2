/// Steps the sequencer and holds each moved disc at its path waypoints
use hanoi3d_core::{Disc, DiscPath, HanoiError, MoveSequencer, PathPhase, SceneLayout};
use log::debug;
use nalgebra::Point3;
use std::time::{Duration, Instant};

/// A disc on its way between pegs
#[derive(Debug, Clone, Copy)]
struct Flight {
    path: DiscPath,
    phase: PathPhase,
    phase_started: Instant,
}

/// Runs the puzzle against a clock: a new move starts only once the previous
/// disc has passed through all of its waypoints
pub struct PuzzleDriver {
    sequencer: MoveSequencer,
    layout: SceneLayout,
    flight: Option<Flight>,
}

impl PuzzleDriver {
    pub fn new(num_discs: usize, tween_time: Duration) -> Result<Self, HanoiError> {
        let sequencer = MoveSequencer::with_tween_time(num_discs, tween_time)?;
        let layout = SceneLayout::for_pegs(sequencer.pegs());
        Ok(Self {
            sequencer,
            layout,
            flight: None,
        })
    }

    pub fn sequencer(&self) -> &MoveSequencer {
        &self.sequencer
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// The moving disc and where it currently is
    pub fn flying_disc(&self) -> Option<(Disc, Point3<f32>)> {
        self.flight
            .map(|f| (f.path.disc, f.path.waypoint(f.phase)))
    }

    /// Advance the animation to `now`, starting the next move when idle
    pub fn update(&mut self, now: Instant) -> Result<(), HanoiError> {
        if let Some(flight) = &mut self.flight {
            if now.duration_since(flight.phase_started) < self.sequencer.tween_time() {
                return Ok(());
            }
            match flight.phase.next() {
                Some(phase) => {
                    flight.phase = phase;
                    flight.phase_started = now;
                }
                None => {
                    self.flight = None;
                    self.sequencer.settle();
                }
            }
            return Ok(());
        }

        if self.sequencer.is_busy() || self.sequencer.is_finished() {
            return Ok(());
        }

        let mv = self.sequencer.advance()?;
        let path = self.layout.move_path(&mv, self.sequencer.pegs());
        debug!("animating disc {} along {:?}", mv.disc, path);
        self.flight = Some(Flight {
            path,
            phase: PathPhase::Lift,
            phase_started: now,
        });
        Ok(())
    }

    /// Restart with the current disc count, dropping any move in flight
    pub fn restart(&mut self) -> Result<(), HanoiError> {
        self.sequencer.reset(None)?;
        self.flight = None;
        Ok(())
    }

    /// Restart with a different number of discs
    pub fn set_num_discs(&mut self, num_discs: usize) -> Result<(), HanoiError> {
        self.sequencer.set_num_discs(num_discs)?;
        self.layout = SceneLayout::for_pegs(self.sequencer.pegs());
        self.flight = None;
        Ok(())
    }
}
