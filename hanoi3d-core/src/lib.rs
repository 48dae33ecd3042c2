/// Hanoi3D Core Library - Towers of Hanoi solver and scene layout
///
/// This library provides the rendering-independent core: the peg model with
/// its stacking invariant, the iterative move sequencer, and the world-space
/// layout drivers use to place and animate discs.

pub mod error;
pub mod layout;
pub mod pegs;
pub mod sequencer;

// Re-export commonly used types
pub use error::HanoiError;
pub use layout::{DiscPath, PathPhase, SceneLayout};
pub use pegs::{Disc, Peg, PegState};
pub use sequencer::{minimum_moves, Move, MoveSequencer, DEFAULT_TWEEN_TIME};
