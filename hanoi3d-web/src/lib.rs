/// Hanoi3D Web - WASM bindings for a browser-side scene
///
/// The page owns the 3D scene and its tweens. It asks `WebHanoi` for the next
/// move whenever it is idle, animates the disc along `move_path`, and calls
/// `settle` when the tween completes.

use hanoi3d_core::{HanoiError, Move, MoveSequencer, Peg, SceneLayout};
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// A single move as seen from JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebMove {
    pub disc: u32,
    pub from: u32,
    pub to: u32,
    pub finished: bool,
}

impl From<Move> for WebMove {
    fn from(mv: Move) -> Self {
        Self {
            disc: mv.disc.rank() as u32,
            from: mv.from.index() as u32,
            to: mv.to.index() as u32,
            finished: mv.finished,
        }
    }
}

fn to_js(e: HanoiError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn peg(index: u32) -> Result<Peg, HanoiError> {
    Peg::try_from(index as usize)
}

#[wasm_bindgen]
pub struct WebHanoi {
    sequencer: MoveSequencer,
    last_move: Option<Move>,
}

impl WebHanoi {
    fn try_new(num_discs: u32, tween_time_ms: u32) -> Result<Self, HanoiError> {
        Ok(Self {
            sequencer: MoveSequencer::with_tween_time(
                num_discs as usize,
                Duration::from_millis(u64::from(tween_time_ms)),
            )?,
            last_move: None,
        })
    }

    fn try_next_move(&mut self) -> Result<WebMove, HanoiError> {
        let mv = self.sequencer.advance()?;
        self.last_move = Some(mv);
        Ok(mv.into())
    }

    fn try_peg_discs(&self, index: u32) -> Result<Vec<u32>, HanoiError> {
        Ok(self
            .sequencer
            .pegs()
            .discs(peg(index)?)
            .iter()
            .map(|d| d.rank() as u32)
            .collect())
    }

    fn layout(&self) -> SceneLayout {
        SceneLayout::for_pegs(self.sequencer.pegs())
    }
}

#[wasm_bindgen]
impl WebHanoi {
    #[wasm_bindgen(constructor)]
    pub fn new(num_discs: u32, tween_time_ms: u32) -> Result<WebHanoi, JsValue> {
        Self::try_new(num_discs, tween_time_ms).map_err(to_js)
    }

    /// Perform the next move; throws once the puzzle is finished
    #[wasm_bindgen(js_name = nextMove)]
    pub fn next_move(&mut self) -> Result<WebMove, JsValue> {
        self.try_next_move().map_err(to_js)
    }

    pub fn finished(&self) -> bool {
        self.sequencer.is_finished()
    }

    pub fn busy(&self) -> bool {
        self.sequencer.is_busy()
    }

    /// Call when the tween for the last move has completed
    pub fn settle(&mut self) {
        self.sequencer.settle();
    }

    /// Restart, optionally with a new disc count
    pub fn reset(&mut self, num_discs: Option<u32>) -> Result<(), JsValue> {
        self.sequencer
            .reset(num_discs.map(|n| n as usize))
            .map_err(to_js)?;
        self.last_move = None;
        Ok(())
    }

    #[wasm_bindgen(js_name = setNumDiscs)]
    pub fn set_num_discs(&mut self, num_discs: u32) -> Result<(), JsValue> {
        self.reset(Some(num_discs))
    }

    #[wasm_bindgen(js_name = tweenTime)]
    pub fn tween_time(&self) -> u32 {
        self.sequencer.tween_time().as_millis() as u32
    }

    #[wasm_bindgen(js_name = setTweenTime)]
    pub fn set_tween_time(&mut self, tween_time_ms: u32) {
        self.sequencer
            .set_tween_time(Duration::from_millis(u64::from(tween_time_ms)));
    }

    /// Disc ranks on a peg, bottom first
    #[wasm_bindgen(js_name = pegDiscs)]
    pub fn peg_discs(&self, index: u32) -> Result<Vec<u32>, JsValue> {
        self.try_peg_discs(index).map_err(to_js)
    }

    /// Horizontal position of a rod's centre
    #[wasm_bindgen(js_name = rodX)]
    pub fn rod_x(&self, index: u32) -> Result<f32, JsValue> {
        let peg = peg(index).map_err(to_js)?;
        Ok(self.layout().rod_position(peg).x)
    }

    /// Waypoints of the last move as `[x, y, z]` triples: start, lift,
    /// traverse, drop. Empty before the first move.
    #[wasm_bindgen(js_name = movePath)]
    pub fn move_path(&self) -> Vec<f32> {
        let Some(mv) = self.last_move else {
            return Vec::new();
        };
        let path = self.layout().move_path(&mv, self.sequencer.pegs());
        [path.start, path.lift, path.traverse, path.drop]
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only success paths: building a JsValue needs a wasm host.

    #[test]
    fn test_moves_until_finished() {
        let mut hanoi = WebHanoi::try_new(2, 500).unwrap();
        let moves: Vec<_> = (0..3).map(|_| hanoi.try_next_move().unwrap()).collect();
        assert_eq!(
            moves.last(),
            Some(&WebMove {
                disc: 1,
                from: 1,
                to: 2,
                finished: true
            })
        );
        assert!(hanoi.finished());
        assert_eq!(hanoi.try_peg_discs(2).unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_move_path_triples() {
        let mut hanoi = WebHanoi::try_new(3, 500).unwrap();
        assert!(hanoi.move_path().is_empty());
        hanoi.try_next_move().unwrap();
        let path = hanoi.move_path();
        assert_eq!(path.len(), 12);
        assert_eq!(&path[9..], &[240.0, 20.0, 0.0]);
    }

    #[test]
    fn test_busy_and_settle() {
        let mut hanoi = WebHanoi::try_new(3, 500).unwrap();
        hanoi.try_next_move().unwrap();
        assert!(hanoi.busy());
        hanoi.settle();
        assert!(!hanoi.busy());
    }

    #[test]
    fn test_reset_and_tween_time() {
        let mut hanoi = WebHanoi::try_new(3, 500).unwrap();
        hanoi.try_next_move().unwrap();
        hanoi.set_tween_time(250);
        assert!(hanoi.set_num_discs(4).is_ok());
        assert_eq!(hanoi.try_peg_discs(0).unwrap(), vec![4, 3, 2, 1]);
        assert_eq!(hanoi.tween_time(), 250);
        assert!(hanoi.move_path().is_empty());
        assert_eq!(hanoi.rod_x(1).ok(), Some(0.0));
    }
}
