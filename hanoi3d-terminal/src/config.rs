//! # Configuration
//!
//! Settings resolve in order: defaults → config file → CLI flags.
//!
//! The config file lives at `~/.hanoi3d/config.toml` unless a path is given
//! on the command line. Every field is optional:
//!
//! ```toml
//! [puzzle]
//! num_discs = 7
//!
//! [animation]
//! tween_time_ms = 300
//! fps = 30
//! ```

use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HanoiConfig {
    #[serde(default)]
    pub puzzle: PuzzleConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct PuzzleConfig {
    pub num_discs: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnimationConfig {
    pub tween_time_ms: Option<u64>,
    pub fps: Option<u32>,
}

// ============================================================================
// Defaults and limits
// ============================================================================

pub const DEFAULT_NUM_DISCS: usize = 5;
pub const DEFAULT_TWEEN_TIME_MS: u64 = 500;
pub const DEFAULT_FPS: u32 = 30;

pub const NUM_DISCS_RANGE: RangeInclusive<usize> = 1..=100;
pub const TWEEN_TIME_RANGE_MS: RangeInclusive<u64> = 50..=1500;
pub const TWEEN_TIME_STEP_MS: u64 = 50;
pub const FPS_RANGE: RangeInclusive<u32> = 1..=120;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub num_discs: usize,
    pub tween_time: Duration,
    pub fps: u32,
}

/// Values given on the command line, which win over the file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub num_discs: Option<usize>,
    pub tween_time_ms: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error for {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.hanoi3d/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hanoi3d").join("config.toml"))
}

/// Load config from `path`, or from the default location when `None`.
///
/// A missing default file is not an error and yields the defaults; a
/// missing explicit file is.
pub fn load_config(path: Option<&Path>) -> Result<HanoiConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) if p.exists() => p,
            Some(p) => {
                debug!("No config file at {}, using defaults", p.display());
                return Ok(HanoiConfig::default());
            }
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(HanoiConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<HanoiConfig, ConfigError> {
    let config: HanoiConfig = toml::from_str(contents)?;
    debug!("Config: {:?}", config);
    Ok(config)
}

// ============================================================================
// Resolution
// ============================================================================

impl HanoiConfig {
    /// Merge file values with CLI overrides and clamp everything into range.
    pub fn resolve(&self, overrides: &Overrides) -> ResolvedConfig {
        let num_discs = overrides
            .num_discs
            .or(self.puzzle.num_discs)
            .unwrap_or(DEFAULT_NUM_DISCS);
        let tween_time_ms = overrides
            .tween_time_ms
            .or(self.animation.tween_time_ms)
            .unwrap_or(DEFAULT_TWEEN_TIME_MS);
        let fps = self.animation.fps.unwrap_or(DEFAULT_FPS);

        ResolvedConfig {
            num_discs: clamp_logged("num_discs", num_discs, NUM_DISCS_RANGE),
            tween_time: Duration::from_millis(snap_tween_time(tween_time_ms)),
            fps: clamp_logged("fps", fps, FPS_RANGE),
        }
    }
}

fn clamp_logged<T: Ord + Copy + std::fmt::Display>(name: &str, value: T, range: RangeInclusive<T>) -> T {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        warn!("{name} = {value} is out of range, using {clamped}");
    }
    clamped
}

/// Round to the nearest step and keep within the allowed range.
fn snap_tween_time(ms: u64) -> u64 {
    let snapped = ms.saturating_add(TWEEN_TIME_STEP_MS / 2) / TWEEN_TIME_STEP_MS * TWEEN_TIME_STEP_MS;
    clamp_logged("tween_time_ms", snapped, TWEEN_TIME_RANGE_MS)
}
