/// Errors that end a terminal session
use hanoi3d_core::HanoiError;
use std::io;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("puzzle error: {0}")]
    Puzzle(#[from] HanoiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
