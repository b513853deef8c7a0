use thiserror::Error;

use crate::Phase;

/// Ways the engine can be misused. None of these ever change the game's state.
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
pub enum EngineError {
    #[error("a game is already running (currently {phase:?})")]
    AlreadyRunning { phase: Phase },
}

pub type Result<T> = core::result::Result<T, EngineError>;
