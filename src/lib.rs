//! A game of Simon, without the screen.
//!
//! The [`Engine`] generates an ever-growing sequence of [`Color`]s, replays it, and checks the player's attempt to
//! press it back. It owns every bit of game state and every timer, and it never draws or plays anything itself:
//! everything presentable goes out through a [`Boundary`], which you implement for whatever's hosting the game.
//!
//! ```
//! use simon::{Color, Engine, Recorder, ScriptedColors};
//!
//! let mut engine = Engine::new(ScriptedColors::new([Color::Red, Color::Blue]));
//! let mut out = Recorder::new();
//! engine.start(&mut out).unwrap();
//! assert_eq!(engine.level(), 1);
//! ```
//!
//! # Architecture
//!
//! Hosts drive the engine with three calls: [`Engine::start`] on a start trigger, [`Engine::submit`] when a pad is
//! pressed, and [`Engine::update`] regularly from their main loop. Nothing blocks. Replay flashes, the pause between
//! rounds, and the game-over pause are all steps in a [`Schedule`], run by `update` once they come due.
//!
//! The `sys_cli` feature adds a terminal frontend in [`term`], and the `simon` binary which runs it.

mod boundary;
mod color;
mod engine;
mod error;
pub mod schedule;
mod state;
#[cfg(feature = "sys_cli")]
pub mod term;
mod timing;

pub use {
    boundary::{Boundary, Cue, FlashKind, Recorder, Signal},
    color::{Color, ColorSource, RandomColors, ScriptedColors},
    engine::{Engine, Outcome},
    error::{EngineError, Result},
    schedule::Schedule,
    state::{GameState, Phase},
    timing::{Timer, Timings},
};
