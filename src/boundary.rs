//! The `Boundary` the engine talks to, and the `Signal`s it sends across it.

use std::fmt;

use crate::Color;

/// Which sound a [`Boundary`] should play.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cue {
    /// The tone for one of the pads.
    Color(Color),
    /// The "you got it wrong" buzz.
    Wrong,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Color(c) => fmt::Display::fmt(c, f),
            Cue::Wrong => f.write_str("wrong"),
        }
    }
}

/// Why a pad is flashing. Both look the same; they're just triggered differently.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FlashKind {
    /// Part of the engine replaying the sequence.
    Replay,
    /// Feedback for the player pressing the pad.
    Press,
}

/// Whatever's presenting the game to the player: the engine never touches a screen or a speaker itself, it just
/// asks its boundary to.
///
/// Every method does nothing by default, so a boundary only needs to implement what it can actually present.
pub trait Boundary {
    /// Light up a pad. It stays lit until the matching [`Self::on_flash_end`].
    fn on_flash(&mut self, _color: Color, _kind: FlashKind) {}

    /// A pad's flash has run its course.
    fn on_flash_end(&mut self, _color: Color) {}

    /// Play a sound. Always sent right after the [`Self::on_flash`] it goes with, if any.
    fn on_sound(&mut self, _cue: Cue) {}

    /// The level (i.e. the sequence length) changed.
    fn on_level_changed(&mut self, _level: usize) {}

    /// The player pressed the wrong pad, and the game's over.
    fn on_game_over(&mut self) {}

    /// A new game started after a start trigger.
    fn on_game_restart(&mut self) {}

    /// Show (`true`) or hide (`false`) the transient "wrong!" visual.
    fn on_error(&mut self, _shown: bool) {}
}

/// A single call made on a [`Boundary`], as a value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
    Flash(Color, FlashKind),
    FlashEnd(Color),
    Sound(Cue),
    LevelChanged(usize),
    GameOver,
    GameRestart,
    Error(bool),
}

/// A [`Boundary`] which just writes down everything it's asked to do.
///
/// Handy for tests, and for hosts which would rather poll a list of signals than implement callbacks.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    signals: Vec<Signal>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Take everything recorded so far, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// How many recorded signals match a predicate.
    pub fn count(&self, pred: impl Fn(&Signal) -> bool) -> usize {
        self.signals.iter().filter(|s| pred(s)).count()
    }

    /// Just the flashes, in order.
    pub fn flashes(&self) -> Vec<(Color, FlashKind)> {
        self.signals
            .iter()
            .filter_map(|s| match s {
                Signal::Flash(c, k) => Some((*c, *k)),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl Boundary for Recorder {
    fn on_flash(&mut self, color: Color, kind: FlashKind) {
        self.signals.push(Signal::Flash(color, kind));
    }
    fn on_flash_end(&mut self, color: Color) {
        self.signals.push(Signal::FlashEnd(color));
    }
    fn on_sound(&mut self, cue: Cue) {
        self.signals.push(Signal::Sound(cue));
    }
    fn on_level_changed(&mut self, level: usize) {
        self.signals.push(Signal::LevelChanged(level));
    }
    fn on_game_over(&mut self) {
        self.signals.push(Signal::GameOver);
    }
    fn on_game_restart(&mut self) {
        self.signals.push(Signal::GameRestart);
    }
    fn on_error(&mut self, shown: bool) {
        self.signals.push(Signal::Error(shown));
    }
}
