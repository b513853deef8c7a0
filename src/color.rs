//! The four pads, and where new sequence entries come from.

use std::{collections::VecDeque, fmt};

use rand::{
    distributions::{Distribution, Standard},
    rngs::SmallRng,
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};

/// One of the four pads the player can press.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// Every color, in pad order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// The lowercase name, e.g. for picking a sound file.
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Distribution<Color> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        Color::ALL[rng.gen_range(0..Color::ALL.len())]
    }
}

/// Something the engine can draw the next sequence entry from.
pub trait ColorSource: Send {
    fn next_color(&mut self) -> Color;
}

/// Uniformly random colors from any [`Rng`].
#[derive(Clone, Debug)]
pub struct RandomColors<R: Rng = SmallRng>(R);

impl RandomColors<SmallRng> {
    /// Seeded from the OS entropy source.
    pub fn from_entropy() -> Self {
        Self(SmallRng::from_entropy())
    }

    /// Deterministically seeded, so a game can be replayed.
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomColors<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng + Send> ColorSource for RandomColors<R> {
    fn next_color(&mut self) -> Color {
        self.0.gen()
    }
}

/// Hands out a fixed list of colors in order, cycling back to the start once it runs out.
///
/// Mostly useful for tests and demos where the sequence has to be known ahead of time.
#[derive(Clone, Debug)]
pub struct ScriptedColors {
    script: VecDeque<Color>,
}

impl ScriptedColors {
    /// # Panics
    ///
    /// If `script` is empty, since there'd be nothing to hand out.
    pub fn new(script: impl IntoIterator<Item = Color>) -> Self {
        let script: VecDeque<_> = script.into_iter().collect();
        assert!(!script.is_empty(), "a color script needs at least one color");
        Self { script }
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self) -> Color {
        // never empty, checked in `new`
        let next = self.script[0];
        self.script.rotate_left(1);
        next
    }
}
