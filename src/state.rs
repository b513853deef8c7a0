use crate::Color;

/// Which part of a round the engine is in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    /// Waiting for a start trigger.
    #[default]
    Idle,
    /// Replaying the sequence, or pausing before the next replay.
    PlayingBack,
    /// Waiting for the player to reproduce the sequence.
    AwaitingInput,
    /// Showing the player they got it wrong, before resetting.
    Failing,
}

/// The current state of a game.
///
/// Only the [`Engine`](crate::Engine) mutates this; everyone else just gets to look.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct GameState {
    /// The full pattern so far, oldest first
    pub(crate) sequence: Vec<Color>,
    /// What the player has pressed this round
    pub(crate) player_input: Vec<Color>,
    /// Whether presses are being accepted right now
    pub(crate) active: bool,
    /// Highest level reached since the process started
    pub(crate) best: usize,
}

impl GameState {
    pub fn sequence(&self) -> &[Color] {
        &self.sequence
    }

    pub fn player_input(&self) -> &[Color] {
        &self.player_input
    }

    /// Always the length of the sequence.
    pub fn level(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn best(&self) -> usize {
        self.best
    }

    /// Whether everything pressed so far this round matches the sequence.
    pub fn input_matches(&self) -> bool {
        self.player_input.len() <= self.sequence.len()
            && self.sequence.starts_with(&self.player_input)
    }

    /// Back to a blank game. `best` is kept.
    pub(crate) fn clear(&mut self) {
        self.sequence.clear();
        self.player_input.clear();
        self.active = false;
    }
}
