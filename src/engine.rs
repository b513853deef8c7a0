//! The sequence game itself.
//!
//! An [`Engine`] owns the [`GameState`] and every timer the game needs. Hosts drive it with three calls:
//!
//! - [`Engine::start`] when the player asks for a new game (e.g. any key press)
//! - [`Engine::submit`] when the player presses a pad
//! - [`Engine::update`] regularly, to let scheduled steps (replay flashes, pauses) happen
//!
//! Everything the player should see or hear comes back out through the [`Boundary`] passed to each call.

use log::{debug, info, trace, warn};

use crate::{
    boundary::{Boundary, Cue, FlashKind},
    color::{Color, ColorSource, RandomColors},
    error::{EngineError, Result},
    schedule::{Instant, Schedule},
    state::{GameState, Phase},
    timing::Timings,
};

/// Something the engine has to do later.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Step {
    /// Flash the nth color of the sequence.
    Replay(usize),
    /// Turn a pad back off.
    FlashEnd(Color),
    /// Playback's over, let the player go.
    AcceptInput,
    /// Start the next round.
    Advance,
    /// Clear the error visual and go back to idle.
    Recover,
}

/// What happened to a pad press.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// No round was accepting input, so nothing happened.
    Ignored,
    /// Right color, but there's more of the sequence to go.
    Correct,
    /// Right color, and that was the whole sequence. The next round starts after a pause.
    RoundComplete,
    /// Wrong color. Game over.
    Failed,
}

/// Runs a game of Simon.
///
/// See the [module docs](self) for how to drive it.
#[derive(Debug)]
pub struct Engine<S: ColorSource = RandomColors> {
    state: GameState,
    phase: Phase,
    source: S,
    timings: Timings,
    schedule: Schedule<Step>,
    /// Pads currently lit, so a reset can turn them off
    lit: Vec<Color>,
    /// Whether the last game ended in a mistake and no new one has started
    game_over: bool,
}

impl Engine<RandomColors> {
    /// An engine drawing uniformly random colors, seeded from OS entropy.
    pub fn random() -> Self {
        Self::new(RandomColors::from_entropy())
    }
}

impl<S: ColorSource> Engine<S> {
    /// Prepare an idle engine which will draw new sequence entries from `source`.
    pub fn new(source: S) -> Self {
        Self {
            state: GameState::default(),
            phase: Phase::Idle,
            source,
            timings: Timings::default(),
            schedule: Schedule::default(),
            lit: Vec::with_capacity(Color::ALL.len()),
            game_over: false,
        }
    }

    /// Set how long flashes and pauses last. Anything over [`Timings::MAX_MS`] is cut down to it.
    pub fn timings(mut self, timings: Timings) -> Self {
        self.timings = timings.clamped();
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> usize {
        self.state.level()
    }

    pub fn best(&self) -> usize {
        self.state.best()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn current_timings(&self) -> &Timings {
        &self.timings
    }

    /// Whether the most recent game ended with a mistake (and no new one has started yet).
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The text a frontend should show as its title.
    pub fn message(&self) -> String {
        match self.phase {
            Phase::PlayingBack | Phase::AwaitingInput => format!("Level {}", self.level()),
            Phase::Failing | Phase::Idle if self.game_over => {
                "Game over, press any key to restart".into()
            }
            Phase::Failing | Phase::Idle => "Press any key to start".into(),
        }
    }

    /// When the next scheduled step is due, so a host can sleep until then instead of spinning.
    pub fn next_due(&self) -> Option<Instant> {
        self.schedule.next_due()
    }

    /// Start a new game.
    ///
    /// Only allowed while idle; otherwise this returns [`EngineError::AlreadyRunning`] and changes nothing. The
    /// first color is flashed immediately.
    pub fn start<B: Boundary + ?Sized>(&mut self, out: &mut B) -> Result<()> {
        if self.phase != Phase::Idle {
            warn!("start requested while {:?}; ignoring", self.phase);
            return Err(EngineError::AlreadyRunning { phase: self.phase });
        }
        debug!("starting a new game");
        self.state.clear();
        self.game_over = false;
        out.on_game_restart();
        self.advance_round(out);
        self.update(out);
        Ok(())
    }

    /// The player pressed a pad.
    ///
    /// Presses outside of a round that's accepting input are dropped without a trace.
    pub fn submit<B: Boundary + ?Sized>(&mut self, color: Color, out: &mut B) -> Outcome {
        if !self.state.active {
            trace!("dropping {} press while {:?}", color, self.phase);
            return Outcome::Ignored;
        }
        self.state.player_input.push(color);
        self.flash(color, FlashKind::Press, out);
        self.schedule.after(self.timings.press_flash(), Step::FlashEnd(color));
        self.check_progress(out)
    }

    /// Run every scheduled step that's come due, in order.
    pub fn update<B: Boundary + ?Sized>(&mut self, out: &mut B) {
        while let Some(step) = self.schedule.pop_due() {
            self.run(step, out);
        }
    }

    /// Back to an idle, empty game. The best level is kept.
    ///
    /// Anything still scheduled is dropped, and any lit pads are turned off.
    pub fn reset<B: Boundary + ?Sized>(&mut self, out: &mut B) {
        let had_level = self.state.level();
        self.state.clear();
        self.phase = Phase::Idle;
        self.schedule.clear();
        for color in self.lit.drain(..) {
            out.on_flash_end(color);
        }
        if had_level != 0 {
            out.on_level_changed(0);
        }
    }

    /// Add a color to the sequence and schedule replaying all of it.
    fn advance_round<B: Boundary + ?Sized>(&mut self, out: &mut B) {
        let color = self.source.next_color();
        self.state.sequence.push(color);
        self.state.player_input.clear();
        self.state.active = false;
        self.phase = Phase::PlayingBack;

        let level = self.state.level();
        self.state.best = self.state.best.max(level);
        debug!("level {}: added {}", level, color);
        out.on_level_changed(level);

        let start = Instant::now();
        let stride = self.timings.replay_stride();
        let flash = self.timings.flash();
        for (i, &color) in self.state.sequence.iter().enumerate() {
            let on = start + stride * i as u32;
            self.schedule
                .at(on, Step::Replay(i))
                .at(on + flash, Step::FlashEnd(color));
        }
        // ties run in insertion order, so this comes after the last flash ends
        let done = start + stride * (level - 1) as u32 + flash;
        self.schedule.at(done, Step::AcceptInput);
    }

    fn check_progress<B: Boundary + ?Sized>(&mut self, out: &mut B) -> Outcome {
        let idx = self.state.player_input.len() - 1;
        let expected = self.state.sequence.get(idx).copied();
        if expected != Some(self.state.player_input[idx]) {
            self.fail(out);
            return Outcome::Failed;
        }
        if self.state.player_input.len() < self.state.sequence.len() {
            return Outcome::Correct;
        }

        debug!("level {} complete", self.level());
        self.state.player_input.clear();
        self.state.active = false;
        self.phase = Phase::PlayingBack;
        self.schedule.after(self.timings.round_pause(), Step::Advance);
        Outcome::RoundComplete
    }

    fn fail<B: Boundary + ?Sized>(&mut self, out: &mut B) {
        info!("game over at level {}", self.level());
        self.state.active = false;
        self.phase = Phase::Failing;
        self.game_over = true;
        out.on_sound(Cue::Wrong);
        out.on_error(true);
        out.on_game_over();
        self.schedule.after(self.timings.fail_pause(), Step::Recover);
    }

    fn flash<B: Boundary + ?Sized>(&mut self, color: Color, kind: FlashKind, out: &mut B) {
        self.lit.push(color);
        out.on_flash(color, kind);
        out.on_sound(Cue::Color(color));
    }

    fn run<B: Boundary + ?Sized>(&mut self, step: Step, out: &mut B) {
        trace!("running {:?}", step);
        match step {
            Step::Replay(i) => {
                if let Some(&color) = self.state.sequence.get(i) {
                    self.flash(color, FlashKind::Replay, out);
                }
            }
            Step::FlashEnd(color) => {
                if let Some(pos) = self.lit.iter().position(|&c| c == color) {
                    self.lit.remove(pos);
                    out.on_flash_end(color);
                }
            }
            Step::AcceptInput => {
                self.phase = Phase::AwaitingInput;
                self.state.active = true;
            }
            Step::Advance => self.advance_round(out),
            Step::Recover => {
                out.on_error(false);
                self.reset(out);
            }
        }
    }
}
