use crate::config::Config;
use std::time::Duration;
use strum::Display;

/// The phases of a scramble cycle, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Phase {
    /// Only noise is shown
    #[strum(serialize = "scramble")]
    ScrambleWait,
    /// The word is revealed one character at a time, left to right
    #[strum(serialize = "reveal")]
    Revealing,
    /// The whole word is shown
    #[strum(serialize = "hold")]
    Hold,
    /// The word is scrambled back from the right
    #[strum(serialize = "unreveal")]
    Unrevealing,
}

/// Where the animation is within its cycle.
///
/// Times are offsets from an arbitrary monotonic origin, usually the start of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationState {
    phase: Phase,
    /// When the current phase was entered
    state_start: Duration,
    /// How many leading characters of the current word are shown literally
    reveal_index: usize,
    /// Index of the current word in the configured word list
    word_index: usize,
}

impl AnimationState {
    /// Start a new animation scrambling the first word.
    pub fn new(now: Duration) -> Self {
        Self::starting_in(Phase::ScrambleWait, now)
    }

    /// Start a new animation in an arbitrary phase at the first word.
    pub fn starting_in(phase: Phase, now: Duration) -> Self {
        Self { phase, state_start: now, reveal_index: 0, word_index: 0 }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reveal_index(&self) -> usize {
        self.reveal_index
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn state_start(&self) -> Duration {
        self.state_start
    }

    /// Go back to scrambling the first word.
    pub fn reset(&mut self, now: Duration) {
        *self = Self::new(now);
    }

    /// Advance the animation to `now`, performing at most one phase transition.
    pub fn advance(&mut self, now: Duration, config: &Config) {
        if self.word_index >= config.words().len() {
            self.word_index = 0;
        }
        let elapsed = now.saturating_sub(self.state_start);
        let word_length = config.word(self.word_index).chars().count();

        match self.phase {
            Phase::ScrambleWait => {
                if elapsed >= config.scramble_duration() {
                    self.enter(Phase::Revealing, now);
                    self.reveal_index = 0;
                }
            }
            Phase::Revealing => {
                let target = steps(elapsed, config.reveal_speed());
                // never hide characters that were already revealed during this phase
                if target > self.reveal_index {
                    self.reveal_index = target;
                }
                if self.reveal_index >= word_length {
                    self.reveal_index = word_length;
                    self.enter(Phase::Hold, now);
                }
            }
            Phase::Hold => {
                if elapsed >= config.hold_time() {
                    self.enter(Phase::Unrevealing, now);
                    self.reveal_index = word_length;
                }
            }
            Phase::Unrevealing => {
                let hidden = steps(elapsed, config.unreveal_speed());
                self.reveal_index = word_length.saturating_sub(hidden);
                if self.reveal_index == 0 {
                    self.enter(Phase::ScrambleWait, now);
                    self.word_index = (self.word_index + 1) % config.words().len();
                }
            }
        }
    }

    fn enter(&mut self, phase: Phase, now: Duration) {
        log::trace!("{} -> {phase} at {}ms", self.phase, now.as_millis());
        self.phase = phase;
        self.state_start = now;
    }
}

/// How many whole steps of `step` fit in `elapsed`
fn steps(elapsed: Duration, step: Duration) -> usize {
    let step = step.as_millis().max(1);
    usize::try_from(elapsed.as_millis() / step).unwrap_or(usize::MAX)
}
