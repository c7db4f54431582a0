use crate::config::{Config, ConfigChange, ConfigUpdate, reduce};
use crate::scramble::{AnimationState, FrameThrottle, PollableState, RenderTarget, render};
use std::io;
use std::time::Duration;

/// Owns everything a running animation needs: configuration, animation state, frame pacing and
/// the noise source.
#[derive(Debug)]
pub struct ScrambleSession {
    config: Config,
    state: AnimationState,
    throttle: FrameThrottle,
    rng: fastrand::Rng,
    /// Set when the grid has to be recreated on the next render
    rebuild_pending: bool,
}

impl ScrambleSession {
    pub fn new(config: Config, rng: fastrand::Rng, now: Duration) -> Self {
        let throttle = FrameThrottle::new(config.frame_interval());
        Self { state: AnimationState::new(now), config, throttle, rng, rebuild_pending: true }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Apply an update from one of the input controls.
    ///
    /// A new word list restarts the animation from the first word and rebuilds the grid on the
    /// next render.
    pub fn apply(&mut self, update: ConfigUpdate, now: Duration) -> ConfigChange {
        let (config, change) = reduce(&self.config, update);
        self.config = config;
        match change {
            ConfigChange::Words => {
                log::info!("word list changed to {:?}", self.config.words());
                self.state.reset(now);
                self.rebuild_pending = true;
            }
            ConfigChange::Timing => {
                log::info!("hold time {}ms, {} fps", self.config.hold_time().as_millis(), self.config.fps());
                self.throttle.set_interval(self.config.frame_interval());
            }
            ConfigChange::Unchanged => {}
        }
        change
    }

    /// Advance the animation to `now` and draw a frame if one is due.
    pub fn tick<T: RenderTarget + ?Sized>(&mut self, now: Duration, target: &mut T) -> io::Result<PollableState> {
        self.state.advance(now, &self.config);
        if !self.throttle.should_render(now) {
            return Ok(PollableState::Unmodified);
        }
        let rebuild = std::mem::take(&mut self.rebuild_pending);
        render(target, &self.config, &self.state, &mut self.rng, rebuild)?;
        Ok(PollableState::Modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble::{CellGrid, Phase, Row};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn session(words: &str) -> ScrambleSession {
        let mut config = Config::default();
        config.set_word_text(words);
        config.set_fps(60);
        ScrambleSession::new(config, fastrand::Rng::with_seed(1), ms(0))
    }

    #[test]
    fn first_tick_draws() {
        let mut session = session("HI");
        let mut grid = CellGrid::default();
        assert_eq!(session.tick(ms(0), &mut grid).unwrap(), PollableState::Modified);
        assert_eq!(grid.cell_count(Row::Middle), 4);
        assert_eq!(session.state().phase(), Phase::ScrambleWait);
    }

    #[test]
    fn state_advances_between_frames() {
        let mut session = session("HI");
        session.apply(ConfigUpdate::FrameRate("1".into()), ms(0));
        let mut grid = CellGrid::default();
        assert_eq!(session.tick(ms(0), &mut grid).unwrap(), PollableState::Modified);

        // throttled, but the state still moves on
        assert_eq!(session.tick(ms(1000), &mut grid).unwrap(), PollableState::Modified);
        assert_eq!(session.tick(ms(1100), &mut grid).unwrap(), PollableState::Unmodified);
        assert_eq!(session.state().phase(), Phase::Revealing);
        assert_eq!(session.state().reveal_index(), 1);
        assert!(grid.row(Row::Middle).iter().all(|cell| !cell.revealed));
    }

    #[test]
    fn word_edit_restarts_and_resizes() {
        let mut session = session("HI,THERE");
        let mut grid = CellGrid::default();
        for t in (0..=1300).step_by(20) {
            session.tick(ms(t), &mut grid).unwrap();
        }
        assert_eq!(session.state().phase(), Phase::Hold);

        let change = session.apply(ConfigUpdate::WordList("much longer".into()), ms(1310));
        assert_eq!(change, ConfigChange::Words);
        assert_eq!(session.state().phase(), Phase::ScrambleWait);
        assert_eq!(session.state().word_index(), 0);

        session.tick(ms(1340), &mut grid).unwrap();
        for row in Row::ALL {
            assert_eq!(grid.cell_count(row), 13);
        }
        assert!(grid.row(Row::Middle).iter().all(|cell| !cell.revealed));
    }

    #[test]
    fn unchanged_words_keep_state() {
        let mut session = session("HI");
        let mut grid = CellGrid::default();
        session.tick(ms(1000), &mut grid).unwrap();
        assert_eq!(session.state().phase(), Phase::Revealing);

        let change = session.apply(ConfigUpdate::WordList(" hi ,".into()), ms(1010));
        assert_eq!(change, ConfigChange::Unchanged);
        assert_eq!(session.state().phase(), Phase::Revealing);
    }

    #[test]
    fn full_cycle_reveals_word() {
        let mut session = session("GO");
        let mut grid = CellGrid::default();
        let mut saw_word = false;
        let mut t = 0;
        while t < 5000 {
            session.tick(ms(t), &mut grid).unwrap();
            let middle = grid.row(Row::Middle);
            if middle[1..3].iter().all(|cell| cell.revealed) {
                assert_eq!(grid.text(Row::Middle)[1..3].to_string(), "GO");
                saw_word = true;
            }
            t += 17;
        }
        assert!(saw_word);
    }

    #[test]
    fn blank_word_list_never_reveals() {
        let mut session = session("HI");
        session.apply(ConfigUpdate::WordList(" , ".into()), ms(0));
        assert_eq!(session.config().words(), [""]);
        let mut grid = CellGrid::default();
        for t in (0..6000).step_by(17) {
            session.tick(ms(t), &mut grid).unwrap();
            assert_eq!(grid.cell_count(Row::Middle), 2);
            assert!(grid.row(Row::Middle).iter().all(|cell| !cell.revealed));
        }
    }
}
