use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Refresh cadence of a typical display
pub const DISPLAY_CADENCE: Duration = Duration::from_micros(16_667);

/// The outcome of a single tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    /// Nothing was drawn
    Unmodified,
    /// A new frame was drawn
    Modified,
    /// The animation is over and the ticker should stop
    Done,
}

/// Limits how often frames are drawn.
#[derive(Clone, Debug)]
pub struct FrameThrottle {
    interval: Duration,
    last_render: Option<Duration>,
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_render: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Whether a frame should be drawn at `now`. If so, `now` becomes the last render time.
    pub fn should_render(&mut self, now: Duration) -> bool {
        let due = match self.last_render {
            Some(last) => now.saturating_sub(last) >= self.interval,
            None => true,
        };
        if due {
            self.last_render = Some(now);
        }
        due
    }
}

/// Stops a running [Ticker]. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Invokes a tick function at a fixed cadence until stopped.
#[derive(Debug)]
pub struct Ticker {
    cadence: Duration,
    stop: StopHandle,
}

impl Ticker {
    pub fn new(cadence: Duration) -> Self {
        Self { cadence: cadence.max(Duration::from_millis(1)), stop: StopHandle::default() }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run `tick` until it returns [PollableState::Done], fails, or the ticker is stopped.
    ///
    /// `tick` receives the time elapsed since the ticker started. The next deadline is fixed
    /// before `tick` runs; deadlines that were missed while ticking are skipped.
    pub fn run<F, E>(&self, mut tick: F) -> Result<(), E>
    where
        F: FnMut(Duration) -> Result<PollableState, E>,
    {
        let start = Instant::now();
        let mut deadline = start;
        while !self.stop.is_stopped() {
            let now = Instant::now();
            deadline += self.cadence;
            if deadline < now {
                let behind = now - deadline;
                let missed = behind.as_nanos() / self.cadence.as_nanos() + 1;
                deadline += self.cadence * missed as u32;
            }

            if tick(now - start)? == PollableState::Done {
                break;
            }

            let now = Instant::now();
            if deadline > now && !self.stop.is_stopped() {
                thread::sleep(deadline - now);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn throttle_renders_first_frame() {
        let mut throttle = FrameThrottle::new(ms(100));
        assert!(throttle.should_render(ms(5)));
        assert!(!throttle.should_render(ms(5)));
    }

    #[test]
    fn throttle_limits_rate() {
        let mut throttle = FrameThrottle::new(ms(50));
        let rendered: Vec<u64> = (0..=200).step_by(10).filter(|t| throttle.should_render(ms(*t))).collect();
        assert_eq!(rendered, [0, 50, 100, 150, 200]);
    }

    #[test]
    fn throttle_interval_change_applies_immediately() {
        let mut throttle = FrameThrottle::new(ms(1000));
        assert!(throttle.should_render(ms(0)));
        assert!(!throttle.should_render(ms(100)));
        throttle.set_interval(ms(50));
        assert!(throttle.should_render(ms(100)));
    }

    #[test]
    fn ticker_stops_when_done() {
        let ticker = Ticker::new(ms(1));
        let mut ticks = 0;
        ticker
            .run(|_| {
                ticks += 1;
                Ok::<_, Infallible>(if ticks == 3 { PollableState::Done } else { PollableState::Modified })
            })
            .unwrap();
        assert_eq!(ticks, 3);
    }

    #[test]
    fn ticker_stops_from_handle() {
        let ticker = Ticker::new(ms(1));
        let handle = ticker.stop_handle();
        let mut ticks = 0;
        ticker
            .run(|_| {
                ticks += 1;
                if ticks == 2 {
                    handle.stop();
                }
                Ok::<_, Infallible>(PollableState::Unmodified)
            })
            .unwrap();
        assert_eq!(ticks, 2);
    }

    #[test]
    fn stopped_ticker_never_ticks() {
        let ticker = Ticker::new(ms(1));
        ticker.stop_handle().stop();
        let mut ticks = 0;
        ticker
            .run(|_| {
                ticks += 1;
                Ok::<_, Infallible>(PollableState::Modified)
            })
            .unwrap();
        assert_eq!(ticks, 0);
    }

    #[test]
    fn ticker_propagates_errors() {
        let ticker = Ticker::new(ms(1));
        let result = ticker.run(|_| Err::<PollableState, _>("broken"));
        assert_eq!(result, Err("broken"));
    }

    #[test]
    fn ticker_time_is_monotonic() {
        let ticker = Ticker::new(ms(2));
        let mut times = Vec::new();
        ticker
            .run(|now| {
                times.push(now);
                Ok::<_, Infallible>(if times.len() == 5 { PollableState::Done } else { PollableState::Unmodified })
            })
            .unwrap();
        assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(times[4] >= ms(6));
    }
}
