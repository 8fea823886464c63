use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum SteakEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait SteakEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SteakEvent, RecvTimeoutError>;
}

/// Production event source reading crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<SteakEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => SteakEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => SteakEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    log::warn!("terminal event reader stopped: {err}");
                    break;
                }
            };

            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SteakEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SteakEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<SteakEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SteakEvent>) -> Self {
        Self { rx }
    }
}

impl SteakEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SteakEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: SteakEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: SteakEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> SteakEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => SteakEvent::Tick,
        }
    }
}

/// Turns irregular wall-clock gaps into whole beats so every timer driven
/// from it shares one cadence. Leftover time carries into the next call.
#[derive(Clone, Copy, Debug)]
pub struct Metronome {
    period: Duration,
    carry: Duration,
}

impl Metronome {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            carry: Duration::ZERO,
        }
    }

    pub fn per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Number of whole periods completed, counting the carried remainder
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.carry += elapsed;
        let mut beats = 0;
        while self.carry >= self.period {
            self.carry -= self.period;
            beats += 1;
        }
        beats
    }

    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            SteakEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(SteakEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            SteakEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn metronome_counts_whole_seconds() {
        let mut metronome = Metronome::per_second();
        assert_eq!(metronome.advance(Duration::from_millis(400)), 0);
        assert_eq!(metronome.advance(Duration::from_millis(700)), 1);
        // 100ms carried over
        assert_eq!(metronome.advance(Duration::from_millis(2_900)), 3);
        assert_eq!(metronome.advance(Duration::ZERO), 0);
    }

    #[test]
    fn metronome_reset_drops_carry() {
        let mut metronome = Metronome::per_second();
        metronome.advance(Duration::from_millis(900));
        metronome.reset();
        assert_eq!(metronome.advance(Duration::from_millis(200)), 0);
    }

    #[test]
    fn metronome_with_zero_period_never_beats() {
        let mut metronome = Metronome::new(Duration::ZERO);
        assert_eq!(metronome.advance(Duration::from_secs(5)), 0);
    }
}
