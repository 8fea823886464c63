use log::debug;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::cooking::{CookingStep, SteakConfig};

/// Where a timer is in its cook. Running/paused is tracked separately and
/// applies to `Waiting` and `Cooking` alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Waiting,
    Cooking,
    Finished,
}

/// Notifications pushed to subscribers on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Paused,
    PreStartComplete,
    StepComplete { index: usize },
    SessionComplete,
}

/// Countdown for a single steak: an optional pre-start delay followed by
/// each cooking step in order.
#[derive(Debug)]
pub struct SessionTimer {
    steak: SteakConfig,
    initial_delay: u32,
    step_index: usize,
    time_remaining: u32,
    delay_remaining: u32,
    waiting: bool,
    running: bool,
    started: bool,
    finished: bool,
    subscribers: Vec<Sender<TimerEvent>>,
}

impl SessionTimer {
    pub fn new(steak: SteakConfig, initial_delay: u32) -> Self {
        let time_remaining = steak.steps[0].duration;
        Self {
            steak,
            initial_delay,
            step_index: 0,
            time_remaining,
            delay_remaining: initial_delay,
            waiting: initial_delay > 0,
            running: false,
            started: false,
            finished: false,
            subscribers: Vec::new(),
        }
    }

    /// Register for transition events. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<TimerEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: TimerEvent) {
        debug!("steak {:?}: {:?}", self.steak.id, event);
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn state(&self) -> TimerState {
        if self.finished {
            TimerState::Finished
        } else if !self.started {
            TimerState::Idle
        } else if self.waiting {
            TimerState::Waiting
        } else {
            TimerState::Cooking
        }
    }

    pub fn start(&mut self) {
        if self.finished || self.running {
            return;
        }
        self.running = true;
        self.started = true;
        self.emit(TimerEvent::Started);
    }

    pub fn pause(&mut self) {
        if self.finished || !self.running {
            return;
        }
        self.running = false;
        self.emit(TimerEvent::Paused);
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advance one second. Decrements first, then checks for zero.
    pub fn tick(&mut self) {
        if !self.running || self.finished {
            return;
        }

        if self.waiting {
            self.delay_remaining = self.delay_remaining.saturating_sub(1);
            if self.delay_remaining == 0 {
                self.end_delay();
            }
        } else {
            self.time_remaining = self.time_remaining.saturating_sub(1);
            if self.time_remaining == 0 {
                self.complete_step();
            }
        }
    }

    /// Drop whatever is left of the pre-start delay, running or not
    pub fn skip_delay(&mut self) {
        if self.finished || !self.waiting {
            return;
        }
        self.end_delay();
    }

    /// Complete the current step now, exactly as if its countdown hit zero
    pub fn skip_step(&mut self) {
        if self.finished || self.waiting {
            return;
        }
        self.time_remaining = 0;
        self.complete_step();
    }

    fn end_delay(&mut self) {
        self.delay_remaining = 0;
        self.waiting = false;
        self.time_remaining = self.current_step().duration;
        self.emit(TimerEvent::PreStartComplete);
    }

    fn complete_step(&mut self) {
        let index = self.step_index;
        self.emit(TimerEvent::StepComplete { index });

        if index + 1 < self.steak.steps.len() {
            self.step_index = index + 1;
            self.time_remaining = self.current_step().duration;
        } else {
            self.finished = true;
            self.running = false;
            self.emit(TimerEvent::SessionComplete);
        }
    }

    pub fn steak(&self) -> &SteakConfig {
        &self.steak
    }

    pub fn current_step(&self) -> &CookingStep {
        &self.steak.steps[self.step_index]
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn delay_remaining(&self) -> u32 {
        self.delay_remaining
    }

    pub fn initial_delay(&self) -> u32 {
        self.initial_delay
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting && !self.finished
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Seconds shown on the clock: the delay while waiting, else the step
    pub fn clock_secs(&self) -> u32 {
        if self.is_waiting() {
            self.delay_remaining
        } else {
            self.time_remaining
        }
    }

    /// Seconds until this steak is ready, pre-start delay included
    pub fn seconds_left(&self) -> u32 {
        if self.finished {
            return 0;
        }
        let later: u32 = self.steak.steps[self.step_index + 1..]
            .iter()
            .map(|s| s.duration)
            .sum();
        let delay = if self.waiting { self.delay_remaining } else { 0 };
        delay + self.time_remaining + later
    }

    /// Fraction of the current step already cooked
    pub fn step_progress(&self) -> f64 {
        if self.finished {
            return 1.0;
        }
        let duration = self.current_step().duration;
        if self.waiting || duration == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.time_remaining) / f64::from(duration)
    }

    /// Fraction of the whole cook done. The waiting phase counts as nothing.
    pub fn total_progress(&self) -> f64 {
        if self.finished {
            return 1.0;
        }
        let total = self.steak.total_duration();
        if self.waiting || total == 0 {
            return 0.0;
        }
        let completed: u32 = self.steak.steps[..self.step_index]
            .iter()
            .map(|s| s.duration)
            .sum();
        let elapsed = self.current_step().duration - self.time_remaining;
        f64::from(completed + elapsed) / f64::from(total)
    }

    /// Fraction of the pre-start delay already waited out
    pub fn delay_progress(&self) -> f64 {
        if self.initial_delay == 0 {
            return 1.0;
        }
        f64::from(self.initial_delay - self.delay_remaining) / f64::from(self.initial_delay)
    }
}
