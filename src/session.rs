use log::info;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::cooking::{SteakConfig, SteakId};
use crate::runtime::Metronome;
use crate::sync::sync_delays;
use crate::timer::{SessionTimer, TimerEvent};

/// A timer event tagged with the steak it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEvent {
    pub index: usize,
    pub steak: SteakId,
    pub event: TimerEvent,
}

/// Drives one timer per steak on a shared one-second cadence. When
/// synchronized, the first start request starts the whole group.
#[derive(Debug)]
pub struct CookingSession {
    timers: Vec<SessionTimer>,
    receivers: Vec<Receiver<TimerEvent>>,
    synchronize: bool,
    group_started: bool,
    announced_done: bool,
    metronome: Metronome,
}

impl CookingSession {
    pub fn new(steaks: Vec<SteakConfig>, synchronize: bool) -> Self {
        let totals: Vec<u32> = steaks.iter().map(SteakConfig::total_duration).collect();
        let delays = sync_delays(&totals, synchronize);

        info!(
            "cooking {} steak(s), synchronized: {}, delays: {:?}",
            steaks.len(),
            synchronize,
            delays
        );

        let mut timers: Vec<SessionTimer> = steaks
            .into_iter()
            .zip(delays)
            .map(|(steak, delay)| SessionTimer::new(steak, delay))
            .collect();
        let receivers = timers.iter_mut().map(SessionTimer::subscribe).collect();

        Self {
            timers,
            receivers,
            synchronize,
            group_started: false,
            announced_done: false,
            metronome: Metronome::per_second(),
        }
    }

    /// A user asked steak `index` to start. The first request in a
    /// synchronized session is forwarded to every steak.
    pub fn request_start(&mut self, index: usize) {
        if index >= self.timers.len() {
            return;
        }

        if self.synchronize && !self.group_started {
            self.group_started = true;
            info!("synchronized start requested by steak #{}", index + 1);
            for timer in &mut self.timers {
                timer.start();
            }
        } else {
            self.timers[index].start();
        }
    }

    pub fn pause(&mut self, index: usize) {
        if let Some(timer) = self.timers.get_mut(index) {
            timer.pause();
        }
    }

    /// Play/pause button semantics
    pub fn toggle(&mut self, index: usize) {
        match self.timers.get(index) {
            Some(timer) if timer.is_running() => self.pause(index),
            Some(_) => self.request_start(index),
            None => {}
        }
    }

    /// Skip the pre-start delay while waiting, otherwise the current step
    pub fn skip(&mut self, index: usize) {
        if let Some(timer) = self.timers.get_mut(index) {
            if timer.is_waiting() {
                timer.skip_delay();
            } else {
                timer.skip_step();
            }
        }
    }

    pub fn tick_all(&mut self) {
        for timer in &mut self.timers {
            timer.tick();
        }

        if !self.announced_done && self.all_finished() {
            self.announced_done = true;
            info!("all {} steak(s) ready", self.timers.len());
        }
    }

    /// Feed elapsed wall time; ticks every timer once per whole second.
    /// Returns the number of ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.any_running() {
            self.metronome.reset();
            return 0;
        }

        let beats = self.metronome.advance(elapsed);
        for _ in 0..beats {
            self.tick_all();
        }
        beats
    }

    /// Everything the timers reported since the last call, in steak order
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.receivers
            .iter()
            .zip(&self.timers)
            .enumerate()
            .flat_map(|(index, (rx, timer))| {
                let steak = timer.steak().id;
                rx.try_iter().map(move |event| SessionEvent {
                    index,
                    steak,
                    event,
                })
            })
            .collect()
    }

    pub fn any_running(&self) -> bool {
        self.timers.iter().any(SessionTimer::is_running)
    }

    pub fn all_finished(&self) -> bool {
        !self.timers.is_empty() && self.timers.iter().all(SessionTimer::is_finished)
    }

    pub fn timers(&self) -> &[SessionTimer] {
        &self.timers
    }

    pub fn timer(&self, index: usize) -> Option<&SessionTimer> {
        self.timers.get(index)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn is_synchronized(&self) -> bool {
        self.synchronize
    }

    /// Seconds until the last steak is ready
    pub fn seconds_left(&self) -> u32 {
        self.timers
            .iter()
            .map(SessionTimer::seconds_left)
            .max()
            .unwrap_or(0)
    }
}
