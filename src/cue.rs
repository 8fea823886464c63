//! Audible cues for timer transitions.
//!
//! The state machine only emits [`TimerEvent`]s; whoever drives the session
//! maps them to cues and hands them to a [`CueSink`]. Beeps of one cue are
//! spaced out and rung from `poll`, so the event loop never sleeps on audio.

use std::collections::VecDeque;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::timer::TimerEvent;

const BEEP_SPACING: Duration = Duration::from_millis(500);
const BEL: &[u8] = b"\x07";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    PreStart,
    Step,
    Done,
}

impl Cue {
    pub fn beeps(self) -> usize {
        match self {
            Cue::PreStart => 2,
            Cue::Step => 3,
            Cue::Done => 5,
        }
    }

    pub fn for_event(event: &TimerEvent) -> Option<Cue> {
        match event {
            TimerEvent::PreStartComplete => Some(Cue::PreStart),
            TimerEvent::StepComplete { .. } => Some(Cue::Step),
            TimerEvent::SessionComplete => Some(Cue::Done),
            TimerEvent::Started | TimerEvent::Paused => None,
        }
    }
}

pub trait CueSink {
    fn play(&mut self, cue: Cue, now: Instant);

    /// Emit whatever is due by `now`
    fn poll(&mut self, _now: Instant) {}
}

/// Rings the terminal bell
#[derive(Debug)]
pub struct Bell<W: Write> {
    out: W,
    pending: VecDeque<Instant>,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            pending: VecDeque::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CueSink for Bell<W> {
    fn play(&mut self, cue: Cue, now: Instant) {
        // queue behind anything still ringing
        let mut at = match self.pending.back() {
            Some(last) if *last + BEEP_SPACING > now => *last + BEEP_SPACING,
            _ => now,
        };
        for _ in 0..cue.beeps() {
            self.pending.push_back(at);
            at += BEEP_SPACING;
        }
    }

    fn poll(&mut self, now: Instant) {
        let mut rang = false;
        while self.pending.front().is_some_and(|at| *at <= now) {
            self.pending.pop_front();
            if let Err(err) = self.out.write_all(BEL) {
                log::warn!("failed to ring bell: {err}");
                self.pending.clear();
                return;
            }
            rang = true;
        }
        if rang {
            if let Err(err) = self.out.flush() {
                log::warn!("failed to flush bell: {err}");
            }
        }
    }
}

/// Sink used with `--mute`
#[derive(Debug, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, cue: Cue, _now: Instant) {
        log::debug!("muted cue {cue:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bells(bell: &Bell<Vec<u8>>) -> usize {
        bell.out.iter().filter(|b| **b == 0x07).count()
    }

    #[test]
    fn test_cue_mapping() {
        assert_eq!(Cue::for_event(&TimerEvent::PreStartComplete), Some(Cue::PreStart));
        assert_eq!(
            Cue::for_event(&TimerEvent::StepComplete { index: 1 }),
            Some(Cue::Step)
        );
        assert_eq!(Cue::for_event(&TimerEvent::SessionComplete), Some(Cue::Done));
        assert_eq!(Cue::for_event(&TimerEvent::Started), None);
        assert_eq!(Cue::for_event(&TimerEvent::Paused), None);
    }

    #[test]
    fn test_beep_counts() {
        assert_eq!(Cue::PreStart.beeps(), 2);
        assert_eq!(Cue::Step.beeps(), 3);
        assert_eq!(Cue::Done.beeps(), 5);
    }

    #[test]
    fn test_bell_spaces_beeps() {
        let t0 = Instant::now();
        let mut bell = Bell::new(Vec::new());
        bell.play(Cue::Step, t0);

        bell.poll(t0);
        assert_eq!(bells(&bell), 1);
        bell.poll(t0 + Duration::from_millis(499));
        assert_eq!(bells(&bell), 1);
        bell.poll(t0 + Duration::from_millis(1_000));
        assert_eq!(bells(&bell), 3);
        assert_eq!(bell.pending(), 0);
    }

    #[test]
    fn test_back_to_back_cues_queue_up() {
        let t0 = Instant::now();
        let mut bell = Bell::new(Vec::new());
        bell.play(Cue::Step, t0);
        bell.play(Cue::Done, t0);
        assert_eq!(bell.pending(), 8);

        bell.poll(t0 + Duration::from_millis(1_400));
        assert_eq!(bells(&bell), 3);
        bell.poll(t0 + Duration::from_secs(10));
        assert_eq!(bells(&bell), 8);
    }

    #[test]
    fn test_silent_sink_accepts_cues() {
        let mut sink = Silent;
        sink.play(Cue::Done, Instant::now());
        sink.poll(Instant::now());
    }
}
