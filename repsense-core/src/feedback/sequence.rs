//! Timed indicator sequences

use heapless::Vec;
use repsense_hal::DelayMs;

use crate::traits::{Indicator, IndicatorBank};

/// Longest sequence the controller builds
pub const MAX_PHASES: usize = 8;

/// One step of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Switch an indicator
    Set { indicator: Indicator, on: bool },
    /// Wait without touching the indicators
    Hold { ms: u32 },
    /// Blink an indicator `count` times, ending off
    Blink {
        indicator: Indicator,
        count: u16,
        on_ms: u32,
        off_ms: u32,
    },
}

impl Phase {
    /// Time this phase takes to play
    pub fn duration_ms(&self) -> u32 {
        match *self {
            Phase::Set { .. } => 0,
            Phase::Hold { ms } => ms,
            Phase::Blink {
                count,
                on_ms,
                off_ms,
                ..
            } => u32::from(count).saturating_mul(on_ms.saturating_add(off_ms)),
        }
    }
}

/// A fixed list of phases played in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    phases: Vec<Phase, MAX_PHASES>,
}

impl Sequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Append a phase
    ///
    /// Returns the phase back if the sequence is full.
    pub fn push(&mut self, phase: Phase) -> Result<(), Phase> {
        self.phases.push(phase)
    }

    /// Builder form of [`Sequence::push`]; phases past capacity are dropped
    pub fn then(mut self, phase: Phase) -> Self {
        let _ = self.phases.push(phase);
        self
    }

    /// Total time the sequence blocks for
    pub fn duration_ms(&self) -> u32 {
        self.phases
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.duration_ms()))
    }

    /// Play the sequence, blocking on `delay`
    ///
    /// Returns the milliseconds spent waiting.
    pub fn play<I, D>(&self, indicators: &mut I, delay: &mut D) -> u32
    where
        I: IndicatorBank + ?Sized,
        D: DelayMs + ?Sized,
    {
        let mut elapsed = 0u32;
        for phase in &self.phases {
            match *phase {
                Phase::Set { indicator, on } => indicators.set(indicator, on),
                Phase::Hold { ms } => {
                    delay.delay_ms(ms);
                    elapsed = elapsed.saturating_add(ms);
                }
                Phase::Blink {
                    indicator,
                    count,
                    on_ms,
                    off_ms,
                } => {
                    for _ in 0..count {
                        indicators.set(indicator, true);
                        delay.delay_ms(on_ms);
                        indicators.set(indicator, false);
                        delay.delay_ms(off_ms);
                    }
                    elapsed = elapsed.saturating_add(phase.duration_ms());
                }
            }
        }
        elapsed
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{RecordingBank, SimDelay};
    use super::*;

    #[test]
    fn test_blink_timing() {
        let seq = Sequence::new().then(Phase::Blink {
            indicator: Indicator::SequenceComplete,
            count: 3,
            on_ms: 600,
            off_ms: 400,
        });
        let mut bank = RecordingBank::default();
        let mut delay = SimDelay::default();

        let elapsed = seq.play(&mut bank, &mut delay);

        assert_eq!(elapsed, 3000);
        assert_eq!(seq.duration_ms(), 3000);
        assert_eq!(delay.elapsed_ms, 3000);
        assert_eq!(delay.calls, 6);
        assert_eq!(bank.pulses(Indicator::SequenceComplete), 3);
        assert!(!bank.is_on(Indicator::SequenceComplete));
    }

    #[test]
    fn test_set_and_hold() {
        let seq = Sequence::new()
            .then(Phase::Set {
                indicator: Indicator::Sit,
                on: true,
            })
            .then(Phase::Hold { ms: 250 });
        let mut bank = RecordingBank::default();
        let mut delay = SimDelay::default();

        assert_eq!(seq.play(&mut bank, &mut delay), 250);
        assert!(bank.is_on(Indicator::Sit));
    }

    #[test]
    fn test_zero_count_blink_is_silent() {
        let seq = Sequence::new().then(Phase::Blink {
            indicator: Indicator::RepCountdown,
            count: 0,
            on_ms: 500,
            off_ms: 500,
        });
        let mut bank = RecordingBank::default();
        let mut delay = SimDelay::default();
        assert_eq!(seq.play(&mut bank, &mut delay), 0);
        assert!(bank.writes.is_empty());
    }

    #[test]
    fn test_capacity() {
        let mut seq = Sequence::new();
        for _ in 0..MAX_PHASES {
            assert!(seq.push(Phase::Hold { ms: 1 }).is_ok());
        }
        assert_eq!(seq.push(Phase::Hold { ms: 2 }), Err(Phase::Hold { ms: 2 }));
        assert_eq!(seq.duration_ms(), MAX_PHASES as u32);
    }
}
