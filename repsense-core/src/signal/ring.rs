//! Circular-buffer moving average
//!
//! Every slot takes part in the mean from the first tick on. Slots that have
//! not seen a real sample yet hold the configured rest value, so the
//! warm-up output is deterministic instead of depending on whatever the
//! buffer happened to contain.

use heapless::Vec;

/// Largest supported window
pub const MAX_WINDOW: usize = 64;

/// Default window (samples)
pub const DEFAULT_WINDOW: usize = 20;

/// Rest value used to pre-fill the window (1 g, sensor axis along gravity)
pub const DEFAULT_REST_G: f32 = 1.0;

/// Fixed-capacity moving average over the last N samples
#[derive(Debug, Clone)]
pub struct RingFilter {
    slots: Vec<f32, MAX_WINDOW>,
    /// Next slot to overwrite, always in `0..slots.len()`
    cursor: usize,
    /// Real samples pushed so far (saturating)
    pushed: usize,
}

impl Default for RingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_REST_G)
    }
}

impl RingFilter {
    /// Create a filter with `window` slots, all set to `rest`
    ///
    /// `window` is clamped to `1..=MAX_WINDOW`; configuration validation
    /// rejects out-of-range windows before they get here.
    pub fn new(window: usize, rest: f32) -> Self {
        let window = window.clamp(1, MAX_WINDOW);
        let mut slots = Vec::new();
        for _ in 0..window {
            let _ = slots.push(rest);
        }

        Self {
            slots,
            cursor: 0,
            pushed: 0,
        }
    }

    /// Insert a sample at the cursor and advance it, wrapping at the end
    pub fn push(&mut self, sample: f32) {
        self.slots[self.cursor] = sample;
        self.cursor += 1;
        if self.cursor >= self.slots.len() {
            self.cursor = 0;
        }
        self.pushed = self.pushed.saturating_add(1);
    }

    /// Arithmetic mean of all slots
    pub fn mean(&self) -> f32 {
        let sum: f32 = self.slots.iter().sum();
        sum / self.slots.len() as f32
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index of the next slot to be written
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True once every slot holds a real sample
    pub fn is_warm(&self) -> bool {
        self.pushed >= self.slots.len()
    }
}
