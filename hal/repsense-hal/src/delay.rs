//! Blocking delay abstraction
//!
//! Indicator sequences (get-ready blinking, rep countdown) hold the control
//! loop for their whole duration. Routing every pause through this trait
//! lets host tests count elapsed time instead of sleeping.

/// Blocking millisecond delay
pub trait DelayMs {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: DelayMs + ?Sized> DelayMs for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
