//! GPIO LED indicator bank
//!
//! Drives a fixed set of LEDs from the logical indicators. Several
//! indicators may be routed to the same LED; such a LED is lit while any
//! of them is on.

use repsense_core::config::IndicatorConfig;
use repsense_core::traits::{Indicator, IndicatorBank};
use repsense_hal::OutputPin;

/// Indicator bank over `N` GPIO LEDs
pub struct GpioIndicators<P, const N: usize> {
    pins: [P; N],
    /// LED index per indicator
    routes: [u8; Indicator::COUNT],
    /// If true, LED ON = pin LOW
    inverted: bool,
    /// Logical state per indicator
    on: [bool; Indicator::COUNT],
}

impl<P: OutputPin, const N: usize> GpioIndicators<P, N> {
    /// Create a bank with all LEDs off
    ///
    /// Indicators routed past the last pin are tracked but drive nothing.
    pub fn new(pins: [P; N], routes: [u8; Indicator::COUNT], inverted: bool) -> Self {
        let mut bank = Self {
            pins,
            routes,
            inverted,
            on: [false; Indicator::COUNT],
        };
        for led in 0..N {
            bank.drive(led);
        }
        bank
    }

    /// Create a bank from the indicator configuration
    pub fn from_config(pins: [P; N], config: &IndicatorConfig) -> Self {
        Self::new(pins, config.routes(), config.active_low)
    }

    /// Check if a physical LED is lit
    pub fn led_is_lit(&self, led: usize) -> bool {
        self.pins
            .get(led)
            .is_some_and(|pin| pin.is_set_high() != self.inverted)
    }

    /// Update one LED from every indicator routed to it
    fn drive(&mut self, led: usize) {
        let lit = Indicator::ALL
            .iter()
            .any(|i| usize::from(self.routes[i.index()]) == led && self.on[i.index()]);
        if let Some(pin) = self.pins.get_mut(led) {
            pin.set_state(lit != self.inverted);
        }
    }
}

impl<P: OutputPin, const N: usize> IndicatorBank for GpioIndicators<P, N> {
    fn set(&mut self, indicator: Indicator, on: bool) {
        self.on[indicator.index()] = on;
        self.drive(usize::from(self.routes[indicator.index()]));
    }

    fn is_on(&self, indicator: Indicator) -> bool {
        self.on[indicator.index()]
    }
}
