//! GPIO push button

use repsense_core::traits::ButtonInput;
use repsense_hal::InputPin;

/// Momentary button on a GPIO input
///
/// The Discovery board's user button pulls the pin high while pressed.
pub struct GpioButton<P> {
    pin: P,
    /// If true, pressed = pin LOW
    active_low: bool,
}

impl<P: InputPin> GpioButton<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }
}

impl<P: InputPin> ButtonInput for GpioButton<P> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_high() != self.active_low
    }
}
