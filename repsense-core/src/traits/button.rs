//! Momentary button trait

/// Trait for a momentary push button
pub trait ButtonInput {
    /// True while the button is held
    ///
    /// Takes `&mut self` because reading a pin may require mutable access.
    fn is_pressed(&mut self) -> bool;
}
