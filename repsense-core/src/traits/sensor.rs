//! Accelerometer trait

/// Errors that can occur while talking to the accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device did not identify itself
    NotDetected,
    /// Bus transaction failed
    Bus,
    /// Device answered with data that cannot be a reading
    InvalidData,
}

/// One raw 3-axis reading in device counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    /// Create a sample from axis counts
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Vertical component in g
    pub fn z_g(&self, counts_per_g: f32) -> f32 {
        self.z as f32 / counts_per_g
    }
}

/// Trait for 3-axis accelerometers
pub trait AccelerometerSensor {
    /// Check that the device is present and responding
    fn detect(&mut self) -> Result<(), SensorError>;

    /// Read the latest raw sample
    fn read_raw(&mut self) -> Result<RawSample, SensorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_normalisation() {
        let sample = RawSample::new(0, 0, 18263);
        assert!((sample.z_g(18263.0) - 1.0).abs() < 1e-6);

        let sample = RawSample::new(0, 0, -9000);
        assert!((sample.z_g(18000.0) + 0.5).abs() < 1e-6);
    }
}
