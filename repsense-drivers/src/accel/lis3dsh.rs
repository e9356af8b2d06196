//! LIS3DSH 3-axis accelerometer (SPI)
//!
//! # SPI Protocol
//!
//! Four-wire SPI, mode 3:
//! - First byte: register address, bit 7 set for reads
//! - Following bytes: data, address auto-increments (CTRL_REG6.ADD_INC)
//! - Chip select held low for the whole transaction
//!
//! Output registers hold little-endian 16-bit two's complement values.

use repsense_core::traits::{AccelerometerSensor, RawSample, SensorError};
use repsense_hal::spi::{Mode, SpiConfig};
use repsense_hal::{OutputPin, SpiBus};

/// LIS3DSH register addresses
pub mod reg {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Output data rate and axis enable
    pub const CTRL_REG4: u8 = 0x20;
    /// Full scale and anti-aliasing bandwidth
    pub const CTRL_REG5: u8 = 0x24;
    /// FIFO and address auto-increment
    pub const CTRL_REG6: u8 = 0x25;
    /// Data status
    pub const STATUS: u8 = 0x27;
    /// First output register (X low byte)
    pub const OUT_X_L: u8 = 0x28;
}

/// Expected WHO_AM_I answer
pub const WHO_AM_I_VALUE: u8 = 0x3F;

/// Read flag in the address byte
const READ_BIT: u8 = 0x80;

/// 100 Hz, block data update off, X/Y/Z enabled
const CTRL_REG4_100HZ_XYZ: u8 = 0x67;
/// ±2 g, 800 Hz anti-aliasing bandwidth
const CTRL_REG5_2G: u8 = 0x00;
/// Address auto-increment on multi-byte access
const CTRL_REG6_ADD_INC: u8 = 0x10;

/// Bus settings the device accepts (up to 10 MHz, CPOL=1 CPHA=1)
pub fn spi_config() -> SpiConfig {
    SpiConfig::with_mode(1_000_000, Mode::Mode3)
}

/// LIS3DSH driver
///
/// `detect` checks the device identity and configures it; reads before a
/// successful `detect` fail with [`SensorError::NotDetected`].
pub struct Lis3dsh<SPI, CS> {
    spi: SPI,
    cs: CS,
    ready: bool,
}

impl<SPI: SpiBus, CS: OutputPin> Lis3dsh<SPI, CS> {
    /// Create a new driver; chip select is driven high (idle)
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        cs.set_high();
        Self {
            spi,
            cs,
            ready: false,
        }
    }

    /// True once the device has been detected and configured
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Run one chip-select framed transaction in place
    fn transaction(&mut self, buf: &mut [u8]) -> Result<(), SensorError> {
        self.cs.set_low();
        let result = self
            .spi
            .transfer_in_place(buf)
            .and_then(|()| self.spi.flush());
        self.cs.set_high();
        result.map_err(|_| SensorError::Bus)
    }

    /// Read a single register
    pub fn read_register(&mut self, addr: u8) -> Result<u8, SensorError> {
        let mut buf = [addr | READ_BIT, 0];
        self.transaction(&mut buf)?;
        Ok(buf[1])
    }

    /// Write a single register
    pub fn write_register(&mut self, addr: u8, value: u8) -> Result<(), SensorError> {
        let mut buf = [addr & !READ_BIT, value];
        self.transaction(&mut buf)
    }

    /// Configure output rate, axes and full scale
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.write_register(reg::CTRL_REG4, CTRL_REG4_100HZ_XYZ)?;
        self.write_register(reg::CTRL_REG5, CTRL_REG5_2G)?;
        self.write_register(reg::CTRL_REG6, CTRL_REG6_ADD_INC)?;
        Ok(())
    }

    /// Release the bus and chip select
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI: SpiBus, CS: OutputPin> AccelerometerSensor for Lis3dsh<SPI, CS> {
    fn detect(&mut self) -> Result<(), SensorError> {
        self.ready = false;
        if self.read_register(reg::WHO_AM_I)? != WHO_AM_I_VALUE {
            return Err(SensorError::NotDetected);
        }
        self.init()?;
        self.ready = true;
        Ok(())
    }

    fn read_raw(&mut self) -> Result<RawSample, SensorError> {
        if !self.ready {
            return Err(SensorError::NotDetected);
        }

        let mut buf = [0u8; 7];
        buf[0] = reg::OUT_X_L | READ_BIT;
        self.transaction(&mut buf)?;

        // MISO floating high reads back as all ones
        if buf[1..].iter().all(|&b| b == 0xFF) {
            return Err(SensorError::InvalidData);
        }

        Ok(RawSample::new(
            i16::from_le_bytes([buf[1], buf[2]]),
            i16::from_le_bytes([buf[3], buf[4]]),
            i16::from_le_bytes([buf[5], buf[6]]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Register-level LIS3DSH model
    struct MockSpi {
        regs: [u8; 128],
        cs_low: Rc<Cell<bool>>,
        log: Rc<RefCell<Vec<Vec<u8>>>>,
        fail: bool,
        pending: Rc<Cell<bool>>,
        flushes: usize,
    }

    impl MockSpi {
        fn new(cs_low: Rc<Cell<bool>>) -> Self {
            let mut regs = [0u8; 128];
            regs[reg::WHO_AM_I as usize] = WHO_AM_I_VALUE;
            Self {
                regs,
                cs_low,
                log: Rc::new(RefCell::new(Vec::new())),
                fail: false,
                pending: Rc::new(Cell::new(false)),
                flushes: 0,
            }
        }
    }

    impl SpiBus for MockSpi {
        type Error = ();

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), ()> {
            read.copy_from_slice(write);
            self.transfer_in_place(read)
        }

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            let mut buf = data.to_vec();
            self.transfer_in_place(&mut buf)
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<(), ()> {
            buf.fill(0);
            self.transfer_in_place(buf)
        }

        fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), ()> {
            assert!(self.cs_low.get(), "transfer with chip select high");
            self.log.borrow_mut().push(data.to_vec());
            self.pending.set(true);
            if self.fail {
                return Err(());
            }
            let addr = (data[0] & 0x7F) as usize;
            if data[0] & READ_BIT != 0 {
                for (i, byte) in data[1..].iter_mut().enumerate() {
                    *byte = self.regs[addr + i];
                }
            } else {
                for (i, byte) in data[1..].iter().enumerate() {
                    self.regs[addr + i] = *byte;
                }
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.pending.set(false);
            self.flushes += 1;
            Ok(())
        }
    }

    struct MockCs {
        low: Rc<Cell<bool>>,
        bus_pending: Rc<Cell<bool>>,
        early_releases: usize,
    }

    impl OutputPin for MockCs {
        fn set_high(&mut self) {
            if self.low.get() && self.bus_pending.get() {
                self.early_releases += 1;
            }
            self.low.set(false);
        }

        fn set_low(&mut self) {
            self.low.set(true);
        }

        fn is_set_high(&self) -> bool {
            !self.low.get()
        }
    }

    fn device() -> Lis3dsh<MockSpi, MockCs> {
        let cs = Rc::new(Cell::new(true));
        let spi = MockSpi::new(cs.clone());
        let cs = MockCs {
            low: cs,
            bus_pending: spi.pending.clone(),
            early_releases: 0,
        };
        Lis3dsh::new(spi, cs)
    }

    #[test]
    fn test_bus_config() {
        let config = spi_config();
        assert_eq!(config.mode(), Mode::Mode3);
        assert!(config.frequency <= 10_000_000);
    }

    #[test]
    fn test_new_idles_chip_select() {
        let dev = device();
        assert!(dev.cs.is_set_high());
        assert!(!dev.is_ready());
    }

    #[test]
    fn test_detect_configures_device() {
        let mut dev = device();
        assert_eq!(dev.detect(), Ok(()));
        assert!(dev.is_ready());
        assert_eq!(dev.spi.regs[reg::CTRL_REG4 as usize], 0x67);
        assert_eq!(dev.spi.regs[reg::CTRL_REG5 as usize], 0x00);
        assert_eq!(dev.spi.regs[reg::CTRL_REG6 as usize], 0x10);
        assert_eq!(dev.spi.log.borrow()[0], [0x8F, 0x00]);
        assert!(dev.cs.is_set_high());
    }

    #[test]
    fn test_detect_wrong_identity() {
        let mut dev = device();
        dev.spi.regs[reg::WHO_AM_I as usize] = 0x33;
        assert_eq!(dev.detect(), Err(SensorError::NotDetected));
        assert!(!dev.is_ready());
        assert_eq!(dev.spi.regs[reg::CTRL_REG4 as usize], 0);
    }

    #[test]
    fn test_bus_flushed_before_chip_select_release() {
        let mut dev = device();
        assert_eq!(dev.read_register(reg::WHO_AM_I), Ok(WHO_AM_I_VALUE));
        assert_eq!(dev.spi.flushes, 1);
        assert_eq!(dev.cs.early_releases, 0);

        dev.detect().unwrap();
        dev.read_raw().unwrap();
        assert_eq!(dev.spi.flushes, 6);
        assert_eq!(dev.cs.early_releases, 0);
        assert!(dev.cs.is_set_high());
    }

    #[test]
    fn test_bus_error_releases_chip_select() {
        let mut dev = device();
        dev.spi.fail = true;
        assert_eq!(dev.detect(), Err(SensorError::Bus));
        assert!(dev.cs.is_set_high());
    }

    #[test]
    fn test_read_before_detect() {
        let mut dev = device();
        assert_eq!(dev.read_raw(), Err(SensorError::NotDetected));
    }

    #[test]
    fn test_read_raw_little_endian() {
        let mut dev = device();
        dev.detect().unwrap();

        let z: i16 = 18263;
        let out = [0x10, 0x00, 0xF0, 0xFF, z.to_le_bytes()[0], z.to_le_bytes()[1]];
        dev.spi.regs[0x28..0x2E].copy_from_slice(&out);

        let sample = dev.read_raw().unwrap();
        assert_eq!(sample, RawSample::new(16, -16, 18263));
        assert_eq!(dev.spi.log.borrow().last().unwrap()[0], 0xA8);
    }

    #[test]
    fn test_floating_bus_is_invalid() {
        let mut dev = device();
        dev.detect().unwrap();
        dev.spi.regs[0x28..0x2E].fill(0xFF);
        assert_eq!(dev.read_raw(), Err(SensorError::InvalidData));
    }
}
