//! Repsense - Exercise Repetition Counter Firmware
//!
//! Firmware for the STM32F407 Discovery board. The on-board LIS3DSH is
//! strapped to the body; its vertical axis gives a tilt angle from which
//! the exercise is recognised and the repetitions are counted down on the
//! four user LEDs.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use repsense_core::trainer::Trainer;
use repsense_drivers::accel::{self, Lis3dsh};
use repsense_drivers::button::GpioButton;
use repsense_drivers::indicator::GpioIndicators;
use repsense_hal::embedded::{EhDelay, EhInput, EhOutput, EhSpi};
use repsense_hal::spi::{Mode, SpiConfig};

mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Repsense firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // LIS3DSH on SPI1 (PA5=SCK, PA6=MISO, PA7=MOSI), chip select on PE3
    let spi = Spi::new_blocking(p.SPI1, p.PA5, p.PA7, p.PA6, spi_config(accel::spi_config()));
    let cs = Output::new(p.PE3, Level::High, Speed::VeryHigh);
    let sensor = Lis3dsh::new(EhSpi::new(spi), EhOutput::new(cs, true));

    // User LEDs, in the order trainer.toml numbers them:
    // LD3 orange PD13, LD4 green PD12, LD5 red PD14, LD6 blue PD15
    let leds = [
        EhOutput::new(Output::new(p.PD13, Level::Low, Speed::Low), false),
        EhOutput::new(Output::new(p.PD12, Level::Low, Speed::Low), false),
        EhOutput::new(Output::new(p.PD14, Level::Low, Speed::Low), false),
        EhOutput::new(Output::new(p.PD15, Level::Low, Speed::Low), false),
    ];
    let indicators = GpioIndicators::from_config(leds, &config.indicators);

    // B1 user button on PA0 (external pull-down on the board)
    let button = GpioButton::new(
        EhInput::new(Input::new(p.PA0, Pull::None)),
        config.button.active_low,
    );

    info!("Drivers initialized");

    spawner.spawn(tasks::report_task()).unwrap();

    let trainer = Trainer::new(config, sensor, indicators, button, EhDelay::new(Delay));
    tasks::run_trainer(trainer).await
}

/// Convert bus settings to the embassy SPI configuration
fn spi_config(bus: SpiConfig) -> spi::Config {
    let mut config = spi::Config::default();
    config.frequency = Hertz(bus.frequency);
    config.mode = match bus.mode() {
        Mode::Mode0 => spi::MODE_0,
        Mode::Mode1 => spi::MODE_1,
        Mode::Mode2 => spi::MODE_2,
        Mode::Mode3 => spi::MODE_3,
    };
    config
}
