//! Penarm - 2-link Pen Plotter Arm Firmware
//!
//! Main firmware binary for RP2040-based plotter arms. Two knobs set the
//! pen target, the core solves the arm's inverse kinematics every tick,
//! and hobby servos follow. Two buttons capture the corners of the drawing
//! rectangle and a third lifts or lowers the pen.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use penarm_core::config::ArmConfig;
use penarm_core::control::ControlLoop;

use crate::board::Board;
use crate::clock::EmbassyClock;

mod board;
mod clock;

/// Configuration validated and serialized by build.rs from plotter.toml
static CONFIG_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/plotter.bin"));

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Penarm firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = match load_config() {
        Some(config) => config,
        None => halt(),
    };
    info!(
        "Configuration loaded: links {} / {} mm, tick {} ms",
        config.geometry.l1_mm, config.geometry.l2_mm, config.control.tick_period_ms
    );

    let board = Board::new(p, &config);
    info!("Servos, knobs, buttons and LEDs initialized");

    let mut control = match ControlLoop::new(
        &config,
        board.knobs,
        board.buttons,
        board.servos,
        board.leds,
    ) {
        Ok(control) => control,
        Err(e) => {
            error!("Control loop rejected configuration: {}", e);
            halt()
        }
    };

    let mut clock = EmbassyClock;
    control.run(&mut clock)
}

/// Decode and validate the embedded configuration
fn load_config() -> Option<ArmConfig> {
    let config: ArmConfig = match postcard::from_bytes(CONFIG_BLOB) {
        Ok(config) => config,
        Err(_) => {
            error!("Embedded configuration is corrupt");
            return None;
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return None;
    }

    Some(config)
}

/// Park the core; the control loop never starts
fn halt() -> ! {
    error!("Halting: outputs left in their reset state");
    loop {
        cortex_m::asm::wfi();
    }
}
