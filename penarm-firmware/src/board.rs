//! Raspberry Pi Pico wiring
//!
//! Pin assignments for the reference build:
//!
//! | Function        | Pin  |
//! |-----------------|------|
//! | Shoulder servo  | GP0  |
//! | Elbow servo     | GP1  |
//! | Wrist servo     | GP2  |
//! | Pen servo       | GP3  |
//! | X knob          | GP27 |
//! | Y knob          | GP26 |
//! | Corner 1 button | GP13 |
//! | Corner 2 button | GP11 |
//! | Pen button      | GP22 |
//! | Pen LED         | GP20 |
//! | Corner 1 LED    | GP16 |
//! | Corner 2 LED    | GP17 |

use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{self, Pwm, PwmOutput};
use embassy_rp::Peripherals;
use penarm_core::actuator::ServoTiming;
use penarm_core::config::ArmConfig;
use penarm_drivers::input::{AdcReader, GpioButtons, KnobAxis, KnobSource};
use penarm_drivers::output::{LedIndicators, PwmServoBank};

/// PWM clock divider; leaves room for a 20 ms period in a 16-bit counter
const PWM_DIVIDER: u8 = 64;

pub type Knobs = KnobSource<KnobAdc<'static>>;
pub type Buttons = GpioButtons<Input<'static>>;
pub type Servos = PwmServoBank<PwmOutput<'static>>;
pub type Leds = LedIndicators<Output<'static>>;

/// Blocking ADC with the two knob channels
pub struct KnobAdc<'d> {
    adc: Adc<'d, adc::Blocking>,
    x: Channel<'d>,
    y: Channel<'d>,
}

impl AdcReader for KnobAdc<'_> {
    fn read(&mut self, axis: KnobAxis) -> Result<u16, ()> {
        let channel = match axis {
            KnobAxis::X => &mut self.x,
            KnobAxis::Y => &mut self.y,
        };
        let raw = self.adc.blocking_read(channel).map_err(|_| ())?;
        Ok(scale_12_to_16(raw))
    }
}

/// Stretch a 12-bit conversion over the 16-bit range (4095 becomes 65535)
fn scale_12_to_16(raw: u16) -> u16 {
    let raw = raw & 0x0fff;
    (raw << 4) | (raw >> 8)
}

/// PWM counter top for one servo frame
fn pwm_top(timing: &ServoTiming) -> u16 {
    let clk_hz = embassy_rp::clocks::clk_sys_freq() as u64;
    let ticks = clk_hz / PWM_DIVIDER as u64 * timing.period_us as u64 / 1_000_000;
    ticks.saturating_sub(1).min(u16::MAX as u64) as u16
}

fn pwm_config(timing: &ServoTiming) -> pwm::Config {
    let mut config = pwm::Config::default();
    config.divider = PWM_DIVIDER.into();
    config.top = pwm_top(timing);
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Board I/O handed to the control loop
pub struct Board {
    pub knobs: Knobs,
    pub buttons: Buttons,
    pub servos: Servos,
    pub leds: Leds,
}

impl Board {
    /// Claim and configure every peripheral the arm uses
    pub fn new(p: Peripherals, config: &ArmConfig) -> Self {
        let adc = Adc::new_blocking(p.ADC, adc::Config::default());
        let knob_adc = KnobAdc {
            adc,
            x: Channel::new_pin(p.PIN_27, Pull::None),
            y: Channel::new_pin(p.PIN_26, Pull::None),
        };
        let reach = config.geometry.l1_mm + config.geometry.l2_mm;
        let knobs = KnobSource::new(knob_adc, reach);

        let buttons = GpioButtons::new_active_high(
            Input::new(p.PIN_13, Pull::Down),
            Input::new(p.PIN_11, Pull::Down),
            Input::new(p.PIN_22, Pull::Down),
        );

        let cfg = pwm_config(&config.servo);
        let (shoulder, elbow) =
            Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_0, p.PIN_1, cfg.clone()).split();
        let (wrist, pen) = Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, cfg).split();

        // Both outputs of an `_ab` slice are always present
        let mut servos = PwmServoBank::new(shoulder.unwrap(), elbow.unwrap());
        if config.joints.mirror_wrist {
            if let Some(wrist) = wrist {
                servos = servos.with_wrist(wrist);
            }
        }
        if config.pen.enabled {
            if let Some(pen) = pen {
                servos = servos.with_pen(pen);
            }
        }

        let leds = LedIndicators::new_active_high(
            Output::new(p.PIN_20, Level::Low),
            Output::new(p.PIN_16, Level::Low),
            Output::new(p.PIN_17, Level::Low),
        );

        Self {
            knobs,
            buttons,
            servos,
            leds,
        }
    }
}
