//! Periodic control loop
//!
//! One tick reads the commanded position, clamps it to the calibrated
//! boundary, solves it, and writes the servo commands. Unreachable targets
//! skip actuation for that tick and the previous commands stay in effect.
//! Buttons are polled on every tick, faulted or not.

use heapless::Vec;

use super::controller::{Controller, Planned, Solution};
use crate::actuator::{JointCommands, JointId};
use crate::boundary::CornerSlot;
use crate::config::{ArmConfig, ConfigError};
use crate::kinematics::{CartesianPoint, ReachError};
use crate::safety::FaultTransition;
use crate::scheduler::{Clock, TickScheduler};
use crate::state::{ButtonId, InputEvent, PenState};
use crate::traits::{ActuatorSink, ButtonSource, CoordinateSource, IndicatorId, IndicatorSink};

/// Most events a single tick can produce (one per button)
pub const MAX_EVENTS_PER_TICK: usize = ButtonId::ALL.len();

/// What a tick did with its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Servos were driven to the solved pose
    Actuated(Solution),
    /// Target unreachable; servos left untouched
    Skipped {
        target: CartesianPoint,
        error: ReachError,
    },
}

/// Summary of one control tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Timestamp the tick ran at
    pub now_ms: u32,
    /// Unclamped reading from the coordinate source
    pub raw: CartesianPoint,
    pub outcome: TickOutcome,
    /// Accepted button edges, in polling order
    pub events: Vec<InputEvent, MAX_EVENTS_PER_TICK>,
}

impl TickReport {
    pub fn is_fault(&self) -> bool {
        matches!(self.outcome, TickOutcome::Skipped { .. })
    }
}

/// Control loop over the four I/O capabilities
pub struct ControlLoop<S, B, A, I> {
    controller: Controller,
    ticker: TickScheduler,
    source: S,
    buttons: B,
    actuators: A,
    indicators: I,
    last_commands: Option<JointCommands>,
    ticks: u32,
}

impl<S, B, A, I> ControlLoop<S, B, A, I>
where
    S: CoordinateSource,
    B: ButtonSource,
    A: ActuatorSink,
    I: IndicatorSink,
{
    /// Validate `config` and bring outputs to their startup state
    ///
    /// Indicators are driven off and the pen servo, if enabled, is lowered.
    /// An invalid configuration is returned as an error and nothing is
    /// written to the outputs.
    pub fn new(
        config: &ArmConfig,
        source: S,
        buttons: B,
        actuators: A,
        indicators: I,
    ) -> Result<Self, ConfigError> {
        let controller = Controller::new(config)?;
        Ok(Self::with_controller(
            controller,
            config.control.tick_period_ms,
            source,
            buttons,
            actuators,
            indicators,
        ))
    }

    /// Build around an existing controller
    pub fn with_controller(
        controller: Controller,
        tick_period_ms: u32,
        source: S,
        buttons: B,
        actuators: A,
        indicators: I,
    ) -> Self {
        let mut this = Self {
            controller,
            ticker: TickScheduler::new(tick_period_ms),
            source,
            buttons,
            actuators,
            indicators,
            last_commands: None,
            ticks: 0,
        };
        this.init_outputs();
        this
    }

    fn init_outputs(&mut self) {
        let pen = self.controller.pen_state();
        let boundary = self.controller.boundary();
        for id in IndicatorId::ALL {
            let on = match id {
                IndicatorId::Pen => pen.indicator_on(),
                IndicatorId::Corner1 => boundary.corner(CornerSlot::First).is_some(),
                IndicatorId::Corner2 => boundary.corner(CornerSlot::Second).is_some(),
            };
            self.indicators.set_state(id, on);
        }
        self.drive_pen(pen);
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Commands currently in effect on the arm servos
    pub fn last_commands(&self) -> Option<JointCommands> {
        self.last_commands
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Run one tick at `now_ms`
    pub fn tick(&mut self, now_ms: u32) -> TickReport {
        self.ticks = self.ticks.wrapping_add(1);
        let raw = self.source.read();

        let outcome = match self.controller.plan(raw) {
            Planned::Reached(solution, transition) => {
                if let FaultTransition::StreakEnded { skipped } = transition {
                    info!("target reachable again after {} skipped ticks", skipped);
                }
                self.actuate(&solution);
                TickOutcome::Actuated(solution)
            }
            Planned::Faulted {
                target,
                error,
                transition,
            } => {
                if let FaultTransition::StreakStarted(kind) = transition {
                    warn!("skipping actuation: {} at ({}, {})", kind, target.x, target.y);
                }
                TickOutcome::Skipped { target, error }
            }
        };

        let events = self.poll_buttons(raw, now_ms);

        TickReport {
            now_ms,
            raw,
            outcome,
            events,
        }
    }

    /// Run one tick and wait for the next deadline
    pub fn step<C: Clock>(&mut self, clock: &mut C) -> TickReport {
        let report = self.tick(clock.now_ms());
        let deadline = self.ticker.next_deadline(clock.now_ms());
        clock.sleep_until_ms(deadline);
        report
    }

    /// Run forever
    pub fn run<C: Clock>(&mut self, clock: &mut C) -> ! {
        info!("control loop started, period {} ms", self.ticker.period_ms());
        loop {
            self.step(clock);
        }
    }

    /// Park every configured servo at the neutral angle
    pub fn shutdown(&mut self) {
        let neutral = self.controller.neutral_command();
        self.actuators.set_duty(JointId::Shoulder, neutral);
        self.actuators.set_duty(JointId::Elbow, neutral);
        if self.controller.mirror_wrist() {
            self.actuators.set_duty(JointId::Wrist, neutral);
        }
        if self.controller.pen_command(PenState::Down).is_some() {
            self.actuators.set_duty(JointId::Pen, neutral);
        }
        self.last_commands = Some(JointCommands {
            shoulder: neutral,
            elbow: neutral,
        });
        info!("servos parked at duty {}", neutral.duty());
    }

    /// Tick scheduler overruns so far
    pub fn overruns(&self) -> u32 {
        self.ticker.overruns()
    }

    fn actuate(&mut self, solution: &Solution) {
        let commands = solution.commands;
        self.actuators.set_duty(JointId::Shoulder, commands.shoulder);
        self.actuators.set_duty(JointId::Elbow, commands.elbow);
        if self.controller.mirror_wrist() {
            self.actuators.set_duty(JointId::Wrist, commands.shoulder);
        }
        self.last_commands = Some(commands);

        debug!(
            "q1 {} deg q2 {} deg -> duty {} {}",
            solution.angles.shoulder_deg(),
            solution.angles.elbow_deg(),
            commands.shoulder.duty(),
            commands.elbow.duty()
        );
    }

    fn poll_buttons(
        &mut self,
        raw: CartesianPoint,
        now_ms: u32,
    ) -> Vec<InputEvent, MAX_EVENTS_PER_TICK> {
        let mut events = Vec::new();

        for id in ButtonId::ALL {
            let pressed = self.buttons.is_pressed(id);
            if !self.controller.debounce(id, pressed, now_ms) {
                continue;
            }

            let event = self.controller.handle_press(id, raw);
            match event {
                InputEvent::CornerCaptured { slot, point } => {
                    let indicator = match slot {
                        CornerSlot::First => IndicatorId::Corner1,
                        CornerSlot::Second => IndicatorId::Corner2,
                    };
                    self.indicators.set_state(indicator, true);
                    info!("corner {} captured at ({}, {})", slot, point.x, point.y);
                }
                InputEvent::PenToggled(state) => {
                    self.indicators.set_state(IndicatorId::Pen, state.indicator_on());
                    self.drive_pen(state);
                    info!("pen {}", state);
                }
            }

            // One slot per button, so this cannot overflow
            let _ = events.push(event);
        }

        events
    }

    fn drive_pen(&mut self, state: PenState) {
        if let Some(command) = self.controller.pen_command(state) {
            self.actuators.set_duty(JointId::Pen, command);
        }
    }
}
