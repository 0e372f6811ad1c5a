//! # Simulated plant
//!
//! A deterministic kinematic model of the mecanum chassis. The plant implements every equipment
//! trait so the robot can run without hardware. Each equipment handle shares the plant state, and
//! [`SimPlant::step`] integrates the current motor demands over one cycle.
//!
//! The model is purely kinematic: the chassis velocity is the mean of the wheel roller
//! contributions, with no slip, inertia or motor lag.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{cell::RefCell, f64::consts::PI, rc::Rc};

use eqpt_if::eqpt::{
    drive::{DriveActuator, WheelId, NUM_WHEELS, WHEEL_IDS},
    input::OperatorInput,
    sens::{EncoderSensor, RotationSensor},
};
use log::debug;
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::robot::Hardware;
use util::maths::clamp;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of operator axes the simulated joystick provides.
pub const NUM_SIM_AXES: usize = 6;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Linear speed of a wheel at a motor demand of 1.
    ///
    /// Units: inches/second
    pub max_wheel_speed_ips: f64,

    /// Chassis rotation rate when all wheels contribute a full rotation.
    ///
    /// Units: degrees/second
    pub max_turn_rate_dps: f64,

    /// Constant error rate added to the gyro reading.
    ///
    /// Units: degrees/second
    pub gyro_drift_dps: f64,

    /// Motors mounted so that a positive motor demand drives the wheel backwards.
    pub mount_reversed: [bool; NUM_WHEELS],

    pub gear_ratio: f64,

    /// Units: inches
    pub wheel_diameter_in: f64,

    /// Constant values of the operator axes.
    pub teleop_axes: [f64; NUM_SIM_AXES],
}

/// Snapshot of the plant's true state.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SimState {
    /// Heading relative to the start orientation, positive clockwise.
    ///
    /// Units: degrees
    pub heading_deg: f64,

    /// Position in the field frame, x along the starting forward direction and y to its right.
    ///
    /// Units: inches
    pub position_in: [f64; 2],

    /// Rolling speed of each wheel, positive forwards.
    ///
    /// Units: inches/second
    pub wheel_speeds_ips: [f64; NUM_WHEELS],
}

/// The simulated plant.
pub struct SimPlant {
    params: SimParams,
    state: Rc<RefCell<PlantState>>,
}

#[derive(Debug)]
struct PlantState {
    inverted: [bool; NUM_WHEELS],

    /// Demand seen by each motor after inversion and clamping.
    motor_dems: [f64; NUM_WHEELS],

    heading_deg: f64,
    gyro_deg: f64,
    position_in: Vector2<f64>,
    encoder_counts: [f64; NUM_WHEELS],
    wheel_speeds_ips: [f64; NUM_WHEELS],
    axes: [f64; NUM_SIM_AXES],
}

/// Drive actuator handle.
pub struct SimDrive(Rc<RefCell<PlantState>>);

/// Gyro handle.
pub struct SimGyro(Rc<RefCell<PlantState>>);

/// Encoder handle for one wheel.
pub struct SimEncoder {
    wheel: WheelId,
    state: Rc<RefCell<PlantState>>,
}

/// Operator input handle.
pub struct SimInput(Rc<RefCell<PlantState>>);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        Self {
            max_wheel_speed_ips: 100.0,
            max_turn_rate_dps: 90.0,
            gyro_drift_dps: 0.0,
            mount_reversed: [true, false, true, false],
            gear_ratio: 16.0,
            wheel_diameter_in: 6.0,
            teleop_axes: [0.0; NUM_SIM_AXES],
        }
    }
}

impl SimPlant {
    pub fn new(params: SimParams) -> Self {
        let state = PlantState {
            inverted: [false; NUM_WHEELS],
            motor_dems: [0.0; NUM_WHEELS],
            heading_deg: 0.0,
            gyro_deg: 0.0,
            position_in: Vector2::zeros(),
            encoder_counts: [0.0; NUM_WHEELS],
            wheel_speeds_ips: [0.0; NUM_WHEELS],
            axes: params.teleop_axes,
        };

        Self {
            params,
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Integrate the plant over `dt_s` seconds using the current motor demands.
    pub fn step(&mut self, dt_s: f64) {
        let mut st = self.state.borrow_mut();

        // Wheel rolling speeds, the motor direction flipped for reversed mountings
        let mut w = [0f64; NUM_WHEELS];
        for i in 0..NUM_WHEELS {
            let mount = if self.params.mount_reversed[i] { -1.0 } else { 1.0 };
            w[i] = st.motor_dems[i] * mount;
        }

        let fl = w[WheelId::FrontLeft.index()];
        let fr = w[WheelId::FrontRight.index()];
        let rl = w[WheelId::RearLeft.index()];
        let rr = w[WheelId::RearRight.index()];

        let forward = (fl + fr + rl + rr) / 4.0;
        let strafe = (fl - fr - rl + rr) / 4.0;
        let rotation = (fl - fr + rl - rr) / 4.0;

        let body_vel_ips = Vector2::new(forward, strafe) * self.params.max_wheel_speed_ips;
        let field_vel_ips = Rotation2::new(st.heading_deg.to_radians()) * body_vel_ips;
        st.position_in += field_vel_ips * dt_s;

        let turn_deg = rotation * self.params.max_turn_rate_dps * dt_s;
        st.heading_deg += turn_deg;
        st.gyro_deg += turn_deg + self.params.gyro_drift_dps * dt_s;

        // Encoders count motor revolutions in the frame of the motor controller, so an inverted
        // controller also reports inverted counts.
        let revs_per_inch = self.params.gear_ratio / (PI * self.params.wheel_diameter_in);
        for i in 0..NUM_WHEELS {
            let ctrl = if st.inverted[i] { -1.0 } else { 1.0 };
            let revs = st.motor_dems[i] * ctrl * self.params.max_wheel_speed_ips * dt_s
                * revs_per_inch;
            st.encoder_counts[i] += revs;
            st.wheel_speeds_ips[i] = w[i] * self.params.max_wheel_speed_ips;
        }
    }

    /// Build the equipment handles for the robot.
    pub fn hardware(&self) -> Hardware {
        Hardware {
            drive: Box::new(SimDrive(self.state.clone())),
            gyro: Box::new(SimGyro(self.state.clone())),
            encoders: [
                Box::new(self.encoder(WheelId::FrontLeft)),
                Box::new(self.encoder(WheelId::FrontRight)),
                Box::new(self.encoder(WheelId::RearLeft)),
                Box::new(self.encoder(WheelId::RearRight)),
            ],
            input: Box::new(SimInput(self.state.clone())),
        }
    }

    pub fn encoder(&self, wheel: WheelId) -> SimEncoder {
        SimEncoder {
            wheel,
            state: self.state.clone(),
        }
    }

    /// Set the value of an operator axis. Axes that don't exist are ignored.
    pub fn set_axis(&mut self, axis: usize, value: f64) {
        if let Some(a) = self.state.borrow_mut().axes.get_mut(axis) {
            *a = value;
        }
    }

    pub fn true_heading_deg(&self) -> f64 {
        self.state.borrow().heading_deg
    }

    pub fn position_in(&self) -> Vector2<f64> {
        self.state.borrow().position_in
    }

    pub fn sim_state(&self) -> SimState {
        let st = self.state.borrow();
        SimState {
            heading_deg: st.heading_deg,
            position_in: [st.position_in[0], st.position_in[1]],
            wheel_speeds_ips: st.wheel_speeds_ips,
        }
    }
}

impl DriveActuator for SimDrive {
    fn set_inverted(&mut self, wheel: WheelId, inverted: bool) {
        debug!("Sim {} inverted: {}", wheel, inverted);
        self.0.borrow_mut().inverted[wheel.index()] = inverted;
    }

    fn set_wheel_dem(&mut self, wheel: WheelId, speed: f64) {
        let mut st = self.0.borrow_mut();
        let i = wheel.index();
        let dem = clamp(speed, -1.0, 1.0);

        st.motor_dems[i] = if st.inverted[i] { -dem } else { dem };
    }
}

impl RotationSensor for SimGyro {
    fn read_angle_deg(&mut self) -> f64 {
        self.0.borrow().gyro_deg
    }

    fn zero(&mut self) {
        self.0.borrow_mut().gyro_deg = 0.0;
    }
}

impl EncoderSensor for SimEncoder {
    fn read_raw_count(&mut self) -> f64 {
        self.state.borrow().encoder_counts[self.wheel.index()]
    }

    fn zero(&mut self) {
        self.state.borrow_mut().encoder_counts[self.wheel.index()] = 0.0;
    }
}

impl OperatorInput for SimInput {
    fn read_axis(&mut self, axis: usize) -> f64 {
        self.0.borrow().axes.get(axis).copied().unwrap_or(0.0)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn set_all(hw: &mut Hardware, dems: [f64; NUM_WHEELS]) {
        for &id in WHEEL_IDS.iter() {
            hw.drive.set_wheel_dem(id, dems[id.index()]);
        }
    }

    fn invert_left(hw: &mut Hardware) {
        for &id in WHEEL_IDS.iter() {
            hw.drive.set_inverted(id, id.is_left());
        }
    }

    #[test]
    fn test_forward() {
        let mut plant = SimPlant::new(SimParams::default());
        let mut hw = plant.hardware();
        invert_left(&mut hw);

        set_all(&mut hw, [0.5; NUM_WHEELS]);
        for _ in 0..50 {
            plant.step(0.02);
        }

        // 50 in/s for one second
        let pos = plant.position_in();
        assert!((pos[0] - 50.0).abs() < 1e-9);
        assert!(pos[1].abs() < 1e-9);
        assert_eq!(plant.true_heading_deg(), 0.0);

        // Every encoder reads the same forward distance
        let expected = 50.0 / (PI * 6.0) * 16.0;
        for enc in hw.encoders.iter_mut() {
            assert!((enc.read_raw_count() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wrong_polarity_spins() {
        // Without inverting the mirrored motors a forward demand turns the chassis
        let mut plant = SimPlant::new(SimParams::default());
        let mut hw = plant.hardware();

        set_all(&mut hw, [0.5; NUM_WHEELS]);
        plant.step(0.1);

        assert!(plant.position_in().norm() < 1e-9);
        assert!(plant.true_heading_deg() < 0.0);
    }

    #[test]
    fn test_rotate_and_gyro() {
        let mut plant = SimPlant::new(SimParams {
            gyro_drift_dps: 1.0,
            ..SimParams::default()
        });
        let mut hw = plant.hardware();
        invert_left(&mut hw);

        set_all(&mut hw, [0.2, -0.2, 0.2, -0.2]);
        for _ in 0..100 {
            plant.step(0.01);
        }

        assert!((plant.true_heading_deg() - 18.0).abs() < 1e-9);
        assert!((hw.gyro.read_angle_deg() - 19.0).abs() < 1e-9);

        hw.gyro.zero();
        assert_eq!(hw.gyro.read_angle_deg(), 0.0);
        assert!((plant.true_heading_deg() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_strafe_after_turn() {
        let mut plant = SimPlant::new(SimParams::default());
        let mut hw = plant.hardware();
        invert_left(&mut hw);

        // Turn 90 deg clockwise
        set_all(&mut hw, [1.0, -1.0, 1.0, -1.0]);
        plant.step(1.0);
        assert!((plant.true_heading_deg() - 90.0).abs() < 1e-9);

        // Strafing left now moves along the starting forward direction
        set_all(&mut hw, [-1.0, 1.0, 1.0, -1.0]);
        plant.step(0.5);
        let pos = plant.position_in();
        assert!((pos[0] - 50.0).abs() < 1e-9, "{:?}", pos);
        assert!(pos[1].abs() < 1e-9, "{:?}", pos);
    }

    #[test]
    fn test_clamp_and_axes() {
        let mut plant = SimPlant::new(SimParams::default());
        let mut hw = plant.hardware();
        invert_left(&mut hw);

        set_all(&mut hw, [3.0; NUM_WHEELS]);
        plant.step(1.0);
        assert!((plant.position_in()[0] - 100.0).abs() < 1e-9);

        plant.set_axis(4, -0.3);
        plant.set_axis(17, 1.0);
        assert_eq!(hw.input.read_axis(4), -0.3);
        assert_eq!(hw.input.read_axis(17), 0.0);

        assert_eq!(plant.sim_state().wheel_speeds_ips, [100.0; NUM_WHEELS]);
    }
}
