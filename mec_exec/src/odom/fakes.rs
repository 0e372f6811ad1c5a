//! Scripted sensors for module tests

use std::{cell::Cell, rc::Rc};

use eqpt_if::eqpt::{
    drive::NUM_WHEELS,
    sens::{EncoderSensor, RotationSensor},
};

use super::{OdomParams, Odometry};

/// A value which advances by a fixed step every time it is polled.
#[derive(Clone)]
pub struct Ramp {
    pub value: Rc<Cell<f64>>,
    pub step: Rc<Cell<f64>>,
}

pub struct FakeGyro(pub Ramp);

pub struct FakeEncoder(pub Ramp);

pub struct FakeSensors {
    pub gyro: Ramp,
    pub encoders: Vec<Ramp>,
}

impl Ramp {
    pub fn new(step: f64) -> Self {
        Self {
            value: Rc::new(Cell::new(0.0)),
            step: Rc::new(Cell::new(step)),
        }
    }

    fn poll(&self) -> f64 {
        let v = self.value.get();
        self.value.set(v + self.step.get());
        v
    }
}

impl RotationSensor for FakeGyro {
    fn read_angle_deg(&mut self) -> f64 {
        self.0.poll()
    }

    fn zero(&mut self) {
        self.0.value.set(0.0)
    }
}

impl EncoderSensor for FakeEncoder {
    fn read_raw_count(&mut self) -> f64 {
        self.0.poll()
    }

    fn zero(&mut self) {
        self.0.value.set(0.0)
    }
}

/// Build an odometry instance whose gyro and encoders advance by the given step per poll.
pub fn fake_odom(gyro_step: f64, encoder_step: f64) -> (Odometry, FakeSensors) {
    let gyro = Ramp::new(gyro_step);
    let encoders: Vec<Ramp> = (0..NUM_WHEELS).map(|_| Ramp::new(encoder_step)).collect();

    let odom = Odometry::new(
        &OdomParams::default(),
        Box::new(FakeGyro(gyro.clone())),
        [
            Box::new(FakeEncoder(encoders[0].clone())),
            Box::new(FakeEncoder(encoders[1].clone())),
            Box::new(FakeEncoder(encoders[2].clone())),
            Box::new(FakeEncoder(encoders[3].clone())),
        ],
    );

    (odom, FakeSensors { gyro, encoders })
}
