//! # Odometry state

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::eqpt::{
    drive::{WheelId, NUM_WHEELS, WHEEL_IDS},
    sens::{EncoderSensor, RotationSensor},
};
use log::{debug, trace};
use serde::Serialize;

use super::{DistanceEstimator, HeadingSource, OdomParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Estimate of the chassis state built from the sensors on the most recent update.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PoseEstimate {
    /// Heading accumulated since the last heading reset, positive clockwise.
    ///
    /// Units: degrees
    pub heading_deg: f64,

    /// Heading relative to the orientation at program start.
    ///
    /// Units: degrees
    pub field_heading_deg: f64,

    /// Raw encoder counts of each wheel, indexed by [`WheelId::index`].
    pub wheel_raw: [f64; NUM_WHEELS],

    /// Signed distance covered by each wheel since the last distance reset.
    ///
    /// Units: inches
    pub wheel_dist_in: [f64; NUM_WHEELS],
}

/// Odometry owns the rotation sensor and the wheel encoders.
pub struct Odometry {
    heading: HeadingSource,
    encoders: [Box<dyn EncoderSensor>; NUM_WHEELS],
    estimator: DistanceEstimator,
    pose: PoseEstimate,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Odometry {
    /// Create a new odometry instance.
    ///
    /// `encoders` must be given in [`WheelId::index`] order.
    pub fn new(
        params: &OdomParams,
        gyro: Box<dyn RotationSensor>,
        encoders: [Box<dyn EncoderSensor>; NUM_WHEELS],
    ) -> Self {
        Self {
            heading: HeadingSource::new(gyro),
            encoders,
            estimator: DistanceEstimator::new(params),
            pose: PoseEstimate::default(),
        }
    }

    /// Read all sensors and refresh the pose estimate.
    pub fn update(&mut self) -> PoseEstimate {
        self.pose.heading_deg = self.heading.current_angle_deg();
        self.pose.field_heading_deg = self.heading.last_field_heading_deg();

        for (i, enc) in self.encoders.iter_mut().enumerate() {
            let raw = enc.read_raw_count();
            self.pose.wheel_raw[i] = raw;
            self.pose.wheel_dist_in[i] = self.estimator.to_inches(raw);
        }

        trace!("Odometry: {:?}", self.pose);

        self.pose
    }

    /// The pose estimate from the most recent update.
    pub fn pose(&self) -> PoseEstimate {
        self.pose
    }

    /// Read the angle from the heading source since its last reset.
    pub fn heading_deg(&mut self) -> f64 {
        self.pose.heading_deg = self.heading.current_angle_deg();
        self.pose.field_heading_deg = self.heading.last_field_heading_deg();
        self.pose.heading_deg
    }

    /// Read the heading relative to the program start orientation.
    pub fn field_heading_deg(&mut self) -> f64 {
        self.heading_deg();
        self.pose.field_heading_deg
    }

    /// Read the signed distance covered by one wheel since its last reset.
    ///
    /// Units: inches
    pub fn wheel_dist_in(&mut self, wheel: WheelId) -> f64 {
        let i = wheel.index();
        let raw = self.encoders[i].read_raw_count();
        self.pose.wheel_raw[i] = raw;
        self.pose.wheel_dist_in[i] = self.estimator.to_inches(raw);
        self.pose.wheel_dist_in[i]
    }

    pub fn estimator(&self) -> &DistanceEstimator {
        &self.estimator
    }

    /// Zero the heading source.
    pub fn reset_heading(&mut self) {
        self.heading.reset();
        self.pose.heading_deg = 0.0;
        self.pose.field_heading_deg = self.heading.last_field_heading_deg();
    }

    /// Zero every wheel encoder.
    pub fn reset_distance(&mut self) {
        for &id in WHEEL_IDS.iter() {
            self.encoders[id.index()].zero();
        }
        self.pose.wheel_raw = [0.0; NUM_WHEELS];
        self.pose.wheel_dist_in = [0.0; NUM_WHEELS];

        debug!("Wheel distances reset");
    }

    /// Zero the heading source and every wheel encoder.
    pub fn reset_all(&mut self) {
        self.reset_heading();
        self.reset_distance();
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::odom::fakes::fake_odom;
    use std::f64::consts::PI;

    #[test]
    fn test_update() {
        let (mut odom, sens) = fake_odom(0.0, 0.0);

        sens.gyro.value.set(12.0);
        sens.encoders[WheelId::FrontLeft.index()].value.set(16.0);
        sens.encoders[WheelId::RearRight.index()].value.set(-32.0);

        let pose = odom.update();
        assert_eq!(pose.heading_deg, 12.0);
        assert_eq!(pose.field_heading_deg, 12.0);
        assert_eq!(pose.wheel_raw, [16.0, 0.0, 0.0, -32.0]);
        assert!((pose.wheel_dist_in[0] - PI * 6.0).abs() < 1e-12);
        assert!((pose.wheel_dist_in[3] + PI * 12.0).abs() < 1e-12);
        assert_eq!(odom.pose().wheel_raw, pose.wheel_raw);
    }

    #[test]
    fn test_reset_then_read_is_zero() {
        let (mut odom, sens) = fake_odom(0.0, 0.0);

        sens.gyro.value.set(45.0);
        for enc in sens.encoders.iter() {
            enc.value.set(100.0);
        }
        odom.update();

        odom.reset_heading();
        assert_eq!(odom.heading_deg(), 0.0);
        assert_eq!(odom.field_heading_deg(), 45.0);

        odom.reset_distance();
        for &id in WHEEL_IDS.iter() {
            assert_eq!(odom.wheel_dist_in(id), 0.0);
        }

        let pose = odom.update();
        assert_eq!(pose.wheel_raw, [0.0; NUM_WHEELS]);
        assert_eq!(pose.heading_deg, 0.0);
    }
}
