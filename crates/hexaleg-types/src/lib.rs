use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one of the three revolute joints of a leg, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    /// Joint 1: yaw about the world Z axis at the hip.
    HipYaw,
    /// Joint 2: pitch about the local Y axis at the thigh joint.
    ThighPitch,
    /// Joint 3: pitch about the local Y axis at the knee joint.
    KneePitch,
}

impl Joint {
    /// All joints from base to toe.
    pub const ALL: [Joint; 3] = [Joint::HipYaw, Joint::ThighPitch, Joint::KneePitch];

    /// Zero-based position of the joint in the chain.
    pub const fn index(self) -> usize {
        match self {
            Joint::HipYaw => 0,
            Joint::ThighPitch => 1,
            Joint::KneePitch => 2,
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Joint::HipYaw => write!(f, "hip_yaw"),
            Joint::ThighPitch => write!(f, "thigh_pitch"),
            Joint::KneePitch => write!(f, "knee_pitch"),
        }
    }
}

/// Fixed link geometry of a 3-DoF leg, in metres.
///
/// Zero-length links are a degenerate but legal input.  Use
/// [`LinkLengths::validated`] to reject negative or non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LinkLengths {
    /// Hip offset: hip joint to thigh joint.
    pub l1: f64,
    /// Thigh: thigh joint to knee joint.
    pub l2: f64,
    /// Shank: knee joint to toe.
    pub l3: f64,
}

impl LinkLengths {
    pub const fn new(l1: f64, l2: f64, l3: f64) -> Self {
        Self { l1, l2, l3 }
    }

    /// All three links of zero length (toe coincides with hip).
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Construct and validate in one step.
    pub fn try_new(l1: f64, l2: f64, l3: f64) -> Result<Self, KinematicsError> {
        Self::new(l1, l2, l3).validated()
    }

    /// Return `self` if every length is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] naming the first
    /// offending link.
    pub fn validated(self) -> Result<Self, KinematicsError> {
        for (name, value) in [("l1", self.l1), ("l2", self.l2), ("l3", self.l3)] {
            if !value.is_finite() {
                return Err(KinematicsError::InvalidParameter {
                    name: name.to_string(),
                    value,
                    reason: "link length must be finite".to_string(),
                });
            }
            if value < 0.0 {
                return Err(KinematicsError::InvalidParameter {
                    name: name.to_string(),
                    value,
                    reason: "link length must not be negative".to_string(),
                });
            }
        }
        Ok(self)
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.l1, self.l2, self.l3]
    }

    /// Maximum reach of the leg from the hip (sum of all links).
    pub fn reach(&self) -> f64 {
        self.l1 + self.l2 + self.l3
    }
}

/// Joint angles in radians, in chain order.
///
/// The range is unconstrained: values are used exactly as given and are
/// never wrapped or clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct JointAngles {
    /// Hip yaw.
    pub theta1: f64,
    /// Thigh pitch.
    pub theta2: f64,
    /// Knee pitch.
    pub theta3: f64,
}

impl JointAngles {
    pub const fn new(theta1: f64, theta2: f64, theta3: f64) -> Self {
        Self {
            theta1,
            theta2,
            theta3,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Build from angles given in degrees.
    pub fn from_degrees(theta1: f64, theta2: f64, theta3: f64) -> Self {
        Self::new(theta1.to_radians(), theta2.to_radians(), theta3.to_radians())
    }

    pub fn to_degrees(&self) -> [f64; 3] {
        [
            self.theta1.to_degrees(),
            self.theta2.to_degrees(),
            self.theta3.to_degrees(),
        ]
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.theta1, self.theta2, self.theta3]
    }

    pub fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    pub fn get(&self, joint: Joint) -> f64 {
        self.as_array()[joint.index()]
    }

    /// Advance the angles by `rates` for `dt` seconds: `θ + θ̇·dt`.
    pub fn advanced(&self, rates: JointRates, dt: f64) -> Self {
        Self::new(
            self.theta1 + rates.omega1 * dt,
            self.theta2 + rates.omega2 * dt,
            self.theta3 + rates.omega3 * dt,
        )
    }
}

/// Joint angular velocities in rad/s, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct JointRates {
    pub omega1: f64,
    pub omega2: f64,
    pub omega3: f64,
}

impl JointRates {
    pub const fn new(omega1: f64, omega2: f64, omega3: f64) -> Self {
        Self {
            omega1,
            omega2,
            omega3,
        }
    }

    /// Unit rate on a single joint, zero on the others.
    pub fn unit(joint: Joint) -> Self {
        let mut a = [0.0; 3];
        a[joint.index()] = 1.0;
        Self::new(a[0], a[1], a[2])
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.omega1, self.omega2, self.omega3]
    }

    pub fn get(&self, joint: Joint) -> f64 {
        self.as_array()[joint.index()]
    }
}

/// Error type for the opt-in validation, configuration, and logging paths.
///
/// The kinematics computations themselves never fail; NaN and infinite
/// inputs propagate into the outputs.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KinematicsError {
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Telemetry Error: {0}")]
    Telemetry(String),
}
