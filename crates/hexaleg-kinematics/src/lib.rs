//! `hexaleg-kinematics` – forward kinematics and velocity Jacobian of a
//! 3-DoF serial leg (hip yaw, thigh pitch, knee pitch).
//!
//! Every computation is a pure function of link lengths and joint angles:
//! no shared state, no I/O, O(1) work per call, safe to call from any
//! thread.
//!
//! # Modules
//!
//! - [`vector`], [`rotation`], [`transform`] – world-frame vectors, rotation
//!   matrices and rigid transforms.
//! - [`forward`] – [`compute_chain`]: joint positions `hip → thigh → knee →
//!   toe` and the cumulative rotation after each joint.
//! - [`jacobian`] – [`compute_jacobian`]: the 3×3 linear-velocity Jacobian
//!   with `v_toe = J · θ̇`, plus singularity detection.
//! - [`motor`], [`screw`] – dual-quaternion motors and the home-pose screw
//!   formulation of the same leg ([`ScrewLeg`]).
//! - [`config`] – [`LegConfig`]: TOML leg descriptions.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing] for binaries
//!   that want to see the library's `tracing` events.
//!
//! # Example
//!
//! ```rust
//! use hexaleg_kinematics::{compute_chain, compute_jacobian, JointAngles, JointRates, LinkLengths};
//!
//! let lengths = LinkLengths::new(0.05, 0.20, 0.20);
//! let angles = JointAngles::from_degrees(20.0, -10.0, 30.0);
//!
//! let chain = compute_chain(lengths, angles);
//! let jacobian = compute_jacobian(&chain);
//!
//! // Spinning only the hip moves the toe horizontally.
//! let v = jacobian.apply(JointRates::new(1.0, 0.0, 0.0));
//! assert_eq!(v.z, 0.0);
//! assert!((v.x + chain.toe().y).abs() < 1e-12);
//! ```

pub mod config;
pub mod forward;
pub mod jacobian;
pub mod motor;
pub mod rotation;
pub mod screw;
pub mod telemetry;
pub mod transform;
pub mod vector;

#[cfg(test)]
mod test_support;

pub use config::LegConfig;
pub use forward::{KinematicChain, compute_chain, compute_chain_checked};
pub use jacobian::{
    Jacobian, compute_jacobian, numerical_toe_velocity, prismatic_column, revolute_column,
};
pub use motor::{Motor, Quaternion};
pub use rotation::RotationMatrix;
pub use screw::ScrewLeg;
pub use transform::{RigidTransform, leg_transform};
pub use vector::Vec3;

pub use hexaleg_types::{Joint, JointAngles, JointRates, KinematicsError, LinkLengths};
