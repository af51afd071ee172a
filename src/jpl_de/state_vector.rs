//! State vector type returned by ephemeris queries.
//!
//! Overview
//! -----------------
//! [`StateVector`] is the unified container produced by the body position
//! resolver: a Cartesian position in AU and a velocity in AU/day. Addition
//! and subtraction are component-wise on both parts, which is all the
//! composition the Earth/Moon/EMB decomposition and center/target
//! differencing need.
//!
//! See also
//! -----------------
//! * [`crate::jpl_de::reader::DeReader::position`] – high-level source.
//! * [`crate::jpl_de::interpolation`] – low-level producer of the raw
//!   component values.

use nalgebra::Vector3;
use std::ops::{Add, Div, Neg, Sub};

/// Position and velocity of a body at one epoch.
///
/// Fields
/// -----------------
/// * `position`: Cartesian position (AU).
/// * `velocity`: Cartesian velocity (AU/day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    /// The zero state, used for the solar-system barycenter.
    pub fn zeros() -> Self {
        StateVector {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        }
    }

    /// Build a state from six raw components `[x, y, z, vx, vy, vz]`.
    pub fn from_components(c: &[f64]) -> Self {
        debug_assert!(c.len() >= 6);
        StateVector {
            position: Vector3::new(c[0], c[1], c[2]),
            velocity: Vector3::new(c[3], c[4], c[5]),
        }
    }

    /// Euclidean norm of the position part (AU).
    pub fn distance(&self) -> f64 {
        self.position.norm()
    }
}

impl Add for StateVector {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        StateVector {
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
        }
    }
}

impl Sub for StateVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        StateVector {
            position: self.position - other.position,
            velocity: self.velocity - other.velocity,
        }
    }
}

impl Neg for StateVector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        StateVector {
            position: -self.position,
            velocity: -self.velocity,
        }
    }
}

impl Div<f64> for StateVector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        StateVector {
            position: self.position / rhs,
            velocity: self.velocity / rhs,
        }
    }
}
