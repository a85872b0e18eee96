//! Per-tick rotation and perspective projection.
//!
//! Angles are linear in the clock, so a transform is a pure function of
//! `(point, clock)` and repeated calls return bit-identical results.

use std::f64::consts::TAU;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// How the point set tumbles over time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    /// Full composition `Rx * Ry * Rz`, angle per axis = `speed * clock`.
    Tumble { speeds: Vec3 },
    /// Rotate about Y, then about Z.
    YawRoll { yaw: f32, roll: f32 },
}

impl Rotation {
    /// Rotation matrix at `clock`. Exactly the identity at clock 0.
    pub fn matrix(&self, clock: u64) -> Mat3 {
        match *self {
            Rotation::Tumble { speeds } => {
                Mat3::from_rotation_x(angle_at(speeds.x, clock))
                    * Mat3::from_rotation_y(angle_at(speeds.y, clock))
                    * Mat3::from_rotation_z(angle_at(speeds.z, clock))
            }
            Rotation::YawRoll { yaw, roll } => {
                Mat3::from_rotation_z(angle_at(roll, clock))
                    * Mat3::from_rotation_y(angle_at(yaw, clock))
            }
        }
    }
}

/// `speed * clock` reduced into [0, 2π).
///
/// The product is formed in f64: an f32 clock stops resolving single ticks
/// after a few hours of uptime.
pub fn angle_at(speed: f32, clock: u64) -> f32 {
    (f64::from(speed) * clock as f64).rem_euclid(TAU) as f32
}

/// Simple pinhole projection looking down +z from `-camera_distance`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub camera_distance: f32,
}

impl Projection {
    /// Perspective factor `D / (D + z)`.
    ///
    /// Not clamped: a point on the camera plane (`z == -D`) divides by zero.
    pub fn scale(&self, z: f32) -> f32 {
        self.camera_distance / (self.camera_distance + z)
    }

    /// Projected x/y with the *unprojected* depth kept in z.
    pub fn project(&self, rotated: Vec3) -> Vec3 {
        let scale = self.scale(rotated.z);
        Vec3::new(rotated.x * scale, rotated.y * scale, rotated.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub rotation: Rotation,
    pub projection: Projection,
}

impl Transform {
    pub fn new(rotation: Rotation, camera_distance: f32) -> Self {
        Self {
            rotation,
            projection: Projection { camera_distance },
        }
    }

    pub fn apply(&self, point: Vec3, clock: u64) -> Vec3 {
        self.projection.project(self.rotation.matrix(clock) * point)
    }

    /// Transform a whole point set, building the matrix once.
    pub fn apply_all(&self, points: &[Vec3], clock: u64) -> Vec<Vec3> {
        let m = self.rotation.matrix(clock);
        let projected: Vec<Vec3> = points.iter().map(|&p| self.projection.project(m * p)).collect();
        if projected.iter().any(|p| !p.is_finite()) {
            log::warn!("point reached the camera plane at clock {clock}");
        }
        projected
    }
}
