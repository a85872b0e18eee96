//! Static point sets for the loaders.
//!
//! Polyhedron shapes come from fixed vertex tables normalized onto a sphere of
//! the requested radius. The ellipsoid cloud samples random angles from an
//! injected RNG so callers decide whether the result is reproducible.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Golden ratio, used by the icosahedron table.
const PHI: f32 = 1.618_034;

const ICOSAHEDRON: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const OCTAHEDRON: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const CUBE: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Platonic solids with hand-specified vertex tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solid {
    Icosahedron,
    Octahedron,
    Cube,
}

impl Solid {
    pub fn name(self) -> &'static str {
        match self {
            Solid::Icosahedron => "icosahedron",
            Solid::Octahedron => "octahedron",
            Solid::Cube => "cube",
        }
    }

    /// Raw (unnormalized) vertices.
    pub fn vertices(self) -> &'static [[f32; 3]] {
        match self {
            Solid::Icosahedron => &ICOSAHEDRON,
            Solid::Octahedron => &OCTAHEDRON,
            Solid::Cube => &CUBE,
        }
    }
}

/// A named, ordered point set.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    name: &'static str,
    points: Vec<Vec3>,
}

impl Shape {
    pub fn new(name: &'static str, points: Vec<Vec3>) -> Self {
        Self { name, points }
    }

    /// Vertices of `solid`, each pushed out to exactly `radius` from the origin.
    pub fn solid(solid: Solid, radius: f32) -> Self {
        let points = solid
            .vertices()
            .iter()
            .map(|&v| Vec3::from_array(v).normalize() * radius)
            .collect();
        log::debug!("built {} with radius {radius}", solid.name());
        Self::new(solid.name(), points)
    }

    /// `count` points on the ellipsoid with semi-axes `radius * stretch`.
    ///
    /// Each point draws theta in [0, 2pi) and phi in [0, pi) from `rng`, in
    /// that order, and maps them with the usual spherical parametrisation.
    pub fn ellipsoid_cloud<R: Rng + ?Sized>(
        count: usize,
        radius: f32,
        stretch: Vec3,
        rng: &mut R,
    ) -> Self {
        let axes = stretch * radius;
        let points = (0..count)
            .map(|_| {
                let theta = rng.random_range(0.0..TAU);
                let phi = rng.random_range(0.0..PI);
                Vec3::new(
                    axes.x * phi.sin() * theta.cos(),
                    axes.y * phi.sin() * theta.sin(),
                    axes.z * phi.cos(),
                )
            })
            .collect();
        log::debug!("built ellipsoid cloud of {count} points, axes {axes}");
        Self::new("ellipsoid", points)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point `i`, wrapped by this shape's own length.
    ///
    /// Panics on an empty shape.
    pub fn wrapped(&self, i: usize) -> Vec3 {
        self.points[i % self.points.len()]
    }
}
