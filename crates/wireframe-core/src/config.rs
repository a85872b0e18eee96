use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::geometry::Solid;
use crate::render::DepthStyle;
use crate::tree::MAX_TREE_DEPTH;

/// Morphing polyhedron loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Distance of every vertex from the origin.
    pub radius: f32,
    /// Morph order; each solid morphs into the next, the last into the first.
    pub solids: Vec<Solid>,
    /// Length of one full morph cycle in clock units.
    pub cycle_length: u64,
    /// Angular velocity about X, Y, Z in radians per clock unit.
    pub rotation_speeds: Vec3,
    pub camera_distance: f32,
    /// Edges are drawn between morph vertices closer than this (3D, pre-rotation).
    pub structural_threshold: f32,
    /// Faint lines join projected points closer than this (2D).
    pub ambient_threshold: f32,
    pub style: DepthStyle,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            radius: 80.0,
            solids: vec![Solid::Icosahedron, Solid::Octahedron, Solid::Cube],
            cycle_length: 6000,
            rotation_speeds: Vec3::new(0.0007, 0.0005, 0.0003),
            camera_distance: 200.0,
            structural_threshold: 160.0,
            ambient_threshold: 100.0,
            style: DepthStyle::default(),
        }
    }
}

impl LoaderConfig {
    pub fn validate(&self) -> Result<()> {
        check_radius(self.radius)?;
        if self.solids.is_empty() {
            return Err(ConfigError::EmptyShapeSet);
        }
        if self.cycle_length == 0 {
            return Err(ConfigError::ZeroCycleLength);
        }
        check_camera(self.camera_distance)?;
        check_threshold("structural", self.structural_threshold)?;
        check_threshold("ambient", self.ambient_threshold)?;
        self.style.validate()
    }
}

/// Ellipsoid point-cloud ("brain") loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    pub point_count: usize,
    pub radius: f32,
    /// Per-axis stretch applied on top of `radius`.
    pub stretch: Vec3,
    /// Rotation about Y in radians per clock unit.
    pub yaw_speed: f32,
    /// Rotation about Z in radians per clock unit, applied after yaw.
    pub roll_speed: f32,
    pub camera_distance: f32,
    pub structural_threshold: f32,
    pub ambient_threshold: f32,
    /// Zoom factor at clock 0 while the entry phase is active.
    pub entry_scale: f32,
    /// Entry phase length in clock units; 0 disables the zoom-in.
    pub entry_duration: u64,
    pub style: DepthStyle,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            point_count: 100,
            radius: 80.0,
            stretch: Vec3::new(1.2, 0.9, 1.0),
            yaw_speed: 0.0005,
            roll_speed: 0.0002,
            camera_distance: 200.0,
            structural_threshold: 40.0,
            ambient_threshold: 30.0,
            entry_scale: 0.2,
            entry_duration: 2000,
            style: DepthStyle::default(),
        }
    }
}

impl BrainConfig {
    pub fn validate(&self) -> Result<()> {
        check_radius(self.radius)?;
        if self.point_count == 0 {
            return Err(ConfigError::ZeroPointCount);
        }
        let s = self.stretch;
        if !(s.is_finite() && s.min_element() > 0.0) {
            return Err(ConfigError::InvalidStretch(s.to_array()));
        }
        check_camera(self.camera_distance)?;
        check_threshold("structural", self.structural_threshold)?;
        check_threshold("ambient", self.ambient_threshold)?;
        check_threshold("entry scale", self.entry_scale)?;
        self.style.validate()
    }
}

/// Neural-tree loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Number of trees planted around the ring.
    pub roots: u32,
    /// Depth of each tree; the root branch has this depth, leaves have depth 1.
    pub depth: u32,
    /// A branch of depth `d` is `base_length / (d * 0.5)` long.
    pub base_length: f32,
    /// Angle in radians between a parent and each of its two children.
    pub spread: f32,
    pub ring_radius: f32,
    pub center: Vec2,
    pub core_radius: f32,
    /// Period of the container rotate/scale sequence.
    pub sequence_period: u64,
    /// Period of the branch stroke-opacity pulse.
    pub path_pulse_period: u64,
    /// Period of the node opacity/scale pulse.
    pub node_pulse_period: u64,
    /// Period of the per-branch sway about the centre.
    pub sway_period: u64,
    /// Sway start delay added per depth level above the leaves.
    pub sway_delay_step: u64,
    /// Period over which every stroke is redrawn from its start.
    pub grow_period: u64,
    /// Length drawn by the end of a grow period; strokes are never longer.
    pub grow_length: f32,
    pub style: DepthStyle,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            roots: 8,
            depth: 4,
            base_length: 30.0,
            spread: 0.5,
            ring_radius: 50.0,
            center: Vec2::new(200.0, 150.0),
            core_radius: 20.0,
            sequence_period: 15_000,
            path_pulse_period: 3_000,
            node_pulse_period: 2_000,
            sway_period: 10_000,
            sway_delay_step: 200,
            grow_period: 5_000,
            grow_length: 1000.0,
            style: DepthStyle::default(),
        }
    }
}

impl TreeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.roots == 0 {
            return Err(ConfigError::NoTreeRoots);
        }
        if self.depth == 0 || self.depth > MAX_TREE_DEPTH {
            return Err(ConfigError::InvalidTreeDepth {
                depth: self.depth,
                max: MAX_TREE_DEPTH,
            });
        }
        check_threshold("base length", self.base_length)?;
        check_threshold("ring radius", self.ring_radius)?;
        check_threshold("core radius", self.core_radius)?;
        check_threshold("grow length", self.grow_length)?;
        let periods = [
            self.sequence_period,
            self.path_pulse_period,
            self.node_pulse_period,
            self.sway_period,
            self.grow_period,
        ];
        if periods.contains(&0) {
            return Err(ConfigError::ZeroCycleLength);
        }
        self.style.validate()
    }
}

/// Timer cadence for [`crate::driver::Driver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Clock units added per tick.
    pub tick_step: u64,
    /// Milliseconds between ticks (16 ~ 60Hz).
    pub tick_interval_ms: u32,
    /// One-shot entry phase length in milliseconds; `None` skips it.
    pub entry_duration_ms: Option<u32>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_step: 16,
            tick_interval_ms: 16,
            entry_duration_ms: None,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_step == 0 || self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }
}

fn check_radius(radius: f32) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius(radius))
    }
}

fn check_camera(distance: f32) -> Result<()> {
    if distance.is_finite() && distance > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCameraDistance(distance))
    }
}

pub(crate) fn check_threshold(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}
