//! Boundary to the vector-drawing surface.
//!
//! Loaders emit plain line and point primitives; whatever sits behind
//! [`RenderSurface`] (SVG, canvas, a GPU buffer) decides how to draw them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::check_threshold;
use crate::error::Result;

/// 8-bit sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#4ADE80`
    pub const GREEN: Rgb = Rgb(0x4A, 0xDE, 0x80);
    /// `#8B5CF6`
    pub const PURPLE: Rgb = Rgb(0x8B, 0x5C, 0xF6);

    /// Per-channel blend, `t = 0` gives `self`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(ch(self.0, other.0), ch(self.1, other.1), ch(self.2, other.2))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    pub fn to_f32(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

/// Depth-keyed colours, opacity and stroke sizes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthStyle {
    /// Colour for geometry in front of the origin plane (`z > 0`).
    pub front: Rgb,
    /// Colour for everything else.
    pub back: Rgb,
    /// Depth mapping to full opacity; `-range` maps to 0, `+range` to 1.
    pub depth_range: f32,
    pub edge_width: f32,
    pub point_radius: f32,
    pub ambient_color: Rgb,
    pub ambient_width: f32,
    /// Peak opacity of an ambient line of zero length.
    pub ambient_opacity: f32,
}

impl Default for DepthStyle {
    fn default() -> Self {
        Self {
            front: Rgb::GREEN,
            back: Rgb::PURPLE,
            depth_range: 100.0,
            edge_width: 2.0,
            point_radius: 2.0,
            ambient_color: Rgb::GREEN,
            ambient_width: 0.5,
            ambient_opacity: 0.3,
        }
    }
}

impl DepthStyle {
    pub fn validate(&self) -> Result<()> {
        check_threshold("depth range", self.depth_range)?;
        check_threshold("edge width", self.edge_width)?;
        check_threshold("point radius", self.point_radius)?;
        check_threshold("ambient width", self.ambient_width)?;
        check_threshold("ambient opacity", self.ambient_opacity)
    }

    pub fn color(&self, depth: f32) -> Rgb {
        if depth > 0.0 {
            self.front
        } else {
            self.back
        }
    }

    /// `(depth + range) / (2 * range)`, saturated to [0, 1].
    pub fn opacity(&self, depth: f32) -> f32 {
        if self.depth_range <= 0.0 {
            return 1.0;
        }
        ((depth + self.depth_range) / (2.0 * self.depth_range)).clamp(0.0, 1.0)
    }

    /// Ambient lines fade linearly to nothing at `threshold`.
    pub fn ambient_opacity(&self, length: f32, threshold: f32) -> f32 {
        if threshold <= 0.0 {
            return 0.0;
        }
        ((1.0 - length / threshold) * self.ambient_opacity).max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePrimitive {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Rgb,
    pub opacity: f32,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointPrimitive {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub opacity: f32,
}

/// Anything that can draw the loader's primitives.
pub trait RenderSurface {
    fn line(&mut self, line: &LinePrimitive);
    fn point(&mut self, point: &PointPrimitive);
}

/// Collects one frame of primitives in draw order.
#[derive(Default, Debug, Clone)]
pub struct FrameBuffer {
    pub lines: Vec<LinePrimitive>,
    pub points: Vec<PointPrimitive>,
}

impl FrameBuffer {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.points.clear();
    }

    pub fn gpu_lines(&self) -> Vec<GpuLine> {
        self.lines.iter().map(GpuLine::from).collect()
    }

    pub fn gpu_points(&self) -> Vec<GpuPoint> {
        self.points.iter().map(GpuPoint::from).collect()
    }
}

impl RenderSurface for FrameBuffer {
    fn line(&mut self, line: &LinePrimitive) {
        self.lines.push(*line);
    }

    fn point(&mut self, point: &PointPrimitive) {
        self.points.push(*point);
    }
}

/// GPU/JS-compatible line record: 36 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLine {
    pub from: [f32; 2],  //  8 bytes
    pub to: [f32; 2],    //  8 bytes
    pub color: [f32; 3], // 12 bytes
    pub opacity: f32,    //  4 bytes
    pub width: f32,      //  4 bytes
}

/// GPU/JS-compatible point record: 28 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPoint {
    pub center: [f32; 2], //  8 bytes
    pub color: [f32; 3],  // 12 bytes
    pub opacity: f32,     //  4 bytes
    pub radius: f32,      //  4 bytes
}

impl From<&LinePrimitive> for GpuLine {
    fn from(line: &LinePrimitive) -> Self {
        Self {
            from: line.from.to_array(),
            to: line.to.to_array(),
            color: line.color.to_f32(),
            opacity: line.opacity,
            width: line.width,
        }
    }
}

impl From<&PointPrimitive> for GpuPoint {
    fn from(point: &PointPrimitive) -> Self {
        Self {
            center: point.center.to_array(),
            color: point.color.to_f32(),
            opacity: point.opacity,
            radius: point.radius,
        }
    }
}
