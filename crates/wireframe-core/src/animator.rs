//! Per-tick pipelines for the point-set loaders.
//!
//! Each tick runs shape -> (morph) -> rotate/project -> connect -> draw. The
//! static shapes are built once in the constructor; everything downstream is
//! recomputed from the clock and dropped after drawing.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::config::{BrainConfig, LoaderConfig};
use crate::connectivity::{edges_within, edges_within_planar, Edge};
use crate::error::Result;
use crate::geometry::Shape;
use crate::math::{ease_cosine, lerp};
use crate::morph::MorphCycle;
use crate::render::{DepthStyle, LinePrimitive, PointPrimitive, RenderSurface};
use crate::transform::{Rotation, Transform};

/// Driver state handed to a loader on every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    pub clock: u64,
    /// True until the driver's one-shot entry timer fires.
    pub entering: bool,
}

impl Tick {
    pub fn at(clock: u64) -> Self {
        Self {
            clock,
            entering: false,
        }
    }
}

/// A loader that can draw itself for a given tick.
pub trait Animator {
    fn draw(&self, tick: Tick, surface: &mut dyn RenderSurface);
}

/// Geometry for one tick, before styling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Projected x/y with rotated depth in z.
    pub projected: Vec<Vec3>,
    /// Indices into `projected`, chosen from the untransformed shape.
    pub structural: Vec<Edge>,
    /// Short lines between nearby projected points.
    pub ambient: Vec<Edge>,
}

impl Frame {
    /// Emit ambient lines, then structural edges, then vertices.
    pub fn render(&self, style: &DepthStyle, ambient_threshold: f32, surface: &mut dyn RenderSurface) {
        let p = &self.projected;

        for e in &self.ambient {
            let (from, to) = (p[e.a].truncate(), p[e.b].truncate());
            surface.line(&LinePrimitive {
                from,
                to,
                color: style.ambient_color,
                opacity: style.ambient_opacity(from.distance(to), ambient_threshold),
                width: style.ambient_width,
            });
        }

        for e in &self.structural {
            let depth = (p[e.a].z + p[e.b].z) / 2.0;
            surface.line(&LinePrimitive {
                from: p[e.a].truncate(),
                to: p[e.b].truncate(),
                color: style.color(depth),
                opacity: style.opacity(depth),
                width: style.edge_width,
            });
        }

        for v in p {
            surface.point(&PointPrimitive {
                center: Vec2::new(v.x, v.y),
                radius: style.point_radius,
                color: style.color(v.z),
                opacity: style.opacity(v.z),
            });
        }
    }
}

/// Rotating solid that morphs through a cycle of polyhedra.
pub struct PolyhedronLoader {
    config: LoaderConfig,
    cycle: MorphCycle,
    transform: Transform,
}

impl PolyhedronLoader {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        let shapes = config
            .solids
            .iter()
            .map(|&s| Shape::solid(s, config.radius))
            .collect();
        let cycle = MorphCycle::new(shapes, config.cycle_length)?;
        let transform = Transform::new(
            Rotation::Tumble {
                speeds: config.rotation_speeds,
            },
            config.camera_distance,
        );
        Ok(Self {
            config,
            cycle,
            transform,
        })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn cycle(&self) -> &MorphCycle {
        &self.cycle
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn frame(&self, clock: u64) -> Frame {
        let vertices = self.cycle.frame(clock);
        let projected = self.transform.apply_all(&vertices, clock);
        let structural = edges_within(&vertices, self.config.structural_threshold);
        let ambient = edges_within_planar(&projected, self.config.ambient_threshold);
        Frame {
            projected,
            structural,
            ambient,
        }
    }
}

impl Animator for PolyhedronLoader {
    fn draw(&self, tick: Tick, surface: &mut dyn RenderSurface) {
        self.frame(tick.clock)
            .render(&self.config.style, self.config.ambient_threshold, surface);
    }
}

/// Rotating ellipsoid point cloud with a zoom-in entry.
pub struct BrainLoader {
    config: BrainConfig,
    cloud: Shape,
    /// The cloud never changes, so its structural edges are built once.
    structural: Vec<Edge>,
    transform: Transform,
}

impl BrainLoader {
    pub fn new<R: Rng + ?Sized>(config: BrainConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let cloud = Shape::ellipsoid_cloud(config.point_count, config.radius, config.stretch, rng);
        let structural = edges_within(cloud.points(), config.structural_threshold);
        let transform = Transform::new(
            Rotation::YawRoll {
                yaw: config.yaw_speed,
                roll: config.roll_speed,
            },
            config.camera_distance,
        );
        Ok(Self {
            config,
            cloud,
            structural,
            transform,
        })
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    pub fn cloud(&self) -> &Shape {
        &self.cloud
    }

    /// Zoom factor applied to projected x/y.
    ///
    /// Eases from `entry_scale` to 1 over `entry_duration` while the entry
    /// phase is active, 1 otherwise.
    pub fn zoom(&self, tick: Tick) -> f32 {
        let duration = self.config.entry_duration;
        if !tick.entering || duration == 0 {
            return 1.0;
        }
        let t = (tick.clock.min(duration) as f32) / duration as f32;
        lerp(self.config.entry_scale, 1.0, ease_cosine(t))
    }

    pub fn frame(&self, tick: Tick) -> Frame {
        let zoom = self.zoom(tick);
        let projected: Vec<Vec3> = self
            .transform
            .apply_all(self.cloud.points(), tick.clock)
            .into_iter()
            .map(|p| Vec3::new(p.x * zoom, p.y * zoom, p.z))
            .collect();
        let ambient = edges_within_planar(&projected, self.config.ambient_threshold);
        Frame {
            projected,
            structural: self.structural.clone(),
            ambient,
        }
    }
}

impl Animator for BrainLoader {
    fn draw(&self, tick: Tick, surface: &mut dyn RenderSurface) {
        self.frame(tick)
            .render(&self.config.style, self.config.ambient_threshold, surface);
    }
}
