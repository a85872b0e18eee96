//! Neural-tree loader.
//!
//! A ring of binary trees: every branch ends in a node and, above depth 1,
//! forks into two children turned `spread` radians either way. The tree is
//! grown with an explicit stack so the depth bound is a plain parameter.

use glam::{Affine2, Mat2, Vec2};

use crate::animator::{Animator, Tick};
use crate::config::TreeConfig;
use crate::error::{ConfigError, Result};
use crate::keyframes::Keyframes;
use crate::math::fract;
use crate::render::{LinePrimitive, PointPrimitive, RenderSurface};

/// Hard upper bound on tree depth (8 roots at depth 10 is ~8k branches).
pub const MAX_TREE_DEPTH: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub start: Vec2,
    pub end: Vec2,
    /// Heading in radians.
    pub angle: f32,
    /// Remaining depth; the root of a tree has the configured depth, leaves 1.
    pub depth: u32,
    /// Index of the parent branch in [`NeuralTree::branches`].
    pub parent: Option<usize>,
    /// Which tree of the ring this branch belongs to.
    pub root: u32,
}

impl Branch {
    pub fn stroke_width(&self) -> f32 {
        0.5 + 1.0 / self.depth as f32
    }

    pub fn node_radius(&self) -> f32 {
        1.0 + 1.0 / self.depth as f32
    }
}

/// Branch length for a given depth: `base / (depth * 0.5)`.
pub fn branch_length(base: f32, depth: u32) -> f32 {
    base / (depth as f32 * 0.5)
}

struct Pending {
    start: Vec2,
    angle: f32,
    depth: u32,
    parent: Option<usize>,
    root: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NeuralTree {
    branches: Vec<Branch>,
    max_depth: u32,
}

impl NeuralTree {
    /// Grow all trees depth-first.
    ///
    /// Branches are stored in pre-order: a parent always precedes its
    /// children, and the `-spread` child precedes the `+spread` one.
    pub fn grow(config: &TreeConfig) -> Result<Self> {
        if config.roots == 0 {
            return Err(ConfigError::NoTreeRoots);
        }
        if config.depth == 0 || config.depth > MAX_TREE_DEPTH {
            return Err(ConfigError::InvalidTreeDepth {
                depth: config.depth,
                max: MAX_TREE_DEPTH,
            });
        }

        let capacity = config.roots as usize * ((1usize << config.depth) - 1);
        let mut branches = Vec::with_capacity(capacity);
        let mut stack: Vec<Pending> = (0..config.roots)
            .rev()
            .map(|i| {
                let angle = i as f32 * std::f32::consts::TAU / config.roots as f32;
                Pending {
                    start: config.center + Vec2::from_angle(angle) * config.ring_radius,
                    angle,
                    depth: config.depth,
                    parent: None,
                    root: i,
                }
            })
            .collect();

        while let Some(p) = stack.pop() {
            let end = p.start + Vec2::from_angle(p.angle) * branch_length(config.base_length, p.depth);
            let index = branches.len();
            branches.push(Branch {
                start: p.start,
                end,
                angle: p.angle,
                depth: p.depth,
                parent: p.parent,
                root: p.root,
            });
            if p.depth > 1 {
                for angle in [p.angle + config.spread, p.angle - config.spread] {
                    stack.push(Pending {
                        start: end,
                        angle,
                        depth: p.depth - 1,
                        parent: Some(index),
                        root: p.root,
                    });
                }
            }
        }

        log::debug!("grew {} neural branches", branches.len());
        Ok(Self {
            branches,
            max_depth: config.depth,
        })
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// Animated container and pulse values at a clock value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreePose {
    /// Container rotation in radians.
    pub rotation: f32,
    pub scale: f32,
    pub path_opacity: f32,
    pub node_opacity: f32,
    pub node_scale: f32,
    /// How much of each stroke is drawn, measured from its start.
    pub stroke_reach: f32,
}

struct Tracks {
    /// x = rotation in degrees, y = scale.
    sequence: Keyframes<Vec2>,
    path_opacity: Keyframes<f32>,
    /// x = opacity, y = scale.
    node: Keyframes<Vec2>,
    /// x = rotation in degrees, y = shift along the rotated x axis.
    sway: Keyframes<Vec2>,
}

impl Tracks {
    fn new() -> Self {
        Self {
            sequence: Keyframes::new(vec![
                (0.0, Vec2::new(0.0, 1.0)),
                (0.2, Vec2::new(180.0, 0.2)),
                (0.3, Vec2::new(360.0, 0.1)),
                (0.5, Vec2::new(540.0, 0.2)),
                (0.7, Vec2::new(720.0, 1.2)),
                (0.8, Vec2::new(900.0, 1.0)),
                (1.0, Vec2::new(0.0, 1.0)),
            ]),
            path_opacity: Keyframes::new(vec![(0.0, 0.3), (0.5, 0.8), (1.0, 0.3)]),
            node: Keyframes::new(vec![
                (0.0, Vec2::new(0.5, 1.0)),
                (0.5, Vec2::new(1.0, 1.5)),
                (1.0, Vec2::new(0.5, 1.0)),
            ]),
            sway: Keyframes::new(vec![
                (0.0, Vec2::ZERO),
                (0.25, Vec2::new(90.0, 10.0)),
                (0.5, Vec2::new(180.0, -10.0)),
                (0.75, Vec2::new(270.0, 10.0)),
                (1.0, Vec2::ZERO),
            ]),
        }
    }
}

/// Ring of pulsing neural trees around a central core.
pub struct TreeLoader {
    config: TreeConfig,
    tree: NeuralTree,
    tracks: Tracks,
}

impl TreeLoader {
    pub fn new(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        let tree = NeuralTree::grow(&config)?;
        Ok(Self {
            config,
            tree,
            tracks: Tracks::new(),
        })
    }

    pub fn tree(&self) -> &NeuralTree {
        &self.tree
    }

    pub fn pose(&self, clock: u64) -> TreePose {
        let seq = self.tracks.sequence.sample_looped(clock, self.config.sequence_period);
        let node = self.tracks.node.sample_looped(clock, self.config.node_pulse_period);
        TreePose {
            rotation: seq.x.to_radians(),
            scale: seq.y,
            path_opacity: self
                .tracks
                .path_opacity
                .sample_looped(clock, self.config.path_pulse_period),
            node_opacity: node.x,
            node_scale: node.y,
            stroke_reach: self.config.grow_length
                * fract((clock % self.config.grow_period) as f32 / self.config.grow_period as f32),
        }
    }

    /// Sway of every branch at `depth`, as a map about the centre.
    ///
    /// Each level above the leaves starts `sway_delay_step` later and holds
    /// still until then.
    pub fn branch_sway(&self, clock: u64, depth: u32) -> Affine2 {
        let delay = self.config.sway_delay_step * u64::from(depth.saturating_sub(1));
        let Some(local) = clock.checked_sub(delay) else {
            return Affine2::IDENTITY;
        };
        self.sway_about_center(self.tracks.sway.sample_looped(local, self.config.sway_period))
    }

    /// Sway of a whole tree; every other tree plays the track backwards.
    pub fn root_sway(&self, clock: u64, root: u32) -> Affine2 {
        let period = self.config.sway_period;
        let sway = if root % 2 == 1 {
            self.tracks.sway.sample_looped_reversed(clock, period)
        } else {
            self.tracks.sway.sample_looped(clock, period)
        };
        self.sway_about_center(sway)
    }

    /// Map from tree coordinates to the surface for `branch`.
    ///
    /// Branches nest: a branch moves with the container, its tree and every
    /// ancestor level as well as its own.
    pub fn placement(&self, clock: u64, branch: &Branch) -> Affine2 {
        let mut place = self.container(&self.pose(clock)) * self.root_sway(clock, branch.root);
        for depth in (branch.depth..=self.tree.max_depth()).rev() {
            place = place * self.branch_sway(clock, depth);
        }
        place
    }

    fn container(&self, pose: &TreePose) -> Affine2 {
        self.about_center(Affine2::from_mat2(Mat2::from_angle(pose.rotation) * pose.scale))
    }

    fn sway_about_center(&self, sway: Vec2) -> Affine2 {
        self.about_center(
            Affine2::from_angle(sway.x.to_radians()) * Affine2::from_translation(Vec2::new(sway.y, 0.0)),
        )
    }

    fn about_center(&self, local: Affine2) -> Affine2 {
        let center = self.config.center;
        Affine2::from_translation(center) * local * Affine2::from_translation(-center)
    }

    /// Placement per depth for forward (`[0]`) and reversed (`[1]`) trees.
    fn placements(&self, clock: u64, pose: &TreePose) -> [Vec<Affine2>; 2] {
        let container = self.container(pose);
        let max_depth = self.tree.max_depth();
        [0u32, 1].map(|parity| {
            let mut chain = vec![Affine2::IDENTITY; max_depth as usize + 1];
            let mut place = container * self.root_sway(clock, parity);
            for depth in (1..=max_depth).rev() {
                place = place * self.branch_sway(clock, depth);
                chain[depth as usize] = place;
            }
            chain
        })
    }
}

impl Animator for TreeLoader {
    fn draw(&self, tick: Tick, surface: &mut dyn RenderSurface) {
        let pose = self.pose(tick.clock);
        let center = self.config.center;
        let placements = self.placements(tick.clock, &pose);
        let style = &self.config.style;
        let max_depth = self.tree.max_depth() as f32;

        for b in self.tree.branches() {
            let place = placements[(b.root % 2) as usize][b.depth as usize];
            // Roots are drawn in the front colour, leaves shade toward the back one.
            let color = style.front.mix(style.back, 1.0 - b.depth as f32 / max_depth);
            let full = b.end - b.start;
            let length = full.length();
            let tip = if length > pose.stroke_reach {
                b.start + full * (pose.stroke_reach / length)
            } else {
                b.end
            };
            let end = place.transform_point2(b.end);
            surface.line(&LinePrimitive {
                from: place.transform_point2(b.start),
                to: place.transform_point2(tip),
                color,
                opacity: pose.path_opacity,
                width: b.stroke_width() * pose.scale,
            });
            surface.point(&PointPrimitive {
                center: end,
                radius: b.node_radius() * pose.node_scale * pose.scale,
                color,
                opacity: pose.node_opacity,
            });
        }

        // The core pulses at half the node rate and ignores the container.
        let core = self
            .tracks
            .node
            .sample_looped(tick.clock, self.config.node_pulse_period * 2);
        surface.point(&PointPrimitive {
            center,
            radius: self.config.core_radius * core.y,
            color: style.front.mix(style.back, 0.5),
            opacity: core.x,
        });
    }
}
