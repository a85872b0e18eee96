use glam::Vec3;

use crate::error::{ConfigError, Result};
use crate::geometry::Shape;
use crate::math::{ease_cosine, BELOW_ONE};

/// Where in the cycle a clock value falls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphPhase {
    /// Index of the shape being morphed from.
    pub source: usize,
    /// Index of the shape being morphed toward.
    pub target: usize,
    /// Linear progress through the phase, in [0, 1).
    pub progress: f32,
}

impl MorphPhase {
    /// Progress after the cosine ease; exactly 0 at the start of a phase.
    pub fn eased(&self) -> f32 {
        ease_cosine(self.progress)
    }
}

/// Round-robin morph through a fixed set of shapes.
///
/// The cycle of `cycle_length` clock units is split into one equal phase per
/// shape. Phase `k` morphs shape `k` into shape `k + 1`, the last phase wraps
/// back to the first shape.
#[derive(Clone, Debug)]
pub struct MorphCycle {
    shapes: Vec<Shape>,
    cycle_length: u64,
}

impl MorphCycle {
    pub fn new(shapes: Vec<Shape>, cycle_length: u64) -> Result<Self> {
        if shapes.is_empty() || shapes.iter().any(Shape::is_empty) {
            return Err(ConfigError::EmptyShapeSet);
        }
        if cycle_length == 0 {
            return Err(ConfigError::ZeroCycleLength);
        }
        Ok(Self {
            shapes,
            cycle_length,
        })
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn cycle_length(&self) -> u64 {
        self.cycle_length
    }

    /// Phase and local progress for `clock`.
    ///
    /// Computed on integers so that `clock mod T` landing on `k * T / N`
    /// yields progress exactly 0 for phase `k`.
    pub fn phase_at(&self, clock: u64) -> MorphPhase {
        let n = self.shapes.len() as u128;
        let period = self.cycle_length as u128;
        let scaled = (clock as u128 % period) * n;
        let index = (scaled / period) as usize;
        let remainder = scaled % period;
        MorphPhase {
            source: index,
            target: (index + 1) % self.shapes.len(),
            // Long cycles can round the last step up to 1.0 in f32.
            progress: ((remainder as f64 / period as f64) as f32).min(BELOW_ONE),
        }
    }

    /// The blended point set for `clock`.
    pub fn frame(&self, clock: u64) -> Vec<Vec3> {
        let phase = self.phase_at(clock);
        blend(
            &self.shapes[phase.source],
            &self.shapes[phase.target],
            phase.eased(),
        )
    }
}

/// Lerp `source` toward `target` by `t`.
///
/// The result has as many points as the larger shape; each side is indexed
/// modulo its own length, so differing vertex counts never go out of bounds.
/// An empty side contributes nothing: the other shape is returned as is.
pub fn blend(source: &Shape, target: &Shape, t: f32) -> Vec<Vec3> {
    if source.is_empty() {
        return target.points().to_vec();
    }
    if target.is_empty() {
        return source.points().to_vec();
    }
    let count = source.len().max(target.len());
    (0..count)
        .map(|i| {
            let s = source.wrapped(i);
            s + (target.wrapped(i) - s) * t
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Solid;

    fn three_solids() -> MorphCycle {
        let shapes = [Solid::Icosahedron, Solid::Octahedron, Solid::Cube]
            .into_iter()
            .map(|s| Shape::solid(s, 80.0))
            .collect();
        MorphCycle::new(shapes, 6000).unwrap()
    }

    #[test]
    fn test_phase_boundaries_are_exact() {
        let cycle = three_solids();
        for (clock, source) in [(0, 0), (2000, 1), (4000, 2), (6000, 0), (8000, 1)] {
            let phase = cycle.phase_at(clock);
            assert_eq!(phase.source, source, "clock {clock}");
            assert_eq!(phase.progress, 0.0, "clock {clock} should start a phase");
        }
    }

    #[test]
    fn test_last_phase_wraps_to_first_shape() {
        let phase = three_solids().phase_at(5000);
        assert_eq!(phase.source, 2);
        assert_eq!(phase.target, 0);
        assert!((phase.progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_shape_set_rejected() {
        assert_eq!(
            MorphCycle::new(Vec::new(), 6000).unwrap_err(),
            ConfigError::EmptyShapeSet
        );
    }

    #[test]
    fn test_zero_cycle_rejected() {
        let shapes = vec![Shape::solid(Solid::Cube, 1.0)];
        assert_eq!(
            MorphCycle::new(shapes, 0).unwrap_err(),
            ConfigError::ZeroCycleLength
        );
    }
}
