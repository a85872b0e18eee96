use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Unordered index pair, stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    /// Build an edge from two distinct indices in either order.
    ///
    /// Returns `None` for a self-loop.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
            std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Pairs whose 3D distance is below `threshold` (structural edges).
pub fn edges_within(points: &[Vec3], threshold: f32) -> Vec<Edge> {
    edges_by(points, threshold, |p, q| p.distance(q))
}

/// Pairs whose x/y distance is below `threshold`, ignoring depth.
///
/// Used on projected points for the faint ambient lines.
pub fn edges_within_planar(points: &[Vec3], threshold: f32) -> Vec<Edge> {
    edges_by(points, threshold, |p, q| p.truncate().distance(q.truncate()))
}

/// O(n^2) scan over all `i < j`. Output is sorted by `(a, b)`.
fn edges_by<F>(points: &[Vec3], threshold: f32, distance: F) -> Vec<Edge>
where
    F: Fn(Vec3, Vec3) -> f32 + Sync,
{
    let row = |i: usize| -> Vec<Edge> {
        let p = points[i];
        ((i + 1)..points.len())
            .filter(|&j| distance(p, points[j]) < threshold)
            .map(|j| Edge { a: i, b: j })
            .collect()
    };

    #[cfg(feature = "parallel")]
    {
        (0..points.len()).into_par_iter().flat_map_iter(row).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..points.len()).flat_map(row).collect()
    }
}
