use std::f32::consts::PI;

/// Largest `f32` below 1.
pub const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Fractional part that always lands in [0,1), unlike `f32::fract` on negatives.
///
/// Tiny negative inputs would round `x - floor(x)` up to exactly 1, so the
/// result is clamped to [`BELOW_ONE`].
pub fn fract(x: f32) -> f32 {
    (x - x.floor()).min(BELOW_ONE)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cosine ease: `(1 - cos(t * PI)) / 2`.
///
/// Zero slope at both ends, exactly 0 at `t = 0` and 1 at `t = 1`.
pub fn ease_cosine(t: f32) -> f32 {
    (1.0 - (t * PI).cos()) / 2.0
}

/// Smooth interpolation - port of GLSL smoothstep
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
