use glam::Vec2;

use crate::math::{fract, lerp, smoothstep};

/// Values that can be blended between two keyframes.
pub trait Mix: Copy {
    fn mix(a: Self, b: Self, t: f32) -> Self;
}

impl Mix for f32 {
    fn mix(a: Self, b: Self, t: f32) -> Self {
        lerp(a, b, t)
    }
}

impl Mix for Vec2 {
    fn mix(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
}

/// A keyframe track over offsets in [0, 1].
///
/// Each segment is eased in-out independently, the way CSS applies a timing
/// function between consecutive keyframes.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes<T> {
    frames: Vec<(f32, T)>,
}

impl<T: Mix> Keyframes<T> {
    /// `frames` must be non-empty and sorted by offset.
    pub fn new(frames: Vec<(f32, T)>) -> Self {
        debug_assert!(!frames.is_empty(), "keyframe track needs at least one frame");
        debug_assert!(
            frames.windows(2).all(|w| w[0].0 <= w[1].0),
            "keyframe offsets must be sorted"
        );
        Self { frames }
    }

    /// Value at `offset`, held constant before the first and after the last frame.
    pub fn sample(&self, offset: f32) -> T {
        let first = self.frames[0];
        if offset <= first.0 {
            return first.1;
        }
        for w in self.frames.windows(2) {
            let (o0, v0) = w[0];
            let (o1, v1) = w[1];
            if offset <= o1 {
                let span = o1 - o0;
                if offset == o1 || span <= 0.0 {
                    return v1;
                }
                return T::mix(v0, v1, smoothstep(0.0, 1.0, (offset - o0) / span));
            }
        }
        self.frames[self.frames.len() - 1].1
    }

    /// Sample a looping track with period `period` at `clock`.
    pub fn sample_looped(&self, clock: u64, period: u64) -> T {
        self.sample(fract((clock % period) as f32 / period as f32))
    }

    /// Like [`Keyframes::sample_looped`], played backwards.
    pub fn sample_looped_reversed(&self, clock: u64, period: u64) -> T {
        self.sample(1.0 - fract((clock % period) as f32 / period as f32))
    }
}
