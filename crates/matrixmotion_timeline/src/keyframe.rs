// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions and interpolation helpers.

use serde::{Deserialize, Serialize};

/// A sample point of a curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in seconds
    pub time: f32,
    /// Value at this keyframe
    pub value: f32,
    /// Slope arriving at this keyframe (value units per second)
    pub in_tangent: f32,
    /// Slope leaving this keyframe (value units per second)
    pub out_tangent: f32,
}

impl Keyframe {
    /// Create a new keyframe with flat tangents
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    /// Set both tangents
    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }

    /// Force both tangents to zero
    pub fn flatten(&mut self) {
        self.in_tangent = 0.0;
        self.out_tangent = 0.0;
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Cubic Hermite basis evaluated at normalized `t`.
    ///
    /// `m0` and `m1` are tangents already scaled to the unit interval.
    pub fn hermite(p0: f32, m0: f32, p1: f32, m1: f32, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * p0 + h10 * m0 + h01 * p1 + h11 * m1
    }

    /// Hermite segment between two keyframes at absolute `time`.
    ///
    /// Uses `a.out_tangent` and `b.in_tangent`. A zero-length segment yields `b.value`.
    pub fn segment(a: &Keyframe, b: &Keyframe, time: f32) -> f32 {
        let dt = b.time - a.time;
        if dt <= 0.0 {
            return b.value;
        }
        let u = (time - a.time) / dt;
        Self::hermite(a.value, a.out_tangent * dt, b.value, b.in_tangent * dt, u)
    }
}
