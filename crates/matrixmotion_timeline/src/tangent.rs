// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tangent assignment policies for curve keys.
//!
//! Tangents are assigned while a timeline is built and never afterwards.
//! A zero time delta always produces a zero tangent.

use crate::curve::Curve;
use crate::keyframe::Keyframe;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Tangent policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TangentMode {
    /// Straight segments between neighbouring keys
    Linear,
    /// Zero slope on both sides of a key
    Flat,
    /// Centred difference over both neighbours
    Smooth,
}

/// Assigns in/out tangents to curve keys
pub struct TangentSolver;

impl TangentSolver {
    /// Apply `mode` to the keys in `keys` (clamped to the curve)
    pub fn apply(curve: &mut Curve, mode: TangentMode, keys: RangeInclusive<usize>) {
        match mode {
            TangentMode::Linear => Self::linear(curve, keys),
            TangentMode::Flat => {
                let indices: Vec<usize> = keys.collect();
                Self::flat(curve, &indices);
            }
            TangentMode::Smooth => Self::smooth(curve, keys),
        }
    }

    /// Linear tangents over the segments spanned by `keys`.
    ///
    /// Tangents facing outside the range are left alone, except at the curve's own
    /// boundaries where they become 0. Over the whole curve this yields straight
    /// segments everywhere.
    pub fn linear(curve: &mut Curve, keys: RangeInclusive<usize>) {
        let Some((first, last)) = clamp(curve, keys) else {
            return;
        };
        let end = curve.len() - 1;

        for i in first..=last {
            let in_tangent = if i == 0 {
                Some(0.0)
            } else if i > first {
                Some(slope(&curve.keyframes()[i - 1], &curve.keyframes()[i]))
            } else {
                None
            };
            let out_tangent = if i == end {
                Some(0.0)
            } else if i < last {
                Some(slope(&curve.keyframes()[i], &curve.keyframes()[i + 1]))
            } else {
                None
            };

            if let Some(key) = curve.key_mut(i) {
                if let Some(t) = in_tangent {
                    key.in_tangent = t;
                }
                if let Some(t) = out_tangent {
                    key.out_tangent = t;
                }
            }
        }
    }

    /// Force zero tangents at the given key indices
    pub fn flat(curve: &mut Curve, indices: &[usize]) {
        for &i in indices {
            if let Some(key) = curve.key_mut(i) {
                key.flatten();
            }
        }
    }

    /// Centred-difference tangents; keys without both neighbours become flat
    pub fn smooth(curve: &mut Curve, keys: RangeInclusive<usize>) {
        let Some((first, last)) = clamp(curve, keys) else {
            return;
        };
        let end = curve.len() - 1;

        for i in first..=last {
            let tangent = if i == 0 || i == end {
                0.0
            } else {
                slope(&curve.keyframes()[i - 1], &curve.keyframes()[i + 1])
            };
            if let Some(key) = curve.key_mut(i) {
                key.in_tangent = tangent;
                key.out_tangent = tangent;
            }
        }
    }
}

/// Slope between two keys; zero or negative time deltas give 0
fn slope(a: &Keyframe, b: &Keyframe) -> f32 {
    let dt = b.time - a.time;
    if dt > 0.0 {
        (b.value - a.value) / dt
    } else {
        0.0
    }
}

fn clamp(curve: &Curve, keys: RangeInclusive<usize>) -> Option<(usize, usize)> {
    if curve.is_empty() {
        return None;
    }
    let last = (*keys.end()).min(curve.len() - 1);
    let first = *keys.start();
    (first <= last).then_some((first, last))
}
