// SPDX-License-Identifier: MIT OR Apache-2.0
//! Append-only keyframe curves with Hermite evaluation.

use crate::channel::Channel;
use crate::error::TimelineError;
use crate::keyframe::{Interpolation, Keyframe};
use serde::{Deserialize, Serialize};

/// An ordered keyframe sequence for one channel.
///
/// Key times are strictly increasing. Keys can only be appended; re-stating a value at
/// the current last time keeps the existing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Channel this curve drives
    pub channel: Channel,
    keyframes: Vec<Keyframe>,
}

impl Curve {
    /// Create an empty curve
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            keyframes: Vec::new(),
        }
    }

    /// Create a curve holding a single flat key
    pub fn with_key(channel: Channel, time: f32, value: f32) -> Self {
        Self {
            channel,
            keyframes: vec![Keyframe::new(time, value)],
        }
    }

    /// Check that a key at `time` could be appended without touching the curve
    pub fn check_append(&self, time: f32) -> Result<(), TimelineError> {
        if !time.is_finite() {
            return Err(TimelineError::NonFinite {
                channel: self.channel,
                what: "time",
            });
        }
        match self.last_time() {
            Some(last) if time < last => Err(TimelineError::KeyOutOfOrder {
                channel: self.channel,
                time,
                last,
            }),
            _ => Ok(()),
        }
    }

    /// Append a key and return the index of the key now living at `time`.
    ///
    /// A key at exactly the last key's time leaves the existing key in place.
    pub fn add_key(&mut self, time: f32, value: f32) -> Result<usize, TimelineError> {
        self.check_append(time)?;
        if !value.is_finite() {
            return Err(TimelineError::NonFinite {
                channel: self.channel,
                what: "value",
            });
        }

        if self.last_time() == Some(time) {
            tracing::trace!(channel = %self.channel, time, "key already present, keeping it");
            return Ok(self.keyframes.len() - 1);
        }

        self.keyframes.push(Keyframe::new(time, value));
        Ok(self.keyframes.len() - 1)
    }

    /// Evaluate the curve at `time`.
    ///
    /// Clamps to the first/last value outside the key range; NaN reads the first value.
    /// Returns `None` only for an empty curve.
    pub fn evaluate(&self, time: f32) -> Option<f32> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;

        if time.is_nan() || time <= first.time {
            return Some(first.value);
        }
        if time >= last.time {
            return Some(last.value);
        }

        // First key strictly after `time`; guaranteed to be in 1..len here
        let next = self.keyframes.partition_point(|k| k.time <= time);
        let a = &self.keyframes[next - 1];
        let b = &self.keyframes[next];
        Some(Interpolation::segment(a, b, time))
    }

    /// Evaluate, falling back to the channel's rest value when empty
    pub fn evaluate_or_rest(&self, time: f32) -> f32 {
        self.evaluate(time).unwrap_or_else(|| self.channel.rest_value())
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether the curve has no keys
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time of the last key
    pub fn last_time(&self) -> Option<f32> {
        self.keyframes.last().map(|k| k.time)
    }

    /// Get all keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Get a keyframe by index
    pub fn key(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes.get(index)
    }

    /// Get a mutable keyframe by index (tangent assignment)
    pub(crate) fn key_mut(&mut self, index: usize) -> Option<&mut Keyframe> {
        self.keyframes.get_mut(index)
    }
}
