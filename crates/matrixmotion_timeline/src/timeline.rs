// SPDX-License-Identifier: MIT OR Apache-2.0
//! Immutable result of a timeline build.

use crate::channel::Channel;
use crate::curve::Curve;
use crate::interval::RotationInterval;
use crate::matrix::MatrixSnapshot;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Values of all five channels at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Top-left
    pub x0: f32,
    /// Bottom-left
    pub x1: f32,
    /// Top-right
    pub y0: f32,
    /// Bottom-right
    pub y1: f32,
    /// Angle in radians
    pub angle: f32,
}

impl Sample {
    /// Get a value by channel
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::X0 => self.x0,
            Channel::X1 => self.x1,
            Channel::Y0 => self.y0,
            Channel::Y1 => self.y1,
            Channel::Angle => self.angle,
        }
    }

    /// The matrix part of the sample
    pub fn matrix(&self) -> MatrixSnapshot {
        MatrixSnapshot::new(self.x0, self.x1, self.y0, self.y1)
    }

    /// Apply `f` to every value
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            x0: f(self.x0),
            x1: f(self.x1),
            y0: f(self.y0),
            y1: f(self.y1),
            angle: f(self.angle),
        }
    }
}

/// Built curves plus the time-ordered rotation intervals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    curves: IndexMap<Channel, Curve>,
    intervals: Vec<RotationInterval>,
}

impl Timeline {
    pub(crate) fn new(curves: IndexMap<Channel, Curve>, intervals: Vec<RotationInterval>) -> Self {
        Self { curves, intervals }
    }

    /// Get a curve
    pub fn curve(&self, channel: Channel) -> Option<&Curve> {
        self.curves.get(&channel)
    }

    /// Get all curves in channel order
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.curves.values()
    }

    /// Rotation intervals in time order
    pub fn intervals(&self) -> &[RotationInterval] {
        &self.intervals
    }

    /// Latest key time over the four matrix curves
    pub fn duration(&self) -> f32 {
        last_matrix_key_time(&self.curves)
    }

    /// Evaluate one channel; channels without keys report their rest value
    pub fn evaluate(&self, channel: Channel, time: f32) -> f32 {
        self.curves
            .get(&channel)
            .map_or_else(|| channel.rest_value(), |c| c.evaluate_or_rest(time))
    }

    /// Evaluate every channel at `time`
    pub fn sample(&self, time: f32) -> Sample {
        Sample {
            x0: self.evaluate(Channel::X0, time),
            x1: self.evaluate(Channel::X1, time),
            y0: self.evaluate(Channel::Y0, time),
            y1: self.evaluate(Channel::Y1, time),
            angle: self.evaluate(Channel::Angle, time),
        }
    }
}

/// Maximum last-key time over the matrix curves, 0 when they are all empty
pub(crate) fn last_matrix_key_time(curves: &IndexMap<Channel, Curve>) -> f32 {
    Channel::MATRIX
        .iter()
        .filter_map(|c| curves.get(c)?.last_time())
        .fold(0.0, f32::max)
}
