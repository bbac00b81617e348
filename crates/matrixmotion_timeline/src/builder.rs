// SPDX-License-Identifier: MIT OR Apache-2.0
//! Chained construction of matrix timelines.
//!
//! Every operation starts `wait` seconds after the latest key on the four matrix
//! curves and lasts `duration` seconds. A negative `wait` overlaps the previous
//! operation; the overlapping operation must target different curves, otherwise
//! the operation is rejected with [`TimelineError::KeyOutOfOrder`] and the builder
//! is left untouched.

use crate::channel::Channel;
use crate::curve::Curve;
use crate::error::TimelineError;
use crate::interval::{RotationInterval, RotationKind};
use crate::tangent::{TangentMode, TangentSolver};
use crate::timeline::{last_matrix_key_time, Timeline};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Number of segments a full rotation is split into (21 sub-step keys)
pub const ROTATION_STEPS: usize = 20;

/// Direction of a scale or shear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Scale drives `x0`, shear drives `y0`
    Horizontal,
    /// Scale drives `y1`, shear drives `x1`
    Vertical,
}

impl Axis {
    /// Diagonal entry scaled along this axis
    pub fn scale_channel(&self) -> Channel {
        match self {
            Self::Horizontal => Channel::X0,
            Self::Vertical => Channel::Y1,
        }
    }

    /// Off-diagonal entry sheared along this axis
    pub fn shear_channel(&self) -> Channel {
        match self {
            Self::Horizontal => Channel::Y0,
            Self::Vertical => Channel::X1,
        }
    }
}

/// Time span occupied by one operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// Start time in seconds
    pub start: f32,
    /// End time in seconds
    pub end: f32,
}

impl Window {
    /// Create a window
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Length of the window
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }
}

/// One step of a timeline script
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Animate a diagonal entry
    Scale {
        /// Target axis
        axis: Axis,
        /// Start value
        from: f32,
        /// End value
        to: f32,
        /// Length in seconds
        duration: f32,
        /// Gap after the latest key (may be negative)
        wait: f32,
    },
    /// Animate an off-diagonal entry
    Shear {
        /// Target axis
        axis: Axis,
        /// Start value
        from: f32,
        /// End value
        to: f32,
        /// Length in seconds
        duration: f32,
        /// Gap after the latest key (may be negative)
        wait: f32,
    },
    /// Drive `x1`/`y0` by the sine of an angle
    Sine {
        /// Start angle in radians
        from_angle: f32,
        /// End angle in radians
        to_angle: f32,
        /// Length in seconds
        duration: f32,
        /// Gap after the latest key (may be negative)
        wait: f32,
    },
    /// Drive `x0`/`y1` by the cosine of an angle
    Cosine {
        /// Start angle in radians
        from_angle: f32,
        /// End angle in radians
        to_angle: f32,
        /// Length in seconds
        duration: f32,
        /// Gap after the latest key (may be negative)
        wait: f32,
    },
    /// Drive all four entries with a rotation matrix
    Rotation {
        /// Start angle in radians
        from_angle: f32,
        /// End angle in radians
        to_angle: f32,
        /// Length in seconds
        duration: f32,
        /// Gap after the latest key (may be negative)
        wait: f32,
    },
}

/// Appends keyframes for transformation operations
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    curves: IndexMap<Channel, Curve>,
    intervals: Vec<RotationInterval>,
}

impl TimelineBuilder {
    /// Create a builder with five empty curves
    pub fn new() -> Self {
        let curves = Channel::ALL
            .into_iter()
            .map(|c| (c, Curve::new(c)))
            .collect();
        Self {
            curves,
            intervals: Vec::new(),
        }
    }

    /// Create a builder whose matrix curves start at the identity at t=0
    pub fn identity() -> Self {
        let mut builder = Self::new();
        for channel in Channel::MATRIX {
            builder
                .curves
                .insert(channel, Curve::with_key(channel, 0.0, channel.rest_value()));
        }
        builder
    }

    /// Latest key time over the four matrix curves
    pub fn last_key_time(&self) -> f32 {
        last_matrix_key_time(&self.curves)
    }

    /// Get a curve under construction
    pub fn curve(&self, channel: Channel) -> Option<&Curve> {
        self.curves.get(&channel)
    }

    /// Intervals recorded so far
    pub fn intervals(&self) -> &[RotationInterval] {
        &self.intervals
    }

    /// Run one operation
    pub fn apply(&mut self, operation: &Operation) -> Result<Window, TimelineError> {
        match *operation {
            Operation::Scale {
                axis,
                from,
                to,
                duration,
                wait,
            } => self.scale(axis, from, to, duration, wait),
            Operation::Shear {
                axis,
                from,
                to,
                duration,
                wait,
            } => self.shear(axis, from, to, duration, wait),
            Operation::Sine {
                from_angle,
                to_angle,
                duration,
                wait,
            } => self.sine(from_angle, to_angle, duration, wait),
            Operation::Cosine {
                from_angle,
                to_angle,
                duration,
                wait,
            } => self.cosine(from_angle, to_angle, duration, wait),
            Operation::Rotation {
                from_angle,
                to_angle,
                duration,
                wait,
            } => self.rotation(from_angle, to_angle, duration, wait),
        }
    }

    /// Run a list of operations in order, stopping at the first failure
    pub fn run(&mut self, operations: &[Operation]) -> Result<(), TimelineError> {
        for (index, operation) in operations.iter().enumerate() {
            if let Err(e) = self.apply(operation) {
                tracing::warn!(index, ?operation, "timeline operation rejected: {e}");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Scale along an axis (`x0` horizontally, `y1` vertically)
    pub fn scale(
        &mut self,
        axis: Axis,
        from: f32,
        to: f32,
        duration: f32,
        wait: f32,
    ) -> Result<Window, TimelineError> {
        let window = self.window(duration, wait)?;
        let channel = axis.scale_channel();
        self.check(&[channel], window.start, &[from, to])?;
        self.linear_segment(channel, window, from, to)?;
        tracing::debug!(?axis, from, to, start = window.start, end = window.end, "scale");
        Ok(window)
    }

    /// Shear along an axis (`y0` horizontally, `x1` vertically)
    pub fn shear(
        &mut self,
        axis: Axis,
        from: f32,
        to: f32,
        duration: f32,
        wait: f32,
    ) -> Result<Window, TimelineError> {
        let window = self.window(duration, wait)?;
        let channel = axis.shear_channel();
        self.check(&[channel], window.start, &[from, to])?;
        self.linear_segment(channel, window, from, to)?;
        tracing::debug!(?axis, from, to, start = window.start, end = window.end, "shear");
        Ok(window)
    }

    /// Move the sine-coupled entries: `x1 = sin(a)`, `y0 = -sin(a)`
    pub fn sine(
        &mut self,
        from_angle: f32,
        to_angle: f32,
        duration: f32,
        wait: f32,
    ) -> Result<Window, TimelineError> {
        let window = self.window(duration, wait)?;
        let targets = [Channel::X1, Channel::Y0, Channel::Angle];
        self.check(&targets, window.start, &[from_angle, to_angle])?;

        let (from, to) = (from_angle.sin(), to_angle.sin());
        self.linear_segment(Channel::X1, window, from, to)?;
        self.linear_segment(Channel::Y0, window, -from, -to)?;
        self.linear_segment(Channel::Angle, window, from_angle, to_angle)?;
        self.push_interval(window, RotationKind::Sin);

        tracing::debug!(from_angle, to_angle, start = window.start, end = window.end, "sine");
        Ok(window)
    }

    /// Move the cosine-coupled entries: `x0 = y1 = cos(a)`
    pub fn cosine(
        &mut self,
        from_angle: f32,
        to_angle: f32,
        duration: f32,
        wait: f32,
    ) -> Result<Window, TimelineError> {
        let window = self.window(duration, wait)?;
        let targets = [Channel::X0, Channel::Y1, Channel::Angle];
        self.check(&targets, window.start, &[from_angle, to_angle])?;

        let (from, to) = (from_angle.cos(), to_angle.cos());
        self.linear_segment(Channel::X0, window, from, to)?;
        self.linear_segment(Channel::Y1, window, from, to)?;
        self.linear_segment(Channel::Angle, window, from_angle, to_angle)?;
        self.push_interval(window, RotationKind::Cos);

        tracing::debug!(from_angle, to_angle, start = window.start, end = window.end, "cosine");
        Ok(window)
    }

    /// Full rotation sampled at [`ROTATION_STEPS`] + 1 evenly spaced sub-steps.
    ///
    /// The block eases in and out: the first and last sub-step keys get flat tangents,
    /// interior keys get smooth tangents so the matrix follows the circle.
    pub fn rotation(
        &mut self,
        from_angle: f32,
        to_angle: f32,
        duration: f32,
        wait: f32,
    ) -> Result<Window, TimelineError> {
        let window = self.window(duration, wait)?;
        let mut targets = Channel::MATRIX.to_vec();
        targets.push(Channel::Angle);
        self.check(&targets, window.start, &[from_angle, to_angle])?;

        let mut first_keys = [0usize; 5];
        for step in 0..=ROTATION_STEPS {
            let fraction = step as f32 / ROTATION_STEPS as f32;
            let time = if step == ROTATION_STEPS {
                window.end
            } else {
                window.start + window.duration() * fraction
            };
            let angle = if step == 0 {
                from_angle
            } else {
                to_angle / ROTATION_STEPS as f32 * step as f32
            };
            let (sin, cos) = angle.sin_cos();

            let values = [cos, sin, -sin, cos, continuous_angle(angle)];
            for (slot, (channel, value)) in targets.iter().zip(values).enumerate() {
                let index = self.curve_mut(*channel).add_key(time, value)?;
                if step == 0 {
                    first_keys[slot] = index;
                }
            }
        }

        for (slot, channel) in targets.iter().enumerate() {
            let first = first_keys[slot];
            let curve = self.curve_mut(*channel);
            let last = curve.len() - 1;
            if channel.is_matrix() {
                TangentSolver::apply(curve, TangentMode::Linear, first.saturating_sub(1)..=first);
                TangentSolver::apply(curve, TangentMode::Smooth, first..=last);
                TangentSolver::apply(curve, TangentMode::Flat, first..=first);
                TangentSolver::apply(curve, TangentMode::Flat, last..=last);
            } else {
                TangentSolver::apply(curve, TangentMode::Linear, first.saturating_sub(1)..=last);
            }
        }
        self.push_interval(window, RotationKind::Both);

        tracing::debug!(from_angle, to_angle, start = window.start, end = window.end, "rotation");
        Ok(window)
    }

    /// Finish construction
    pub fn build(self) -> Timeline {
        tracing::debug!(
            duration = self.last_key_time(),
            intervals = self.intervals.len(),
            "timeline built"
        );
        Timeline::new(self.curves, self.intervals)
    }

    fn window(&self, duration: f32, wait: f32) -> Result<Window, TimelineError> {
        if !duration.is_finite() || !wait.is_finite() || duration < 0.0 {
            return Err(TimelineError::InvalidTiming { duration, wait });
        }
        let start = self.last_key_time() + wait;
        Ok(Window::new(start, start + duration))
    }

    /// Reject the operation before any curve is touched
    fn check(
        &self,
        channels: &[Channel],
        start: f32,
        values: &[f32],
    ) -> Result<(), TimelineError> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(TimelineError::NonFinite {
                channel: channels.first().copied().unwrap_or(Channel::Angle),
                what: "value",
            });
        }
        for &channel in channels {
            if let Some(curve) = self.curves.get(&channel) {
                curve.check_append(start)?;
            }
        }
        Ok(())
    }

    fn curve_mut(&mut self, channel: Channel) -> &mut Curve {
        self.curves
            .entry(channel)
            .or_insert_with(|| Curve::new(channel))
    }

    /// Two keys with linear tangents over the segments they touch
    fn linear_segment(
        &mut self,
        channel: Channel,
        window: Window,
        from: f32,
        to: f32,
    ) -> Result<(), TimelineError> {
        let curve = self.curve_mut(channel);
        let first = curve.add_key(window.start, from)?;
        let last = curve.add_key(window.end, to)?;
        TangentSolver::apply(curve, TangentMode::Linear, first.saturating_sub(1)..=last);
        Ok(())
    }

    fn push_interval(&mut self, window: Window, kind: RotationKind) {
        self.intervals
            .push(RotationInterval::new(window.start, window.end, kind));
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Angle recovered from its sine and cosine, in `[0, 2π)`
pub fn continuous_angle(angle: f32) -> f32 {
    let (sin, cos) = angle.sin_cos();
    let principal = cos.clamp(-1.0, 1.0).acos();
    let signed = if sin >= 0.0 { principal } else { -principal };
    if signed < 0.0 {
        signed + TAU
    } else {
        signed
    }
}
