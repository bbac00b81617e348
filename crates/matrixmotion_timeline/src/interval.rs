// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time ranges governed by trigonometric identities.
//!
//! The builder records a [`RotationInterval`] for every sine, cosine or full rotation
//! step. Playback copies the list into an [`IntervalTracker`] and consumes it as time
//! advances to decide which [`RotationLabel`] applies.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which entries an interval drives through sine/cosine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationKind {
    /// `x1 = sin`, `y0 = -sin`
    Sin,
    /// `x0 = cos`, `y1 = cos`
    Cos,
    /// All four entries (full rotation)
    Both,
}

/// Label attached to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotationLabel {
    /// Plain numeric values
    #[default]
    None,
    /// Sine-coupled entries are symbolic
    Sin,
    /// Cosine-coupled entries are symbolic
    Cos,
    /// Every entry is symbolic
    Both,
}

impl From<RotationKind> for RotationLabel {
    fn from(kind: RotationKind) -> Self {
        match kind {
            RotationKind::Sin => Self::Sin,
            RotationKind::Cos => Self::Cos,
            RotationKind::Both => Self::Both,
        }
    }
}

impl RotationLabel {
    /// Whether the sine-coupled entries (`x1`, `y0`) are governed
    pub fn covers_sin(&self) -> bool {
        matches!(self, Self::Sin | Self::Both)
    }

    /// Whether the cosine-coupled entries (`x0`, `y1`) are governed
    pub fn covers_cos(&self) -> bool {
        matches!(self, Self::Cos | Self::Both)
    }
}

/// A closed time range `[start, end]` of trigonometric motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationInterval {
    /// Start time in seconds
    pub start: f32,
    /// End time in seconds
    pub end: f32,
    /// Governed entries
    pub kind: RotationKind,
}

impl RotationInterval {
    /// Create a new interval
    pub fn new(start: f32, end: f32, kind: RotationKind) -> Self {
        Self { start, end, kind }
    }

    /// Whether `time` falls inside the interval
    pub fn contains(&self, time: f32) -> bool {
        time >= self.start && time <= self.end
    }
}

/// How overdue intervals are consumed per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntervalConsumption {
    /// Pop every interval that ended before the current time
    #[default]
    Drain,
    /// Pop at most one overdue interval and report no label for that tick
    SingleStep,
}

/// Destructive reader over a copy of the timeline's intervals
#[derive(Debug, Clone, Default)]
pub struct IntervalTracker {
    queue: VecDeque<RotationInterval>,
    consumption: IntervalConsumption,
}

impl IntervalTracker {
    /// Create a tracker over a copy of `intervals`
    pub fn new(intervals: &[RotationInterval], consumption: IntervalConsumption) -> Self {
        Self {
            queue: intervals.iter().copied().collect(),
            consumption,
        }
    }

    /// Resolve the label at `time`, consuming intervals that have ended
    pub fn label_at(&mut self, time: f32) -> RotationLabel {
        match self.consumption {
            IntervalConsumption::Drain => {
                while let Some(front) = self.queue.front() {
                    if time <= front.end {
                        return Self::label_for(front, time);
                    }
                    self.queue.pop_front();
                }
                RotationLabel::None
            }
            IntervalConsumption::SingleStep => match self.queue.front() {
                Some(front) if time <= front.end => Self::label_for(front, time),
                Some(_) => {
                    self.queue.pop_front();
                    RotationLabel::None
                }
                None => RotationLabel::None,
            },
        }
    }

    fn label_for(interval: &RotationInterval, time: f32) -> RotationLabel {
        if time >= interval.start {
            interval.kind.into()
        } else {
            RotationLabel::None
        }
    }

    /// Intervals not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Drop all pending intervals
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
