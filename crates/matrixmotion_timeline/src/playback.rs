// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback of a built timeline.
//!
//! Two states only: `Idle` and `Playing`. Starting copies the timeline's
//! interval list; stopping (end reached or interrupted) forgets everything.

use crate::interval::{IntervalConsumption, IntervalTracker, RotationLabel};
use crate::timeline::{Sample, Timeline};
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not playing
    #[default]
    Idle,
    /// Advancing every tick
    Playing,
}

/// Output of one playing tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Playback time of this frame
    pub time: f32,
    /// Curve values at `time`
    pub sample: Sample,
    /// Which entries are symbolic
    pub label: RotationLabel,
}

/// Drives curve sampling and label resolution per tick
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    time: f32,
    max_time: f32,
    speed: f32,
    consumption: IntervalConsumption,
    tracker: IntervalTracker,
    frame_count: u64,
}

impl PlaybackController {
    /// Create an idle controller
    pub fn new(consumption: IntervalConsumption) -> Self {
        Self {
            state: PlaybackState::Idle,
            time: 0.0,
            max_time: 0.0,
            speed: 1.0,
            consumption,
            tracker: IntervalTracker::default(),
            frame_count: 0,
        }
    }

    /// Start (or restart) from the beginning
    pub fn start(&mut self, timeline: &Timeline) {
        if self.state == PlaybackState::Playing {
            tracing::debug!(time = self.time, "restarting playback");
        }
        self.state = PlaybackState::Playing;
        self.time = 0.0;
        self.frame_count = 0;
        self.max_time = timeline.duration();
        self.tracker = IntervalTracker::new(timeline.intervals(), self.consumption);
        tracing::info!(duration = self.max_time, "playback started");
    }

    /// Stop immediately. Returns true if playback was running.
    pub fn interrupt(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        tracing::info!(time = self.time, "playback interrupted");
        self.reset();
        true
    }

    /// Advance by `delta_time` seconds and evaluate.
    ///
    /// Returns `None` while idle and on the tick that detects the end. The tick that
    /// crosses the end still produces a frame with the final values.
    pub fn tick(&mut self, delta_time: f32, timeline: &Timeline) -> Option<Frame> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        if self.time >= self.max_time {
            tracing::info!(frames = self.frame_count, "playback finished");
            self.reset();
            return None;
        }

        let step = if delta_time.is_finite() {
            delta_time.max(0.0)
        } else {
            0.0
        };
        self.time += step * self.speed;
        self.frame_count += 1;

        let frame = Frame {
            time: self.time,
            sample: timeline.sample(self.time),
            label: self.tracker.label_at(self.time),
        };
        tracing::trace!(time = frame.time, label = ?frame.label, "frame");
        Some(frame)
    }

    fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.time = 0.0;
        self.frame_count = 0;
        self.tracker.clear();
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Is currently playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current playback time
    pub fn time(&self) -> f32 {
        self.time
    }

    /// End time captured at start
    pub fn max_time(&self) -> f32 {
        self.max_time
    }

    /// Frames produced since start
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Intervals still waiting to be consumed
    pub fn pending_intervals(&self) -> usize {
        self.tracker.remaining()
    }

    /// Playback speed multiplier
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set playback speed (clamped to a reasonable range)
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() {
            speed.clamp(0.0, 10.0)
        } else {
            1.0
        };
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(IntervalConsumption::default())
    }
}
