// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine object tying the timeline, playback and manual fields together.
//!
//! The [`MatrixSnapshot`] has two writers: playback ticks and manual edits.
//! An accepted edit interrupts playback before it writes, so the two never
//! overlap.

use crate::channel::Channel;
use crate::display::{snap, DisplayFrame};
use crate::error::TimelineError;
use crate::fields::{FieldInput, MatrixFields};
use crate::interval::IntervalConsumption;
use crate::matrix::MatrixSnapshot;
use crate::playback::{Frame, PlaybackController};
use crate::script::demo_timeline;
use crate::timeline::Timeline;

/// What happened to a field edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// Text was empty, `-`, not a number, or the field is not editable
    Rejected,
    /// Value stored, but another field is still invalid
    Pending,
    /// Matrix recomputed from the four fields
    Applied(MatrixSnapshot),
}

/// Output of a playing tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Raw frame from playback
    pub frame: Frame,
    /// Rounded values and labels for display
    pub display: DisplayFrame,
    /// New matrix for the mesh
    pub matrix: MatrixSnapshot,
}

/// Owns one timeline and everything that reads or writes the matrix
#[derive(Debug, Clone)]
pub struct MatrixEngine {
    timeline: Timeline,
    playback: PlaybackController,
    fields: MatrixFields,
    snapshot: MatrixSnapshot,
}

impl MatrixEngine {
    /// Create an idle engine showing the identity matrix
    pub fn new(timeline: Timeline, consumption: IntervalConsumption) -> Self {
        Self {
            timeline,
            playback: PlaybackController::new(consumption),
            fields: MatrixFields::default(),
            snapshot: MatrixSnapshot::IDENTITY,
        }
    }

    /// Engine over the demonstration timeline
    pub fn demo(initial_wait: f32) -> Result<Self, TimelineError> {
        Ok(Self::new(
            demo_timeline(initial_wait)?,
            IntervalConsumption::default(),
        ))
    }

    /// Start (or restart) playback
    pub fn start_playback(&mut self) {
        self.playback.start(&self.timeline);
    }

    /// Stop playback. Returns true if it was running.
    pub fn interrupt(&mut self) -> bool {
        self.playback.interrupt()
    }

    /// Focusing a matrix field stops playback
    pub fn field_focus_changed(&mut self, channel: Channel, focused: bool) -> bool {
        if focused && channel.is_matrix() {
            return self.interrupt();
        }
        false
    }

    /// Handle new text in a matrix field
    pub fn field_edited(&mut self, channel: Channel, text: &str) -> EditOutcome {
        if !channel.is_matrix() {
            tracing::warn!(%channel, "edit on a non-matrix field ignored");
            return EditOutcome::Rejected;
        }

        match self.fields.set_text(channel, text) {
            FieldInput::Invalid => {
                tracing::debug!(%channel, text, "field edit rejected");
                EditOutcome::Rejected
            }
            FieldInput::Value(value) => match self.fields.matrix() {
                Some(matrix) => {
                    self.interrupt();
                    self.snapshot = matrix;
                    tracing::debug!(%channel, value, ?matrix, "matrix edited");
                    EditOutcome::Applied(matrix)
                }
                None => {
                    tracing::debug!(%channel, value, "waiting for remaining fields");
                    EditOutcome::Pending
                }
            },
        }
    }

    /// Advance playback; `None` while idle
    pub fn tick(&mut self, delta_time: f32) -> Option<TickOutput> {
        let frame = self.playback.tick(delta_time, &self.timeline)?;

        let matrix = frame.sample.map(snap).matrix();
        self.snapshot = matrix;
        self.fields.set_matrix(matrix);

        Some(TickOutput {
            frame,
            display: DisplayFrame::new(&frame.sample, frame.label),
            matrix,
        })
    }

    /// Apply the current matrix to points
    pub fn transform(&self, points: &[[f32; 3]]) -> Vec<[f32; 3]> {
        self.snapshot.apply_all(points)
    }

    /// Current matrix
    pub fn snapshot(&self) -> MatrixSnapshot {
        self.snapshot
    }

    /// Manual field state
    pub fn fields(&self) -> &MatrixFields {
        &self.fields
    }

    /// The timeline being played
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Playback controller
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Set playback speed
    pub fn set_speed(&mut self, speed: f32) {
        self.playback.set_speed(speed);
    }

    /// Is playback running
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Axis, TimelineBuilder};
    use crate::interval::RotationLabel;

    fn engine() -> MatrixEngine {
        let mut builder = TimelineBuilder::identity();
        builder.shear(Axis::Horizontal, 0.0, 1.0, 1.0, 0.0).unwrap();
        builder.cosine(0.0, std::f32::consts::FRAC_PI_2, 1.0, 0.0).unwrap();
        MatrixEngine::new(builder.build(), IntervalConsumption::Drain)
    }

    #[test]
    fn test_ticks_write_the_snapshot() {
        let mut engine = engine();
        assert!(engine.tick(0.1).is_none());

        engine.start_playback();
        let out = engine.tick(0.5).unwrap();
        assert_eq!(out.matrix.y0, 0.5);
        assert_eq!(engine.snapshot(), out.matrix);
        assert_eq!(engine.fields().get(Channel::Y0), Some(0.5));

        let out = engine.tick(1.5).unwrap();
        assert_eq!(out.frame.label, RotationLabel::Cos);
        // cos(π/2) snaps to exactly zero
        assert_eq!(out.matrix.x0, 0.0);
        assert_eq!(out.display.texts()[0], "cos(0.5π)");
    }

    #[test]
    fn test_empty_and_dash_edits_are_ignored() {
        let mut engine = engine();
        for text in ["", "-"] {
            assert_eq!(engine.field_edited(Channel::X0, text), EditOutcome::Rejected);
            assert_eq!(engine.snapshot(), MatrixSnapshot::IDENTITY);
        }
    }

    #[test]
    fn test_valid_edit_applies_immediately() {
        let mut engine = engine();
        let outcome = engine.field_edited(Channel::X1, "0.75");
        let expected = MatrixSnapshot::new(1.0, 0.75, 0.0, 1.0);
        assert_eq!(outcome, EditOutcome::Applied(expected));
        assert_eq!(engine.snapshot(), expected);
        assert_eq!(engine.transform(&[[1.0, 0.0, 2.0]]), vec![[1.0, 0.75, 2.0]]);
    }

    #[test]
    fn test_edit_waits_for_invalid_field() {
        let mut engine = engine();
        engine.field_edited(Channel::Y1, "-");
        assert_eq!(engine.field_edited(Channel::X0, "2"), EditOutcome::Pending);
        assert_eq!(engine.snapshot(), MatrixSnapshot::IDENTITY);

        let outcome = engine.field_edited(Channel::Y1, "3");
        assert_eq!(outcome, EditOutcome::Applied(MatrixSnapshot::new(2.0, 0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_edit_interrupts_playback() {
        let mut engine = engine();
        engine.start_playback();
        engine.tick(0.5);
        assert!(engine.is_playing());

        engine.field_edited(Channel::X0, "4");
        assert!(!engine.is_playing());
        assert_eq!(engine.snapshot(), MatrixSnapshot::new(4.0, 0.0, 0.5, 1.0));
        assert!(engine.tick(0.1).is_none());
    }

    #[test]
    fn test_focus_interrupts_playback() {
        let mut engine = engine();
        engine.start_playback();
        assert!(!engine.field_focus_changed(Channel::Angle, true));
        assert!(!engine.field_focus_changed(Channel::X0, false));
        assert!(engine.is_playing());
        assert!(engine.field_focus_changed(Channel::Y1, true));
        assert!(!engine.is_playing());
    }

    #[test]
    fn test_demo_engine_plays_through() {
        let mut engine = MatrixEngine::demo(2.0).unwrap();
        engine.start_playback();
        let mut frames = 0;
        while engine.tick(1.0 / 30.0).is_some() {
            frames += 1;
        }
        // Accumulated f32 time may cross the end a frame early or late
        assert!((66 * 30 - 2..=66 * 30 + 2).contains(&frames), "{frames}");
        assert!(!engine.is_playing());
    }
}
