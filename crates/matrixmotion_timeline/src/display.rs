// SPDX-License-Identifier: MIT OR Apache-2.0
//! Display values for the matrix fields.
//!
//! Values are snapped to 0 or 1 when within [`SNAP_EPSILON`] and shown with one
//! decimal. Governed entries can also be shown symbolically, e.g. `cos(0.5π)`.

use crate::channel::Channel;
use crate::interval::RotationLabel;
use crate::timeline::Sample;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Distance from 0 or 1 under which a value is snapped
pub const SNAP_EPSILON: f32 = 0.005;

/// Snap values near 0 or 1 onto them
pub fn snap(value: f32) -> f32 {
    if value.abs() <= SNAP_EPSILON {
        0.0
    } else if (value - 1.0).abs() <= SNAP_EPSILON {
        1.0
    } else {
        value
    }
}

/// Round to one decimal place
pub fn round_to_tenth(value: f32) -> f32 {
    let rounded = (value * 10.0).round() / 10.0;
    // Avoid showing "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// One field as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayEntry {
    /// Field
    pub channel: Channel,
    /// Snapped value rounded to one decimal
    pub value: f32,
    /// Label in force for this frame
    pub label: RotationLabel,
}

impl DisplayEntry {
    /// Build an entry from a raw curve value
    pub fn new(channel: Channel, raw: f32, label: RotationLabel) -> Self {
        Self {
            channel,
            value: round_to_tenth(snap(raw)),
            label,
        }
    }

    /// Text for this entry; `angle` is the current angle in radians
    pub fn text(&self, angle: f32) -> String {
        symbolic_text(self.channel, angle, self.label)
            .unwrap_or_else(|| format!("{:.1}", self.value))
    }
}

/// All five fields of one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    /// Entries in [`Channel::ALL`] order
    pub entries: [DisplayEntry; 5],
    /// Snapped angle used for symbolic text
    pub angle: f32,
}

impl DisplayFrame {
    /// Build the display values for a sample
    pub fn new(sample: &Sample, label: RotationLabel) -> Self {
        Self {
            entries: Channel::ALL.map(|c| DisplayEntry::new(c, sample.get(c), label)),
            angle: snap(sample.angle),
        }
    }

    /// Entry for one channel
    pub fn entry(&self, channel: Channel) -> &DisplayEntry {
        let index = Channel::ALL
            .iter()
            .position(|c| *c == channel)
            .unwrap_or_default();
        &self.entries[index]
    }

    /// Texts in [`Channel::ALL`] order
    pub fn texts(&self) -> [String; 5] {
        self.entries.map(|e| e.text(self.angle))
    }
}

/// Symbolic text for a governed entry, `None` when the plain value should be shown
pub fn symbolic_text(channel: Channel, angle: f32, label: RotationLabel) -> Option<String> {
    let turns = format!("{:.1}π", round_to_tenth(angle / PI));
    match channel {
        Channel::X0 | Channel::Y1 if label.covers_cos() => Some(format!("cos({turns})")),
        Channel::X1 if label.covers_sin() => Some(format!("sin({turns})")),
        Channel::Y0 if label.covers_sin() => Some(format!("-sin({turns})")),
        _ => None,
    }
}
