// SPDX-License-Identifier: MIT OR Apache-2.0
//! Curve channels of the animated matrix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the five animated curves.
///
/// The four matrix channels form `[[x0, y0], [x1, y1]]`; `Angle` runs in parallel
/// and only feeds symbolic labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Top-left entry
    X0,
    /// Bottom-left entry
    X1,
    /// Top-right entry
    Y0,
    /// Bottom-right entry
    Y1,
    /// Rotation angle in radians
    Angle,
}

impl Channel {
    /// All channels in display order
    pub const ALL: [Channel; 5] = [
        Channel::X0,
        Channel::X1,
        Channel::Y0,
        Channel::Y1,
        Channel::Angle,
    ];

    /// The four matrix entries
    pub const MATRIX: [Channel; 4] = [Channel::X0, Channel::X1, Channel::Y0, Channel::Y1];

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::X0 => "x0",
            Self::X1 => "x1",
            Self::Y0 => "y0",
            Self::Y1 => "y1",
            Self::Angle => "angle",
        }
    }

    /// Value of this channel when its curve has no keys (identity matrix, zero angle)
    pub fn rest_value(&self) -> f32 {
        match self {
            Self::X0 | Self::Y1 => 1.0,
            Self::X1 | Self::Y0 | Self::Angle => 0.0,
        }
    }

    /// Whether this channel is a matrix entry
    pub fn is_matrix(&self) -> bool {
        !matches!(self, Self::Angle)
    }

    /// Parse a channel from its display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
