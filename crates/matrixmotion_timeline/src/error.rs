// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised while building a timeline.

use crate::channel::Channel;

/// Error when appending keys to a curve or running a builder operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    /// A key would land before the curve's last key
    #[error("Key at {time}s on {channel} precedes last key at {last}s")]
    KeyOutOfOrder {
        /// Target curve
        channel: Channel,
        /// Requested key time
        time: f32,
        /// Time of the curve's current last key
        last: f32,
    },

    /// Time or value is NaN or infinite
    #[error("Non-finite {what} on {channel}")]
    NonFinite {
        /// Target curve
        channel: Channel,
        /// Which input was rejected
        what: &'static str,
    },

    /// Duration below zero, or a non-finite duration or wait
    #[error("Invalid timing: duration {duration}s, wait {wait}s")]
    InvalidTiming {
        /// Requested duration
        duration: f32,
        /// Requested wait before start
        wait: f32,
    },
}
