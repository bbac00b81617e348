// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors surfaced by the command line driver.

use matrixmotion_timeline::TimelineError;

/// Anything that can stop the driver
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Reading or writing a file or stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The timeline script could not be built
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// Frame serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Timeline dump failed
    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    Config(String),
}
