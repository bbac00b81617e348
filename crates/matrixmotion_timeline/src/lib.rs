// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe timelines for animated 2x2 matrix demonstrations.
//!
//! This crate builds and plays back the curves behind a linear transformation
//! demo:
//! - Scale, shear and reflection along either axis
//! - Sine and cosine component motion
//! - Full rotation sampled along the circle
//!
//! ## Architecture
//!
//! - [`Curve`]: append-only keyframes with Hermite evaluation
//! - [`TangentSolver`]: linear, flat and smooth tangent policies
//! - [`TimelineBuilder`]: chained operations producing an immutable [`Timeline`]
//! - [`IntervalTracker`]: which entries are currently driven by sine/cosine
//! - [`PlaybackController`]: the idle/playing state machine
//! - [`MatrixEngine`]: one owner for playback, manual edits and the matrix

pub mod builder;
pub mod channel;
pub mod curve;
pub mod display;
pub mod engine;
pub mod error;
pub mod fields;
pub mod interval;
pub mod keyframe;
pub mod matrix;
pub mod playback;
pub mod script;
pub mod tangent;
pub mod timeline;

pub use builder::{continuous_angle, Axis, Operation, TimelineBuilder, Window, ROTATION_STEPS};
pub use channel::Channel;
pub use curve::Curve;
pub use display::{round_to_tenth, snap, symbolic_text, DisplayEntry, DisplayFrame};
pub use engine::{EditOutcome, MatrixEngine, TickOutput};
pub use error::TimelineError;
pub use fields::{FieldInput, MatrixFields};
pub use interval::{
    IntervalConsumption, IntervalTracker, RotationInterval, RotationKind, RotationLabel,
};
pub use keyframe::{Interpolation, Keyframe};
pub use matrix::{apply_point, bounds, MatrixSnapshot};
pub use playback::{Frame, PlaybackController, PlaybackState};
pub use script::{build_timeline, demo_script, demo_timeline, DEFAULT_INITIAL_WAIT};
pub use tangent::{TangentMode, TangentSolver};
pub use timeline::{Sample, Timeline};
