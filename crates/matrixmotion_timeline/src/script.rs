// SPDX-License-Identifier: MIT OR Apache-2.0
//! The scripted demonstration: scale, shear, reflection, shear-rotation,
//! sine/cosine motion and a full turn.

use crate::builder::{Axis, Operation, TimelineBuilder};
use crate::error::TimelineError;
use crate::timeline::Timeline;

/// Pause inserted between demonstration groups, in seconds
pub const DEFAULT_INITIAL_WAIT: f32 = 2.0;

/// Angle reached by the sine and cosine steps (about π/4)
const COMPONENT_ANGLE: f32 = 0.7854;

/// Angle reached by the full rotation (about 2π)
const FULL_TURN: f32 = 6.28;

fn scale(axis: Axis, from: f32, to: f32, duration: f32, wait: f32) -> Operation {
    Operation::Scale {
        axis,
        from,
        to,
        duration,
        wait,
    }
}

fn shear(axis: Axis, from: f32, to: f32, duration: f32, wait: f32) -> Operation {
    Operation::Shear {
        axis,
        from,
        to,
        duration,
        wait,
    }
}

fn sine(from_angle: f32, to_angle: f32, duration: f32, wait: f32) -> Operation {
    Operation::Sine {
        from_angle,
        to_angle,
        duration,
        wait,
    }
}

fn cosine(from_angle: f32, to_angle: f32, duration: f32, wait: f32) -> Operation {
    Operation::Cosine {
        from_angle,
        to_angle,
        duration,
        wait,
    }
}

/// Operations of the demonstration, each group separated by `initial_wait` seconds
pub fn demo_script(initial_wait: f32) -> Vec<Operation> {
    use Axis::{Horizontal as H, Vertical as V};
    let w = initial_wait;

    vec![
        // Scale
        scale(H, 1.0, 1.5, 1.5, 0.0),
        scale(H, 1.5, 1.0, 1.5, 0.5),
        scale(V, 1.0, 1.5, 1.5, w),
        scale(V, 1.5, 1.0, 1.5, 0.5),
        // Shear
        shear(H, 0.0, -0.5, 1.0, w),
        shear(H, -0.5, 0.5, 2.0, 0.0),
        shear(H, 0.5, 0.0, 1.0, 0.0),
        shear(V, 0.0, -0.5, 1.0, w),
        shear(V, -0.5, 0.5, 2.0, 0.0),
        shear(V, 0.5, 0.0, 1.0, 0.0),
        // Reflect across y, then across x
        scale(H, 1.0, -1.0, 1.5, w),
        scale(H, -1.0, 1.0, 1.5, 0.5),
        scale(V, 1.0, -1.0, 1.5, w),
        scale(V, -1.0, 1.0, 1.5, 0.5),
        // Rotation by shear; the last shear of each pair starts with the one before it
        shear(H, 0.0, -0.5, 1.5, w),
        shear(V, 0.0, 0.5, 1.5, 1.0),
        shear(H, -0.5, 0.0, 0.5, 1.0),
        shear(V, 0.5, 0.0, 0.5, -0.5),
        shear(H, 0.0, -1.0, 1.5, w),
        shear(V, 0.0, 1.0, 1.5, 1.0),
        shear(H, -1.0, 0.0, 0.5, 1.0),
        shear(V, 1.0, 0.0, 0.5, -0.5),
        // Sine and cosine components
        sine(0.0, COMPONENT_ANGLE, 2.0, w),
        sine(COMPONENT_ANGLE, 0.0, 2.0, 0.0),
        cosine(0.0, COMPONENT_ANGLE, 2.0, w),
        cosine(COMPONENT_ANGLE, 0.0, 2.0, 0.0),
        // Full turn
        Operation::Rotation {
            from_angle: 0.0,
            to_angle: FULL_TURN,
            duration: 5.0,
            wait: w,
        },
    ]
}

/// Build a timeline from the identity and a list of operations
pub fn build_timeline(operations: &[Operation]) -> Result<Timeline, TimelineError> {
    let mut builder = TimelineBuilder::identity();
    builder.run(operations)?;
    Ok(builder.build())
}

/// Build the demonstration timeline
pub fn demo_timeline(initial_wait: f32) -> Result<Timeline, TimelineError> {
    build_timeline(&demo_script(initial_wait))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::interval::RotationKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_demo_builds() {
        let timeline = demo_timeline(DEFAULT_INITIAL_WAIT).unwrap();
        assert_eq!(timeline.duration(), 66.0);

        let kinds: Vec<RotationKind> = timeline.intervals().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RotationKind::Sin,
                RotationKind::Sin,
                RotationKind::Cos,
                RotationKind::Cos,
                RotationKind::Both,
            ]
        );
    }

    #[test]
    fn test_intervals_are_ordered_and_disjoint() {
        let timeline = demo_timeline(DEFAULT_INITIAL_WAIT).unwrap();
        for pair in timeline.intervals().windows(2) {
            assert!(pair[0].start <= pair[0].end);
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_demo_key_times_strictly_increase() {
        let timeline = demo_timeline(DEFAULT_INITIAL_WAIT).unwrap();
        for curve in timeline.curves() {
            let times: Vec<f32> = curve.keyframes().iter().map(|k| k.time).collect();
            assert!(times.windows(2).all(|w| w[0] < w[1]), "{}: {times:?}", curve.channel);
        }
    }

    #[test]
    fn test_demo_checkpoints() {
        let timeline = demo_timeline(DEFAULT_INITIAL_WAIT).unwrap();

        // Peak of the first horizontal scale
        assert_eq!(timeline.evaluate(Channel::X0, 1.5), 1.5);
        // Reflection across the y axis
        assert_eq!(timeline.evaluate(Channel::X0, 24.5), -1.0);
        // Both shears active together during the rotation by shear
        let m = timeline.sample(38.0).matrix();
        assert_abs_diff_eq!(m.y0, -0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(m.x1, 0.5, epsilon = 1e-6);
        // Sine step at its peak
        assert_abs_diff_eq!(timeline.evaluate(Channel::X1, 51.0), COMPONENT_ANGLE.sin());
        assert_abs_diff_eq!(timeline.evaluate(Channel::Y0, 51.0), -COMPONENT_ANGLE.sin());
        // Back to identity at the end
        let end = timeline.sample(timeline.duration()).matrix();
        assert_abs_diff_eq!(end.x0, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(end.x1, 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_script_round_trips_through_ron() {
        let script = demo_script(1.0);
        let text = ron::to_string(&script).unwrap();
        let parsed: Vec<Operation> = ron::from_str(&text).unwrap();
        assert_eq!(parsed, script);
    }
}
