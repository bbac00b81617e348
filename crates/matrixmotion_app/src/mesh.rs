// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in geometry transformed by the matrix.

/// Corners of a unit cube centred on the origin
pub fn unit_cube() -> Vec<[f32; 3]> {
    let mut points = Vec::with_capacity(8);
    for x in [-0.5, 0.5] {
        for y in [-0.5, 0.5] {
            for z in [-0.5, 0.5] {
                points.push([x, y, z]);
            }
        }
    }
    points
}

/// Human readable bounds, e.g. `[-0.5, -0.5, -0.5] .. [0.5, 0.5, 0.5]`
pub fn describe_bounds(points: &[[f32; 3]]) -> String {
    match matrixmotion_timeline::bounds(points) {
        Some((min, max)) => format!(
            "[{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
            min[0], min[1], min[2], max[0], max[1], max[2]
        ),
        None => "empty".to_string(),
    }
}
