// SPDX-License-Identifier: MIT OR Apache-2.0
//! The active 2x2 matrix and its application to points.

use crate::channel::Channel;
use serde::{Deserialize, Serialize};

/// Current matrix `[[x0, y0], [x1, y1]]` read by the mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixSnapshot {
    /// Top-left
    pub x0: f32,
    /// Bottom-left
    pub x1: f32,
    /// Top-right
    pub y0: f32,
    /// Bottom-right
    pub y1: f32,
}

impl MatrixSnapshot {
    /// The identity matrix
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Create a matrix from its entries
    pub const fn new(x0: f32, x1: f32, y0: f32, y1: f32) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Get an entry by channel (`Angle` is not a matrix entry)
    pub fn get(&self, channel: Channel) -> Option<f32> {
        match channel {
            Channel::X0 => Some(self.x0),
            Channel::X1 => Some(self.x1),
            Channel::Y0 => Some(self.y0),
            Channel::Y1 => Some(self.y1),
            Channel::Angle => None,
        }
    }

    /// Determinant (signed area scale)
    pub fn determinant(&self) -> f32 {
        self.x0 * self.y1 - self.y0 * self.x1
    }

    /// Apply the matrix to a point, leaving `z` untouched
    pub fn apply(&self, point: [f32; 3]) -> [f32; 3] {
        apply_point(self.x0, self.x1, self.y0, self.y1, point)
    }

    /// Apply the matrix to every point
    pub fn apply_all(&self, points: &[[f32; 3]]) -> Vec<[f32; 3]> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

impl Default for MatrixSnapshot {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Map `(px, py, pz)` to `(px*x0 + py*y0, px*x1 + py*y1, pz)`
pub fn apply_point(x0: f32, x1: f32, y0: f32, y1: f32, point: [f32; 3]) -> [f32; 3] {
    let [px, py, pz] = point;
    [px * x0 + py * y0, px * x1 + py * y1, pz]
}

/// Axis-aligned bounds of a point set as `(min, max)`
pub fn bounds(points: &[[f32; 3]]) -> Option<([f32; 3], [f32; 3])> {
    let (first, rest) = points.split_first()?;
    let mut min = *first;
    let mut max = *first;
    for p in rest {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const POINTS: [[f32; 3]; 4] = [
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, -0.5],
        [2.0, -3.0, 1.0],
        [0.0, 0.0, 4.0],
    ];

    #[test]
    fn test_zero_point_stays_zero() {
        let m = MatrixSnapshot::new(3.0, -2.0, 0.5, 7.0);
        assert_eq!(m.apply([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_identity_keeps_points() {
        assert_eq!(MatrixSnapshot::IDENTITY.apply_all(&POINTS), POINTS.to_vec());
    }

    #[test]
    fn test_shear_and_scale() {
        // Horizontal shear by 0.5
        let shear = MatrixSnapshot::new(1.0, 0.0, 0.5, 1.0);
        assert_eq!(shear.apply([1.0, 2.0, 3.0]), [2.0, 2.0, 3.0]);

        // Reflection across the y axis
        let reflect = MatrixSnapshot::new(-1.0, 0.0, 0.0, 1.0);
        assert_eq!(reflect.apply([1.0, 2.0, 3.0]), [-1.0, 2.0, 3.0]);
        assert_eq!(reflect.determinant(), -1.0);
    }

    #[test]
    fn test_linearity() {
        let m = MatrixSnapshot::new(0.3, -1.2, 2.5, 0.8);
        let a = [1.0, 2.0, 0.0];
        let b = [-3.0, 0.5, 0.0];
        let sum = [a[0] + b[0], a[1] + b[1], 0.0];
        let (ma, mb, msum) = (m.apply(a), m.apply(b), m.apply(sum));
        for axis in 0..2 {
            assert_abs_diff_eq!(msum[axis], ma[axis] + mb[axis], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_bounds() {
        let (min, max) = bounds(&POINTS).unwrap();
        assert_eq!(min, [-0.5, -3.0, -0.5]);
        assert_eq!(max, [2.0, 0.5, 4.0]);
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn test_get_by_channel() {
        let m = MatrixSnapshot::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.get(Channel::Y0), Some(3.0));
        assert_eq!(m.get(Channel::Angle), None);
    }
}
