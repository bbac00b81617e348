// SPDX-License-Identifier: MIT OR Apache-2.0
//! Manually edited matrix fields.

use crate::channel::Channel;
use crate::matrix::MatrixSnapshot;

/// Result of parsing a field's text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldInput {
    /// A usable number
    Value(f32),
    /// Empty, a lone `-`, or not a number
    Invalid,
}

impl FieldInput {
    /// Parse raw field text
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text == "-" {
            return Self::Invalid;
        }
        match text.parse::<f32>() {
            Ok(v) if v.is_finite() => Self::Value(v),
            _ => Self::Invalid,
        }
    }
}

/// The four matrix entry fields; each holds a value or is invalid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixFields {
    values: [Option<f32>; 4],
}

impl MatrixFields {
    /// Fields showing `matrix`
    pub fn from_matrix(matrix: MatrixSnapshot) -> Self {
        Self {
            values: [
                Some(matrix.x0),
                Some(matrix.x1),
                Some(matrix.y0),
                Some(matrix.y1),
            ],
        }
    }

    fn slot(channel: Channel) -> Option<usize> {
        Channel::MATRIX.iter().position(|c| *c == channel)
    }

    /// Store parsed text in a field. Returns the parsed input.
    pub fn set_text(&mut self, channel: Channel, text: &str) -> FieldInput {
        let input = FieldInput::parse(text);
        if let Some(slot) = Self::slot(channel) {
            self.values[slot] = match input {
                FieldInput::Value(v) => Some(v),
                FieldInput::Invalid => None,
            };
        }
        input
    }

    /// Overwrite every field from a matrix (playback output)
    pub fn set_matrix(&mut self, matrix: MatrixSnapshot) {
        *self = Self::from_matrix(matrix);
    }

    /// Value of one field, if valid
    pub fn get(&self, channel: Channel) -> Option<f32> {
        self.values[Self::slot(channel)?]
    }

    /// The matrix, once all four fields hold valid values
    pub fn matrix(&self) -> Option<MatrixSnapshot> {
        let [x0, x1, y0, y1] = self.values;
        Some(MatrixSnapshot::new(x0?, x1?, y0?, y1?))
    }
}

impl Default for MatrixFields {
    fn default() -> Self {
        Self::from_matrix(MatrixSnapshot::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(FieldInput::parse("1.5"), FieldInput::Value(1.5));
        assert_eq!(FieldInput::parse("-2"), FieldInput::Value(-2.0));
        assert_eq!(FieldInput::parse(" 0.25 "), FieldInput::Value(0.25));
        assert_eq!(FieldInput::parse(""), FieldInput::Invalid);
        assert_eq!(FieldInput::parse("-"), FieldInput::Invalid);
        assert_eq!(FieldInput::parse("abc"), FieldInput::Invalid);
        assert_eq!(FieldInput::parse("inf"), FieldInput::Invalid);
    }

    #[test]
    fn test_matrix_needs_all_fields() {
        let mut fields = MatrixFields::default();
        assert_eq!(fields.matrix(), Some(MatrixSnapshot::IDENTITY));

        fields.set_text(Channel::Y0, "");
        assert_eq!(fields.get(Channel::Y0), None);
        assert_eq!(fields.matrix(), None);

        fields.set_text(Channel::X1, "0.5");
        assert_eq!(fields.matrix(), None);

        fields.set_text(Channel::Y0, "-0.5");
        assert_eq!(fields.matrix(), Some(MatrixSnapshot::new(1.0, 0.5, -0.5, 1.0)));
    }

    #[test]
    fn test_angle_is_not_a_field() {
        let mut fields = MatrixFields::default();
        assert_eq!(fields.set_text(Channel::Angle, "3"), FieldInput::Value(3.0));
        assert_eq!(fields.get(Channel::Angle), None);
        assert_eq!(fields.matrix(), Some(MatrixSnapshot::IDENTITY));
    }
}
