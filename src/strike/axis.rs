//! Lattice axes along which strikes are tracked

use std::ops::Index;

use crate::board::Offset;

/// Number of axes tracked per cell
pub const AXIS_COUNT: usize = 4;

/// A bidirectional line through a cell.
///
/// `id` is the axis' position in its [`Axes`] table and indexes the
/// per-cell slot arrays. Strikes grow forward from their start along `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axis {
    pub id: usize,
    pub step: Offset,
}

impl Axis {
    pub const UP_RIGHT: Axis = Axis {
        id: 0,
        step: Offset::new(1, -1),
    };
    pub const RIGHT: Axis = Axis {
        id: 1,
        step: Offset::new(1, 0),
    };
    pub const DOWN_RIGHT: Axis = Axis {
        id: 2,
        step: Offset::new(1, 1),
    };
    pub const DOWN: Axis = Axis {
        id: 3,
        step: Offset::new(0, 1),
    };

    /// Number of steps from `from` to `to` along this axis, if `to` lies on
    /// the line through `from`.
    pub fn steps_between(&self, from: Offset, to: Offset) -> Option<i32> {
        let d = to - from;
        let k = if self.step.x != 0 {
            d.x / self.step.x
        } else {
            d.y / self.step.y
        };
        (from + self.step.scale(k) == to).then_some(k)
    }
}

/// The immutable table of axes a strike set tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axes([Axis; AXIS_COUNT]);

impl Axes {
    /// Up-right, right, down-right and down: every line through a cell once.
    pub const fn standard() -> Self {
        Axes([Axis::UP_RIGHT, Axis::RIGHT, Axis::DOWN_RIGHT, Axis::DOWN])
    }

    /// Build a table from custom step vectors.
    ///
    /// Returns `None` if a step is zero or two steps lie on the same line,
    /// since a cell could then belong to two strikes of one axis.
    pub fn from_steps(steps: [Offset; AXIS_COUNT]) -> Option<Self> {
        for (i, a) in steps.iter().enumerate() {
            if a.is_zero() {
                return None;
            }
            for b in &steps[i + 1..] {
                // Collinear steps have a zero cross product
                if a.x * b.y - a.y * b.x == 0 {
                    return None;
                }
            }
        }

        let mut id = 0;
        Some(Axes(steps.map(|step| {
            let axis = Axis { id, step };
            id += 1;
            axis
        })))
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Axis>> {
        self.0.iter().copied()
    }

    #[inline]
    pub fn as_array(&self) -> &[Axis; AXIS_COUNT] {
        &self.0
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<usize> for Axes {
    type Output = Axis;

    #[inline]
    fn index(&self, id: usize) -> &Axis {
        &self.0[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ids_match_positions() {
        let axes = Axes::standard();
        for (i, axis) in axes.iter().enumerate() {
            assert_eq!(axis.id, i);
            assert_eq!(axes[i], axis);
        }
    }

    #[test]
    fn test_from_steps_rejects_collinear() {
        let steps = [
            Offset::new(1, 0),
            Offset::new(-1, 0),
            Offset::new(1, 1),
            Offset::new(0, 1),
        ];
        assert!(Axes::from_steps(steps).is_none());

        let zero = [Offset::ZERO, Offset::new(1, 0), Offset::new(1, 1), Offset::new(0, 1)];
        assert!(Axes::from_steps(zero).is_none());
    }

    #[test]
    fn test_from_steps_knight_lines() {
        let steps = [
            Offset::new(2, 1),
            Offset::new(1, 0),
            Offset::new(1, 2),
            Offset::new(0, 1),
        ];
        let axes = Axes::from_steps(steps).unwrap();
        assert_eq!(axes[2].step, Offset::new(1, 2));
        assert_eq!(axes[2].id, 2);
    }

    #[test]
    fn test_steps_between() {
        let axis = Axis::UP_RIGHT;
        assert_eq!(axis.steps_between(Offset::new(0, 0), Offset::new(3, -3)), Some(3));
        assert_eq!(axis.steps_between(Offset::new(0, 0), Offset::new(-2, 2)), Some(-2));
        assert_eq!(axis.steps_between(Offset::new(0, 0), Offset::new(1, 1)), None);
        assert_eq!(Axis::DOWN.steps_between(Offset::new(4, 1), Offset::new(4, 5)), Some(4));
        assert_eq!(Axis::DOWN.steps_between(Offset::new(4, 1), Offset::new(5, 5)), None);
    }
}
