/// Recursive five-point gasket subdivision
///
/// A [`Cell`] is split at the midpoints of nine of its edges into five
/// smaller cells until the depth budget runs out; each remaining cell becomes
/// one pyramid leaf. Leaves are emitted depth-first in child order.
use log::debug;
use rayon::prelude::*;

use crate::color::Color;
use crate::solid::{SolidKind, SolidSpec};
use crate::transform::{midpoint, Transform, Vec3};

/// Five control points of one subdivision level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub points: [Vec3; 5],
}

impl Cell {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3) -> Self {
        Self {
            points: [v0, v1, v2, v3, v4],
        }
    }

    /// Square pyramid of half-width `s` with its apex at `(0, s, 0)`: base
    /// corners on the z axis, then +x, apex, then -x.
    pub fn square_pyramid(s: f32) -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, -s),
            Vec3::new(0.0, 0.0, s),
            Vec3::new(s, 0.0, 0.0),
            Vec3::new(0.0, s, 0.0),
            Vec3::new(-s, 0.0, 0.0),
        )
    }

    /// The five child cells, in emission order.
    pub fn children(&self) -> [Cell; 5] {
        let [v0, v1, v2, v3, v4] = self.points;

        let v01 = midpoint(&v0, &v1);
        let v02 = midpoint(&v0, &v2);
        let v03 = midpoint(&v0, &v3);
        let v12 = midpoint(&v1, &v2);
        let v13 = midpoint(&v1, &v3);
        let v23 = midpoint(&v2, &v3);
        let v04 = midpoint(&v0, &v4);
        let v14 = midpoint(&v1, &v4);
        let v34 = midpoint(&v3, &v4);

        [
            Cell::new(v0, v01, v02, v03, v04),
            Cell::new(v04, v14, v01, v34, v4),
            Cell::new(v01, v1, v12, v13, v14),
            Cell::new(v02, v12, v2, v23, v01),
            Cell::new(v03, v13, v23, v3, v34),
        ]
    }

    fn leaf(&self, color: Option<Color>) -> SolidSpec {
        SolidSpec::assemble(
            SolidKind::Pyramid,
            self.points.to_vec(),
            color,
            false,
            Transform::identity(),
        )
    }
}

/// Number of leaves `subdivide` produces for `depth`, or `None` when that
/// count does not fit in a `usize` (depth 29 and up on 64-bit targets, 15 and
/// up on 32-bit ones).
pub fn leaf_count(depth: i32) -> Option<usize> {
    5usize.checked_pow(depth.max(1) as u32 - 1)
}

/// Subdivide `cell` down to `depth` levels and collect every leaf.
///
/// A depth of one or less yields the cell itself as a single leaf.
pub fn subdivide(cell: &Cell, depth: i32, color: Option<Color>) -> Vec<SolidSpec> {
    let expected = leaf_count(depth);
    debug!("subdividing to depth {} ({:?} leaves)", depth, expected);
    let mut leaves = Vec::with_capacity(expected.unwrap_or(0));
    subdivide_with(cell, depth, color, &mut |leaf| leaves.push(leaf));
    leaves
}

/// Stream the leaves of `cell` to `sink` in depth-first order.
pub fn subdivide_with<F>(cell: &Cell, depth: i32, color: Option<Color>, sink: &mut F)
where
    F: FnMut(SolidSpec),
{
    if depth <= 1 {
        sink(cell.leaf(color));
        return;
    }
    for child in cell.children() {
        subdivide_with(&child, depth - 1, color, sink);
    }
}

/// Like [`subdivide`], with the five top-level branches run on the rayon pool.
/// The output order matches [`subdivide`].
pub fn subdivide_par(cell: &Cell, depth: i32, color: Option<Color>) -> Vec<SolidSpec> {
    debug!(
        "subdividing to depth {} in parallel ({:?} leaves)",
        depth,
        leaf_count(depth)
    );
    subdivide_par_inner(cell, depth, color)
}

fn subdivide_par_inner(cell: &Cell, depth: i32, color: Option<Color>) -> Vec<SolidSpec> {
    if depth <= 1 {
        return vec![cell.leaf(color)];
    }
    let branches: Vec<Vec<SolidSpec>> = cell
        .children()
        .par_iter()
        .map(|child| subdivide_par_inner(child, depth - 1, color))
        .collect();
    branches.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lesson_cell() -> Cell {
        Cell::square_pyramid(10.0)
    }

    fn v(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x, y, z)
    }

    #[test]
    fn test_depth_one_is_single_leaf() {
        let cell = lesson_cell();
        let leaves = subdivide(&cell, 1, Some(Color(0xffc0cb)));
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].vertices(), &cell.points);
        assert_eq!(leaves[0].kind(), SolidKind::Pyramid);
        assert!(!leaves[0].material().wireframe);
        assert_eq!(*leaves[0].transform(), Transform::identity());
    }

    #[test]
    fn test_non_positive_depth_is_single_leaf() {
        assert_eq!(subdivide(&lesson_cell(), 0, None).len(), 1);
        assert_eq!(subdivide(&lesson_cell(), -3, None).len(), 1);
        assert_eq!(leaf_count(0), Some(1));
        assert_eq!(leaf_count(-3), Some(1));
    }

    #[test]
    fn test_depth_two_children() {
        let leaves = subdivide(&lesson_cell(), 2, None);
        assert_eq!(leaves.len(), 5);

        // midpoints of the lesson cell
        let v0 = v(0.0, 0.0, -10.0);
        let v1 = v(0.0, 0.0, 10.0);
        let v2 = v(10.0, 0.0, 0.0);
        let v3 = v(0.0, 10.0, 0.0);
        let v4 = v(-10.0, 0.0, 0.0);
        let v01 = v(0.0, 0.0, 0.0);
        let v02 = v(5.0, 0.0, -5.0);
        let v03 = v(0.0, 5.0, -5.0);
        let v12 = v(5.0, 0.0, 5.0);
        let v13 = v(0.0, 5.0, 5.0);
        let v23 = v(5.0, 5.0, 0.0);
        let v04 = v(-5.0, 0.0, -5.0);
        let v14 = v(-5.0, 0.0, 5.0);
        let v34 = v(-5.0, 5.0, 0.0);

        let expected = [
            [v0, v01, v02, v03, v04],
            [v04, v14, v01, v34, v4],
            [v01, v1, v12, v13, v14],
            [v02, v12, v2, v23, v01],
            [v03, v13, v23, v3, v34],
        ];

        for (leaf, points) in leaves.iter().zip(expected.iter()) {
            assert_eq!(leaf.vertices().len(), 5);
            for (got, want) in leaf.vertices().iter().zip(points.iter()) {
                assert_relative_eq!(*got, *want, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_depth_three_leaf_count() {
        let leaves = subdivide(&lesson_cell(), 3, None);
        assert_eq!(leaves.len(), 25);
        assert_eq!(leaf_count(3), Some(25));
        assert_eq!(leaf_count(5), Some(625));
    }

    #[test]
    fn test_leaf_count_overflow_is_none() {
        assert_eq!(leaf_count(14), Some(5usize.pow(13)));
        assert_eq!(leaf_count(29), None);
        assert_eq!(leaf_count(i32::MAX), None);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_leaf_count_limit_on_64_bit() {
        assert_eq!(leaf_count(28), Some(5usize.pow(27)));
    }

    #[test]
    fn test_recursion_stops_at_depth() {
        // two levels of midpoints over a grid of 10 land on a grid of 2.5
        let leaves = subdivide(&lesson_cell(), 3, None);
        for leaf in &leaves {
            for c in leaf.vertices().iter().flat_map(|p| p.iter()) {
                assert!((-10.0..=10.0).contains(c));
                let steps = c / 2.5;
                assert!((steps - steps.round()).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_streaming_matches_collected() {
        let mut streamed = Vec::new();
        subdivide_with(&lesson_cell(), 3, Some(Color::BLACK), &mut |leaf| {
            streamed.push(leaf)
        });
        assert_eq!(streamed, subdivide(&lesson_cell(), 3, Some(Color::BLACK)));
        assert!(streamed.iter().all(|l| l.material().color == Color::BLACK));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for depth in 1..=4 {
            assert_eq!(
                subdivide_par(&lesson_cell(), depth, None),
                subdivide(&lesson_cell(), depth, None)
            );
        }
    }
}
