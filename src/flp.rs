// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tolerant floating-point predicates.
//!
//! Every coordinate comparison of the sweep goes through the helpers in this
//! module; raw `==` on coordinates is never used. A single relative epsilon
//! keeps near-coincident input vertices and rounded intersection points from
//! flip-flopping between distinct sweep positions.

use iron_shapes::point::Point;
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::cmp::Ordering;

/// Relative tolerance of all coordinate comparisons.
///
/// Two coordinates `a` and `b` are considered equal when
/// `|a - b| <= EPSILON * max(1, |a|, |b|)`.
pub const EPSILON: f64 = 1e-15;

fn eps<F: Float>() -> F {
    F::from(EPSILON).unwrap()
}

/// Tolerant equality of two coordinates.
pub fn flp_eq<F: Float>(a: F, b: F) -> bool {
    let scale = F::one().max(a.abs()).max(b.abs());
    (a - b).abs() <= eps::<F>() * scale
}

/// Tolerant strict `a < b`.
pub fn flp_lt<F: Float>(a: F, b: F) -> bool {
    a < b && !flp_eq(a, b)
}

/// Tolerant three-way comparison.
pub fn flp_compare<F: Float>(a: F, b: F) -> Ordering {
    if flp_eq(a, b) {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Tolerant equality of two points.
pub fn are_points_equal<F: CoordinateType + Float>(a: Point<F>, b: Point<F>) -> bool {
    flp_eq(a.x, b.x) && flp_eq(a.y, b.y)
}

/// Lexicographic point order: smaller x first, ties broken by smaller y.
/// This defines "leftmost" for the sweep.
pub fn compare_points<F: CoordinateType + Float>(a: Point<F>, b: Point<F>) -> Ordering {
    flp_compare(a.x, b.x).then_with(|| flp_compare(a.y, b.y))
}

/// `u x v` of the vectors `(ux, uy)` and `(vx, vy)`.
pub fn cross<F: Float>(ux: F, uy: F, vx: F, vy: F) -> F {
    ux * vy - uy * vx
}

/// Sign of `(b - a) x (p - a)`.
///
/// `Greater` if `p` lies above the line through `a` and `b` (directed from
/// `a` to `b`), `Equal` if the three points are colinear, `Less` if below.
pub fn compare_vector_angles<F: CoordinateType + Float>(
    p: Point<F>,
    a: Point<F>,
    b: Point<F>,
) -> Ordering {
    let k = cross(b.x - a.x, b.y - a.y, p.x - a.x, p.y - a.y);
    flp_compare(k, F::zero())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equality_is_tolerant() {
        assert!(flp_eq(1.0, 1.0 + 1e-16));
        assert!(flp_eq(0.1 + 0.2, 0.3));
        assert!(!flp_eq(1.0, 1.0 + 1e-14));

        // Relative: large magnitudes widen the tolerance.
        assert!(flp_eq(1e16, 1e16 + 1.0));
        assert!(!flp_eq(1e16, 1e16 + 1e3));
    }

    #[test]
    fn strict_less_than_excludes_equal() {
        assert!(flp_lt(1.0, 2.0));
        assert!(!flp_lt(1.0, 1.0 + 1e-16));
        assert!(!flp_lt(2.0, 1.0));
    }

    #[test]
    fn point_order_is_lexicographic() {
        let p = |x, y| Point::new(x, y);
        assert_eq!(compare_points(p(0.0, 5.0), p(1.0, 0.0)), Ordering::Less);
        assert_eq!(compare_points(p(1.0, 0.0), p(1.0, 1.0)), Ordering::Less);
        assert_eq!(compare_points(p(1.0, 1.0 + 1e-16), p(1.0, 1.0)), Ordering::Equal);
        assert_eq!(compare_points(p(2.0, 0.0), p(1.0, 9.0)), Ordering::Greater);
    }

    #[test]
    fn vector_angle_sign() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        assert_eq!(compare_vector_angles(Point::new(1.0, 1.0), a, b), Ordering::Greater);
        assert_eq!(compare_vector_angles(Point::new(1.0, -1.0), a, b), Ordering::Less);
        assert_eq!(compare_vector_angles(Point::new(1.0, 0.0), a, b), Ordering::Equal);
    }
}
