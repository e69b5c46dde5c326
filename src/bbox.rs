// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Axis-aligned bounding boxes with tolerant comparisons.

use crate::flp::{flp_eq, flp_lt};
use iron_shapes::point::Point;
use iron_shapes::CoordinateType;
use num_traits::Float;

/// Axis-aligned box spanned by a lower-left and an upper-right corner.
///
/// A box may be collapsed to a horizontal or vertical segment, or to a single
/// point; overlaps of segment bounding boxes routinely are.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bbox<F: CoordinateType> {
    pub ll: Point<F>,
    pub ur: Point<F>,
}

impl<F: CoordinateType + Float> Bbox<F> {
    /// Smallest box containing both points, given in any order.
    pub fn of_points(a: Point<F>, b: Point<F>) -> Self {
        Bbox {
            ll: Point::new(a.x.min(b.x), a.y.min(b.y)),
            ur: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Tolerant containment, boundary included.
    pub fn contains(&self, p: Point<F>) -> bool {
        !flp_lt(p.x, self.ll.x)
            && !flp_lt(self.ur.x, p.x)
            && !flp_lt(p.y, self.ll.y)
            && !flp_lt(self.ur.y, p.y)
    }

    /// Overlap of two boxes, if any. Boxes touching within tolerance yield a
    /// collapsed overlap rather than none.
    pub fn overlap(&self, other: &Bbox<F>) -> Option<Bbox<F>> {
        let ll = Point::new(self.ll.x.max(other.ll.x), self.ll.y.max(other.ll.y));
        let ur = Point::new(self.ur.x.min(other.ur.x), self.ur.y.min(other.ur.y));

        if flp_lt(ur.x, ll.x) || flp_lt(ur.y, ll.y) {
            None
        } else {
            Some(Bbox { ll, ur })
        }
    }

    /// The distinct corners of the box: four in general, two for a collapsed
    /// segment, one for a point.
    pub fn corners(&self) -> Vec<Point<F>> {
        let x_collapsed = flp_eq(self.ll.x, self.ur.x);
        let y_collapsed = flp_eq(self.ll.y, self.ur.y);

        if x_collapsed && y_collapsed {
            vec![self.ll]
        } else if x_collapsed || y_collapsed {
            vec![self.ll, self.ur]
        } else {
            vec![
                self.ll,
                Point::new(self.ur.x, self.ll.y),
                self.ur,
                Point::new(self.ll.x, self.ur.y),
            ]
        }
    }
}
