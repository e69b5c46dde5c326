// Copyright (c) 2018-2021 Thomas Kramer.
// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Input model of one Boolean operation: rings, polygons and multipolygons.
//!
//! The registry assigns monotonically increasing ids to every ring, polygon
//! and multipolygon. Ids are the only identities used for tie-breaking and
//! set membership, which keeps results reproducible across runs and
//! platforms.

use std::collections::BTreeSet;

pub type RingId = usize;
pub type PolyId = usize;
pub type MultiPolyId = usize;

/// Ordered set of ring ids.
pub type RingIdSet = BTreeSet<RingId>;

/// One closed input contour, either the exterior hull of a polygon or a hole.
#[derive(Clone, Debug)]
pub struct Ring {
    pub id: RingId,
    pub poly: PolyId,
    pub multi_poly: MultiPolyId,
    pub is_exterior: bool,
}

/// One polygon: an exterior ring plus zero or more holes.
#[derive(Clone, Debug)]
pub struct Poly {
    pub id: PolyId,
    pub multi_poly: MultiPolyId,
    pub exterior: RingId,
    pub interiors: Vec<RingId>,
}

/// One operand of the Boolean operation: a set of polygons.
#[derive(Clone, Debug)]
pub struct MultiPoly {
    pub id: MultiPolyId,
    pub polys: Vec<PolyId>,
    pub is_subject: bool,
}

impl Ring {
    /// Whether an edge of this ring can bound output geometry, given the
    /// rings whose boundary the edge lies on (partitioned into those the
    /// sweep line enters and exits there) and the rings it lies strictly
    /// inside.
    pub fn is_valid(
        &self,
        poly: &Poly,
        entering: &RingIdSet,
        exiting: &RingIdSet,
        inside_of: &RingIdSet,
    ) -> bool {
        if entering.contains(&self.id) && exiting.contains(&self.id) {
            // The ring doubles back on itself along this edge; its boundary
            // crossings cancel and the edge bounds nothing.
            return false;
        }
        if self.is_exterior {
            // Duplicate and nested exterior windings fold away.
            !inside_of.contains(&self.id)
        } else {
            // A hole only counts where it lies within the closed exterior.
            inside_of.contains(&poly.exterior)
                || entering.contains(&poly.exterior)
                || exiting.contains(&poly.exterior)
        }
    }
}

impl Poly {
    /// Whether a segment with the given ring classification lies strictly
    /// inside this polygon. Lying on any of the polygon's own ring edges
    /// disqualifies, which prevents double-counting edge-adjacent polygons.
    pub fn is_inside(&self, on_edge: &RingIdSet, inside_of: &RingIdSet) -> bool {
        if on_edge.contains(&self.exterior) || !inside_of.contains(&self.exterior) {
            return false;
        }
        self.interiors
            .iter()
            .all(|hole| !on_edge.contains(hole) && !inside_of.contains(hole))
    }
}

/// Registry of all operands of one computation.
#[derive(Default, Debug)]
pub struct OperandSet {
    pub rings: Vec<Ring>,
    pub polys: Vec<Poly>,
    pub multi_polys: Vec<MultiPoly>,
}

impl OperandSet {
    pub fn add_multi_poly(&mut self, is_subject: bool) -> MultiPolyId {
        let id = self.multi_polys.len();
        self.multi_polys.push(MultiPoly {
            id,
            polys: Vec::new(),
            is_subject,
        });
        id
    }

    pub fn add_poly(&mut self, multi_poly: MultiPolyId) -> PolyId {
        let id = self.polys.len();
        self.polys.push(Poly {
            id,
            multi_poly,
            exterior: RingId::MAX,
            interiors: Vec::new(),
        });
        self.multi_polys[multi_poly].polys.push(id);
        id
    }

    /// Register a ring of `poly`. The first ring of a polygon must be its
    /// exterior.
    pub fn add_ring(&mut self, poly: PolyId, is_exterior: bool) -> RingId {
        let id = self.rings.len();
        let multi_poly = self.polys[poly].multi_poly;
        self.rings.push(Ring {
            id,
            poly,
            multi_poly,
            is_exterior,
        });
        if is_exterior {
            self.polys[poly].exterior = id;
        } else {
            self.polys[poly].interiors.push(id);
        }
        id
    }

    pub fn ring(&self, id: RingId) -> &Ring {
        &self.rings[id]
    }

    pub fn poly(&self, id: PolyId) -> &Poly {
        &self.polys[id]
    }

    /// Id of the subject operand, if one was tagged.
    pub fn subject(&self) -> Option<MultiPolyId> {
        self.multi_polys.iter().find(|mp| mp.is_subject).map(|mp| mp.id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// One multipoly with one poly: exterior ring 0, hole ring 1.
    fn poly_with_hole() -> OperandSet {
        let mut operands = OperandSet::default();
        let mp = operands.add_multi_poly(false);
        let poly = operands.add_poly(mp);
        operands.add_ring(poly, true);
        operands.add_ring(poly, false);
        operands
    }

    fn set(ids: &[RingId]) -> RingIdSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn exterior_nested_in_itself_is_invalid() {
        let operands = poly_with_hole();
        let ring = operands.ring(0);
        let poly = operands.poly(ring.poly);

        assert!(ring.is_valid(poly, &set(&[0]), &set(&[]), &set(&[])));
        // An inner winding of the same exterior folds away.
        assert!(!ring.is_valid(poly, &set(&[0]), &set(&[]), &set(&[0])));
    }

    #[test]
    fn doubled_back_edge_is_invalid() {
        let operands = poly_with_hole();
        let ring = operands.ring(0);
        let poly = operands.poly(ring.poly);

        assert!(!ring.is_valid(poly, &set(&[0]), &set(&[0]), &set(&[])));
    }

    #[test]
    fn hole_requires_enclosing_exterior() {
        let operands = poly_with_hole();
        let hole = operands.ring(1);
        let poly = operands.poly(hole.poly);

        assert!(hole.is_valid(poly, &set(&[1]), &set(&[]), &set(&[0])));
        // A hole outside of its exterior bounds nothing.
        assert!(!hole.is_valid(poly, &set(&[1]), &set(&[]), &set(&[])));
        // A hole edge on the exterior's edge still counts.
        assert!(hole.is_valid(poly, &set(&[0, 1]), &set(&[]), &set(&[])));
    }

    #[test]
    fn strict_insideness_of_poly() {
        let operands = poly_with_hole();
        let poly = operands.poly(0);

        // Inside the exterior, outside the hole.
        assert!(poly.is_inside(&set(&[]), &set(&[0])));
        // Inside the hole is not inside the polygon.
        assert!(!poly.is_inside(&set(&[]), &set(&[0, 1])));
        // On an edge of the polygon is not strictly inside.
        assert!(!poly.is_inside(&set(&[0]), &set(&[0])));
        assert!(!poly.is_inside(&set(&[1]), &set(&[0])));
    }
}
