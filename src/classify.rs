// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Post-sweep boundary classification.
//!
//! Once the sweep has finished, every segment's `prev` link is final and the
//! passes below can derive, in event order, which rings, polygons and
//! multipolygons lie on and around each segment — and from that which
//! segments survive into the result. Computing the values eagerly in event
//! order replaces a lazy per-segment cache: a segment's values only depend
//! on segments whose left event was processed earlier.

use crate::operand::{MultiPolyId, OperandSet, PolyId, RingIdSet};
use crate::segment::{Segment, SegmentStore};
use crate::sweep_event::SweepEvent;
use crate::Operation;
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Union-find over segment ids tracking classes of coincident segments.
///
/// Coincidence is an equivalence relation; the sweep only ever reports
/// neighbouring pairs, and the union-find closes the relation transitively.
#[derive(Debug, Default)]
pub struct Coincidence {
    parent: Vec<usize>,
}

impl Coincidence {
    pub fn with_capacity(n: usize) -> Self {
        Coincidence {
            parent: (0..n).collect(),
        }
    }

    fn ensure(&mut self, id: usize) {
        while self.parent.len() <= id {
            self.parent.push(self.parent.len());
        }
    }

    /// Representative of the class of `id`.
    pub fn find(&mut self, id: usize) -> usize {
        self.ensure(id);
        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression.
        let mut current = id;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the classes of `a` and `b`.
    pub fn join(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // The smaller id becomes the representative, keeping roots
            // deterministic.
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

/// Derived boundary-classification values of one segment.
#[derive(Clone, Debug, Default)]
pub struct Classification {
    /// Crossing the segment from below crosses into its own ring: boundary
    /// crossings of one ring alternate along the `prev` chain.
    pub enters_ring: bool,
    /// Rings with an edge on this segment (one per coincident segment).
    pub rings_on_edge: RingIdSet,
    /// The on-edge rings entered when crossing from below.
    pub rings_entering: RingIdSet,
    /// The on-edge rings exited when crossing from below.
    pub rings_exiting: RingIdSet,
    /// Rings the segment lies strictly inside.
    pub rings_inside_of: RingIdSet,
    /// Whether this edge can bound output geometry for its ring.
    pub valid: bool,
    /// Crossing from below enters the ring's polygon. Only meaningful when
    /// `valid`.
    pub enters_poly: bool,
    /// Polygons the segment lies strictly inside.
    pub polys_inside_of: BTreeSet<PolyId>,
    pub multi_polys_inside_of: BTreeSet<MultiPolyId>,
    /// Multipolygons whose interior lies on the entering side.
    pub slp_enters: BTreeSet<MultiPolyId>,
    /// Multipolygons whose interior lies on the exiting side.
    pub slp_exits: BTreeSet<MultiPolyId>,
}

/// The operation being computed, threaded through classification.
pub struct OperationCtx {
    pub operation: Operation,
    /// Number of operand multipolygons.
    pub total_multi_polys: usize,
    /// The subject operand; required for `Difference`.
    pub subject: Option<MultiPolyId>,
}

/// Decide all segments' classification and mark the ones included in the
/// result of the operation.
pub fn classify_segments<F>(
    sorted_events: &[Rc<SweepEvent<F>>],
    store: &SegmentStore<F>,
    operands: &OperandSet,
    coincidence: &mut Coincidence,
    ctx: &OperationCtx,
) where
    F: CoordinateType + Float,
{
    // Coincidence classes and their winners. Only the winner of a class —
    // the member with the smallest ring id — may enter the result.
    let roots: Vec<usize> = (0..store.len()).map(|id| coincidence.find(id)).collect();

    let mut classes: BTreeMap<usize, Vec<Rc<Segment<F>>>> = BTreeMap::new();
    for segment in store.iter() {
        classes
            .entry(roots[segment.id()])
            .or_insert_with(Vec::new)
            .push(segment.clone());
    }

    let mut is_winner = vec![false; store.len()];
    for members in classes.values() {
        let winner = members
            .iter()
            .min_by_key(|s| (s.ring_in(), s.id()))
            .expect("coincidence class cannot be empty");
        is_winner[winner.id()] = true;
    }

    let left_events = || sorted_events.iter().filter(|e| e.is_left());

    // Pass 1: ring-boundary alternation along the `prev` chains.
    for event in left_events() {
        let segment = event.segment();
        let enters_ring = match segment.prev_of_ring(segment.ring_in()) {
            None => true,
            Some(below) => !below.classification.borrow().enters_ring,
        };
        segment.classification.borrow_mut().enters_ring = enters_ring;
    }

    // Pass 2: ring sets, validity and the polygon transition.
    for event in left_events() {
        let segment = event.segment();
        let coincidents = &classes[&roots[segment.id()]];

        let mut rings_on_edge = RingIdSet::new();
        let mut rings_entering = RingIdSet::new();
        let mut rings_exiting = RingIdSet::new();
        for c in coincidents {
            rings_on_edge.insert(c.ring_in());
            if c.classification.borrow().enters_ring {
                rings_entering.insert(c.ring_in());
            } else {
                rings_exiting.insert(c.ring_in());
            }
        }

        let rings_inside_of = match segment.prev() {
            None => RingIdSet::new(),
            Some(below) => {
                let below_cls = below.classification.borrow();
                if roots[below.id()] == roots[segment.id()] {
                    // Coincident with the edge below: same insideness.
                    below_cls.rings_inside_of.clone()
                } else {
                    let mut inside = below_cls.rings_inside_of.clone();
                    for &ring in &below_cls.rings_entering {
                        inside.insert(ring);
                    }
                    for ring in &below_cls.rings_exiting {
                        inside.remove(ring);
                    }
                    // Edge-adjacent rings are on, not inside.
                    for ring in &rings_on_edge {
                        inside.remove(ring);
                    }
                    inside
                }
            }
        };

        let ring = operands.ring(segment.ring_in());
        let poly = operands.poly(ring.poly);
        let valid = ring.is_valid(poly, &rings_entering, &rings_exiting, &rings_inside_of);

        let mut cls = segment.classification.borrow_mut();
        cls.enters_poly = ring.is_exterior == cls.enters_ring;
        cls.rings_on_edge = rings_on_edge;
        cls.rings_entering = rings_entering;
        cls.rings_exiting = rings_exiting;
        cls.rings_inside_of = rings_inside_of;
        cls.valid = valid;
    }

    // Pass 3: polygon and multipolygon sets, then the inclusion predicate.
    for event in left_events() {
        let segment = event.segment();
        let coincidents = &classes[&roots[segment.id()]];

        let (rings_inside_of, rings_on_edge) = {
            let cls = segment.classification.borrow();
            (cls.rings_inside_of.clone(), cls.rings_on_edge.clone())
        };

        let candidate_polys: BTreeSet<PolyId> = rings_inside_of
            .iter()
            .map(|&ring| operands.ring(ring).poly)
            .collect();
        let polys_inside_of: BTreeSet<PolyId> = candidate_polys
            .into_iter()
            .filter(|&poly| operands.poly(poly).is_inside(&rings_on_edge, &rings_inside_of))
            .collect();
        let multi_polys_inside_of: BTreeSet<MultiPolyId> = polys_inside_of
            .iter()
            .map(|&poly| operands.poly(poly).multi_poly)
            .collect();

        let mut slp_enters = multi_polys_inside_of.clone();
        let mut slp_exits = multi_polys_inside_of.clone();
        for c in coincidents {
            let c_cls = c.classification.borrow();
            if !c_cls.valid {
                continue;
            }
            let multi_poly = operands.ring(c.ring_in()).multi_poly;
            if c_cls.enters_poly {
                slp_enters.insert(multi_poly);
            } else {
                slp_exits.insert(multi_poly);
            }
        }

        let included = is_winner[segment.id()] && included_in_result(ctx, &slp_enters, &slp_exits);

        let mut cls = segment.classification.borrow_mut();
        cls.polys_inside_of = polys_inside_of;
        cls.multi_polys_inside_of = multi_polys_inside_of;
        cls.slp_enters = slp_enters;
        cls.slp_exits = slp_exits;
        drop(cls);

        if included {
            segment.mark_in_result();
        }
    }
}

/// The operation-specific inclusion predicate over the multipolygons present
/// on the two sides of a segment.
fn included_in_result(
    ctx: &OperationCtx,
    enters: &BTreeSet<MultiPolyId>,
    exits: &BTreeSet<MultiPolyId>,
) -> bool {
    match ctx.operation {
        // A union boundary has operand interior on exactly one side.
        Operation::Union => enters.is_empty() != exits.is_empty(),
        // An intersection boundary has all operands on its fuller side.
        Operation::Intersection => enters.len().max(exits.len()) == ctx.total_multi_polys,
        // A xor boundary separates odd from even coverage depth.
        Operation::Xor => (enters.len() as isize - exits.len() as isize).abs() % 2 == 1,
        // A difference boundary has the subject alone on exactly one side.
        Operation::Difference => {
            let subject = ctx
                .subject
                .expect("difference requires a subject operand");
            let enters_subject_only = enters.len() == 1 && enters.contains(&subject);
            let exits_subject_only = exits.len() == 1 && exits.contains(&subject);
            enters_subject_only != exits_subject_only
        }
    }
}
