// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The status structure: all segments currently crossed by the sweep line,
//! ordered by the height at which they cross it. Based on the `BTreeSet` of
//! the standard library.

use crate::compare_segments::compare_segments;
use crate::segment::Segment;
use iron_shapes::CoordinateType;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Bound;
use std::rc::Rc;

/// Wrapper giving segments the ordering of the status structure.
#[derive(Clone, Debug)]
struct ScanlineElement<F: CoordinateType>(Rc<Segment<F>>);

impl<F: CoordinateType + Float> PartialEq for ScanlineElement<F> {
    fn eq(&self, other: &Self) -> bool {
        compare_segments(&self.0, &other.0) == Ordering::Equal
    }
}

impl<F: CoordinateType + Float> Eq for ScanlineElement<F> {}

impl<F: CoordinateType + Float> PartialOrd for ScanlineElement<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare_segments(&self.0, &other.0))
    }
}

impl<F: CoordinateType + Float> Ord for ScanlineElement<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_segments(&self.0, &other.0)
    }
}

/// Ordered set of the active segments with logarithmic insert, remove and
/// neighbour queries.
pub struct ScanLine<F: CoordinateType> {
    content: BTreeSet<ScanlineElement<F>>,
}

impl<F: CoordinateType + Float> ScanLine<F> {
    pub fn new() -> Self {
        ScanLine {
            content: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn contains(&self, segment: &Rc<Segment<F>>) -> bool {
        self.content.contains(&ScanlineElement(segment.clone()))
    }

    pub fn insert(&mut self, segment: Rc<Segment<F>>) -> bool {
        self.content.insert(ScanlineElement(segment))
    }

    pub fn remove(&mut self, segment: &Rc<Segment<F>>) -> bool {
        self.content.remove(&ScanlineElement(segment.clone()))
    }

    /// The active segment directly above `segment`.
    pub fn next(&self, segment: &Rc<Segment<F>>) -> Option<&Rc<Segment<F>>> {
        self.content
            .range((
                Bound::Excluded(ScanlineElement(segment.clone())),
                Bound::Unbounded,
            ))
            .next()
            .map(|e| &e.0)
    }

    /// The active segment directly below `segment`.
    pub fn prev(&self, segment: &Rc<Segment<F>>) -> Option<&Rc<Segment<F>>> {
        self.content
            .range((
                Bound::Unbounded,
                Bound::Excluded(ScanlineElement(segment.clone())),
            ))
            .next_back()
            .map(|e| &e.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::segment::SegmentStore;

    #[test]
    fn neighbour_queries() {
        let mut store = SegmentStore::new();
        let low = store.alloc((0.0, 0.0).into(), (4.0, 0.0).into(), 0);
        let mid = store.alloc((0.0, 1.0).into(), (4.0, 1.0).into(), 0);
        let high = store.alloc((0.0, 2.0).into(), (4.0, 2.0).into(), 0);

        let mut scan_line = ScanLine::new();
        assert!(scan_line.is_empty());
        scan_line.insert(mid.clone());
        scan_line.insert(high.clone());
        scan_line.insert(low.clone());

        assert!(!scan_line.is_empty());
        assert!(scan_line.contains(&mid));

        assert!(scan_line.prev(&low).is_none());
        assert!(Rc::ptr_eq(scan_line.prev(&mid).unwrap(), &low));
        assert!(Rc::ptr_eq(scan_line.next(&mid).unwrap(), &high));
        assert!(scan_line.next(&high).is_none());

        scan_line.remove(&mid);
        assert!(Rc::ptr_eq(scan_line.next(&low).unwrap(), &high));
        assert!(!scan_line.contains(&mid));
    }
}
