//! Event indexing: flat event ids to (course, lecture) pairs.
//!
//! Events are numbered course by course in course index order, so course
//! `c` owns the contiguous range starting at the sum of the lecture counts
//! of courses `0..c`. The table is built once per instance and then shared
//! read-only by every decode.

use serde::{Deserialize, Serialize};

use super::{CourseId, EventId, Instance};

/// A resolved event: the `lecture`-th lecture (0-based) of `course`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRef {
    /// Owning course.
    pub course: CourseId,
    /// Lecture index within the course.
    pub lecture: u32,
}

/// Precomputed event → (course, lecture) lookup table.
#[derive(Debug, Clone)]
pub struct EventIndex {
    events: Vec<EventRef>,
}

impl EventIndex {
    /// Builds the table for an instance.
    pub fn new(instance: &Instance) -> Self {
        let mut events = Vec::with_capacity(instance.total_events());
        for (course, c) in instance.course_ids().zip(instance.courses()) {
            events.extend((0..c.lectures).map(|lecture| EventRef { course, lecture }));
        }
        Self { events }
    }

    /// Number of events (chromosome length).
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether there are no events at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Resolves an event id, or `None` if it is out of range.
    #[inline]
    pub fn resolve(&self, event: EventId) -> Option<EventRef> {
        self.events.get(event.index()).copied()
    }

    /// All event ids in increasing order.
    pub fn event_ids(&self) -> impl Iterator<Item = EventId> {
        (0..self.events.len()).map(EventId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Room};

    fn instance() -> Instance {
        Instance::builder("ev", 1, 4)
            .with_course(Course::new("A", "T").with_lectures(2))
            .with_course(Course::new("B", "U").with_lectures(0))
            .with_course(Course::new("C", "V").with_lectures(3))
            .with_room(Room::new("R", 1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_cumulative_ranges() {
        let idx = EventIndex::new(&instance());
        assert_eq!(idx.len(), 5);

        let expected = [(0, 0), (0, 1), (2, 0), (2, 1), (2, 2)];
        for (e, (course, lecture)) in expected.into_iter().enumerate() {
            assert_eq!(
                idx.resolve(EventId::new(e)),
                Some(EventRef {
                    course: CourseId::new(course),
                    lecture,
                })
            );
        }
        assert_eq!(idx.resolve(EventId::new(5)), None);
    }

    #[test]
    fn test_event_ids_cover_table() {
        let idx = EventIndex::new(&instance());
        let ids: Vec<usize> = idx.event_ids().map(EventId::index).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert!(!idx.is_empty());
    }
}
