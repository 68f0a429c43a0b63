//! Timetable (solution) model.
//!
//! A timetable is the set of lecture placements produced by decoding one
//! chromosome. Lectures the decoder could not place are kept alongside so
//! that the condition stays visible to callers.

use serde::{Deserialize, Serialize};

use super::{CourseId, EventRef, PeriodId, RoomId};

/// A lecture placed in a room at a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Course of the lecture.
    pub course: CourseId,
    /// Lecture index within the course (0-based).
    pub lecture: u32,
    /// Period the lecture is taught in.
    pub period: PeriodId,
    /// Room the lecture is taught in.
    pub room: RoomId,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(course: CourseId, lecture: u32, period: PeriodId, room: RoomId) -> Self {
        Self {
            course,
            lecture,
            period,
            room,
        }
    }
}

/// A decoded timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Placed lectures, in decode order.
    pub assignments: Vec<Assignment>,
    /// Lectures for which no feasible (period, room) existed.
    pub unplaced: Vec<EventRef>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Records a lecture that could not be placed.
    pub fn add_unplaced(&mut self, event: EventRef) {
        self.unplaced.push(event);
    }

    /// Whether every lecture was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of unplaced lectures.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timetable {
        let mut t = Timetable::new();
        t.add_assignment(Assignment::new(CourseId::new(0), 0, PeriodId::new(0), RoomId::new(0)));
        t.add_assignment(Assignment::new(CourseId::new(0), 1, PeriodId::new(1), RoomId::new(0)));
        t.add_assignment(Assignment::new(CourseId::new(1), 0, PeriodId::new(0), RoomId::new(1)));
        t
    }

    #[test]
    fn test_counts() {
        let t = sample();
        assert_eq!(t.assignment_count(), 3);
        assert_eq!(t.unplaced_count(), 0);
    }

    #[test]
    fn test_unplaced_tracking() {
        let mut t = sample();
        assert!(t.is_complete());
        t.add_unplaced(EventRef {
            course: CourseId::new(2),
            lecture: 0,
        });
        assert!(!t.is_complete());
        assert_eq!(t.unplaced_count(), 1);
    }

    #[test]
    fn test_serde_shape() {
        let a = Assignment::new(CourseId::new(1), 0, PeriodId::new(3), RoomId::new(2));
        let json = serde_json::to_value(a).unwrap();
        assert_eq!(json["course"], 1);
        assert_eq!(json["period"], 3);
        assert_eq!(json["room"], 2);
    }
}
