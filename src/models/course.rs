//! Course model.
//!
//! A course is taught by one teacher to a fixed group of students and
//! needs a given number of lectures spread over a minimum number of
//! distinct days.

use serde::{Deserialize, Serialize};

/// A course to be timetabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course name.
    pub name: String,
    /// Teacher name. Courses sharing a teacher conflict.
    pub teacher: String,
    /// Number of lectures to schedule.
    pub lectures: u32,
    /// Lectures should cover at least this many distinct days.
    pub min_working_days: u32,
    /// Enrolled students (compared against room capacity).
    pub students: u32,
}

impl Course {
    /// Creates a course with one lecture, no students and no day spread.
    pub fn new(name: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            teacher: teacher.into(),
            lectures: 1,
            min_working_days: 0,
            students: 0,
        }
    }

    /// Sets the number of lectures.
    pub fn with_lectures(mut self, lectures: u32) -> Self {
        self.lectures = lectures;
        self
    }

    /// Sets the minimum number of working days.
    pub fn with_min_working_days(mut self, days: u32) -> Self {
        self.min_working_days = days;
        self
    }

    /// Sets the number of enrolled students.
    pub fn with_students(mut self, students: u32) -> Self {
        self.students = students;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("SceCosC", "Ocra")
            .with_lectures(3)
            .with_min_working_days(3)
            .with_students(30);

        assert_eq!(c.name, "SceCosC");
        assert_eq!(c.teacher, "Ocra");
        assert_eq!(c.lectures, 3);
        assert_eq!(c.min_working_days, 3);
        assert_eq!(c.students, 30);
    }

    #[test]
    fn test_course_defaults() {
        let c = Course::new("X", "T");
        assert_eq!(c.lectures, 1);
        assert_eq!(c.min_working_days, 0);
        assert_eq!(c.students, 0);
    }
}
