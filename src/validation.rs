//! Input validation for timetabling instances.
//!
//! Checks structural integrity of the raw, name-based instance data before
//! it is resolved into an [`Instance`](crate::models::Instance). Detects:
//! - Empty or oversized planning horizon
//! - Duplicate course, room or curriculum names
//! - Curriculum members and unavailability entries naming unknown courses
//! - Unavailability entries outside the horizon
//! - Lectures to place with no room to place them in

use std::collections::HashSet;

use crate::models::InstanceBuilder;

/// Largest supported horizon (`days × periods_per_day`).
pub const MAX_PERIODS: usize = 1 << 16;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Zero days or zero periods per day.
    EmptyHorizon,
    /// More than [`MAX_PERIODS`] periods in total.
    HorizonTooLarge,
    /// Two entities of the same kind share a name.
    DuplicateName,
    /// A reference to a course that does not exist.
    UnknownCourse,
    /// A curriculum lists the same course twice.
    DuplicateMember,
    /// An unavailability entry lies outside the horizon.
    PeriodOutOfRange,
    /// Lectures exist but no rooms do.
    NoRooms,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn duplicate_name(entity: &str, name: &str) -> Self {
        Self::new(
            ValidationErrorKind::DuplicateName,
            format!("Duplicate {entity} name: {name}"),
        )
    }

    pub(crate) fn duplicate_member(curriculum: &str, course: &str) -> Self {
        Self::new(
            ValidationErrorKind::DuplicateMember,
            format!("Curriculum '{curriculum}' lists course '{course}' more than once"),
        )
    }

    pub(crate) fn period_out_of_range(course: &str, day: usize, slot: usize) -> Self {
        Self::new(
            ValidationErrorKind::PeriodOutOfRange,
            format!(
                "Unavailability for '{course}' at day {day}, slot {slot} is outside the horizon"
            ),
        )
    }
}

/// Checks that `days × periods_per_day` is non-empty and at most [`MAX_PERIODS`].
pub fn validate_horizon(days: usize, periods_per_day: usize) -> Option<ValidationError> {
    if days == 0 || periods_per_day == 0 {
        return Some(ValidationError::new(
            ValidationErrorKind::EmptyHorizon,
            format!(
                "Horizon must be non-empty (days = {days}, periods per day = {periods_per_day})"
            ),
        ));
    }
    let fits = days
        .checked_mul(periods_per_day)
        .is_some_and(|periods| periods <= MAX_PERIODS);
    (!fits).then(|| {
        ValidationError::new(
            ValidationErrorKind::HorizonTooLarge,
            format!(
                "Horizon of {days} days × {periods_per_day} periods exceeds {MAX_PERIODS} periods"
            ),
        )
    })
}

/// Validates raw instance data.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance_input(input: &InstanceBuilder) -> ValidationResult {
    let mut errors: Vec<ValidationError> =
        validate_horizon(input.days, input.periods_per_day).into_iter().collect();

    let mut course_names = HashSet::new();
    for c in &input.courses {
        if !course_names.insert(c.name.as_str()) {
            errors.push(ValidationError::duplicate_name("course", &c.name));
        }
    }

    let mut room_names = HashSet::new();
    for r in &input.rooms {
        if !room_names.insert(r.name.as_str()) {
            errors.push(ValidationError::duplicate_name("room", &r.name));
        }
    }

    let mut curriculum_names = HashSet::new();
    for (name, members) in &input.curricula {
        if !curriculum_names.insert(name.as_str()) {
            errors.push(ValidationError::duplicate_name("curriculum", name));
        }

        let mut seen = HashSet::new();
        for m in members {
            if !course_names.contains(m.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCourse,
                    format!("Curriculum '{name}' references unknown course '{m}'"),
                ));
            } else if !seen.insert(m.as_str()) {
                errors.push(ValidationError::duplicate_member(name, m));
            }
        }
    }

    for (course, day, slot) in &input.unavailability {
        if !course_names.contains(course.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!("Unavailability constraint references unknown course '{course}'"),
            ));
        }
        if *day >= input.days || *slot >= input.periods_per_day {
            errors.push(ValidationError::period_out_of_range(course, *day, *slot));
        }
    }

    let lectures: u64 = input.courses.iter().map(|c| u64::from(c.lectures)).sum();
    if lectures > 0 && input.rooms.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoRooms,
            format!("{lectures} lectures to schedule but no rooms defined"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Instance, Room};

    fn base() -> InstanceBuilder {
        Instance::builder("t", 2, 2)
            .with_course(Course::new("A", "T1").with_lectures(2))
            .with_course(Course::new("B", "T2"))
            .with_room(Room::new("R1", 10))
    }

    fn kinds(b: &InstanceBuilder) -> Vec<ValidationErrorKind> {
        validate_instance_input(b)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        let b = base().with_curriculum("G", ["A", "B"]).with_unavailability("A", 1, 1);
        assert!(validate_instance_input(&b).is_ok());
    }

    #[test]
    fn test_oversized_horizon() {
        let overflow = InstanceBuilder {
            days: usize::MAX,
            periods_per_day: 2,
            ..base()
        };
        assert_eq!(kinds(&overflow), vec![ValidationErrorKind::HorizonTooLarge]);

        let huge = InstanceBuilder {
            days: MAX_PERIODS + 1,
            periods_per_day: 1,
            ..base()
        };
        assert_eq!(kinds(&huge), vec![ValidationErrorKind::HorizonTooLarge]);

        let limit = InstanceBuilder {
            days: MAX_PERIODS / 4,
            periods_per_day: 4,
            ..base()
        };
        assert!(validate_instance_input(&limit).is_ok());
    }

    #[test]
    fn test_empty_horizon() {
        let b = Instance::builder("t", 0, 4);
        assert_eq!(kinds(&b), vec![ValidationErrorKind::EmptyHorizon]);
    }

    #[test]
    fn test_duplicate_names() {
        let b = base()
            .with_course(Course::new("A", "T3"))
            .with_room(Room::new("R1", 5))
            .with_curriculum("G", ["A"])
            .with_curriculum("G", ["B"]);
        let errors = validate_instance_input(&b).unwrap_err();
        let dups = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateName)
            .count();
        assert_eq!(dups, 3);
        assert!(errors.iter().any(|e| e.message.contains("room")));
    }

    #[test]
    fn test_unknown_curriculum_member() {
        let b = base().with_curriculum("G", ["A", "Nope"]);
        assert_eq!(kinds(&b), vec![ValidationErrorKind::UnknownCourse]);
    }

    #[test]
    fn test_duplicate_member() {
        let b = base().with_curriculum("G", ["A", "A"]);
        assert_eq!(kinds(&b), vec![ValidationErrorKind::DuplicateMember]);
    }

    #[test]
    fn test_unavailability_checks() {
        let b = base()
            .with_unavailability("Ghost", 0, 0)
            .with_unavailability("A", 2, 0)
            .with_unavailability("A", 0, 2);
        assert_eq!(
            kinds(&b),
            vec![
                ValidationErrorKind::UnknownCourse,
                ValidationErrorKind::PeriodOutOfRange,
                ValidationErrorKind::PeriodOutOfRange,
            ]
        );
    }

    #[test]
    fn test_no_rooms() {
        let b = Instance::builder("t", 1, 1).with_course(Course::new("A", "T"));
        assert_eq!(kinds(&b), vec![ValidationErrorKind::NoRooms]);

        // No lectures, no rooms: nothing to place, nothing wrong.
        let empty =
            Instance::builder("t", 1, 1).with_course(Course::new("A", "T").with_lectures(0));
        assert!(validate_instance_input(&empty).is_ok());
    }
}
