//! Instance file parser (ITC-2007 curriculum-based format).
//!
//! ```text
//! Name: Toy
//! Courses: 2
//! Rooms: 1
//! Days: 5
//! Periods_per_day: 4
//! Curricula: 1
//! Constraints: 1
//!
//! COURSES:
//! Math Gauss 3 3 30
//! Physics Bohr 2 2 25
//!
//! ROOMS:
//! A 32
//!
//! CURRICULA:
//! Y1 2 Math Physics
//!
//! UNAVAILABILITY_CONSTRAINTS:
//! Math 0 0
//!
//! END.
//! ```
//!
//! The format is whitespace-delimited; line breaks only matter for error
//! positions. Labels are matched case-insensitively with or without the
//! trailing colon.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::TimetableError;
use crate::models::{Course, Instance, InstanceBuilder, Room};
use crate::validation::{ValidationError, validate_horizon};

/// A malformed instance file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line of the offending token (last line at end of input).
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// Categories of instance parse errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("expected label '{expected}', found '{found}'")]
    ExpectedLabel { expected: &'static str, found: String },
    #[error("invalid {field} '{found}'")]
    InvalidNumber { field: &'static str, found: String },
    #[error("unknown course '{0}'")]
    UnknownCourse(String),
    #[error("unexpected trailing token '{0}'")]
    TrailingInput(String),
    #[error("{}", join(.0))]
    Invalid(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let tokens: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)))
            .collect();
        let last_line = text.lines().count().max(1);
        Self {
            tokens,
            pos: 0,
            last_line,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        let line = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map_or(self.last_line, |&(line, _)| line);
        ParseError { line, kind }
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        match self.tokens.get(self.pos) {
            Some(&(_, token)) => {
                self.pos += 1;
                Ok(token)
            }
            None => Err(ParseError {
                line: self.last_line,
                kind: ParseErrorKind::UnexpectedEof(expected),
            }),
        }
    }

    fn invalid(&self, error: ValidationError) -> ParseError {
        self.error(ParseErrorKind::Invalid(vec![error]))
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(|&(_, t)| t)
    }

    fn label(&mut self, expected: &'static str) -> Result<(), ParseError> {
        let token = self.next(expected)?;
        if token.trim_end_matches(':').eq_ignore_ascii_case(expected) {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::ExpectedLabel {
                expected,
                found: token.to_string(),
            }))
        }
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T, ParseError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| {
            self.error(ParseErrorKind::InvalidNumber {
                field,
                found: token.to_string(),
            })
        })
    }

    fn labelled_number<T: FromStr>(&mut self, label: &'static str) -> Result<T, ParseError> {
        self.label(label)?;
        self.number(label)
    }
}

/// Parses an instance from text.
pub fn parse_instance(text: &str) -> Result<Instance, ParseError> {
    let mut t = Tokens::new(text);

    t.label("Name")?;
    let name = t.next("instance name")?;
    let n_courses: usize = t.labelled_number("Courses")?;
    let n_rooms: usize = t.labelled_number("Rooms")?;
    let days: usize = t.labelled_number("Days")?;
    let periods_per_day: usize = t.labelled_number("Periods_per_day")?;
    if let Some(error) = validate_horizon(days, periods_per_day) {
        return Err(t.invalid(error));
    }
    let n_curricula: usize = t.labelled_number("Curricula")?;
    let n_constraints: usize = t.labelled_number("Constraints")?;

    let mut builder = InstanceBuilder::new(name, days, periods_per_day);
    let mut course_names = HashSet::new();

    t.label("COURSES")?;
    for _ in 0..n_courses {
        let name = t.next("course name")?;
        if !course_names.insert(name) {
            return Err(t.invalid(ValidationError::duplicate_name("course", name)));
        }
        let teacher = t.next("teacher name")?;
        let lectures = t.number("lecture count")?;
        let min_working_days = t.number("minimum working days")?;
        let students = t.number("student count")?;
        builder = builder.with_course(
            Course::new(name, teacher)
                .with_lectures(lectures)
                .with_min_working_days(min_working_days)
                .with_students(students),
        );
    }

    t.label("ROOMS")?;
    let mut room_names = HashSet::new();
    for _ in 0..n_rooms {
        let name = t.next("room name")?;
        if !room_names.insert(name) {
            return Err(t.invalid(ValidationError::duplicate_name("room", name)));
        }
        let capacity = t.number("room capacity")?;
        builder = builder.with_room(Room::new(name, capacity));
    }

    t.label("CURRICULA")?;
    let mut curriculum_names = HashSet::new();
    for _ in 0..n_curricula {
        let name = t.next("curriculum name")?;
        if !curriculum_names.insert(name) {
            return Err(t.invalid(ValidationError::duplicate_name("curriculum", name)));
        }
        let size: usize = t.number("curriculum size")?;
        let mut members = Vec::new();
        for _ in 0..size {
            let member = t.next("curriculum member")?;
            if !course_names.contains(member) {
                return Err(t.error(ParseErrorKind::UnknownCourse(member.to_string())));
            }
            if members.contains(&member) {
                return Err(t.invalid(ValidationError::duplicate_member(name, member)));
            }
            members.push(member);
        }
        builder = builder.with_curriculum(name, members);
    }

    t.label("UNAVAILABILITY_CONSTRAINTS")?;
    for _ in 0..n_constraints {
        let course = t.next("constrained course")?;
        if !course_names.contains(course) {
            return Err(t.error(ParseErrorKind::UnknownCourse(course.to_string())));
        }
        let day = t.number("day")?;
        let slot = t.number("period")?;
        if day >= days || slot >= periods_per_day {
            return Err(t.invalid(ValidationError::period_out_of_range(course, day, slot)));
        }
        builder = builder.with_unavailability(course, day, slot);
    }

    if let Some(token) = t.peek() {
        t.pos += 1;
        if !token.eq_ignore_ascii_case("END.") {
            return Err(t.error(ParseErrorKind::TrailingInput(token.to_string())));
        }
    }

    // Only whole-instance checks (rooms for the lectures) remain here.
    builder.build().map_err(|errors| ParseError {
        line: t.last_line,
        kind: ParseErrorKind::Invalid(errors),
    })
}

/// Reads and parses an instance file.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance, TimetableError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| TimetableError::io(path, e))?;
    let instance = parse_instance(&text).map_err(|source| TimetableError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        name = instance.name(),
        courses = instance.courses().len(),
        rooms = instance.rooms().len(),
        curricula = instance.curricula().len(),
        periods = instance.periods(),
        "instance loaded"
    );
    Ok(instance)
}
