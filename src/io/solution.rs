//! Solution file writer and parser.
//!
//! One line per scheduled lecture:
//!
//! ```text
//! <course> <room> <day> <slot>
//! ```
//!
//! Day and slot are 0-based. Unplaced lectures are simply absent.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::TimetableError;
use crate::models::{Assignment, CourseId, Instance, PeriodId};

/// Writes `assignments` in solution-file format.
pub fn write_solution<W: Write>(
    writer: &mut W,
    instance: &Instance,
    assignments: &[Assignment],
) -> std::io::Result<()> {
    for a in assignments {
        writeln!(
            writer,
            "{} {} {} {}",
            instance.course(a.course).name,
            instance.room(a.room).name,
            instance.day_of(a.period),
            instance.slot_of(a.period)
        )?;
    }
    Ok(())
}

/// Writes a solution file, creating missing parent directories.
pub fn save_solution(
    path: impl AsRef<Path>,
    instance: &Instance,
    assignments: &[Assignment],
) -> Result<(), TimetableError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TimetableError::io(parent, e))?;
    }
    let file = fs::File::create(path).map_err(|e| TimetableError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_solution(&mut out, instance, assignments)
        .and_then(|()| out.flush())
        .map_err(|e| TimetableError::io(path, e))
}

/// Why a solution line was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionWarningKind {
    /// Not four fields, or day/slot not a number.
    Malformed,
    UnknownCourse(String),
    UnknownRoom(String),
    DayOutOfRange(usize),
    SlotOutOfRange(usize),
    /// The course already has a lecture in that period.
    AlreadyScheduled { course: String, day: usize, slot: usize },
}

/// A skipped solution line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionWarning {
    /// 1-based line number.
    pub line: usize,
    pub kind: SolutionWarningKind,
}

impl fmt::Display for SolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            SolutionWarningKind::Malformed => write!(f, "malformed entry"),
            SolutionWarningKind::UnknownCourse(name) => write!(f, "course {name} does not exist"),
            SolutionWarningKind::UnknownRoom(name) => write!(f, "room {name} does not exist"),
            SolutionWarningKind::DayOutOfRange(day) => write!(f, "day {day} out of range"),
            SolutionWarningKind::SlotOutOfRange(slot) => write!(f, "period {slot} out of range"),
            SolutionWarningKind::AlreadyScheduled { course, day, slot } => write!(
                f,
                "course {course} already scheduled at day {day}, period {slot}"
            ),
        }
    }
}

/// Assignments read back from a solution file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSolution {
    /// Accepted entries, in file order.
    pub assignments: Vec<Assignment>,
    /// One entry per skipped line.
    pub warnings: Vec<SolutionWarning>,
}

impl ParsedSolution {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Parses solution text against an instance.
///
/// Bad lines never abort parsing: each is skipped with exactly one
/// warning. Lecture numbers are assigned per course in file order.
pub fn parse_solution(text: &str, instance: &Instance) -> ParsedSolution {
    let mut parsed = ParsedSolution::default();
    let mut lectures = vec![0u32; instance.courses().len()];
    let mut seen: HashSet<(CourseId, PeriodId)> = HashSet::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = i + 1;
        match parse_line(line, instance, &seen) {
            Ok(a) => {
                seen.insert((a.course, a.period));
                let lecture = &mut lectures[a.course.index()];
                parsed.assignments.push(Assignment::new(a.course, *lecture, a.period, a.room));
                *lecture += 1;
            }
            Err(kind) => {
                let warning = SolutionWarning { line: line_no, kind };
                warn!("{warning}");
                parsed.warnings.push(warning);
            }
        }
    }
    parsed
}

fn parse_line(
    line: &str,
    instance: &Instance,
    seen: &HashSet<(CourseId, PeriodId)>,
) -> Result<Assignment, SolutionWarningKind> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [course, room, day, slot] = fields.as_slice() else {
        return Err(SolutionWarningKind::Malformed);
    };
    let day: usize = day.parse().map_err(|_| SolutionWarningKind::Malformed)?;
    let slot: usize = slot.parse().map_err(|_| SolutionWarningKind::Malformed)?;

    let course_id = instance
        .course_by_name(course)
        .ok_or_else(|| SolutionWarningKind::UnknownCourse(course.to_string()))?;
    let room_id = instance
        .room_by_name(room)
        .ok_or_else(|| SolutionWarningKind::UnknownRoom(room.to_string()))?;
    if day >= instance.days() {
        return Err(SolutionWarningKind::DayOutOfRange(day));
    }
    let period = instance
        .period(day, slot)
        .ok_or(SolutionWarningKind::SlotOutOfRange(slot))?;
    if seen.contains(&(course_id, period)) {
        return Err(SolutionWarningKind::AlreadyScheduled {
            course: course.to_string(),
            day,
            slot,
        });
    }
    Ok(Assignment::new(course_id, 0, period, room_id))
}

/// Reads and parses a solution file.
pub fn load_solution(
    path: impl AsRef<Path>,
    instance: &Instance,
) -> Result<ParsedSolution, TimetableError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| TimetableError::io(path, e))?;
    Ok(parse_solution(&text, instance))
}
