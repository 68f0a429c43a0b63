//! Solution audit.
//!
//! Re-scores a parsed solution file against an instance: hard-constraint
//! violation counts, soft costs (same formulas the solver optimizes) and
//! the number of skipped solution lines.
//!
//! # Hard constraints
//!
//! | Constraint | Count |
//! |------------|-------|
//! | Lectures | `|scheduled − required|` per course |
//! | Conflicts | conflicting course pairs taught in the same period |
//! | Availability | lectures in unavailable periods |
//! | Room occupation | `lectures − 1` per over-booked (room, period) |

use std::collections::HashSet;
use std::fmt;

use crate::cost::{self, CURRICULUM_COMPACTNESS_COST, CostBreakdown, MIN_WORKING_DAYS_COST};
use crate::io::ParsedSolution;
use crate::models::{Assignment, CourseId, Grid, Instance, PeriodId, RoomId};

/// Hard-constraint violation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardViolations {
    pub lectures: u64,
    pub conflicts: u64,
    pub availability: u64,
    pub room_occupation: u64,
}

impl HardViolations {
    pub fn total(&self) -> u64 {
        self.lectures + self.conflicts + self.availability + self.room_occupation
    }
}

/// Severity tag of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Hard,
    /// Soft violation with its cost.
    Soft(u64),
}

/// One violation, in human-readable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn hard(message: String) -> Self {
        Self {
            severity: Severity::Hard,
            message,
        }
    }

    fn soft(cost: u64, message: String) -> Self {
        Self {
            severity: Severity::Soft(cost),
            message,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Hard => write!(f, "[H] {}", self.message),
            Severity::Soft(cost) => write!(f, "[S({cost})] {}", self.message),
        }
    }
}

/// Audit result of one solution.
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub hard: HardViolations,
    pub soft: CostBreakdown,
    /// Solution lines skipped while parsing.
    pub warnings: usize,
    /// Hard findings first, then soft, each in course/period order.
    pub findings: Vec<Finding>,
}

impl AuditReport {
    /// Audits a parsed solution.
    pub fn compute(instance: &Instance, solution: &ParsedSolution) -> Self {
        let mut assignments = solution.assignments.clone();
        assignments.sort_by_key(|a| (a.course, a.period));

        let mut findings = Vec::new();
        let hard = HardViolations {
            lectures: lectures(&assignments, instance, &mut findings),
            conflicts: conflicts(&assignments, instance, &mut findings),
            availability: availability(&assignments, instance, &mut findings),
            room_occupation: room_occupation(&assignments, instance, &mut findings),
        };
        soft_findings(&assignments, instance, &mut findings);

        Self {
            hard,
            soft: cost::evaluate(&assignments, instance),
            warnings: solution.warning_count(),
            findings,
        }
    }

    /// Hard violations summed over categories.
    pub fn violations(&self) -> u64 {
        self.hard.total()
    }

    /// Soft cost summed over categories.
    pub fn total_cost(&self) -> u64 {
        self.soft.total()
    }

    /// Whether no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.violations() == 0
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            writeln!(f, "{finding}")?;
        }
        writeln!(f)?;
        writeln!(f, "Violations of Lectures (hard) : {}", self.hard.lectures)?;
        writeln!(f, "Violations of Conflicts (hard) : {}", self.hard.conflicts)?;
        writeln!(f, "Violations of Availability (hard) : {}", self.hard.availability)?;
        writeln!(f, "Violations of RoomOccupation (hard) : {}", self.hard.room_occupation)?;
        writeln!(f, "Cost of RoomCapacity (soft) : {}", self.soft.room_capacity)?;
        writeln!(f, "Cost of MinWorkingDays (soft) : {}", self.soft.min_working_days)?;
        writeln!(
            f,
            "Cost of CurriculumCompactness (soft) : {}",
            self.soft.curriculum_compactness
        )?;
        writeln!(f, "Cost of RoomStability (soft) : {}", self.soft.room_stability)?;
        writeln!(f)?;
        if self.warnings > 0 {
            writeln!(f, "There are {} warnings!", self.warnings)?;
        }
        write!(f, "Summary: ")?;
        if self.violations() > 0 {
            write!(f, "Violations = {}, ", self.violations())?;
        }
        writeln!(f, "Total Cost = {}", self.total_cost())
    }
}

fn at(instance: &Instance, p: PeriodId) -> String {
    format!(
        "period {} (day {}, timeslot {})",
        p.index(),
        instance.day_of(p),
        instance.slot_of(p)
    )
}

/// Course × period occupancy.
fn scheduled(assignments: &[Assignment], instance: &Instance) -> Grid<CourseId, PeriodId, bool> {
    let mut grid = Grid::new(instance.courses().len(), instance.periods(), false);
    for a in assignments {
        grid[(a.course, a.period)] = true;
    }
    grid
}

fn lectures(assignments: &[Assignment], instance: &Instance, findings: &mut Vec<Finding>) -> u64 {
    let mut counts = vec![0u64; instance.courses().len()];
    for a in assignments {
        counts[a.course.index()] += 1;
    }
    let mut total = 0;
    for (course, &n) in instance.courses().iter().zip(&counts) {
        let required = u64::from(course.lectures);
        if n < required {
            findings.push(Finding::hard(format!("Too few lectures for course {}", course.name)));
        } else if n > required {
            findings.push(Finding::hard(format!("Too many lectures for course {}", course.name)));
        }
        total += n.abs_diff(required);
    }
    total
}

fn conflicts(assignments: &[Assignment], instance: &Instance, findings: &mut Vec<Finding>) -> u64 {
    let grid = scheduled(assignments, instance);
    let n = instance.courses().len();
    let mut total = 0;
    for c1 in (0..n).map(CourseId::new) {
        for c2 in (c1.index() + 1..n).map(CourseId::new) {
            if !instance.conflicts(c1, c2) {
                continue;
            }
            for p in instance.period_ids() {
                if grid[(c1, p)] && grid[(c2, p)] {
                    total += 1;
                    findings.push(Finding::hard(format!(
                        "Courses {} and {} have both a lecture at {}",
                        instance.course(c1).name,
                        instance.course(c2).name,
                        at(instance, p)
                    )));
                }
            }
        }
    }
    total
}

fn availability(
    assignments: &[Assignment],
    instance: &Instance,
    findings: &mut Vec<Finding>,
) -> u64 {
    let mut total = 0;
    for a in assignments {
        if !instance.is_available(a.course, a.period) {
            total += 1;
            findings.push(Finding::hard(format!(
                "Course {} has a lecture at unavailable {}",
                instance.course(a.course).name,
                at(instance, a.period)
            )));
        }
    }
    total
}

fn room_occupation(
    assignments: &[Assignment],
    instance: &Instance,
    findings: &mut Vec<Finding>,
) -> u64 {
    let mut load: Grid<PeriodId, RoomId, u64> =
        Grid::new(instance.periods(), instance.rooms().len(), 0);
    for a in assignments {
        load[(a.period, a.room)] += 1;
    }
    let mut total = 0;
    for p in instance.period_ids() {
        for r in instance.room_ids() {
            let n = load[(p, r)];
            if n <= 1 {
                continue;
            }
            total += n - 1;
            let mut message = format!(
                "{n} lectures in room {} the {}",
                instance.room(r).name,
                at(instance, p)
            );
            if n > 2 {
                message.push_str(&format!(" [{} violations]", n - 1));
            }
            findings.push(Finding::hard(message));
        }
    }
    total
}

fn soft_findings(assignments: &[Assignment], instance: &Instance, findings: &mut Vec<Finding>) {
    for a in assignments {
        let students = instance.course(a.course).students;
        let capacity = instance.room(a.room).capacity;
        if students > capacity {
            findings.push(Finding::soft(
                u64::from(students - capacity),
                format!(
                    "Room {} too small for course {} the {}",
                    instance.room(a.room).name,
                    instance.course(a.course).name,
                    at(instance, a.period)
                ),
            ));
        }
    }

    let n = instance.courses().len();
    let mut days: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    let mut rooms: Vec<HashSet<RoomId>> = vec![HashSet::new(); n];
    for a in assignments {
        days[a.course.index()].insert(instance.day_of(a.period));
        rooms[a.course.index()].insert(a.room);
    }

    for (course, used) in instance.courses().iter().zip(&days) {
        if (used.len() as u64) < u64::from(course.min_working_days) {
            findings.push(Finding::soft(
                MIN_WORKING_DAYS_COST,
                format!("The course {} has only {} days of lecture", course.name, used.len()),
            ));
        }
    }

    for (g, p) in cost::isolated_lectures(assignments, instance) {
        findings.push(Finding::soft(
            CURRICULUM_COMPACTNESS_COST,
            format!(
                "Curriculum {} has an isolated lecture at {}",
                instance.curriculum(g).name,
                at(instance, p)
            ),
        ));
    }

    for (course, used) in instance.courses().iter().zip(&rooms) {
        if used.len() > 1 {
            findings.push(Finding::soft(
                (used.len() - 1) as u64 * cost::ROOM_STABILITY_COST,
                format!("Course {} uses {} different rooms", course.name, used.len()),
            ));
        }
    }
}
