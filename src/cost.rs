//! Soft-constraint cost evaluation.
//!
//! Scores a set of assignments against the four CB-CTT soft constraints.
//! Each term is computed independently and the total is their sum, so a
//! breakdown can be reported per category.
//!
//! | Term | Penalty |
//! |------|---------|
//! | Room capacity | `students − capacity` per over-full lecture |
//! | Room stability | `distinct rooms − 1` per course |
//! | Minimum working days | `5 × (min days − actual days)` per course |
//! | Curriculum compactness | `2` per isolated curriculum lecture |
//!
//! A curriculum lecture is isolated when its curriculum has exactly one
//! lecture in that period and nothing in the neighbouring periods of the
//! same day. Day boundaries break adjacency.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, CurriculumId, Grid, Instance, PeriodId};

/// Weight of one missing working day.
pub const MIN_WORKING_DAYS_COST: u64 = 5;
/// Weight of one isolated curriculum lecture.
pub const CURRICULUM_COMPACTNESS_COST: u64 = 2;
/// Weight of one extra room used by a course.
pub const ROOM_STABILITY_COST: u64 = 1;

/// Multipliers applied to the raw violation counts.
///
/// Defaults reproduce the standard CB-CTT weights. `unscheduled` prices
/// lectures the decoder could not place and is `0` by default, so an
/// unplaced lecture costs nothing unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// Per seat over capacity.
    pub room_capacity: u64,
    /// Per missing working day.
    pub min_working_days: u64,
    /// Per isolated curriculum lecture.
    pub curriculum_compactness: u64,
    /// Per extra room.
    pub room_stability: u64,
    /// Per unplaced lecture.
    pub unscheduled: u64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            room_capacity: 1,
            min_working_days: MIN_WORKING_DAYS_COST,
            curriculum_compactness: CURRICULUM_COMPACTNESS_COST,
            room_stability: ROOM_STABILITY_COST,
            unscheduled: 0,
        }
    }
}

/// Raw violation counts per soft constraint (unweighted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violations {
    /// Seats missing, summed over lectures.
    pub room_capacity: u64,
    /// Missing working days, summed over courses.
    pub min_working_days: u64,
    /// Isolated curriculum lectures.
    pub curriculum_compactness: u64,
    /// Extra rooms, summed over courses.
    pub room_stability: u64,
    /// Lectures left unplaced.
    pub unscheduled: u64,
}

/// Weighted cost per soft constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub room_capacity: u64,
    pub min_working_days: u64,
    pub curriculum_compactness: u64,
    pub room_stability: u64,
    pub unscheduled: u64,
}

impl Violations {
    /// Applies weights.
    pub fn weighted(&self, w: &CostWeights) -> CostBreakdown {
        CostBreakdown {
            room_capacity: self.room_capacity * w.room_capacity,
            min_working_days: self.min_working_days * w.min_working_days,
            curriculum_compactness: self.curriculum_compactness * w.curriculum_compactness,
            room_stability: self.room_stability * w.room_stability,
            unscheduled: self.unscheduled * w.unscheduled,
        }
    }
}

impl CostBreakdown {
    /// Sum of all terms (the fitness; lower is better).
    pub fn total(&self) -> u64 {
        self.room_capacity
            + self.min_working_days
            + self.curriculum_compactness
            + self.room_stability
            + self.unscheduled
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {} (capacity {}, working days {}, compactness {}, stability {}, unscheduled {})",
            self.total(),
            self.room_capacity,
            self.min_working_days,
            self.curriculum_compactness,
            self.room_stability,
            self.unscheduled
        )
    }
}

/// Counts soft-constraint violations of `assignments`.
///
/// `unscheduled` is left at zero; callers that know about unplaced
/// lectures fill it in.
pub fn count_violations(assignments: &[Assignment], instance: &Instance) -> Violations {
    Violations {
        room_capacity: room_capacity(assignments, instance),
        min_working_days: min_working_days(assignments, instance),
        curriculum_compactness: curriculum_compactness(assignments, instance),
        room_stability: room_stability(assignments, instance),
        unscheduled: 0,
    }
}

/// Scores `assignments` with the standard weights.
pub fn evaluate(assignments: &[Assignment], instance: &Instance) -> CostBreakdown {
    count_violations(assignments, instance).weighted(&CostWeights::default())
}

fn room_capacity(assignments: &[Assignment], instance: &Instance) -> u64 {
    assignments
        .iter()
        .map(|a| {
            let students = instance.course(a.course).students;
            let capacity = instance.room(a.room).capacity;
            u64::from(students.saturating_sub(capacity))
        })
        .sum()
}

fn room_stability(assignments: &[Assignment], instance: &Instance) -> u64 {
    let mut rooms: Vec<HashSet<_>> = vec![HashSet::new(); instance.courses().len()];
    for a in assignments {
        rooms[a.course.index()].insert(a.room);
    }
    rooms
        .iter()
        .map(|used| used.len().saturating_sub(1) as u64)
        .sum()
}

fn min_working_days(assignments: &[Assignment], instance: &Instance) -> u64 {
    let mut days: Vec<HashSet<usize>> = vec![HashSet::new(); instance.courses().len()];
    for a in assignments {
        days[a.course.index()].insert(instance.day_of(a.period));
    }
    instance
        .courses()
        .iter()
        .zip(&days)
        .map(|(c, used)| u64::from(c.min_working_days).saturating_sub(used.len() as u64))
        .sum()
}

fn curriculum_compactness(assignments: &[Assignment], instance: &Instance) -> u64 {
    isolated_lectures(assignments, instance).len() as u64
}

/// (curriculum, period) pairs holding an isolated curriculum lecture.
pub(crate) fn isolated_lectures(
    assignments: &[Assignment],
    instance: &Instance,
) -> Vec<(CurriculumId, PeriodId)> {
    let lectures = curriculum_lectures(assignments, instance);
    let ppd = instance.periods_per_day();
    let mut isolated = Vec::new();

    for g in instance.curriculum_ids() {
        for p in instance.period_ids() {
            if lectures[(g, p)] != 1 {
                continue;
            }
            let slot = instance.slot_of(p);
            let before = slot > 0 && lectures[(g, PeriodId::new(p.index() - 1))] > 0;
            let after = slot + 1 < ppd && lectures[(g, PeriodId::new(p.index() + 1))] > 0;
            if !before && !after {
                isolated.push((g, p));
            }
        }
    }
    isolated
}

/// Lectures per (curriculum, period).
pub(crate) fn curriculum_lectures(
    assignments: &[Assignment],
    instance: &Instance,
) -> Grid<CurriculumId, PeriodId, u32> {
    let mut lectures = Grid::new(instance.curricula().len(), instance.periods(), 0u32);
    for a in assignments {
        for &g in instance.curricula_of(a.course) {
            lectures[(g, a.period)] += 1;
        }
    }
    lectures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, CourseId, Room, RoomId};

    fn at(course: usize, lecture: u32, period: usize, room: usize) -> Assignment {
        Assignment::new(
            CourseId::new(course),
            lecture,
            PeriodId::new(period),
            RoomId::new(room),
        )
    }

    #[test]
    fn test_zero_cost_when_all_satisfied() {
        let inst = Instance::builder("a", 1, 4)
            .with_course(Course::new("C", "T").with_lectures(2).with_min_working_days(1))
            .with_room(Room::new("R", 10))
            .build()
            .unwrap();
        let cost = evaluate(&[at(0, 0, 0, 0), at(0, 1, 1, 0)], &inst);
        assert_eq!(cost, CostBreakdown::default());
        assert_eq!(cost.total(), 0);
    }

    #[test]
    fn test_room_capacity() {
        let inst = Instance::builder("cap", 1, 2)
            .with_course(Course::new("Big", "T").with_lectures(2).with_students(50))
            .with_room(Room::new("Small", 30))
            .with_room(Room::new("Huge", 100))
            .build()
            .unwrap();
        let cost = evaluate(&[at(0, 0, 0, 0), at(0, 1, 1, 1)], &inst);
        assert_eq!(cost.room_capacity, 20);
        assert_eq!(cost.room_stability, 1);
    }

    #[test]
    fn test_min_working_days_same_day() {
        let inst = Instance::builder("mwd", 2, 2)
            .with_course(Course::new("C", "T").with_lectures(2).with_min_working_days(2))
            .with_room(Room::new("R", 10))
            .build()
            .unwrap();
        // Both lectures on day 0.
        let cost = evaluate(&[at(0, 0, 0, 0), at(0, 1, 1, 0)], &inst);
        assert_eq!(cost.min_working_days, 5);
        // Spread over both days.
        let cost = evaluate(&[at(0, 0, 0, 0), at(0, 1, 2, 0)], &inst);
        assert_eq!(cost.min_working_days, 0);
    }

    #[test]
    fn test_min_working_days_for_unscheduled_course() {
        let inst = Instance::builder("mwd0", 5, 1)
            .with_course(Course::new("C", "T").with_lectures(3).with_min_working_days(3))
            .with_room(Room::new("R", 10))
            .build()
            .unwrap();
        assert_eq!(evaluate(&[], &inst).min_working_days, 15);
    }

    fn compact_instance() -> Instance {
        Instance::builder("cc", 2, 3)
            .with_course(Course::new("A", "T1").with_lectures(3))
            .with_course(Course::new("B", "T2").with_lectures(3))
            .with_room(Room::new("R1", 10))
            .with_room(Room::new("R2", 10))
            .with_curriculum("G", ["A", "B"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_isolated_curriculum_lecture() {
        let inst = compact_instance();
        // Day 0: G at slots 0 and 2, neither adjacent to the other.
        let cost = evaluate(&[at(0, 0, 0, 0), at(1, 0, 2, 0)], &inst);
        assert_eq!(cost.curriculum_compactness, 4);

        // Day 0: G at slots 0 and 1, adjacent.
        let cost = evaluate(&[at(0, 0, 0, 0), at(1, 0, 1, 0)], &inst);
        assert_eq!(cost.curriculum_compactness, 0);

        // Single lecture in a day: exactly one isolated occurrence.
        let cost = evaluate(&[at(0, 0, 4, 0)], &inst);
        assert_eq!(cost.curriculum_compactness, 2);
    }

    #[test]
    fn test_day_boundary_blocks_adjacency() {
        let inst = compact_instance();
        // Period 2 is the last slot of day 0, period 3 the first of day 1.
        let cost = evaluate(&[at(0, 0, 2, 0), at(1, 0, 3, 0)], &inst);
        assert_eq!(cost.curriculum_compactness, 4);
    }

    #[test]
    fn test_compactness_ignores_doubly_booked_period() {
        let inst = compact_instance();
        // Two curriculum lectures in one period: not counted as isolated.
        let cost = evaluate(&[at(0, 0, 0, 0), at(1, 0, 0, 1)], &inst);
        assert_eq!(cost.curriculum_compactness, 0);
    }

    #[test]
    fn test_weighted_breakdown() {
        let v = Violations {
            room_capacity: 3,
            min_working_days: 1,
            curriculum_compactness: 2,
            room_stability: 1,
            unscheduled: 4,
        };
        let w = CostWeights {
            unscheduled: 10,
            ..CostWeights::default()
        };
        let cost = v.weighted(&w);
        assert_eq!(cost.min_working_days, 5);
        assert_eq!(cost.curriculum_compactness, 4);
        assert_eq!(cost.unscheduled, 40);
        assert_eq!(cost.total(), 3 + 5 + 4 + 1 + 40);
        assert_eq!(v.weighted(&CostWeights::default()).unscheduled, 0);
    }

    #[test]
    fn test_weights_deserialize_with_defaults() {
        let w: CostWeights = serde_json::from_str(r#"{"unscheduled": 7}"#).unwrap();
        assert_eq!(w.unscheduled, 7);
        assert_eq!(w.min_working_days, MIN_WORKING_DAYS_COST);
    }
}
