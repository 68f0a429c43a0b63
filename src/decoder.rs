//! Greedy chromosome decoder.
//!
//! Turns a permutation of event ids into a concrete timetable. Events are
//! taken in chromosome order and each one goes into the first
//! (period, room) pair, periods ascending then rooms ascending, that keeps
//! every hard constraint satisfied:
//!
//! - the room is free in that period,
//! - the course has no other lecture in that period,
//! - no curriculum containing the course has a lecture in that period,
//! - the course is available in that period.
//!
//! The chromosome order is therefore the whole meaning of the genotype:
//! earlier events get first pick of the slots. Events with no feasible pair
//! are recorded in [`Timetable::unplaced`].
//!
//! Cost per decode is O(events × periods × rooms) in the worst case.

use tracing::debug;

use crate::models::{
    Assignment, CourseId, CurriculumId, EventId, EventIndex, Grid, Instance, PeriodId, RoomId,
    Timetable,
};

/// Occupancy trackers for one decode.
struct Occupancy {
    room: Grid<RoomId, PeriodId, bool>,
    course: Grid<CourseId, PeriodId, bool>,
    curriculum: Grid<CurriculumId, PeriodId, bool>,
}

impl Occupancy {
    fn new(instance: &Instance) -> Self {
        let periods = instance.periods();
        Self {
            room: Grid::new(instance.rooms().len(), periods, false),
            course: Grid::new(instance.courses().len(), periods, false),
            curriculum: Grid::new(instance.curricula().len(), periods, false),
        }
    }

    /// Whether `course` can take any room at `period`, ignoring rooms.
    fn period_open(&self, instance: &Instance, course: CourseId, period: PeriodId) -> bool {
        !self.course[(course, period)]
            && instance.is_available(course, period)
            && instance
                .curricula_of(course)
                .iter()
                .all(|&g| !self.curriculum[(g, period)])
    }

    fn occupy(&mut self, instance: &Instance, course: CourseId, period: PeriodId, room: RoomId) {
        self.room[(room, period)] = true;
        self.course[(course, period)] = true;
        for &g in instance.curricula_of(course) {
            self.curriculum[(g, period)] = true;
        }
    }
}

/// Decodes a chromosome into a timetable.
///
/// Deterministic: the same genes always produce the same timetable.
/// Genes outside the event table are ignored.
pub fn decode(genes: &[EventId], instance: &Instance, events: &EventIndex) -> Timetable {
    let mut timetable = Timetable::new();
    let mut occupancy = Occupancy::new(instance);

    for &gene in genes {
        let Some(event) = events.resolve(gene) else {
            debug!(event = gene.index(), "gene outside event table ignored");
            continue;
        };

        match find_slot(&occupancy, instance, event.course) {
            Some((period, room)) => {
                occupancy.occupy(instance, event.course, period, room);
                let assignment = Assignment::new(event.course, event.lecture, period, room);
                timetable.add_assignment(assignment);
            }
            None => {
                debug!(
                    course = %instance.course(event.course).name,
                    lecture = event.lecture,
                    "no feasible period/room for lecture"
                );
                timetable.add_unplaced(event);
            }
        }
    }

    timetable
}

/// First feasible (period, room) for a lecture of `course`.
fn find_slot(
    occupancy: &Occupancy,
    instance: &Instance,
    course: CourseId,
) -> Option<(PeriodId, RoomId)> {
    instance
        .period_ids()
        .filter(|&p| occupancy.period_open(instance, course, p))
        .find_map(|p| {
            instance
                .room_ids()
                .find(|&r| !occupancy.room[(r, p)])
                .map(|r| (p, r))
        })
}
