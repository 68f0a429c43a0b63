//! Problem instance (the immutable timetabling context).
//!
//! An [`Instance`] is assembled once through [`InstanceBuilder`] and is
//! read-only afterwards. The decoder, the cost evaluator, the GA problem and
//! the auditor all borrow it as `&Instance`.

use std::collections::HashMap;

use super::{Course, CourseId, Curriculum, CurriculumId, Grid, PeriodId, Room, RoomId};
use crate::validation::{ValidationError, validate_instance_input};

/// A CB-CTT problem instance.
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    days: usize,
    periods_per_day: usize,
    courses: Vec<Course>,
    rooms: Vec<Room>,
    curricula: Vec<Curriculum>,
    /// `true` where the course may be taught in the period.
    availability: Grid<CourseId, PeriodId, bool>,
    /// `true` for distinct courses sharing a curriculum or a teacher.
    conflicts: Grid<CourseId, CourseId, bool>,
    /// Curricula containing each course.
    course_curricula: Vec<Vec<CurriculumId>>,
    course_lookup: HashMap<String, CourseId>,
    room_lookup: HashMap<String, RoomId>,
}

impl Instance {
    /// Starts building an instance with the given horizon.
    pub fn builder(
        name: impl Into<String>,
        days: usize,
        periods_per_day: usize,
    ) -> InstanceBuilder {
        InstanceBuilder::new(name, days, periods_per_day)
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of teaching days.
    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    /// Number of periods in one day.
    #[inline]
    pub fn periods_per_day(&self) -> usize {
        self.periods_per_day
    }

    /// Total number of periods (`days × periods_per_day`).
    #[inline]
    pub fn periods(&self) -> usize {
        self.days * self.periods_per_day
    }

    /// Iterates all periods in increasing order.
    pub fn period_ids(&self) -> impl Iterator<Item = PeriodId> {
        (0..self.periods()).map(PeriodId::new)
    }

    /// Day containing `period`.
    #[inline]
    pub fn day_of(&self, period: PeriodId) -> usize {
        period.index() / self.periods_per_day
    }

    /// Position of `period` within its day.
    #[inline]
    pub fn slot_of(&self, period: PeriodId) -> usize {
        period.index() % self.periods_per_day
    }

    /// Global period for a (day, slot) pair, or `None` if out of range.
    pub fn period(&self, day: usize, slot: usize) -> Option<PeriodId> {
        (day < self.days && slot < self.periods_per_day)
            .then(|| PeriodId::new(day * self.periods_per_day + slot))
    }

    /// All courses, indexed by [`CourseId`].
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All rooms, indexed by [`RoomId`].
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All curricula, indexed by [`CurriculumId`].
    pub fn curricula(&self) -> &[Curriculum] {
        &self.curricula
    }

    /// Looks up a course.
    #[inline]
    pub fn course(&self, id: CourseId) -> &Course {
        &self.courses[id.index()]
    }

    /// Looks up a room.
    #[inline]
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    /// Looks up a curriculum.
    #[inline]
    pub fn curriculum(&self, id: CurriculumId) -> &Curriculum {
        &self.curricula[id.index()]
    }

    /// Iterates course ids in index order.
    pub fn course_ids(&self) -> impl Iterator<Item = CourseId> {
        (0..self.courses.len()).map(CourseId::new)
    }

    /// Iterates room ids in index order.
    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> {
        (0..self.rooms.len()).map(RoomId::new)
    }

    /// Iterates curriculum ids in index order.
    pub fn curriculum_ids(&self) -> impl Iterator<Item = CurriculumId> {
        (0..self.curricula.len()).map(CurriculumId::new)
    }

    /// Curricula that contain `course`.
    #[inline]
    pub fn curricula_of(&self, course: CourseId) -> &[CurriculumId] {
        &self.course_curricula[course.index()]
    }

    /// Whether `course` may be taught in `period`.
    #[inline]
    pub fn is_available(&self, course: CourseId, period: PeriodId) -> bool {
        self.availability[(course, period)]
    }

    /// Whether two courses may not share a period.
    #[inline]
    pub fn conflicts(&self, a: CourseId, b: CourseId) -> bool {
        self.conflicts[(a, b)]
    }

    /// Finds a course by name.
    pub fn course_by_name(&self, name: &str) -> Option<CourseId> {
        self.course_lookup.get(name).copied()
    }

    /// Finds a room by name.
    pub fn room_by_name(&self, name: &str) -> Option<RoomId> {
        self.room_lookup.get(name).copied()
    }

    /// Total lectures over all courses (chromosome length).
    pub fn total_events(&self) -> usize {
        self.courses.iter().map(|c| c.lectures as usize).sum()
    }
}

/// Collects raw instance data by name and resolves it into an [`Instance`].
///
/// # Example
/// ```
/// use u_timetable::models::{Course, Instance, Room};
///
/// let instance = Instance::builder("toy", 5, 4)
///     .with_course(Course::new("Math", "Gauss").with_lectures(3))
///     .with_course(Course::new("Physics", "Gauss").with_lectures(2))
///     .with_room(Room::new("A", 40))
///     .with_curriculum("Y1", ["Math", "Physics"])
///     .with_unavailability("Math", 0, 0)
///     .build()
///     .unwrap();
///
/// assert_eq!(instance.periods(), 20);
/// assert_eq!(instance.total_events(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    pub(crate) name: String,
    pub(crate) days: usize,
    pub(crate) periods_per_day: usize,
    pub(crate) courses: Vec<Course>,
    pub(crate) rooms: Vec<Room>,
    /// (curriculum name, member course names).
    pub(crate) curricula: Vec<(String, Vec<String>)>,
    /// (course name, day, slot).
    pub(crate) unavailability: Vec<(String, usize, usize)>,
}

impl InstanceBuilder {
    /// Creates an empty builder.
    pub fn new(name: impl Into<String>, days: usize, periods_per_day: usize) -> Self {
        Self {
            name: name.into(),
            days,
            periods_per_day,
            courses: Vec::new(),
            rooms: Vec::new(),
            curricula: Vec::new(),
            unavailability: Vec::new(),
        }
    }

    /// Adds a course. Course ids follow insertion order.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a room. Room ids follow insertion order.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a curriculum by member course names.
    pub fn with_curriculum<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.curricula
            .push((name.into(), members.into_iter().map(Into::into).collect()));
        self
    }

    /// Forbids `course` in the given (day, slot).
    pub fn with_unavailability(
        mut self,
        course: impl Into<String>,
        day: usize,
        slot: usize,
    ) -> Self {
        self.unavailability.push((course.into(), day, slot));
        self
    }

    /// Validates the collected data and builds the instance.
    ///
    /// Returns every validation problem found, not just the first.
    pub fn build(self) -> Result<Instance, Vec<ValidationError>> {
        validate_instance_input(&self)?;

        let periods = self.days * self.periods_per_day;
        let n_courses = self.courses.len();

        let course_lookup: HashMap<String, CourseId> = self
            .courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), CourseId::new(i)))
            .collect();
        let room_lookup: HashMap<String, RoomId> = self
            .rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), RoomId::new(i)))
            .collect();

        let mut conflicts = Grid::new(n_courses, n_courses, false);
        let mut course_curricula = vec![Vec::new(); n_courses];
        let mut curricula = Vec::with_capacity(self.curricula.len());

        for (g, (name, member_names)) in self.curricula.into_iter().enumerate() {
            // Validation guarantees every member name resolves.
            let members: Vec<CourseId> = member_names
                .iter()
                .filter_map(|m| course_lookup.get(m).copied())
                .collect();
            for (i, &a) in members.iter().enumerate() {
                course_curricula[a.index()].push(CurriculumId::new(g));
                for &b in &members[..i] {
                    conflicts[(a, b)] = true;
                    conflicts[(b, a)] = true;
                }
            }
            curricula.push(Curriculum { name, members });
        }

        for a in 0..n_courses {
            for b in (a + 1)..n_courses {
                if self.courses[a].teacher == self.courses[b].teacher {
                    conflicts[(CourseId::new(a), CourseId::new(b))] = true;
                    conflicts[(CourseId::new(b), CourseId::new(a))] = true;
                }
            }
        }

        let mut availability = Grid::new(n_courses, periods, true);
        for (course, day, slot) in &self.unavailability {
            if let Some(&c) = course_lookup.get(course) {
                availability[(c, PeriodId::new(day * self.periods_per_day + slot))] = false;
            }
        }

        Ok(Instance {
            name: self.name,
            days: self.days,
            periods_per_day: self.periods_per_day,
            courses: self.courses,
            rooms: self.rooms,
            curricula,
            availability,
            conflicts,
            course_curricula,
            course_lookup,
            room_lookup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Instance {
        Instance::builder("toy", 2, 3)
            .with_course(Course::new("A", "T1").with_lectures(2))
            .with_course(Course::new("B", "T2").with_lectures(1))
            .with_course(Course::new("C", "T1").with_lectures(3))
            .with_course(Course::new("D", "T3").with_lectures(1))
            .with_room(Room::new("R1", 10))
            .with_room(Room::new("R2", 20))
            .with_curriculum("G1", ["A", "B"])
            .with_unavailability("D", 1, 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_horizon() {
        let inst = toy();
        assert_eq!(inst.days(), 2);
        assert_eq!(inst.periods_per_day(), 3);
        assert_eq!(inst.periods(), 6);
        assert_eq!(inst.day_of(PeriodId::new(4)), 1);
        assert_eq!(inst.slot_of(PeriodId::new(4)), 1);
        assert_eq!(inst.period(1, 2), Some(PeriodId::new(5)));
        assert_eq!(inst.period(2, 0), None);
        assert_eq!(inst.period(0, 3), None);
    }

    #[test]
    fn test_conflicts_from_curricula_and_teachers() {
        let inst = toy();
        let (a, b, c, d) = (CourseId::new(0), CourseId::new(1), CourseId::new(2), CourseId::new(3));

        // Same curriculum
        assert!(inst.conflicts(a, b));
        assert!(inst.conflicts(b, a));
        // Same teacher
        assert!(inst.conflicts(a, c));
        assert!(inst.conflicts(c, a));
        // Unrelated
        assert!(!inst.conflicts(b, c));
        assert!(!inst.conflicts(a, d));
        // A course never conflicts with itself through the matrix
        assert!(!inst.conflicts(a, a));
    }

    #[test]
    fn test_availability() {
        let inst = toy();
        let d = CourseId::new(3);
        assert!(!inst.is_available(d, PeriodId::new(5)));
        assert!(inst.is_available(d, PeriodId::new(4)));
        assert!(inst.is_available(CourseId::new(0), PeriodId::new(5)));
    }

    #[test]
    fn test_membership_and_lookup() {
        let inst = toy();
        assert_eq!(inst.curricula_of(CourseId::new(0)), &[CurriculumId::new(0)]);
        assert!(inst.curricula_of(CourseId::new(2)).is_empty());
        assert_eq!(inst.course_by_name("C"), Some(CourseId::new(2)));
        assert_eq!(inst.room_by_name("R2"), Some(RoomId::new(1)));
        assert_eq!(inst.room_by_name("R9"), None);
        assert_eq!(inst.total_events(), 7);
    }

    #[test]
    fn test_build_rejects_unknown_curriculum_member() {
        let result = Instance::builder("bad", 1, 1)
            .with_course(Course::new("A", "T"))
            .with_room(Room::new("R", 1))
            .with_curriculum("G", ["A", "Z"])
            .build();
        assert!(result.is_err());
    }
}
