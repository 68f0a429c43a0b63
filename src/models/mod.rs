//! Timetabling domain models.
//!
//! Provides the core data types for curriculum-based course timetabling
//! (CB-CTT) instances and their solutions.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | Course | Teaching unit needing N lectures |
//! | Room | Place with a seat capacity |
//! | Curriculum | Courses sharing students |
//! | Period | One (day, slot) of the weekly horizon |
//! | Event | One lecture of one course (a gene) |
//! | Timetable | Lecture → (period, room) placements |

mod course;
mod event;
mod grid;
mod ids;
mod instance;
mod room;
mod timetable;

pub use course::Course;
pub use event::{EventIndex, EventRef};
pub use grid::{Grid, GridIndex};
pub use ids::{CourseId, CurriculumId, EventId, PeriodId, RoomId};
pub use instance::{Instance, InstanceBuilder};
pub use room::{Curriculum, Room};
pub use timetable::{Assignment, Timetable};
