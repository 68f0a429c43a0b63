//! Room and curriculum models.

use serde::{Deserialize, Serialize};

use super::CourseId;

/// A lecture room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room name.
    pub name: String,
    /// Number of seats.
    pub capacity: u32,
}

impl Room {
    /// Creates a room.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// A group of courses attended by the same students.
///
/// Member courses may never share a period, and the curriculum's daily
/// lectures should be adjacent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    /// Unique curriculum name.
    pub name: String,
    /// Member courses, in file order.
    pub members: Vec<CourseId>,
}
