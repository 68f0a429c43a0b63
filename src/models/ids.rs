//! Strongly-typed identifiers.
//!
//! Every index into instance data goes through one of these newtypes so a
//! room index can never be used where a period index is expected. All ids
//! are dense, 0-based positions in their owning collection.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Creates an id from a 0-based index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// The 0-based index this id refers to.
            #[inline]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Position of a course in [`Instance::courses`](super::Instance).
    CourseId
);
define_id!(
    /// Position of a room in [`Instance::rooms`](super::Instance).
    RoomId
);
define_id!(
    /// Global period: `day * periods_per_day + slot`.
    PeriodId
);
define_id!(
    /// Position of a curriculum in [`Instance::curricula`](super::Instance).
    CurriculumId
);
define_id!(
    /// One lecture to be placed; a gene of the chromosome.
    EventId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let c = CourseId::new(3);
        assert_eq!(c.index(), 3);
        assert_eq!(CourseId::from(3), c);
        assert_eq!(c.to_string(), "3");
    }

    #[test]
    fn test_id_ordering() {
        assert!(PeriodId::new(1) < PeriodId::new(2));
        let mut ids = vec![EventId::new(2), EventId::new(0), EventId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![EventId::new(0), EventId::new(1), EventId::new(2)]);
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&RoomId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: RoomId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RoomId::new(7));
    }
}
