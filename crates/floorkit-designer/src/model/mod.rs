//! Project data model: floors, walls and wall-hosted openings.
//!
//! The [`Project`] is the aggregate root. Walls reference their floor by id,
//! openings reference their host wall by id; both references are maintained by
//! the aggregate (cascading deletes, clamping on wall edits).

mod floor;
mod opening;
mod project;
mod wall;

pub use floor::Floor;
pub use opening::{Opening, OpeningKind};
pub use project::Project;
pub use wall::{Wall, WallEnd};

pub use crate::geometry::Point;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random id.
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, uuid::Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Floor`].
    FloorId,
    "floor"
);
entity_id!(
    /// Identifier of a [`Wall`].
    WallId,
    "wall"
);
entity_id!(
    /// Identifier of an [`Opening`].
    OpeningId,
    "opening"
);
