//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. Every ID is a 64-bit row id assigned by the
//! store; `0` marks a row that has not been persisted yet.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Placeholder for rows that have not been inserted yet
            pub const UNSAVED: Self = Self(0);

            /// Wrap a raw row id
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw row id
            pub const fn get(&self) -> i64 {
                self.0
            }

            /// Whether this id still marks an unsaved row
            pub const fn is_unsaved(&self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

define_id!(ExerciseId, "ex-");
define_id!(WorkoutId, "wo-");
define_id!(WorkoutExerciseId, "wex-");
define_id!(ExerciseSetId, "set-");
define_id!(WorkoutPlanId, "plan-");
define_id!(WorkoutPlanExerciseId, "pex-");
define_id!(BodyMeasurementId, "bm-");
