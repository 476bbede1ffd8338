//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every persisted entity has a strongly-typed ID so a killer id can never
//! be passed where a mission id is expected. All IDs use UUID v7
//! (time-ordered) for efficient database indexing.
//!
//! IDs are generated app-side via the `new()` constructors and bound into
//! INSERT statements; the schema defaults exist only as a fallback for
//! hand-written SQL.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player.
    PlayerId
}

define_id! {
    /// Unique identifier for a mission.
    MissionId
}

define_id! {
    /// Unique identifier for a kill claim awaiting confirmation.
    KillRequestId
}

define_id! {
    /// Unique identifier for a confirmed-kill audit record.
    KillRecordId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let player = PlayerId::new();
        let mission = MissionId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(player.into_inner(), Uuid::nil());
        assert_ne!(mission.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = PlayerId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<PlayerId, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert!(restored.is_ok());
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = KillRequestId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn v7_ids_are_time_ordered() {
        let earlier = PlayerId::new();
        let later = PlayerId::new();
        assert!(earlier <= later);
    }
}
