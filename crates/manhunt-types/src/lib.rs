//! Shared type definitions for the manhunt game core.
//!
//! This crate is the single source of truth for all types used across the
//! manhunt workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the web dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- The kill-claim status enumeration
//! - [`structs`] -- Entity structs and composed read models

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::KillRequestStatus;
pub use ids::{KillRecordId, KillRequestId, MissionId, PlayerId};
pub use structs::{
    KillHistoryEntry, KillRecord, KillRequest, Mission, Player, PlayerProfile, TargetAssignment,
};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::PlayerId::export_all();
        let _ = crate::ids::MissionId::export_all();
        let _ = crate::ids::KillRequestId::export_all();
        let _ = crate::ids::KillRecordId::export_all();

        // Enums
        let _ = crate::enums::KillRequestStatus::export_all();

        // Structs
        let _ = crate::structs::Player::export_all();
        let _ = crate::structs::Mission::export_all();
        let _ = crate::structs::KillRequest::export_all();
        let _ = crate::structs::KillRecord::export_all();
        let _ = crate::structs::PlayerProfile::export_all();
        let _ = crate::structs::KillHistoryEntry::export_all();
        let _ = crate::structs::TargetAssignment::export_all();
    }
}
