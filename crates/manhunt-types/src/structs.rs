//! Core entity structs for the manhunt game.
//!
//! These mirror the relational schema one-to-one. Composed read models
//! (`PlayerProfile`, `KillHistoryEntry`) join entities the way the UI
//! consumes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::KillRequestStatus;
use crate::ids::{KillRecordId, KillRequestId, MissionId, PlayerId};

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A participant in the game.
///
/// `target_id` points at another living player while a round is running;
/// it forms a single directed cycle over all living players. `code` is the
/// unique human-enterable string the player logs in with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Player identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Unique login code (enforced by the database).
    pub code: String,
    /// Whether the player is still in the game.
    pub is_alive: bool,
    /// Mission currently assigned to this player, if any.
    pub mission_id: Option<MissionId>,
    /// The player this player is hunting, if a round is running.
    pub target_id: Option<PlayerId>,
}

// ---------------------------------------------------------------------------
// Mission
// ---------------------------------------------------------------------------

/// A mission an admin hands out to players.
///
/// Missions exist independently of players and are referenced, never owned:
/// deleting a mission detaches it from any player holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Mission {
    /// Mission identifier.
    pub id: MissionId,
    /// Short title shown in lists.
    pub title: String,
    /// Free-text description of what the killer must stage.
    pub description: String,
}

// ---------------------------------------------------------------------------
// Kill claims and records
// ---------------------------------------------------------------------------

/// A killer's claim of having eliminated their target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct KillRequest {
    /// Request identifier.
    pub id: KillRequestId,
    /// The player claiming the kill.
    pub killer_id: PlayerId,
    /// The player being claimed dead.
    pub target_id: PlayerId,
    /// Where the claim sits in its lifecycle.
    pub status: KillRequestStatus,
    /// When the claim was submitted.
    pub created_at: DateTime<Utc>,
}

/// Immutable audit entry written when a kill is confirmed.
///
/// Never mutated or deleted except by a full game reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct KillRecord {
    /// Record identifier.
    pub id: KillRecordId,
    /// The confirmed killer.
    pub killer_id: PlayerId,
    /// The confirmed victim.
    pub target_id: PlayerId,
    /// When the kill was confirmed.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Composed read models
// ---------------------------------------------------------------------------

/// Everything a logged-in player sees on their own page: their record, their
/// mission, the player they are hunting and that player's mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerProfile {
    /// The player's own record.
    pub player: Player,
    /// The mission assigned to this player, if any.
    pub mission: Option<Mission>,
    /// The player's current target, if a round is running.
    pub target: Option<Player>,
    /// The target's mission, if any.
    pub target_mission: Option<Mission>,
}

/// One confirmed kill with both parties resolved, as shown in the history
/// feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct KillHistoryEntry {
    /// The killer's player record.
    pub killer: Player,
    /// The victim's player record.
    pub target: Player,
    /// When the kill was confirmed.
    pub timestamp: DateTime<Utc>,
}

/// One edge of a freshly drawn target cycle: `player_id` is to hunt
/// `target_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TargetAssignment {
    /// The hunting player.
    pub player_id: PlayerId,
    /// The player being hunted.
    pub target_id: PlayerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_json_field_names() {
        let player = Player {
            id: PlayerId::new(),
            name: "Alice".to_owned(),
            code: "ROSEBUD".to_owned(),
            is_alive: true,
            mission_id: None,
            target_id: None,
        };
        let value = serde_json::to_value(&player).unwrap_or_default();
        assert!(value.get("is_alive").is_some());
        assert!(value.get("mission_id").is_some());
        assert!(value.get("target_id").is_some());
    }

    #[test]
    fn profile_roundtrip() {
        let player = Player {
            id: PlayerId::new(),
            name: "Bob".to_owned(),
            code: "TANGO".to_owned(),
            is_alive: true,
            mission_id: None,
            target_id: None,
        };
        let profile = PlayerProfile {
            player,
            mission: None,
            target: None,
            target_mission: None,
        };
        let json = serde_json::to_string(&profile).ok();
        assert!(json.is_some());
        let back: Result<PlayerProfile, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert!(back.is_ok());
    }
}
