//! Read-only statistics derived from the confirmed-kill audit log.
//!
//! Everything here is a projection over `kill_records` joined against the
//! roster; nothing mutates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use manhunt_types::{KillHistoryEntry, MissionId, Player, PlayerId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::player_store::PlayerRow;

/// Read-only queries over `kill_records`.
pub struct KillStatsStore<'a> {
    pool: &'a PgPool,
}

impl<'a> KillStatsStore<'a> {
    /// Create a new statistics store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count confirmed kills per killer.
    ///
    /// Players with zero kills are absent from the map, not present with a
    /// zero -- the sum over all entries equals the total record count.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn kill_counts(&self) -> Result<BTreeMap<PlayerId, u64>, DbError> {
        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            r"SELECT killer_id, COUNT(*) AS kills
              FROM kill_records
              GROUP BY killer_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(killer_id, kills)| {
                (PlayerId::from(killer_id), u64::try_from(kills).unwrap_or(0))
            })
            .collect())
    }

    /// The player with the most confirmed kills, or `None` if no kill has
    /// been recorded yet.
    ///
    /// Ties break toward the smallest player id; ids are UUID v7, so that
    /// is the earliest-created of the tied players.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn top_killer(&self) -> Result<Option<Player>, DbError> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r"SELECT p.id, p.name, p.code, p.is_alive, p.mission_id, p.target_id
              FROM kill_records kr
              JOIN players p ON p.id = kr.killer_id
              GROUP BY p.id, p.name, p.code, p.is_alive, p.mission_id, p.target_id
              ORDER BY COUNT(*) DESC, p.id
              LIMIT 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Player::from))
    }

    /// The full kill history with both parties resolved, most recent first.
    ///
    /// Records whose killer or target row was deleted by an admin drop out
    /// of the feed (inner joins).
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn history(&self) -> Result<Vec<KillHistoryEntry>, DbError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r"SELECT
                  kr.created_at,
                  k.id AS killer_id,
                  k.name AS killer_name,
                  k.code AS killer_code,
                  k.is_alive AS killer_is_alive,
                  k.mission_id AS killer_mission_id,
                  k.target_id AS killer_target_id,
                  v.id AS victim_id,
                  v.name AS victim_name,
                  v.code AS victim_code,
                  v.is_alive AS victim_is_alive,
                  v.mission_id AS victim_mission_id,
                  v.target_id AS victim_target_id
              FROM kill_records kr
              JOIN players k ON k.id = kr.killer_id
              JOIN players v ON v.id = kr.target_id
              ORDER BY kr.created_at DESC, kr.id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(KillHistoryEntry::from).collect())
    }
}

/// A kill record joined with both player rows.
#[derive(Debug, Clone, sqlx::FromRow)]
struct HistoryRow {
    created_at: DateTime<Utc>,
    killer_id: Uuid,
    killer_name: String,
    killer_code: String,
    killer_is_alive: bool,
    killer_mission_id: Option<Uuid>,
    killer_target_id: Option<Uuid>,
    victim_id: Uuid,
    victim_name: String,
    victim_code: String,
    victim_is_alive: bool,
    victim_mission_id: Option<Uuid>,
    victim_target_id: Option<Uuid>,
}

impl From<HistoryRow> for KillHistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            killer: Player {
                id: PlayerId::from(row.killer_id),
                name: row.killer_name,
                code: row.killer_code,
                is_alive: row.killer_is_alive,
                mission_id: row.killer_mission_id.map(MissionId::from),
                target_id: row.killer_target_id.map(PlayerId::from),
            },
            target: Player {
                id: PlayerId::from(row.victim_id),
                name: row.victim_name,
                code: row.victim_code,
                is_alive: row.victim_is_alive,
                mission_id: row.victim_mission_id.map(MissionId::from),
                target_id: row.victim_target_id.map(PlayerId::from),
            },
            timestamp: row.created_at,
        }
    }
}
