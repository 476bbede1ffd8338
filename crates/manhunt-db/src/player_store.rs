//! Player roster operations.
//!
//! The `players` table is the heart of the game state: alongside identity
//! and the unique login code it carries the alive flag and the target link
//! that the cycle manager and kill workflow mutate. Single-row reads and
//! writes here are plain statements; the N-row cycle relink is the one
//! multi-row mutation and runs in its own transaction.

use manhunt_types::{MissionId, Player, PlayerId, PlayerProfile, TargetAssignment};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::mission_store::MissionStore;

/// Operations on the `players` table.
pub struct PlayerStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerStore<'a> {
    /// Create a new player store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all players, alphabetically by name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self) -> Result<Vec<Player>, DbError> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            r"SELECT id, name, code, is_alive, mission_id, target_id
              FROM players
              ORDER BY name, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Player::from).collect())
    }

    /// List all living players, alphabetically by name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn alive(&self) -> Result<Vec<Player>, DbError> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            r"SELECT id, name, code, is_alive, mission_id, target_id
              FROM players
              WHERE is_alive
              ORDER BY name, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Player::from).collect())
    }

    /// Fetch a single player by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, id: PlayerId) -> Result<Option<Player>, DbError> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r"SELECT id, name, code, is_alive, mission_id, target_id
              FROM players
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Player::from))
    }

    /// Fetch a single player by login code.
    ///
    /// This is the login path: the code is the only credential a player has.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Player>, DbError> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r"SELECT id, name, code, is_alive, mission_id, target_id
              FROM players
              WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Player::from))
    }

    /// Fetch everything a logged-in player's page needs: the player, their
    /// mission, their target, and the target's mission.
    ///
    /// Returns `None` if the player does not exist. Dangling mission or
    /// target references resolve to `None` fields rather than errors.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if any query fails.
    pub async fn profile(&self, id: PlayerId) -> Result<Option<PlayerProfile>, DbError> {
        let Some(player) = self.get(id).await? else {
            return Ok(None);
        };

        let missions = MissionStore::new(self.pool);

        let mut mission = None;
        if let Some(mission_id) = player.mission_id {
            mission = missions.get(mission_id).await?;
        }

        let mut target = None;
        if let Some(target_id) = player.target_id {
            target = self.get(target_id).await?;
        }

        let mut target_mission = None;
        if let Some(mission_id) = target.as_ref().and_then(|t| t.mission_id) {
            target_mission = missions.get(mission_id).await?;
        }

        Ok(Some(PlayerProfile {
            player,
            mission,
            target,
            target_mission,
        }))
    }

    /// Create a new player with the given name and login code.
    ///
    /// New players start alive, with no mission and no target.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::DuplicateCode`] if the code is already taken and
    /// [`DbError::Postgres`] for any other failure.
    pub async fn create(&self, name: &str, code: &str) -> Result<Player, DbError> {
        let id = PlayerId::new();
        let row = sqlx::query_as::<_, PlayerRow>(
            r"INSERT INTO players (id, name, code)
              VALUES ($1, $2, $3)
              RETURNING id, name, code, is_alive, mission_id, target_id",
        )
        .bind(id.into_inner())
        .bind(name)
        .bind(code)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_unique_violation(e, code))?;

        tracing::info!(player_id = %id, name, "Created player");
        Ok(Player::from(row))
    }

    /// Overwrite every mutable field of a player from the given record.
    ///
    /// This is the admin edit path. Returns `None` if no player with that
    /// id exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::DuplicateCode`] if the new code collides with
    /// another player's and [`DbError::Postgres`] for any other failure.
    pub async fn update(&self, player: &Player) -> Result<Option<Player>, DbError> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r"UPDATE players
              SET name = $2, code = $3, is_alive = $4, mission_id = $5, target_id = $6
              WHERE id = $1
              RETURNING id, name, code, is_alive, mission_id, target_id",
        )
        .bind(player.id.into_inner())
        .bind(&player.name)
        .bind(&player.code)
        .bind(player.is_alive)
        .bind(player.mission_id.map(MissionId::into_inner))
        .bind(player.target_id.map(PlayerId::into_inner))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::from_unique_violation(e, &player.code))?;

        Ok(row.map(Player::from))
    }

    /// Delete a player. Returns `true` if a row was removed.
    ///
    /// Other players targeting the deleted one fall back to no target
    /// (`ON DELETE SET NULL`); their claims and records cascade away.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete(&self, id: PlayerId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Hand a mission to a player. Returns the updated player, or `None` if
    /// the player does not exist.
    ///
    /// Mission slots are sticky: nothing else in the system reassigns them,
    /// so whatever is set here stays until the next explicit call.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn assign_mission(
        &self,
        player_id: PlayerId,
        mission_id: MissionId,
    ) -> Result<Option<Player>, DbError> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r"UPDATE players
              SET mission_id = $2
              WHERE id = $1
              RETURNING id, name, code, is_alive, mission_id, target_id",
        )
        .bind(player_id.into_inner())
        .bind(mission_id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Player::from))
    }

    /// Replace the target links of every listed player in one transaction.
    ///
    /// This is the cycle-manager write path: either every player in the
    /// batch gets their new target or none do, so a reader can never observe
    /// a half-relinked cycle.
    ///
    /// Uses a single UNNEST update rather than N statements to keep the
    /// round-trip count constant.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn relink_targets(
        &self,
        assignments: &[TargetAssignment],
    ) -> Result<(), DbError> {
        if assignments.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = assignments
            .iter()
            .map(|a| a.player_id.into_inner())
            .collect();
        let targets: Vec<Uuid> = assignments
            .iter()
            .map(|a| a.target_id.into_inner())
            .collect();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"UPDATE players AS p
              SET target_id = links.target_id
              FROM UNNEST($1::UUID[], $2::UUID[]) AS links(id, target_id)
              WHERE p.id = links.id",
        )
        .bind(&ids)
        .bind(&targets)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(count = assignments.len(), "Relinked target cycle");
        Ok(())
    }
}

/// A row from the `players` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct PlayerRow {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) code: String,
    pub(crate) is_alive: bool,
    pub(crate) mission_id: Option<Uuid>,
    pub(crate) target_id: Option<Uuid>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: PlayerId::from(row.id),
            name: row.name,
            code: row.code,
            is_alive: row.is_alive,
            mission_id: row.mission_id.map(MissionId::from),
            target_id: row.target_id.map(PlayerId::from),
        }
    }
}
