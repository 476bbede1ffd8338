//! Mission catalogue operations.
//!
//! Missions are plain admin-managed content. They are referenced by players
//! but never owned: a full game reset leaves this table alone.

use manhunt_types::{Mission, MissionId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `missions` table.
pub struct MissionStore<'a> {
    pool: &'a PgPool,
}

impl<'a> MissionStore<'a> {
    /// Create a new mission store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all missions, alphabetically by title.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self) -> Result<Vec<Mission>, DbError> {
        let rows = sqlx::query_as::<_, MissionRow>(
            r"SELECT id, title, description FROM missions ORDER BY title, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Mission::from).collect())
    }

    /// Fetch a single mission by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, id: MissionId) -> Result<Option<Mission>, DbError> {
        let row = sqlx::query_as::<_, MissionRow>(
            r"SELECT id, title, description FROM missions WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Mission::from))
    }

    /// Create a new mission.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn create(&self, title: &str, description: &str) -> Result<Mission, DbError> {
        let id = MissionId::new();
        let row = sqlx::query_as::<_, MissionRow>(
            r"INSERT INTO missions (id, title, description)
              VALUES ($1, $2, $3)
              RETURNING id, title, description",
        )
        .bind(id.into_inner())
        .bind(title)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        tracing::info!(mission_id = %id, title, "Created mission");
        Ok(Mission::from(row))
    }

    /// Overwrite a mission's title and description. Returns `None` if no
    /// mission with that id exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn update(&self, mission: &Mission) -> Result<Option<Mission>, DbError> {
        let row = sqlx::query_as::<_, MissionRow>(
            r"UPDATE missions
              SET title = $2, description = $3
              WHERE id = $1
              RETURNING id, title, description",
        )
        .bind(mission.id.into_inner())
        .bind(&mission.title)
        .bind(&mission.description)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Mission::from))
    }

    /// Delete a mission. Returns `true` if a row was removed.
    ///
    /// Players holding the mission fall back to no mission
    /// (`ON DELETE SET NULL`).
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete(&self, id: MissionId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// A row from the `missions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MissionRow {
    id: Uuid,
    title: String,
    description: String,
}

impl From<MissionRow> for Mission {
    fn from(row: MissionRow) -> Self {
        Self {
            id: MissionId::from(row.id),
            title: row.title,
            description: row.description,
        }
    }
}
