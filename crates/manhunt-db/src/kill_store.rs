//! Kill claim lifecycle: submission, lookup, confirmation, rejection.
//!
//! A claim is a row in `kill_requests` moving through the
//! `pending -> confirmed | rejected` state machine. Both transitions demand
//! the current status be `pending` in the UPDATE's WHERE clause, so a claim
//! settles at most once no matter how requests interleave.
//!
//! Confirmation is the one compound mutation in the game: flip the claim,
//! kill the target, hand the killer their victim's old target, and append
//! the audit record -- all inside a single transaction. A reader can never
//! observe a half-applied confirmation.

use chrono::{DateTime, Utc};
use manhunt_types::{
    KillRecord, KillRecordId, KillRequest, KillRequestId, KillRequestStatus, PlayerId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// Outcome of a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The claim settled: the victim is dead, the killer inherited the
    /// victim's target, and the audit record was written.
    Confirmed(KillRecord),
    /// No pending claim with that id exists (unknown id, or the claim was
    /// already settled). Nothing changed.
    NotPending,
    /// The killer or target row has vanished since the claim was submitted.
    /// The whole transaction rolled back; the claim is still pending.
    PlayerMissing,
}

/// Operations on the `kill_requests` and `kill_records` tables.
pub struct KillRequestStore<'a> {
    pool: &'a PgPool,
}

impl<'a> KillRequestStore<'a> {
    /// Create a new kill request store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Submit a new pending claim: `killer_id` asserts they eliminated
    /// `target_id`.
    ///
    /// The data layer deliberately does not check that the killer's current
    /// target matches `target_id`, nor that no other pending claim exists
    /// for the pair -- the UI flow owns both.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails (e.g. either
    /// player id does not exist).
    pub async fn create(
        &self,
        killer_id: PlayerId,
        target_id: PlayerId,
    ) -> Result<KillRequest, DbError> {
        let id = KillRequestId::new();
        let row = sqlx::query_as::<_, KillRequestRow>(
            r"INSERT INTO kill_requests (id, killer_id, target_id, status)
              VALUES ($1, $2, $3, $4::kill_request_status)
              RETURNING id, killer_id, target_id, status::TEXT AS status, created_at",
        )
        .bind(id.into_inner())
        .bind(killer_id.into_inner())
        .bind(target_id.into_inner())
        .bind(status_to_db(KillRequestStatus::Pending))
        .fetch_one(self.pool)
        .await?;

        tracing::info!(request_id = %id, killer = %killer_id, target = %target_id, "Kill claim submitted");
        KillRequest::try_from(row)
    }

    /// Fetch a single claim by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, id: KillRequestId) -> Result<Option<KillRequest>, DbError> {
        let row = sqlx::query_as::<_, KillRequestRow>(
            r"SELECT id, killer_id, target_id, status::TEXT AS status, created_at
              FROM kill_requests
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        row.map(KillRequest::try_from).transpose()
    }

    /// Fetch the oldest pending claim addressed to the given target, if any.
    ///
    /// This is what the target's page polls: "someone says they got you --
    /// confirm or reject?"
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn pending_for_target(
        &self,
        target_id: PlayerId,
    ) -> Result<Option<KillRequest>, DbError> {
        let row = sqlx::query_as::<_, KillRequestRow>(
            r"SELECT id, killer_id, target_id, status::TEXT AS status, created_at
              FROM kill_requests
              WHERE target_id = $1 AND status = 'pending'
              ORDER BY created_at, id
              LIMIT 1",
        )
        .bind(target_id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        row.map(KillRequest::try_from).transpose()
    }

    /// Confirm a pending claim.
    ///
    /// Atomically: mark the claim confirmed, mark the target dead and strip
    /// their target link, set the killer's target to the victim's former
    /// target (the cycle relink), and append a [`KillRecord`]. In the
    /// two-player endgame the victim's former target is the killer, so the
    /// killer ends up targeting themself -- the relink rule applies
    /// unchanged.
    ///
    /// If the claim is missing or already settled, or either player row has
    /// vanished, nothing is changed and the outcome says which case it was.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if any statement or the commit fails;
    /// the transaction rolls back.
    pub async fn confirm(&self, id: KillRequestId) -> Result<ConfirmOutcome, DbError> {
        let mut tx = self.pool.begin().await?;

        // Flip the status first; the WHERE clause is the settled-once guard.
        let claim: Option<(Uuid, Uuid)> = sqlx::query_as(
            r"UPDATE kill_requests
              SET status = 'confirmed'
              WHERE id = $1 AND status = 'pending'
              RETURNING killer_id, target_id",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await?;

        let Some((killer_id, target_id)) = claim else {
            tx.rollback().await?;
            tracing::debug!(request_id = %id, "Confirm ignored: no pending claim");
            return Ok(ConfirmOutcome::NotPending);
        };

        let killer: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM players WHERE id = $1")
            .bind(killer_id)
            .fetch_optional(&mut *tx)
            .await?;

        // The victim's outgoing link is what the killer inherits.
        let target: Option<(Option<Uuid>,)> =
            sqlx::query_as("SELECT target_id FROM players WHERE id = $1")
                .bind(target_id)
                .fetch_optional(&mut *tx)
                .await?;

        let (Some(_), Some((inherited_target,))) = (killer, target) else {
            tx.rollback().await?;
            tracing::warn!(request_id = %id, "Confirm aborted: killer or target row missing");
            return Ok(ConfirmOutcome::PlayerMissing);
        };

        // The victim leaves the cycle: dead, and holding no target link.
        sqlx::query("UPDATE players SET is_alive = FALSE, target_id = NULL WHERE id = $1")
            .bind(target_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE players SET target_id = $2 WHERE id = $1")
            .bind(killer_id)
            .bind(inherited_target)
            .execute(&mut *tx)
            .await?;

        let record_id = KillRecordId::new();
        let (created_at,): (DateTime<Utc>,) = sqlx::query_as(
            r"INSERT INTO kill_records (id, killer_id, target_id)
              VALUES ($1, $2, $3)
              RETURNING created_at",
        )
        .bind(record_id.into_inner())
        .bind(killer_id)
        .bind(target_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(request_id = %id, killer = %killer_id, target = %target_id, "Kill confirmed");
        Ok(ConfirmOutcome::Confirmed(KillRecord {
            id: record_id,
            killer_id: PlayerId::from(killer_id),
            target_id: PlayerId::from(target_id),
            created_at,
        }))
    }

    /// Reject a pending claim. Returns `true` if a pending claim was
    /// settled; no player state changes either way.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn reject(&self, id: KillRequestId) -> Result<bool, DbError> {
        let result = sqlx::query(
            r"UPDATE kill_requests
              SET status = 'rejected'
              WHERE id = $1 AND status = 'pending'",
        )
        .bind(id.into_inner())
        .execute(self.pool)
        .await?;

        let settled = result.rows_affected() > 0;
        if settled {
            tracing::info!(request_id = %id, "Kill claim rejected");
        }
        Ok(settled)
    }

    /// List all confirmed-kill audit records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn records(&self) -> Result<Vec<KillRecord>, DbError> {
        let rows: Vec<(Uuid, Uuid, Uuid, DateTime<Utc>)> = sqlx::query_as(
            r"SELECT id, killer_id, target_id, created_at
              FROM kill_records
              ORDER BY created_at DESC, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, killer_id, target_id, created_at)| KillRecord {
                id: KillRecordId::from(id),
                killer_id: PlayerId::from(killer_id),
                target_id: PlayerId::from(target_id),
                created_at,
            })
            .collect())
    }
}

/// A row from the `kill_requests` table, status cast to TEXT.
#[derive(Debug, Clone, sqlx::FromRow)]
struct KillRequestRow {
    id: Uuid,
    killer_id: Uuid,
    target_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<KillRequestRow> for KillRequest {
    type Error = DbError;

    fn try_from(row: KillRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: KillRequestId::from(row.id),
            killer_id: PlayerId::from(row.killer_id),
            target_id: PlayerId::from(row.target_id),
            status: status_from_db(&row.status)?,
            created_at: row.created_at,
        })
    }
}

/// Convert a [`KillRequestStatus`] to its `PostgreSQL` enum label.
const fn status_to_db(status: KillRequestStatus) -> &'static str {
    match status {
        KillRequestStatus::Pending => "pending",
        KillRequestStatus::Confirmed => "confirmed",
        KillRequestStatus::Rejected => "rejected",
    }
}

/// Parse a `PostgreSQL` enum label back into a [`KillRequestStatus`].
fn status_from_db(raw: &str) -> Result<KillRequestStatus, DbError> {
    match raw {
        "pending" => Ok(KillRequestStatus::Pending),
        "confirmed" => Ok(KillRequestStatus::Confirmed),
        "rejected" => Ok(KillRequestStatus::Rejected),
        other => Err(DbError::Decode(format!(
            "unknown kill_request_status label: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_roundtrip() {
        for status in [
            KillRequestStatus::Pending,
            KillRequestStatus::Confirmed,
            KillRequestStatus::Rejected,
        ] {
            let label = status_to_db(status);
            assert_eq!(status_from_db(label).ok(), Some(status));
        }
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        assert!(status_from_db("retracted").is_err());
    }
}
