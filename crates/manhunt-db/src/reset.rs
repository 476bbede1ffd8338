//! Full game reset.

use sqlx::PgPool;

use crate::error::DbError;

/// Delete every kill record, kill claim, and player in one transaction.
///
/// The mission catalogue survives a reset; only game state is wiped.
/// Deletion order respects the foreign keys (records and claims reference
/// players).
///
/// # Errors
///
/// Returns [`DbError::Postgres`] if any delete or the commit fails; the
/// transaction rolls back and nothing is removed.
pub async fn wipe_game_state(pool: &PgPool) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM kill_records")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM kill_requests")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM players")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!("Game state wiped (players, claims, records); missions kept");
    Ok(())
}
