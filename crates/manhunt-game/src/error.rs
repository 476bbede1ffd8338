//! Error types for the game layer.

use manhunt_db::DbError;

/// Errors that can occur while running game operations.
///
/// Every failure is synchronous and scoped to the one operation that hit
/// it; a failed call never poisons the pool or the persisted state.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The data layer failed.
    #[error("data layer error: {0}")]
    Db(#[from] DbError),
}
