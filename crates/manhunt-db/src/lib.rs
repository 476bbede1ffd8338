//! `PostgreSQL` data layer for the manhunt game core.
//!
//! One store per table, all borrowing a shared [`sqlx::PgPool`]. The
//! database owns every piece of persisted state; the game layer above holds
//! nothing between calls. Transactions cover the three multi-row mutations
//! (cycle relink, kill confirmation, game reset) -- there is no other
//! consistency mechanism.
//!
//! # Modules
//!
//! - [`postgres`] -- connection pool, configuration, migrations
//! - [`player_store`] -- roster CRUD, login lookup, profile, cycle relink
//! - [`mission_store`] -- mission catalogue CRUD
//! - [`kill_store`] -- claim state machine and the atomic confirmation
//! - [`stats_store`] -- kill counts, leaderboard, history
//! - [`reset`] -- full game wipe
//! - [`error`] -- shared error type

pub mod error;
pub mod kill_store;
pub mod mission_store;
pub mod player_store;
pub mod postgres;
pub mod reset;
pub mod stats_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use kill_store::{ConfirmOutcome, KillRequestStore};
pub use mission_store::MissionStore;
pub use player_store::PlayerStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use reset::wipe_game_state;
pub use stats_store::KillStatsStore;
