//! Game rules for manhunt: the target cycle, the kill workflow, and the
//! statistics every party wants to see afterwards.
//!
//! The surrounding UI layer talks to [`Game`], a stateless handle over the
//! `PostgreSQL` pool from [`manhunt_db`]. One call starts a round by
//! linking every living player into a single hunting cycle; from then on
//! players read their own target, submit kill claims, and settle the
//! claims made against them. Confirmation kills the victim, hands the
//! killer the victim's old target, and appends an audit record -- in one
//! transaction.
//!
//! # Modules
//!
//! - [`game`] -- the [`Game`] handle exposing the whole operation surface
//! - [`cycle`] -- pure cycle construction (shuffle + wrap-around link)
//! - [`config`] -- YAML configuration with env overrides
//! - [`error`] -- the game-layer error type

pub mod config;
pub mod cycle;
pub mod error;
pub mod game;

// Re-export primary types for convenience.
pub use config::{ConfigError, DatabaseConfig, GameConfig};
pub use cycle::{MIN_CYCLE_SIZE, link_ring, shuffled_ids};
pub use error::GameError;
pub use game::{CycleOutcome, Game};

// The settlement outcome crosses the layer boundary as-is.
pub use manhunt_db::ConfirmOutcome;
