//! The game handle: every operation the surrounding UI layer calls.
//!
//! [`Game`] wraps a [`PostgresPool`] and holds nothing else -- all state
//! between calls lives in the database, and a fresh handle over the same
//! pool sees exactly the same game. The handle is passed explicitly to
//! whatever needs it; there is no ambient singleton.

use std::collections::BTreeMap;

use manhunt_types::{
    KillHistoryEntry, KillRequest, KillRequestId, Mission, MissionId, Player, PlayerId,
    PlayerProfile,
};
use rand::Rng;

use manhunt_db::{
    ConfirmOutcome, KillRequestStore, KillStatsStore, MissionStore, PlayerStore, PostgresPool,
    wipe_game_state,
};

use crate::cycle::{self, MIN_CYCLE_SIZE};
use crate::error::GameError;

/// Result of asking for a fresh target cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new cycle over `players` living players was drawn and persisted,
    /// replacing all previous target links of living players.
    Linked {
        /// How many players are in the new cycle.
        players: usize,
    },
    /// Fewer than two players are alive; every target link was left exactly
    /// as it was. This is a skip, not an error.
    NotEnoughPlayers {
        /// How many players are currently alive.
        alive: usize,
    },
}

/// Handle onto a running game.
///
/// Cheap to clone. All methods are independent database operations: no
/// method depends on another having been called first, and a failure in
/// one leaves every other untouched.
#[derive(Debug, Clone)]
pub struct Game {
    pool: PostgresPool,
}

impl Game {
    /// Create a game handle over an existing connection pool.
    pub const fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    /// Return the underlying pool handle.
    pub const fn pool(&self) -> &PostgresPool {
        &self.pool
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    /// List all players.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn players(&self) -> Result<Vec<Player>, GameError> {
        Ok(PlayerStore::new(self.pool.pool()).list().await?)
    }

    /// Fetch a single player by id.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn player(&self, id: PlayerId) -> Result<Option<Player>, GameError> {
        Ok(PlayerStore::new(self.pool.pool()).get(id).await?)
    }

    /// Look a player up by their login code. This is the whole login
    /// mechanism: whoever types a valid code is that player.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn player_by_code(&self, code: &str) -> Result<Option<Player>, GameError> {
        Ok(PlayerStore::new(self.pool.pool()).get_by_code(code).await?)
    }

    /// Fetch a player's page data: their record, mission, target, and the
    /// target's mission.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if any query fails.
    pub async fn player_profile(
        &self,
        id: PlayerId,
    ) -> Result<Option<PlayerProfile>, GameError> {
        Ok(PlayerStore::new(self.pool.pool()).profile(id).await?)
    }

    /// Add a player to the roster.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] wrapping
    /// [`DbError::DuplicateCode`](manhunt_db::DbError::DuplicateCode) if the
    /// login code is taken.
    pub async fn add_player(&self, name: &str, code: &str) -> Result<Player, GameError> {
        Ok(PlayerStore::new(self.pool.pool()).create(name, code).await?)
    }

    /// Overwrite a player's fields (admin edit). Returns `None` if the
    /// player no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the update fails.
    pub async fn update_player(&self, player: &Player) -> Result<Option<Player>, GameError> {
        Ok(PlayerStore::new(self.pool.pool()).update(player).await?)
    }

    /// Remove a player entirely. Returns `true` if a player was removed.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the delete fails.
    pub async fn remove_player(&self, id: PlayerId) -> Result<bool, GameError> {
        Ok(PlayerStore::new(self.pool.pool()).delete(id).await?)
    }

    // -----------------------------------------------------------------------
    // Missions
    // -----------------------------------------------------------------------

    /// List the mission catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn missions(&self) -> Result<Vec<Mission>, GameError> {
        Ok(MissionStore::new(self.pool.pool()).list().await?)
    }

    /// Fetch a single mission by id.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn mission(&self, id: MissionId) -> Result<Option<Mission>, GameError> {
        Ok(MissionStore::new(self.pool.pool()).get(id).await?)
    }

    /// Add a mission to the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the insert fails.
    pub async fn add_mission(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Mission, GameError> {
        Ok(MissionStore::new(self.pool.pool())
            .create(title, description)
            .await?)
    }

    /// Overwrite a mission's content. Returns `None` if the mission no
    /// longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the update fails.
    pub async fn update_mission(
        &self,
        mission: &Mission,
    ) -> Result<Option<Mission>, GameError> {
        Ok(MissionStore::new(self.pool.pool()).update(mission).await?)
    }

    /// Remove a mission from the catalogue. Returns `true` if a mission was
    /// removed; players holding it fall back to no mission.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the delete fails.
    pub async fn remove_mission(&self, id: MissionId) -> Result<bool, GameError> {
        Ok(MissionStore::new(self.pool.pool()).delete(id).await?)
    }

    /// Hand a mission to a player. Mission slots are sticky: drawing a new
    /// target cycle never reshuffles them, only this call changes them.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the update fails.
    pub async fn assign_mission(
        &self,
        player_id: PlayerId,
        mission_id: MissionId,
    ) -> Result<Option<Player>, GameError> {
        Ok(PlayerStore::new(self.pool.pool())
            .assign_mission(player_id, mission_id)
            .await?)
    }

    // -----------------------------------------------------------------------
    // Target cycle
    // -----------------------------------------------------------------------

    /// Draw a fresh target cycle over all living players using the thread
    /// RNG.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the roster read or the relink fails.
    pub async fn assign_targets(&self) -> Result<CycleOutcome, GameError> {
        self.assign_targets_with_rng(&mut rand::rng()).await
    }

    /// Draw a fresh target cycle using the supplied RNG.
    ///
    /// Every living player gets a new target forming one closed loop with
    /// no self-targets; dead players are untouched. With fewer than two
    /// living players nothing changes and the outcome says so. The relink
    /// itself is a single atomic batch.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the roster read or the relink fails.
    pub async fn assign_targets_with_rng<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<CycleOutcome, GameError> {
        let store = PlayerStore::new(self.pool.pool());
        let alive = store.alive().await?;

        if alive.len() < MIN_CYCLE_SIZE {
            tracing::info!(
                alive = alive.len(),
                "Skipped target assignment: not enough living players"
            );
            return Ok(CycleOutcome::NotEnoughPlayers { alive: alive.len() });
        }

        let order = cycle::shuffled_ids(rng, &alive);
        let assignments = cycle::link_ring(&order);
        store.relink_targets(&assignments).await?;

        tracing::info!(players = assignments.len(), "Drew new target cycle");
        Ok(CycleOutcome::Linked {
            players: assignments.len(),
        })
    }

    // -----------------------------------------------------------------------
    // Kill workflow
    // -----------------------------------------------------------------------

    /// Submit a kill claim: `killer_id` asserts they eliminated
    /// `target_id`. The claim sits pending until the target settles it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the insert fails.
    pub async fn submit_kill_claim(
        &self,
        killer_id: PlayerId,
        target_id: PlayerId,
    ) -> Result<KillRequest, GameError> {
        Ok(KillRequestStore::new(self.pool.pool())
            .create(killer_id, target_id)
            .await?)
    }

    /// The oldest pending claim against the given player, if any. This is
    /// what the player's own page polls to show the confirm/reject prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn pending_claim_for(
        &self,
        target_id: PlayerId,
    ) -> Result<Option<KillRequest>, GameError> {
        Ok(KillRequestStore::new(self.pool.pool())
            .pending_for_target(target_id)
            .await?)
    }

    /// Confirm a pending claim: the victim dies, the killer inherits the
    /// victim's target, and an audit record is written -- atomically.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the transaction fails.
    pub async fn confirm_kill(
        &self,
        request_id: KillRequestId,
    ) -> Result<ConfirmOutcome, GameError> {
        Ok(KillRequestStore::new(self.pool.pool())
            .confirm(request_id)
            .await?)
    }

    /// Reject a pending claim. Returns `true` if a pending claim was
    /// settled; player state never changes.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the update fails.
    pub async fn reject_kill(&self, request_id: KillRequestId) -> Result<bool, GameError> {
        Ok(KillRequestStore::new(self.pool.pool())
            .reject(request_id)
            .await?)
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Confirmed kills per killer; zero-kill players are absent.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn kill_counts(&self) -> Result<BTreeMap<PlayerId, u64>, GameError> {
        Ok(KillStatsStore::new(self.pool.pool()).kill_counts().await?)
    }

    /// The player with the most confirmed kills, or `None` before the first
    /// kill. Ties break toward the earliest-created player.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn top_killer(&self) -> Result<Option<Player>, GameError> {
        Ok(KillStatsStore::new(self.pool.pool()).top_killer().await?)
    }

    /// The full kill history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the query fails.
    pub async fn kill_history(&self) -> Result<Vec<KillHistoryEntry>, GameError> {
        Ok(KillStatsStore::new(self.pool.pool()).history().await?)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Wipe all game state (players, claims, records) in one transaction.
    /// The mission catalogue survives.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the transaction fails.
    pub async fn reset(&self) -> Result<(), GameError> {
        Ok(wipe_game_state(self.pool.pool()).await?)
    }
}
