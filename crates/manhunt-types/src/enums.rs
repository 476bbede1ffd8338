//! Enumeration types for the manhunt game core.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifecycle state of a kill claim.
///
/// A claim starts `Pending` and settles exactly once: the target either
/// confirms (`Confirmed`) or disputes it (`Rejected`). Both settled states
/// are terminal -- no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum KillRequestStatus {
    /// Submitted by the killer, awaiting the target's decision.
    Pending,
    /// The target acknowledged the kill; the victim is dead and the cycle
    /// has been relinked.
    Confirmed,
    /// The target disputed the claim; nothing else changed.
    Rejected,
}

impl KillRequestStatus {
    /// Whether this status admits no further transitions.
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Confirmed | Self::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_unsettled() {
        assert!(!KillRequestStatus::Pending.is_settled());
        assert!(KillRequestStatus::Confirmed.is_settled());
        assert!(KillRequestStatus::Rejected.is_settled());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&KillRequestStatus::Pending).ok();
        assert_eq!(json.as_deref(), Some("\"pending\""));
    }
}
