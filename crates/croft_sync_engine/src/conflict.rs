//! Conflict resolution policy.

use croft_model::Timestamp;

/// What to do with a downloaded remote snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotDecision {
    /// The remote snapshot wholesale-replaces the local dataset.
    AdoptRemote,
    /// The local dataset is left untouched.
    KeepLocal,
}

/// Policy for reconciling a remote snapshot against local state.
///
/// The policy is an explicit, tagged choice rather than an inline
/// comparison so the limitation is visible at the call site and a future
/// field-merge policy can slot in without touching the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The snapshot with the later `lastSync` stamp wins outright.
    ///
    /// Comparison is plain string order on the fixed-width stamps, which
    /// matches wall-clock order only as far as device clocks agree. Under
    /// clock skew or true concurrent edits the losing device's changes are
    /// silently discarded; there is no merge and no divergence warning.
    #[default]
    LastWriteWins,
}

impl ConflictPolicy {
    /// Decides whether to adopt a remote snapshot.
    ///
    /// `local` is the stamp the local dataset is known to reflect, absent
    /// on a device that has never synced. The remote wins only when it is
    /// strictly newer; an equal stamp means the remote is this device's
    /// own last write.
    #[must_use]
    pub fn resolve(&self, local: Option<&Timestamp>, remote: &Timestamp) -> SnapshotDecision {
        match self {
            ConflictPolicy::LastWriteWins => match local {
                Some(local) if remote <= local => SnapshotDecision::KeepLocal,
                _ => SnapshotDecision::AdoptRemote,
            },
        }
    }
}
