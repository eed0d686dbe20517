//! Round phase.

use serde::{Deserialize, Serialize};

/// Phase of a round.
///
/// Linear flow `NotStarted -> PlayerActing -> DealerActing -> Settled`,
/// with one shortcut: `PlayerActing -> Settled` when every player hand
/// busts before the dealer would act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Round created, initial deal pending.
    #[default]
    NotStarted,
    /// Waiting for player actions.
    PlayerActing,
    /// Dealer plays out their hand.
    DealerActing,
    /// Round finished; settlement can run (or has run).
    Settled,
}
