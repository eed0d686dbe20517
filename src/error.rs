//! Error types for engine operations.
//!
//! Pure computations (the evaluator, the payout calculator) never fail.
//! Fallibility lives at the state-machine boundary (phase guards), the
//! shoe boundary (card source failures), and the snapshot boundary
//! (rehydration). Business no-ops are not errors: they return the
//! unchanged snapshot and leave no trace in the event log.

use thiserror::Error;

use crate::game::Phase;

/// Errors from mutating a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandError {
    /// The hand is completed and can no longer receive cards.
    #[error("cannot add a card to a completed hand")]
    Completed,
}

/// An operation was invoked outside its required phase.
///
/// Distinct from a business no-op so callers can tell "wrong call order"
/// from "wrong hand shape".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{operation} is not valid in phase {phase:?}")]
pub struct PhaseError {
    /// The operation that was attempted.
    pub operation: &'static str,
    /// The phase the round was in at the time.
    pub phase: Phase,
}

/// Errors from the underlying card source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The deck API request failed.
    #[error("deck api request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The deck API response was missing a required field.
    #[error("deck api response missing {0}")]
    MissingField(&'static str),
}

/// Errors from rehydrating a round from a snapshot.
///
/// A failed load leaves the current round state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// A card short code in the snapshot could not be parsed.
    #[error("unrecognized card code `{0}`")]
    InvalidCardCode(String),
    /// The snapshot JSON could not be parsed or written.
    #[error("malformed snapshot json: {0}")]
    Json(String),
}

/// Any failure a round operation can surface.
#[derive(Debug, Error)]
pub enum GameError {
    /// Operation invoked in the wrong phase.
    #[error(transparent)]
    Phase(#[from] PhaseError),
    /// The card source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// A card was added to a completed hand.
    #[error(transparent)]
    Hand(#[from] HandError),
}
