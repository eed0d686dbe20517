//! A single-table blackjack round engine.
//!
//! The crate provides a [`Game`] type that drives one round at a time:
//! deal, player actions (hit, stand, split, double), dealer auto-play, and
//! settlement. Cards come from an async [`Shoe`] that refreshes itself
//! from a pluggable [`CardSource`]: a local seeded RNG, a scripted
//! sequence for tests, or the remote deck API. Every operation returns an
//! immutable [`Snapshot`] that can be stored and loaded back, so the
//! service works request-scoped.
//!
//! # Example
//!
//! ```
//! use tablejack::{Game, GameOptions};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let mut game = Game::with_local_source(GameOptions::default(), 42);
//! game.new_round(100_00, 10_00);
//! game.deal_initial().await.unwrap();
//! let snapshot = game.stand().unwrap();
//! assert!(snapshot.player_hands[0].is_completed);
//! # });
//! ```

pub mod card;
pub mod dealer;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod payout;
pub mod shoe;
pub mod source;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use dealer::{DealerPlayResult, DealerPlayStep, DealerPolicy};
pub use error::{GameError, HandError, PhaseError, SnapshotError, SourceError};
pub use game::{Game, HandSnapshot, Phase, SettlementHandResult, Snapshot};
pub use hand::{Hand, HandEvaluation, evaluate};
pub use options::{DEFAULT_DECK_COUNT, GameOptions, RoundingMode};
pub use payout::{Amount, Outcome, PayoutResult, compute, format_amount};
pub use shoe::{CardSource, Shoe};
pub use source::{DeckApiSource, LocalSource, ScriptedSource};
