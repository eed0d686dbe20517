//! The multi-deck card shoe.
//!
//! The shoe keeps a FIFO queue of cards and refreshes it wholesale from a
//! [`CardSource`] when a draw asks for more than remain. One async mutex
//! guards both the queue and the refill, so concurrent draws serialize and
//! at most one refill is in flight; every waiter observes the post-refill
//! queue.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::card::Card;
use crate::error::SourceError;
use crate::options::DEFAULT_DECK_COUNT;

/// A capability that can produce a full shuffled shoe of cards.
///
/// Implementations: a local seeded RNG, a scripted sequence for tests, and
/// the remote deck API. A locally generated shoe must be uniformly
/// shuffled; a remote source's order is trusted as already shuffled.
#[async_trait]
pub trait CardSource: Send + Sync {
    /// Produces `deck_count` decks' worth of cards in shuffled order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source fails (e.g. a network
    /// error from a remote deck API). A short or empty result is not an
    /// error; the shoe degrades instead.
    async fn fill(&self, deck_count: u32) -> Result<Vec<Card>, SourceError>;
}

/// A FIFO shoe fed by a [`CardSource`].
pub struct Shoe {
    source: Box<dyn CardSource>,
    deck_count: u32,
    cards: Mutex<VecDeque<Card>>,
}

impl Shoe {
    /// Creates an empty shoe over the given source.
    ///
    /// A `deck_count` of zero falls back to the default of 6. The first
    /// draw triggers the initial fill.
    #[must_use]
    pub fn new(source: Box<dyn CardSource>, deck_count: u32) -> Self {
        let deck_count = if deck_count == 0 {
            DEFAULT_DECK_COUNT
        } else {
            deck_count
        };
        Self {
            source,
            deck_count,
            cards: Mutex::new(VecDeque::new()),
        }
    }

    /// Number of cards remaining in the queue.
    pub async fn remaining(&self) -> usize {
        self.cards.lock().await.len()
    }

    /// Draws `count` cards in FIFO order.
    ///
    /// If fewer than `count` remain, the queue is replaced with a fresh
    /// shoe from the source first; a source returning short is tolerated by
    /// trying one more refill. If the shoe is still short after that, fewer
    /// cards than requested are returned (degraded, not an error).
    ///
    /// # Errors
    ///
    /// Propagates a [`SourceError`] if a refill fails outright.
    pub async fn draw(&self, count: usize) -> Result<Vec<Card>, SourceError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut cards = self.cards.lock().await;

        // At most two refill attempts per draw call.
        for _ in 0..2 {
            if cards.len() >= count {
                break;
            }
            let fresh = self.source.fill(self.deck_count).await?;
            debug!(cards = fresh.len(), "shoe refilled");
            cards.clear();
            cards.extend(fresh);
        }

        if cards.len() < count {
            warn!(
                requested = count,
                available = cards.len(),
                "card source exhausted, drawing short"
            );
        }

        let take = count.min(cards.len());
        Ok(cards.drain(..take).collect())
    }
}
