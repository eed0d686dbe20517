//! Card source implementations.
//!
//! Three interchangeable [`CardSource`]s: a locally generated shuffled
//! shoe, a deterministic scripted sequence for tests, and the remote
//! Deck of Cards API.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::debug;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::SourceError;
use crate::shoe::CardSource;

fn build_decks(deck_count: u32) -> Vec<Card> {
    let mut cards = Vec::with_capacity(deck_count as usize * DECK_SIZE);
    for _ in 0..deck_count {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
    }
    cards
}

/// Locally generated shoe, shuffled with a seeded ChaCha8 RNG.
pub struct LocalSource {
    rng: Mutex<ChaCha8Rng>,
}

impl LocalSource {
    /// Creates a local source with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl CardSource for LocalSource {
    async fn fill(&self, deck_count: u32) -> Result<Vec<Card>, SourceError> {
        let mut cards = build_decks(deck_count);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        cards.shuffle(&mut *rng);
        Ok(cards)
    }
}

/// A fixed sequence of cards for deterministic tests.
///
/// The whole remaining script is handed out on the first fill; once it is
/// drained further fills return nothing, which exercises the shoe's
/// degraded short-draw path.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Card>>,
}

impl ScriptedSource {
    /// Creates a scripted source that yields `cards` in order.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            script: Mutex::new(cards.into()),
        }
    }
}

#[async_trait]
impl CardSource for ScriptedSource {
    async fn fill(&self, _deck_count: u32) -> Result<Vec<Card>, SourceError> {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(script.drain(..).collect())
    }
}

/// Default base URL of the remote deck API.
pub const DECK_API_BASE_URL: &str = "https://deckofcardsapi.com";

#[derive(Debug, Deserialize)]
struct DeckCreateResponse {
    deck_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeckDrawResponse {
    cards: Option<Vec<RawCard>>,
}

#[derive(Debug, Deserialize)]
struct RawCard {
    value: Option<String>,
    suit: Option<String>,
}

/// Remote shoe backed by the Deck of Cards API.
///
/// Each fill creates a fresh shuffled multi-deck on the API and draws it
/// down in a single call. The API's order is trusted as shuffled. Cards
/// with a missing rank or suit are skipped; unmapped names fall back per
/// [`Card::from_raw_names`].
pub struct DeckApiSource {
    http: reqwest::Client,
    base_url: String,
}

impl DeckApiSource {
    /// Creates a source against the public deck API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DECK_API_BASE_URL)
    }

    /// Creates a source against a custom base URL (e.g. a local stub).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for DeckApiSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardSource for DeckApiSource {
    async fn fill(&self, deck_count: u32) -> Result<Vec<Card>, SourceError> {
        let create_url = format!(
            "{}/api/deck/new/shuffle/?deck_count={deck_count}",
            self.base_url
        );
        let created: DeckCreateResponse = self
            .http
            .get(&create_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let deck_id = created
            .deck_id
            .ok_or(SourceError::MissingField("deck_id"))?;

        let target = deck_count as usize * DECK_SIZE;
        let draw_url = format!("{}/api/deck/{deck_id}/draw/?count={target}", self.base_url);
        let drawn: DeckDrawResponse = self
            .http
            .get(&draw_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let raw = drawn.cards.unwrap_or_default();
        debug!(%deck_id, cards = raw.len(), "fetched remote shoe");

        Ok(raw
            .into_iter()
            .filter_map(|c| match (c.value, c.suit) {
                (Some(value), Some(suit)) => Some(Card::from_raw_names(&value, &suit)),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_source_is_deterministic_per_seed() {
        let a = LocalSource::new(42).fill(2).await.unwrap();
        let b = LocalSource::new(42).fill(2).await.unwrap();
        let c = LocalSource::new(43).fill(2).await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 2 * DECK_SIZE);
    }

    #[tokio::test]
    async fn local_source_contains_each_card_deck_count_times() {
        let cards = LocalSource::new(1).fill(3).await.unwrap();
        let aces_of_spades = cards
            .iter()
            .filter(|c| **c == Card::new(Rank::Ace, Suit::Spades))
            .count();
        assert_eq!(aces_of_spades, 3);
    }

    #[tokio::test]
    async fn scripted_source_drains_once() {
        let script = vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Hearts),
        ];
        let source = ScriptedSource::new(script.clone());
        assert_eq!(source.fill(6).await.unwrap(), script);
        assert!(source.fill(6).await.unwrap().is_empty());
    }
}
