//! The snapshot contract: an immutable, serializable view of a round.
//!
//! A snapshot is emitted after every operation and can be stored by the
//! caller (session state, a database row) and loaded back to continue the
//! round in a fresh [`Game`]. Cards travel as two-character short codes.
//! Round-tripping preserves bankroll, bet, phase, every card identity and
//! order, every flag, the event log, and settlement results exactly.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::SnapshotError;
use crate::hand::{Hand, HandEvaluation};
use crate::payout::{Amount, Outcome};

use super::{Game, Phase, RoundState};

/// Settlement record for one player hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementHandResult {
    /// Index of the hand within the round.
    pub hand_index: usize,
    /// Outcome of the hand.
    pub outcome: Outcome,
    /// Effective bet (post-double) for the hand.
    pub bet: Amount,
    /// Amount paid out.
    pub payout: Amount,
    /// Net bankroll change for the hand.
    pub net_delta: Amount,
}

/// Serializable view of one hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSnapshot {
    /// Card short codes in draw order.
    pub cards: Vec<String>,
    /// Evaluation at the time the snapshot was taken (derived data).
    pub evaluation: HandEvaluation,
    /// Whether the hand is terminal.
    pub is_completed: bool,
    /// Whether the hand originated from a split.
    pub was_split_child: bool,
    /// Whether the hand doubled down.
    pub has_doubled: bool,
}

impl HandSnapshot {
    fn of(hand: &Hand) -> Self {
        Self {
            cards: hand.cards().iter().map(|c| c.code()).collect(),
            evaluation: hand.evaluation(),
            is_completed: hand.is_completed(),
            was_split_child: hand.was_split_child(),
            has_doubled: hand.has_doubled(),
        }
    }

    fn rehydrate(&self) -> Result<Hand, SnapshotError> {
        let cards = self
            .cards
            .iter()
            .map(|code| {
                Card::from_code(code).ok_or_else(|| SnapshotError::InvalidCardCode(code.clone()))
            })
            .collect::<Result<Vec<Card>, SnapshotError>>()?;
        Ok(Hand::rehydrate(
            cards,
            self.is_completed,
            self.was_split_child,
            self.has_doubled,
        ))
    }
}

/// Immutable, externally storable representation of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Round phase.
    pub phase: Phase,
    /// Current bankroll.
    pub bankroll: Amount,
    /// Base bet for the round.
    pub current_bet: Amount,
    /// Index of the first not-completed player hand (or past the end).
    pub active_hand_index: usize,
    /// Player hands in play order.
    pub player_hands: Vec<HandSnapshot>,
    /// The dealer's hand.
    pub dealer: HandSnapshot,
    /// Whether the dealer has played out their hand this round.
    pub dealer_played: bool,
    /// Event log, oldest first.
    pub events: Vec<String>,
    /// Per-hand settlement results; empty until settlement.
    pub settlement_results: Vec<SettlementHandResult>,
    /// Net bankroll change of the settled round.
    pub round_net_delta: Amount,
    /// Optional external round identifier.
    pub round_id: Option<u64>,
}

impl Snapshot {
    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Json(e.to_string()))
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Json(e.to_string()))
    }
}

impl Game {
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.ctx.phase,
            bankroll: self.ctx.bankroll,
            current_bet: self.ctx.current_bet,
            active_hand_index: self.ctx.active_hand_index,
            player_hands: self.ctx.player_hands.iter().map(HandSnapshot::of).collect(),
            dealer: HandSnapshot::of(&self.ctx.dealer_hand),
            dealer_played: self.ctx.dealer_played,
            events: self.ctx.events.clone(),
            settlement_results: self.ctx.settlement_results.clone(),
            round_net_delta: self.ctx.last_round_net,
            round_id: self.ctx.round_id,
        }
    }

    /// Re-emits the current state without mutating anything.
    #[must_use]
    pub fn refresh(&self) -> Snapshot {
        self.snapshot()
    }

    /// Rehydrates the round from a previously emitted snapshot.
    ///
    /// All-or-nothing: every hand is parsed before any state changes, so a
    /// malformed snapshot leaves the current round untouched. The dealer
    /// transcript is not part of the contract and comes back empty.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if a card code cannot be parsed.
    pub fn load(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let player_hands = snapshot
            .player_hands
            .iter()
            .map(HandSnapshot::rehydrate)
            .collect::<Result<Vec<Hand>, SnapshotError>>()?;
        let dealer_hand = snapshot.dealer.rehydrate()?;

        self.ctx = RoundState {
            player_hands,
            dealer_hand,
            active_hand_index: snapshot.active_hand_index,
            bankroll: snapshot.bankroll,
            current_bet: snapshot.current_bet,
            phase: snapshot.phase,
            dealer_played: snapshot.dealer_played,
            dealer_transcript: Vec::new(),
            events: snapshot.events.clone(),
            settlement_results: snapshot.settlement_results.clone(),
            last_round_net: snapshot.round_net_delta,
            round_id: snapshot.round_id,
        };
        Ok(())
    }
}
