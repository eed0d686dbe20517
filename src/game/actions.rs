//! Player-facing round operations: deal, hit, stand, split, double.
//!
//! Every operation is phase-guarded. A structurally invalid call inside
//! the right phase (doubling a three-card hand, splitting unequal ranks)
//! is a business no-op: the unchanged snapshot comes back, with no event
//! and no error.

use std::sync::Arc;

use tracing::debug;

use crate::error::GameError;
use crate::hand::Hand;

use super::{Game, Phase, Snapshot};

impl Game {
    /// Deals the initial four cards, alternating player, dealer, player,
    /// dealer. A natural player blackjack completes the hand immediately.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the round is [`Phase::NotStarted`]
    /// (dealing twice without a new round fails), or a source error if
    /// the shoe's refill fails.
    pub async fn deal_initial(&mut self) -> Result<Snapshot, GameError> {
        self.require_phase("deal_initial", &[Phase::NotStarted])?;

        if self.ctx.player_hands.is_empty() {
            self.ctx.player_hands.push(Hand::new());
        }

        let shoe = Arc::clone(&self.shoe);
        let cards = shoe.draw(4).await?;

        // Nothing is mutated until the draw resolves; a cancelled draw
        // leaves the round untouched.
        let mut cards = cards.into_iter();
        for i in 0..4 {
            let Some(card) = cards.next() else { break };
            if i % 2 == 0 {
                self.ctx.player_hands[0].add_card(card)?;
            } else {
                self.ctx.dealer_hand.add_card(card)?;
            }
        }

        let eval = self.ctx.player_hands[0].evaluation();
        if eval.is_blackjack {
            self.ctx.player_hands[0].mark_completed();
            self.ctx.events.push("Player blackjack!".to_owned());
        }
        self.ctx.phase = Phase::PlayerActing;
        debug!(player_total = eval.total, "initial deal complete");
        Ok(self.snapshot())
    }

    /// Draws one card for the active hand.
    ///
    /// Bust or 21 completes the hand; completed hands advance the active
    /// index, and an all-bust board settles the round without dealer play.
    /// No-op when the active index is past the end or the hand is already
    /// completed. A zero-card draw from an exhausted source is tolerated
    /// as a no-op draw.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the round is [`Phase::PlayerActing`],
    /// or a source error if the shoe's refill fails.
    pub async fn hit(&mut self) -> Result<Snapshot, GameError> {
        self.require_phase("hit", &[Phase::PlayerActing])?;

        let Some(hand) = self.ctx.player_hands.get(self.ctx.active_hand_index) else {
            return Ok(self.snapshot());
        };
        if hand.is_completed() {
            return Ok(self.snapshot());
        }

        let shoe = Arc::clone(&self.shoe);
        let drawn = shoe.draw(1).await?;

        let hand = &mut self.ctx.player_hands[self.ctx.active_hand_index];
        if let Some(card) = drawn.first().copied() {
            hand.add_card(card)?;
        }
        let eval = hand.evaluation();
        if eval.is_bust || eval.is_blackjack {
            hand.mark_completed();
            self.ctx.events.push(
                if eval.is_bust {
                    "Hand bust"
                } else {
                    "Hand blackjack"
                }
                .to_owned(),
            );
        }

        self.advance_active_hand();
        self.maybe_auto_settle_on_all_bust();
        Ok(self.snapshot())
    }

    /// Stands the active hand.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the round is [`Phase::PlayerActing`].
    pub fn stand(&mut self) -> Result<Snapshot, crate::error::PhaseError> {
        self.require_phase("stand", &[Phase::PlayerActing])?;

        let Some(hand) = self.ctx.player_hands.get_mut(self.ctx.active_hand_index) else {
            return Ok(self.snapshot());
        };
        hand.mark_completed();
        self.ctx.events.push("Stand".to_owned());

        self.advance_active_hand();
        self.maybe_auto_settle_on_all_bust();
        Ok(self.snapshot())
    }

    /// Splits the active hand's pair into two split-child hands.
    ///
    /// Each child keeps one card of the pair and draws one fresh card; the
    /// pair hand is replaced in place and the active index stays on the
    /// first child. No-op unless the hand is exactly two cards of equal
    /// rank.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the round is [`Phase::PlayerActing`],
    /// or a source error if the shoe's refill fails.
    pub async fn split(&mut self) -> Result<Snapshot, GameError> {
        self.require_phase("split", &[Phase::PlayerActing])?;

        let index = self.ctx.active_hand_index;
        let Some(hand) = self.ctx.player_hands.get(index) else {
            return Ok(self.snapshot());
        };
        if hand.is_completed() || !hand.is_pair() {
            return Ok(self.snapshot());
        }
        let first = hand.cards()[0];
        let second = hand.cards()[1];

        let shoe = Arc::clone(&self.shoe);
        let draws = shoe.draw(2).await?;

        let mut left = Hand::split_child(first);
        let mut right = Hand::split_child(second);
        if let Some(card) = draws.first().copied() {
            left.add_card(card)?;
        }
        if let Some(card) = draws.get(1).copied() {
            right.add_card(card)?;
        }

        self.ctx.player_hands.remove(index);
        self.ctx.player_hands.insert(index, right);
        self.ctx.player_hands.insert(index, left);
        self.ctx.events.push("Split pair".to_owned());
        debug!(hands = self.ctx.player_hands.len(), "pair split");
        Ok(self.snapshot())
    }

    /// Doubles down on the active hand: one card, doubled bet, completed.
    ///
    /// The effective bet becomes twice the round's base bet, applied at
    /// most once per hand. No-op unless the hand holds exactly its
    /// original two cards and has not already doubled.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the round is [`Phase::PlayerActing`],
    /// or a source error if the shoe's refill fails.
    pub async fn double(&mut self) -> Result<Snapshot, GameError> {
        self.require_phase("double", &[Phase::PlayerActing])?;

        let index = self.ctx.active_hand_index;
        let Some(hand) = self.ctx.player_hands.get(index) else {
            return Ok(self.snapshot());
        };
        if hand.is_completed() || hand.len() != 2 || hand.has_doubled() {
            return Ok(self.snapshot());
        }

        let shoe = Arc::clone(&self.shoe);
        let drawn = shoe.draw(1).await?;

        let hand = &mut self.ctx.player_hands[index];
        hand.mark_doubled();
        if let Some(card) = drawn.first().copied() {
            hand.add_card(card)?;
        }
        hand.mark_completed();
        self.ctx.events.push("Double down".to_owned());

        self.advance_active_hand();
        self.maybe_auto_settle_on_all_bust();
        Ok(self.snapshot())
    }
}
