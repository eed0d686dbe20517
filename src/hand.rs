//! Hand storage and the hand evaluator.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::HandError;

/// Evaluation of a hand at a point in time.
///
/// Always derived on demand from the cards, never cached: a hand's
/// evaluation is recomputed after every card addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandEvaluation {
    /// Best legal total, or the canonical (minimal) total when bust.
    pub total: u8,
    /// Whether an ace is currently counted as 11.
    pub is_soft: bool,
    /// Whether the hand is a two-card 21 (ace plus ten-value card).
    pub is_blackjack: bool,
    /// Whether no arrangement of aces yields a total of 21 or less.
    pub is_bust: bool,
}

/// Evaluates a slice of cards.
///
/// All aces start at 1. If the hand holds an ace and promoting exactly one
/// ace to 11 stays at 21 or under, the promoted total wins; promoting a
/// second ace would add another 10 and can never help. When every candidate
/// is over 21 the minimal one is reported as the canonical bust total.
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandEvaluation {
    let mut aces: u8 = 0;
    let mut non_ace_sum: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        } else {
            non_ace_sum = non_ace_sum.saturating_add(card.base_value());
        }
    }

    let base_total = non_ace_sum.saturating_add(aces);
    // Promotion fits iff base_total + 10 <= 21.
    let promoted = (aces > 0 && base_total <= 11).then(|| base_total + 10);

    let total = promoted.unwrap_or(base_total);
    let is_soft = promoted.is_some();
    let is_bust = base_total > 21;
    let is_blackjack = cards.len() == 2 && aces == 1 && cards.iter().any(|c| c.base_value() == 10);

    HandEvaluation {
        total,
        is_soft,
        is_blackjack,
        is_bust,
    }
}

/// A hand of cards, player or dealer.
///
/// Cards are append-only and keep their draw order. A completed hand is
/// terminal: adding another card is an error.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    completed: bool,
    was_split_child: bool,
    has_doubled: bool,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            completed: false,
            was_split_child: false,
            has_doubled: false,
        }
    }

    /// Creates a one-card hand produced by splitting a pair.
    ///
    /// Split children never qualify for the natural-blackjack payout.
    #[must_use]
    pub fn split_child(card: Card) -> Self {
        Self {
            cards: vec![card],
            completed: false,
            was_split_child: true,
            has_doubled: false,
        }
    }

    /// Rebuilds a hand from snapshot parts.
    pub(crate) fn rehydrate(
        cards: Vec<Card>,
        completed: bool,
        was_split_child: bool,
        has_doubled: bool,
    ) -> Self {
        Self {
            cards,
            completed,
            was_split_child,
            has_doubled,
        }
    }

    /// Appends a card to the hand.
    ///
    /// # Errors
    ///
    /// Returns [`HandError::Completed`] if the hand is already completed.
    pub fn add_card(&mut self, card: Card) -> Result<(), HandError> {
        if self.completed {
            return Err(HandError::Completed);
        }
        self.cards.push(card);
        Ok(())
    }

    /// Returns the cards in draw order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns whether the hand is terminal.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns whether the hand originated from a split.
    #[must_use]
    pub const fn was_split_child(&self) -> bool {
        self.was_split_child
    }

    /// Returns whether the hand has doubled down.
    #[must_use]
    pub const fn has_doubled(&self) -> bool {
        self.has_doubled
    }

    /// Marks the hand terminal. No further cards or actions apply.
    pub const fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Marks the hand as doubled down.
    pub const fn mark_doubled(&mut self) {
        self.has_doubled = true;
    }

    /// Returns whether the hand is exactly two cards of equal rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Evaluates the hand's current cards.
    #[must_use]
    pub fn evaluation(&self) -> HandEvaluation {
        evaluate(&self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }

    fn eval_of(ranks: &[Rank]) -> HandEvaluation {
        let cards: Vec<Card> = ranks.iter().map(|&r| card(r)).collect();
        evaluate(&cards)
    }

    #[test]
    fn no_aces_sums_base_values() {
        let eval = eval_of(&[Rank::Five, Rank::Nine, Rank::Three]);
        assert_eq!(eval.total, 17);
        assert!(!eval.is_soft);
        assert!(!eval.is_bust);
        assert!(!eval.is_blackjack);
    }

    #[test]
    fn one_ace_promotes_when_it_fits() {
        let eval = eval_of(&[Rank::Ace, Rank::Six]);
        assert_eq!(eval.total, 17);
        assert!(eval.is_soft);
    }

    #[test]
    fn ace_demotes_when_promotion_busts() {
        let eval = eval_of(&[Rank::Ace, Rank::Six, Rank::Nine]);
        assert_eq!(eval.total, 16);
        assert!(!eval.is_soft);
        assert!(!eval.is_bust);
    }

    #[test]
    fn two_aces_promote_only_one() {
        let eval = eval_of(&[Rank::Ace, Rank::Ace]);
        assert_eq!(eval.total, 12);
        assert!(eval.is_soft);
        assert!(!eval.is_blackjack);
    }

    #[test]
    fn bust_reports_minimal_total() {
        let eval = eval_of(&[Rank::King, Rank::Nine, Rank::Five]);
        assert_eq!(eval.total, 24);
        assert!(eval.is_bust);
        assert!(!eval.is_soft);
    }

    #[test]
    fn ace_hand_is_not_bust_while_demotion_helps() {
        let eval = eval_of(&[Rank::Ace, Rank::King, Rank::King]);
        assert_eq!(eval.total, 21);
        assert!(!eval.is_bust);
        assert!(!eval.is_soft);
        // Three cards: a 21, but never a blackjack.
        assert!(!eval.is_blackjack);
    }

    #[test]
    fn blackjack_requires_ace_plus_ten_value() {
        assert!(eval_of(&[Rank::Ace, Rank::King]).is_blackjack);
        assert!(eval_of(&[Rank::Ace, Rank::Ten]).is_blackjack);
        assert!(!eval_of(&[Rank::Ace, Rank::Nine]).is_blackjack);
        // 7 + 7 + 7 = 21 but not two cards.
        assert!(!eval_of(&[Rank::Seven, Rank::Seven, Rank::Seven]).is_blackjack);
    }

    #[test]
    fn completed_hand_rejects_cards() {
        let mut hand = Hand::new();
        hand.add_card(card(Rank::Ten)).unwrap();
        hand.mark_completed();
        assert_eq!(hand.add_card(card(Rank::Five)), Err(HandError::Completed));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn split_child_carries_its_flag() {
        let mut hand = Hand::split_child(card(Rank::Ace));
        hand.add_card(card(Rank::King)).unwrap();
        assert!(hand.was_split_child());
        // Still evaluates as blackjack shape; the payout layer suppresses it.
        assert!(hand.evaluation().is_blackjack);
    }

    #[test]
    fn pair_detection() {
        let mut hand = Hand::new();
        hand.add_card(Card::new(Rank::Eight, Suit::Clubs)).unwrap();
        hand.add_card(Card::new(Rank::Eight, Suit::Hearts)).unwrap();
        assert!(hand.is_pair());
        hand.add_card(Card::new(Rank::Eight, Suit::Spades)).unwrap();
        assert!(!hand.is_pair());
    }
}
