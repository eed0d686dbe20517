//! Dealer auto-play.
//!
//! The dealer is a small state machine over the hand's evaluation,
//! re-evaluated after every draw: stand on anything over 17, stand on hard
//! 17, and stand on soft 17 unless configured to hit it. The stopping test
//! is the exact conjunction `total == 17 && (hard || !hit_soft_17)`; a
//! plain `total == 17` check would also stand on soft totals it must hit.

use tracing::debug;

use crate::card::Card;
use crate::error::GameError;
use crate::hand::{Hand, HandEvaluation};
use crate::shoe::Shoe;

/// One entry in the dealer's play transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerPlayStep {
    /// Step number; step 0 is the starting evaluation with no draw.
    pub step: u32,
    /// Hand total after this step.
    pub total: u8,
    /// Whether the hand was soft after this step.
    pub is_soft: bool,
    /// Whether a card was drawn at this step.
    pub drew_card: bool,
    /// The card drawn, when one was.
    pub card: Option<Card>,
}

/// Full transcript of a dealer play-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerPlayResult {
    /// Ordered steps, starting with the no-draw initial evaluation.
    pub steps: Vec<DealerPlayStep>,
    /// The hand's evaluation when the dealer stopped.
    pub final_evaluation: HandEvaluation,
}

/// Dealer house-rule policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealerPolicy {
    hit_soft_17: bool,
}

impl DealerPolicy {
    /// Creates a policy. `hit_soft_17` defaults to false (stand).
    #[must_use]
    pub const fn new(hit_soft_17: bool) -> Self {
        Self { hit_soft_17 }
    }

    fn stops(self, eval: &HandEvaluation) -> bool {
        if eval.is_bust || eval.total > 17 {
            return true;
        }
        eval.total == 17 && (!eval.is_soft || !self.hit_soft_17)
    }

    /// Plays the dealer hand to completion, drawing from `shoe` as needed.
    ///
    /// A natural two-card 21 stops immediately without drawing, regardless
    /// of configuration. An exhausted shoe (zero-card draw) terminates the
    /// loop without error. The hand is marked completed on exit.
    ///
    /// # Errors
    ///
    /// Propagates card source failures from the shoe.
    pub async fn play(
        self,
        shoe: &Shoe,
        hand: &mut Hand,
    ) -> Result<DealerPlayResult, GameError> {
        let mut eval = hand.evaluation();
        let mut steps = vec![DealerPlayStep {
            step: 0,
            total: eval.total,
            is_soft: eval.is_soft,
            drew_card: false,
            card: None,
        }];

        if eval.is_blackjack {
            hand.mark_completed();
            return Ok(DealerPlayResult {
                steps,
                final_evaluation: eval,
            });
        }

        let mut step = 0;
        while !self.stops(&eval) {
            let drawn = shoe.draw(1).await?;
            let Some(card) = drawn.first().copied() else {
                break;
            };
            hand.add_card(card)?;
            step += 1;
            eval = hand.evaluation();
            steps.push(DealerPlayStep {
                step,
                total: eval.total,
                is_soft: eval.is_soft,
                drew_card: true,
                card: Some(card),
            });
        }

        hand.mark_completed();
        debug!(
            total = eval.total,
            soft = eval.is_soft,
            bust = eval.is_bust,
            draws = step,
            "dealer play finished"
        );
        Ok(DealerPlayResult {
            steps,
            final_evaluation: eval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::source::ScriptedSource;

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.add_card(card(rank)).unwrap();
        }
        hand
    }

    fn scripted_shoe(ranks: &[Rank]) -> Shoe {
        let cards = ranks.iter().map(|&r| card(r)).collect();
        Shoe::new(Box::new(ScriptedSource::new(cards)), 1)
    }

    #[tokio::test]
    async fn stands_on_hard_seventeen_without_drawing() {
        let shoe = scripted_shoe(&[Rank::Five]);
        let mut hand = hand_of(&[Rank::Ten, Rank::Seven]);

        let result = DealerPolicy::new(false).play(&shoe, &mut hand).await.unwrap();
        assert_eq!(result.steps.len(), 1);
        assert!(!result.steps[0].drew_card);
        assert_eq!(result.final_evaluation.total, 17);
        assert!(hand.is_completed());
        assert_eq!(shoe.remaining().await, 0);
    }

    #[tokio::test]
    async fn stands_on_soft_seventeen_by_default() {
        let shoe = scripted_shoe(&[Rank::Five]);
        let mut hand = hand_of(&[Rank::Ace, Rank::Six]);

        let result = DealerPolicy::new(false).play(&shoe, &mut hand).await.unwrap();
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.final_evaluation.total, 17);
        assert!(result.final_evaluation.is_soft);
    }

    #[tokio::test]
    async fn hits_soft_seventeen_when_configured() {
        let shoe = scripted_shoe(&[Rank::Two]);
        let mut hand = hand_of(&[Rank::Ace, Rank::Six]);

        let result = DealerPolicy::new(true).play(&shoe, &mut hand).await.unwrap();
        assert_eq!(result.steps.len(), 2);
        assert!(result.steps[1].drew_card);
        assert_eq!(result.final_evaluation.total, 19);
        assert!(result.final_evaluation.is_soft);
    }

    #[tokio::test]
    async fn hits_soft_totals_below_seventeen_even_when_standing_on_soft_17() {
        // Soft 16 must be hit under either configuration.
        let shoe = scripted_shoe(&[Rank::Ace, Rank::Ten]);
        let mut hand = hand_of(&[Rank::Ace, Rank::Five]);

        let result = DealerPolicy::new(false).play(&shoe, &mut hand).await.unwrap();
        // A,5 (soft 16) draws an ace -> soft 17, then stands.
        assert_eq!(result.final_evaluation.total, 17);
        assert!(result.final_evaluation.is_soft);
        assert_eq!(result.steps.len(), 2);
    }

    #[tokio::test]
    async fn draws_until_bust_and_records_transcript() {
        let shoe = scripted_shoe(&[Rank::Four, Rank::King]);
        let mut hand = hand_of(&[Rank::Ten, Rank::Two]);

        let result = DealerPolicy::new(false).play(&shoe, &mut hand).await.unwrap();
        assert_eq!(result.steps.len(), 3);
        assert_eq!(result.steps[0].total, 12);
        assert_eq!(result.steps[1].total, 16);
        assert_eq!(result.steps[2].total, 26);
        assert!(result.final_evaluation.is_bust);
        assert_eq!(
            result.steps[2].card,
            Some(Card::new(Rank::King, Suit::Clubs))
        );
    }

    #[tokio::test]
    async fn natural_blackjack_never_draws() {
        let shoe = scripted_shoe(&[Rank::Five]);
        let mut hand = hand_of(&[Rank::Ace, Rank::King]);

        let result = DealerPolicy::new(true).play(&shoe, &mut hand).await.unwrap();
        assert_eq!(result.steps.len(), 1);
        assert!(result.final_evaluation.is_blackjack);
        assert_eq!(shoe.remaining().await, 0);
    }

    #[tokio::test]
    async fn exhausted_shoe_ends_the_loop() {
        let shoe = scripted_shoe(&[]);
        let mut hand = hand_of(&[Rank::Two, Rank::Three]);

        let result = DealerPolicy::new(false).play(&shoe, &mut hand).await.unwrap();
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.final_evaluation.total, 5);
        assert!(hand.is_completed());
    }
}
