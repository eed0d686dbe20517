//! Dealer advancement and round settlement.

use std::sync::Arc;

use tracing::info;

use crate::dealer::DealerPolicy;
use crate::error::{GameError, PhaseError};
use crate::payout::Amount;

use super::{Game, Phase, SettlementHandResult, Snapshot};

impl Game {
    /// Runs the dealer's hand to completion and moves to [`Phase::Settled`].
    ///
    /// No-op (unchanged snapshot) while any player hand is still open. The
    /// dealer transcript is retained and readable via
    /// [`Game::dealer_transcript`] until the next round.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the round is [`Phase::PlayerActing`],
    /// or a source error if the dealer's draws fail.
    pub async fn advance_dealer(&mut self) -> Result<Snapshot, GameError> {
        self.require_phase("advance_dealer", &[Phase::PlayerActing])?;

        if self.ctx.player_hands.iter().any(|h| !h.is_completed()) {
            return Ok(self.snapshot());
        }

        self.ctx.phase = Phase::DealerActing;
        let policy = DealerPolicy::new(self.dealer_hits_soft_17());
        let shoe = Arc::clone(&self.shoe);
        let result = policy.play(&shoe, &mut self.ctx.dealer_hand).await?;
        self.ctx.dealer_played = true;
        self.ctx.dealer_transcript = result.steps;
        self.ctx.phase = Phase::Settled;

        let eval = result.final_evaluation;
        if eval.is_bust {
            self.ctx.events.push("Dealer bust".to_owned());
        } else {
            let soft = if eval.is_soft { " (Soft)" } else { "" };
            self.ctx
                .events
                .push(format!("Dealer stands on {}{soft}", eval.total));
        }
        Ok(self.snapshot())
    }

    /// Settles every player hand against the dealer's final evaluation and
    /// applies the total net to the bankroll.
    ///
    /// Effective bets honour doubling (base bet times two) and split
    /// children settle without the natural-blackjack premium.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the round is [`Phase::Settled`] or
    /// [`Phase::DealerActing`].
    pub fn settle_round(&mut self) -> Result<Snapshot, PhaseError> {
        self.require_phase("settle_round", &[Phase::Settled, Phase::DealerActing])?;

        let dealer_eval = self.ctx.dealer_hand.evaluation();
        let mut total_delta: Amount = 0;
        let mut results = Vec::with_capacity(self.ctx.player_hands.len());
        for (index, hand) in self.ctx.player_hands.iter().enumerate() {
            let result = self.settle_hand(hand, &dealer_eval);
            total_delta += result.net_delta;
            results.push(SettlementHandResult {
                hand_index: index,
                outcome: result.outcome,
                bet: self.ctx.effective_bet(hand),
                payout: result.payout,
                net_delta: result.net_delta,
            });
        }

        self.ctx.settlement_results = results;
        self.ctx.bankroll += total_delta;
        self.ctx.last_round_net = total_delta;
        self.push_settled_event(total_delta);
        info!(net = total_delta, bankroll = self.ctx.bankroll, "round settled");
        Ok(self.snapshot())
    }
}
