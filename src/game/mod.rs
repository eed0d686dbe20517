//! The round state machine (game service).
//!
//! One [`Game`] drives one logical round at a time: deal, player actions,
//! dealer play, settlement. The round context is a single owned mutable
//! value behind `&mut self`; callers serialize access. Only the
//! [`Shoe`](crate::shoe::Shoe) tolerates concurrent callers.

use std::sync::Arc;

use tracing::debug;

use crate::dealer::DealerPlayStep;
use crate::error::PhaseError;
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::payout::{self, Amount, Outcome, format_amount};
use crate::shoe::Shoe;
use crate::source::LocalSource;

mod actions;
mod dealer;
pub mod snapshot;
pub mod state;

pub use snapshot::{HandSnapshot, SettlementHandResult, Snapshot};
pub use state::Phase;

/// Mutable state of one round.
///
/// Owned exclusively by the [`Game`]; discarded and rebuilt by
/// [`Game::new_round`] or [`Game::load`].
#[derive(Debug, Default)]
pub(crate) struct RoundState {
    pub(crate) player_hands: Vec<Hand>,
    pub(crate) dealer_hand: Hand,
    pub(crate) active_hand_index: usize,
    pub(crate) bankroll: Amount,
    pub(crate) current_bet: Amount,
    pub(crate) phase: Phase,
    pub(crate) dealer_played: bool,
    pub(crate) dealer_transcript: Vec<DealerPlayStep>,
    pub(crate) events: Vec<String>,
    pub(crate) settlement_results: Vec<SettlementHandResult>,
    pub(crate) last_round_net: Amount,
    pub(crate) round_id: Option<u64>,
}

impl RoundState {
    /// Effective bet for a hand: the base round bet, doubled if the hand
    /// doubled down (applied at most once per hand, splits included).
    fn effective_bet(&self, hand: &Hand) -> Amount {
        if hand.has_doubled() {
            self.current_bet * 2
        } else {
            self.current_bet
        }
    }
}

/// A single-table blackjack round engine.
///
/// # Example
///
/// ```
/// use tablejack::{Game, GameOptions};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let mut game = Game::with_local_source(GameOptions::default(), 42);
/// game.new_round(100_00, 10_00);
/// let snapshot = game.deal_initial().await.unwrap();
/// assert_eq!(snapshot.player_hands[0].cards.len(), 2);
/// # });
/// ```
pub struct Game {
    shoe: Arc<Shoe>,
    options: GameOptions,
    ctx: RoundState,
}

impl Game {
    /// Creates a game over an existing shoe (possibly shared).
    #[must_use]
    pub fn new(options: GameOptions, shoe: Arc<Shoe>) -> Self {
        Self {
            shoe,
            options,
            ctx: RoundState::default(),
        }
    }

    /// Creates a game with its own locally generated, seeded shoe.
    #[must_use]
    pub fn with_local_source(options: GameOptions, seed: u64) -> Self {
        let shoe = Shoe::new(
            Box::new(LocalSource::new(seed)),
            options.effective_deck_count(),
        );
        Self::new(options, Arc::new(shoe))
    }

    /// The shoe this game draws from.
    #[must_use]
    pub fn shoe(&self) -> &Arc<Shoe> {
        &self.shoe
    }

    /// Current round phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.ctx.phase
    }

    /// Current bankroll.
    #[must_use]
    pub fn bankroll(&self) -> Amount {
        self.ctx.bankroll
    }

    /// Event log of the current round, oldest first.
    #[must_use]
    pub fn events(&self) -> &[String] {
        &self.ctx.events
    }

    /// Transcript of the dealer's last play-out, empty until the dealer
    /// has acted this round.
    #[must_use]
    pub fn dealer_transcript(&self) -> &[DealerPlayStep] {
        &self.ctx.dealer_transcript
    }

    /// Attaches an external round identifier, carried through snapshots.
    pub const fn set_round_id(&mut self, round_id: u64) {
        self.ctx.round_id = Some(round_id);
    }

    /// Starts a fresh round. Valid from any phase (restarts).
    ///
    /// Resets all round state, creates one empty player hand, and leaves
    /// the round in [`Phase::NotStarted`] until the initial deal.
    pub fn new_round(&mut self, starting_bankroll: Amount, bet: Amount) -> Snapshot {
        debug!(bankroll = starting_bankroll, bet, "new round");
        self.ctx = RoundState {
            player_hands: vec![Hand::new()],
            bankroll: starting_bankroll,
            current_bet: bet,
            events: vec!["New game started".to_owned()],
            ..RoundState::default()
        };
        self.snapshot()
    }

    pub(crate) fn require_phase(
        &self,
        operation: &'static str,
        allowed: &[Phase],
    ) -> Result<(), PhaseError> {
        if allowed.contains(&self.ctx.phase) {
            Ok(())
        } else {
            Err(PhaseError {
                operation,
                phase: self.ctx.phase,
            })
        }
    }

    /// Moves the active-hand index past completed hands. The index always
    /// lands on the first not-completed hand, or past the end when all
    /// are done.
    pub(crate) fn advance_active_hand(&mut self) {
        while self
            .ctx
            .player_hands
            .get(self.ctx.active_hand_index)
            .is_some_and(Hand::is_completed)
        {
            self.ctx.active_hand_index += 1;
        }
    }

    /// Settles the round immediately when every player hand has busted.
    ///
    /// The dealer never plays in this path: the hole card stays logically
    /// hidden and `dealer_played` remains false. Each hand is an
    /// unconditional loss of its effective bet.
    pub(crate) fn maybe_auto_settle_on_all_bust(&mut self) {
        let all_bust = !self.ctx.player_hands.is_empty()
            && self
                .ctx
                .player_hands
                .iter()
                .all(|h| h.is_completed() && h.evaluation().is_bust);
        if !all_bust || self.ctx.phase == Phase::Settled {
            return;
        }

        self.ctx.phase = Phase::Settled;
        self.ctx
            .events
            .push("All player hands bust — round settled".to_owned());

        let mut total_delta: Amount = 0;
        self.ctx.settlement_results.clear();
        for (index, hand) in self.ctx.player_hands.iter().enumerate() {
            let bet = self.ctx.effective_bet(hand);
            total_delta -= bet;
            self.ctx.settlement_results.push(SettlementHandResult {
                hand_index: index,
                outcome: Outcome::Bust,
                bet,
                payout: 0,
                net_delta: -bet,
            });
        }
        self.ctx.bankroll += total_delta;
        self.ctx.last_round_net = total_delta;
        self.push_settled_event(total_delta);
    }

    pub(crate) fn push_settled_event(&mut self, net: Amount) {
        let sign = if net >= 0 { "+" } else { "" };
        self.ctx
            .events
            .push(format!("Round settled (net {sign}{})", format_amount(net)));
    }

    pub(crate) fn rounding(&self) -> crate::options::RoundingMode {
        self.options.rounding_blackjack
    }

    pub(crate) fn dealer_hits_soft_17(&self) -> bool {
        self.options.dealer_hit_soft_17
    }

    pub(crate) fn settle_hand(&self, hand: &Hand, dealer: &crate::hand::HandEvaluation) -> payout::PayoutResult {
        payout::compute(
            &hand.evaluation(),
            dealer,
            self.ctx.effective_bet(hand),
            hand.was_split_child(),
            self.rounding(),
        )
    }
}
