//! Payout computation for settled hands.
//!
//! Standard rules: 3:2 for a natural blackjack, even money for an ordinary
//! win, push returns the bet, bust always loses. A natural requires a
//! two-card 21 on a non-split hand; a 21 reached on a split child pays even
//! money only. The dealer never splits, so a dealer two-card 21 is always
//! natural.

use serde::{Deserialize, Serialize};

use crate::hand::HandEvaluation;
use crate::options::RoundingMode;

/// Money amount in minor currency units (cents). Integer arithmetic only.
pub type Amount = i64;

/// Outcome of a settled hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Natural blackjack, pays 3:2.
    Blackjack,
    /// Even-money win.
    Win,
    /// Loss.
    Lose,
    /// Tie; the bet is returned.
    Push,
    /// Player bust; always a loss.
    Bust,
}

/// Outcome and money movement for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutResult {
    /// The outcome of the hand.
    pub outcome: Outcome,
    /// Net bankroll change (positive = profit).
    pub net_delta: Amount,
    /// Amount paid out on top of the returned bet.
    pub payout: Amount,
}

/// Half the bet, rounded per `mode` when the bet is odd.
const fn half(bet: Amount, mode: RoundingMode) -> Amount {
    let floor = bet / 2;
    if bet % 2 == 0 {
        floor
    } else {
        match mode {
            RoundingMode::Down => floor,
            RoundingMode::Up | RoundingMode::Nearest => floor + 1,
        }
    }
}

const fn blackjack_payout(bet: Amount, mode: RoundingMode) -> Amount {
    bet + half(bet, mode)
}

const fn is_natural(eval: &HandEvaluation, was_split: bool) -> bool {
    eval.is_blackjack && !was_split
}

/// Computes the outcome and net delta for a player hand versus the dealer.
///
/// `bet` is the effective bet for this hand (already doubled if the hand
/// doubled down). First matching rule wins:
///
/// 1. player bust loses, 2. dealer bust wins (3:2 if natural), 3. both
/// natural push, 4. dealer natural loses, 5. player natural pays 3:2,
/// 6.-8. total comparison.
#[must_use]
pub fn compute(
    player: &HandEvaluation,
    dealer: &HandEvaluation,
    bet: Amount,
    was_split: bool,
    rounding: RoundingMode,
) -> PayoutResult {
    if player.is_bust {
        return PayoutResult {
            outcome: Outcome::Bust,
            net_delta: -bet,
            payout: 0,
        };
    }

    let player_natural = is_natural(player, was_split);

    if dealer.is_bust {
        if player_natural {
            let payout = blackjack_payout(bet, rounding);
            return PayoutResult {
                outcome: Outcome::Blackjack,
                net_delta: payout,
                payout,
            };
        }
        return PayoutResult {
            outcome: Outcome::Win,
            net_delta: bet,
            payout: bet,
        };
    }

    let dealer_natural = dealer.is_blackjack;

    if player_natural && dealer_natural {
        return PayoutResult {
            outcome: Outcome::Push,
            net_delta: 0,
            payout: 0,
        };
    }
    if dealer_natural {
        return PayoutResult {
            outcome: Outcome::Lose,
            net_delta: -bet,
            payout: 0,
        };
    }
    if player_natural {
        let payout = blackjack_payout(bet, rounding);
        return PayoutResult {
            outcome: Outcome::Blackjack,
            net_delta: payout,
            payout,
        };
    }

    if player.total > dealer.total {
        PayoutResult {
            outcome: Outcome::Win,
            net_delta: bet,
            payout: bet,
        }
    } else if player.total < dealer.total {
        PayoutResult {
            outcome: Outcome::Lose,
            net_delta: -bet,
            payout: 0,
        }
    } else {
        PayoutResult {
            outcome: Outcome::Push,
            net_delta: 0,
            payout: 0,
        }
    }
}

/// Renders an amount of minor units as `units.cc`, keeping the sign.
#[must_use]
pub fn format_amount(amount: Amount) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn eval(total: u8, is_soft: bool, is_blackjack: bool, is_bust: bool) -> HandEvaluation {
        HandEvaluation {
            total,
            is_soft,
            is_blackjack,
            is_bust,
        }
    }

    const STANDING_19: HandEvaluation = eval(19, false, false, false);
    const STANDING_20: HandEvaluation = eval(20, false, false, false);
    const NATURAL_21: HandEvaluation = eval(21, true, true, false);
    const BUST_24: HandEvaluation = eval(24, false, false, true);

    fn run(player: HandEvaluation, dealer: HandEvaluation, bet: Amount, split: bool) -> PayoutResult {
        compute(&player, &dealer, bet, split, RoundingMode::Down)
    }

    #[test]
    fn player_bust_loses_even_against_dealer_bust() {
        let result = run(BUST_24, BUST_24, 1000, false);
        assert_eq!(result.outcome, Outcome::Bust);
        assert_eq!(result.net_delta, -1000);
        assert_eq!(result.payout, 0);
    }

    #[test]
    fn dealer_bust_pays_even_money() {
        let result = run(STANDING_19, BUST_24, 1000, false);
        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.net_delta, 1000);
    }

    #[test]
    fn natural_beats_dealer_bust_at_three_to_two() {
        let result = run(NATURAL_21, BUST_24, 1000, false);
        assert_eq!(result.outcome, Outcome::Blackjack);
        assert_eq!(result.net_delta, 1500);
        assert_eq!(result.payout, 1500);
    }

    #[test]
    fn natural_against_standing_dealer_pays_three_to_two() {
        let result = run(NATURAL_21, STANDING_19, 1000, false);
        assert_eq!(result.outcome, Outcome::Blackjack);
        assert_eq!(result.net_delta, 1500);
    }

    #[test]
    fn split_twenty_one_pays_even_money() {
        let result = run(NATURAL_21, STANDING_19, 1000, true);
        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.net_delta, 1000);
    }

    #[test]
    fn both_naturals_push() {
        let result = run(NATURAL_21, NATURAL_21, 1000, false);
        assert_eq!(result.outcome, Outcome::Push);
        assert_eq!(result.net_delta, 0);
    }

    #[test]
    fn dealer_natural_beats_ordinary_twenty_one() {
        let three_card_21 = eval(21, false, false, false);
        let result = run(three_card_21, NATURAL_21, 1000, false);
        assert_eq!(result.outcome, Outcome::Lose);
        assert_eq!(result.net_delta, -1000);
    }

    #[test]
    fn higher_total_wins_lower_loses_equal_pushes() {
        assert_eq!(run(STANDING_20, STANDING_19, 500, false).outcome, Outcome::Win);
        assert_eq!(run(STANDING_19, STANDING_20, 500, false).outcome, Outcome::Lose);
        let push = run(STANDING_20, STANDING_20, 500, false);
        assert_eq!(push.outcome, Outcome::Push);
        assert_eq!(push.net_delta, 0);
    }

    #[test]
    fn odd_bet_premium_follows_rounding_mode() {
        let down = compute(&NATURAL_21, &STANDING_19, 101, false, RoundingMode::Down);
        assert_eq!(down.payout, 151);
        let up = compute(&NATURAL_21, &STANDING_19, 101, false, RoundingMode::Up);
        assert_eq!(up.payout, 152);
        let nearest = compute(&NATURAL_21, &STANDING_19, 101, false, RoundingMode::Nearest);
        assert_eq!(nearest.payout, 152);
    }

    #[test]
    fn amount_formatting() {
        assert_eq!(format_amount(1500), "15.00");
        assert_eq!(format_amount(-75), "-0.75");
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_amount(-1000), "-10.00");
    }
}
