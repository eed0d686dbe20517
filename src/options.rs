//! Game configuration options.

/// Rounding mode for the 3:2 blackjack premium on odd bet amounts.
///
/// All money is integer minor currency units; half of an odd bet is the
/// only place exact arithmetic cannot land on a whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves up.
    Nearest,
}

/// Default number of decks in a shoe.
pub const DEFAULT_DECK_COUNT: u32 = 6;

/// Configuration options for the round engine.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use tablejack::GameOptions;
///
/// let options = GameOptions::default()
///     .with_deck_count(8)
///     .with_dealer_hit_soft_17(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of decks per shoe. Zero is treated as the default of 6.
    pub deck_count: u32,
    /// Whether the dealer hits on soft 17. Defaults to false (stand).
    pub dealer_hit_soft_17: bool,
    /// Rounding mode for the blackjack premium.
    pub rounding_blackjack: RoundingMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            deck_count: DEFAULT_DECK_COUNT,
            dealer_hit_soft_17: false,
            rounding_blackjack: RoundingMode::Down,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks per shoe.
    #[must_use]
    pub const fn with_deck_count(mut self, deck_count: u32) -> Self {
        self.deck_count = deck_count;
        self
    }

    /// Sets whether the dealer hits on soft 17.
    #[must_use]
    pub const fn with_dealer_hit_soft_17(mut self, hit: bool) -> Self {
        self.dealer_hit_soft_17 = hit;
        self
    }

    /// Sets the rounding mode for the blackjack premium.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Deck count with the zero-means-default rule applied.
    #[must_use]
    pub const fn effective_deck_count(&self) -> u32 {
        if self.deck_count == 0 {
            DEFAULT_DECK_COUNT
        } else {
            self.deck_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let options = GameOptions::default()
            .with_deck_count(8)
            .with_dealer_hit_soft_17(true)
            .with_rounding_blackjack(RoundingMode::Up);
        assert_eq!(options.deck_count, 8);
        assert!(options.dealer_hit_soft_17);
        assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    }

    #[test]
    fn zero_deck_count_falls_back_to_default() {
        let options = GameOptions::default().with_deck_count(0);
        assert_eq!(options.effective_deck_count(), DEFAULT_DECK_COUNT);
    }
}
