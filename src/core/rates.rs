//! Cross-rate resolution through the hub currency.

use crate::core::board::PriceBoard;
use crate::core::currency::{Currency, PairSymbol};
use tracing::debug;

pub trait RateResolver {
    /// Units of `target` bought by one unit of `source`, or `None` when the
    /// stored pairs cannot express the rate.
    fn resolve_rate(&self, source: Currency, target: Currency) -> Option<f64>;
}

impl PriceBoard {
    /// Price of a leg against the hub. The hub itself is worth 1. Zero or
    /// negative stored prices count as missing.
    fn hub_leg(&self, base: Currency, quote: Currency) -> Option<f64> {
        if base == quote {
            return Some(1.0);
        }
        self.price(PairSymbol { base, quote })
            .filter(|price| *price > 0.0)
    }
}

impl RateResolver for PriceBoard {
    fn resolve_rate(&self, source: Currency, target: Currency) -> Option<f64> {
        if source == target {
            return Some(1.0);
        }

        let hub = Currency::HUB;

        // source/USD then USD/target
        if let (Some(source_to_hub), Some(hub_to_target)) =
            (self.hub_leg(source, hub), self.hub_leg(hub, target))
        {
            return Some(source_to_hub * hub_to_target);
        }

        // USD/source and target/USD, both inverted
        if let (Some(hub_to_source), Some(target_to_hub)) =
            (self.hub_leg(hub, source), self.hub_leg(target, hub))
        {
            return Some((1.0 / hub_to_source) * (1.0 / target_to_hub));
        }

        debug!(%source, %target, "No rate path through {hub}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::PairSeed;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_identity_rate_for_every_currency() {
        let board = PriceBoard::seeded();
        for currency in Currency::ALL {
            assert_eq!(board.resolve_rate(currency, currency), Some(1.0));
        }
    }

    #[test]
    fn test_forward_path_direct_lookup() {
        let board = PriceBoard::seeded();
        assert_eq!(board.resolve_rate(Currency::Usd, Currency::Inr), Some(80.05));
        assert_eq!(board.resolve_rate(Currency::Eur, Currency::Usd), Some(1.05));
        assert_eq!(board.resolve_rate(Currency::Aud, Currency::Usd), Some(0.67));
    }

    #[test]
    fn test_inverse_path() {
        let board = PriceBoard::seeded();
        let rate = board.resolve_rate(Currency::Inr, Currency::Usd).unwrap();
        assert_relative_eq!(rate, 1.0 / 80.05);
        assert!((rate - 0.0125).abs() < 1e-4);

        let rate = board.resolve_rate(Currency::Usd, Currency::Eur).unwrap();
        assert_relative_eq!(rate, 1.0 / 1.05);
    }

    #[test]
    fn test_two_hop_rates() {
        let board = PriceBoard::seeded();
        assert_relative_eq!(
            board.resolve_rate(Currency::Eur, Currency::Inr).unwrap(),
            1.05 * 80.05
        );
        assert_relative_eq!(
            board.resolve_rate(Currency::Aud, Currency::Inr).unwrap(),
            0.67 * 80.05
        );
        assert_relative_eq!(
            board.resolve_rate(Currency::Inr, Currency::Aud).unwrap(),
            1.0 / (80.05 * 0.67)
        );
    }

    #[test]
    fn test_eur_aud_is_unavailable_in_both_directions() {
        let board = PriceBoard::seeded();
        assert!(board.resolve_rate(Currency::Eur, Currency::Aud).is_none());
        assert!(board.resolve_rate(Currency::Aud, Currency::Eur).is_none());
    }

    #[test]
    fn test_zero_priced_leg_counts_as_missing() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = PriceBoard::from_seeds(&[PairSeed::new(Currency::Usd, Currency::Inr, 0.001)])
            .unwrap()
            .refreshed(0.0, &mut rng);
        assert_eq!(
            board.price(PairSymbol::new(Currency::Usd, Currency::Inr).unwrap()),
            Some(0.0)
        );
        assert!(board.resolve_rate(Currency::Usd, Currency::Inr).is_none());
        assert!(board.resolve_rate(Currency::Inr, Currency::Usd).is_none());
    }

    proptest! {
        #[test]
        fn prop_rates_are_symmetric_under_inversion(seed in any::<u64>(), ticks in 0usize..5) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = PriceBoard::seeded();
            for _ in 0..ticks {
                board = board.refreshed(3.0, &mut rng);
            }
            for a in Currency::ALL {
                for b in Currency::ALL {
                    if let (Some(ab), Some(ba)) = (board.resolve_rate(a, b), board.resolve_rate(b, a)) {
                        prop_assert!((ab - 1.0 / ba).abs() <= 1e-9 * ab.abs().max(1.0));
                    }
                }
            }
        }
    }
}
