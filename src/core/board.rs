//! The price table: seeded currency pairs and their simulated live prices.

use crate::core::currency::{Currency, PairSymbol};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

/// Default bound of the per-tick perturbation, in percent.
pub const DEFAULT_MAX_FLUCTUATION_PCT: f64 = 3.0;

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Initial quotation for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairSeed {
    pub symbol: PairSymbol,
    pub price: f64,
}

impl PairSeed {
    pub fn new(base: Currency, quote: Currency, price: f64) -> Self {
        Self {
            symbol: PairSymbol { base, quote },
            price,
        }
    }
}

/// Seed quotations. Only one direction is stored per currency.
pub fn default_seeds() -> Vec<PairSeed> {
    vec![
        PairSeed::new(Currency::Eur, Currency::Usd, 1.05),
        PairSeed::new(Currency::Usd, Currency::Inr, 80.05),
        PairSeed::new(Currency::Aud, Currency::Usd, 0.67),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyPair {
    pub symbol: PairSymbol,
    pub original_price: f64,
    pub price: f64,
}

/// An immutable snapshot of every pair's current price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBoard {
    pairs: Vec<CurrencyPair>,
    /// Number of refreshes applied since the seed snapshot.
    pub tick: u64,
    pub updated_at: DateTime<Utc>,
}

impl PriceBoard {
    pub fn seeded() -> Self {
        Self::build(&default_seeds())
    }

    pub fn from_seeds(seeds: &[PairSeed]) -> Result<Self> {
        if seeds.is_empty() {
            bail!("At least one currency pair is required");
        }

        let mut seen = HashSet::new();
        for seed in seeds {
            if seed.symbol.base == seed.symbol.quote {
                bail!("Pair {} quotes a currency against itself", seed.symbol);
            }
            if !seed.price.is_finite() || seed.price <= 0.0 {
                bail!(
                    "Pair {} needs a positive price, got {}",
                    seed.symbol,
                    seed.price
                );
            }
            if !seen.insert(seed.symbol) {
                bail!("Pair {} is listed more than once", seed.symbol);
            }
        }

        Ok(Self::build(seeds))
    }

    fn build(seeds: &[PairSeed]) -> Self {
        Self {
            pairs: seeds
                .iter()
                .map(|seed| CurrencyPair {
                    symbol: seed.symbol,
                    original_price: seed.price,
                    price: seed.price,
                })
                .collect(),
            tick: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn pairs(&self) -> &[CurrencyPair] {
        &self.pairs
    }

    /// Current price of the pair stored in exactly this direction.
    pub fn price(&self, symbol: PairSymbol) -> Option<f64> {
        self.pairs
            .iter()
            .find(|pair| pair.symbol == symbol)
            .map(|pair| pair.price)
    }

    /// Returns the next snapshot. Each pair is perturbed independently by a
    /// uniform draw in `[-max_pct, +max_pct]` percent of its original price.
    pub fn refreshed<R: Rng>(&self, max_pct: f64, rng: &mut R) -> PriceBoard {
        let pairs = self
            .pairs
            .iter()
            .map(|pair| {
                let pct = if max_pct > 0.0 {
                    rng.gen_range(-max_pct..=max_pct)
                } else {
                    0.0
                };
                let price = round2(pair.original_price * (1.0 + pct / 100.0));
                trace!(symbol = %pair.symbol, pct, price, "Refreshed pair");
                CurrencyPair {
                    symbol: pair.symbol,
                    original_price: pair.original_price,
                    price,
                }
            })
            .collect();

        PriceBoard {
            pairs,
            tick: self.tick + 1,
            updated_at: Utc::now(),
        }
    }
}

impl Default for PriceBoard {
    fn default() -> Self {
        Self::seeded()
    }
}
