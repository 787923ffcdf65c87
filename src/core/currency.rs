//! Currency codes and quotation symbols

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Inr,
    Aud,
}

impl Currency {
    /// Selector order.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Inr, Currency::Aud];

    /// The only currency cross-rates are routed through.
    pub const HUB: Currency = Currency::Usd;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
            Currency::Aud => "AUD",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "INR" => Ok(Currency::Inr),
            "AUD" => Ok(Currency::Aud),
            _ => Err(anyhow!("Unsupported currency: {}", s.trim())),
        }
    }
}

/// A quotation "BASE/QUOTE": one unit of `base` costs `price` units of `quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairSymbol {
    pub base: Currency,
    pub quote: Currency,
}

impl PairSymbol {
    pub fn new(base: Currency, quote: Currency) -> Result<Self> {
        if base == quote {
            bail!("Pair needs two different currencies, got {base}/{quote}");
        }
        Ok(Self { base, quote })
    }
}

impl Display for PairSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for PairSymbol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| anyhow!("Invalid pair symbol '{s}', expected BASE/QUOTE"))?;
        PairSymbol::new(base.parse()?, quote.parse()?)
    }
}

impl Serialize for PairSymbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PairSymbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
