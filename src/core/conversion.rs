//! Converter form state and the pure updates applied to it.

use crate::core::board::round2;
use crate::core::currency::Currency;
use crate::core::rates::RateResolver;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionState {
    pub source: Currency,
    pub target: Currency,
    /// Raw amount text, possibly empty or non-numeric while editing.
    pub amount: String,
    /// Last computed result, 0 until a conversion runs.
    pub converted_amount: f64,
}

impl Default for ConversionState {
    fn default() -> Self {
        Self::new(Currency::Usd, Currency::Inr)
    }
}

/// Parses the amount field. Anything unparsable becomes NaN and flows
/// through the conversion unchanged.
pub fn parse_amount(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(amount) => amount,
        Err(_) => {
            warn!(amount = text, "Amount is not a number");
            f64::NAN
        }
    }
}

impl ConversionState {
    pub fn new(source: Currency, target: Currency) -> Self {
        Self {
            source,
            target,
            amount: String::new(),
            converted_amount: 0.0,
        }
    }

    pub fn with_source(self, source: Currency) -> Self {
        Self { source, ..self }
    }

    pub fn with_target(self, target: Currency) -> Self {
        Self { target, ..self }
    }

    pub fn with_amount(self, amount: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            ..self
        }
    }

    /// Runs a conversion against the current prices. When no rate can be
    /// resolved the state comes back unchanged.
    pub fn converted<R: RateResolver + ?Sized>(self, rates: &R) -> Self {
        self.try_convert(rates).into_state()
    }

    /// Like [`ConversionState::converted`], but also reports whether a rate
    /// was found.
    pub fn try_convert<R: RateResolver + ?Sized>(self, rates: &R) -> Conversion {
        let Some(rate) = rates.resolve_rate(self.source, self.target) else {
            debug!(
                source = %self.source,
                target = %self.target,
                "Rate unavailable, keeping previous result"
            );
            return Conversion::Unavailable(self);
        };

        let amount = parse_amount(&self.amount);
        let converted_amount = round2(rate * amount);
        debug!(
            "Converted {amount} from {} to {} at rate {rate}: {converted_amount}",
            self.source, self.target
        );
        Conversion::Converted(Self {
            converted_amount,
            ..self
        })
    }
}

/// Outcome of a conversion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Converted(ConversionState),
    /// No rate path; carries the previous state untouched.
    Unavailable(ConversionState),
}

impl Conversion {
    pub fn is_available(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }

    pub fn into_state(self) -> ConversionState {
        match self {
            Conversion::Converted(state) | Conversion::Unavailable(state) => state,
        }
    }
}
