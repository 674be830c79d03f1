//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices arrive from the backend as JSON numbers in the currency's
//! standard unit (rupees, dollars). They are held as [`Decimal`] so that cart
//! totals never accumulate floating point error.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a price amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price amount: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount has more significant digits than a JSON number keeps.
    #[error("price {0} has more than 15 significant digits")]
    TooPrecise(Decimal),
}

/// Most significant digits a price may carry.
///
/// Prices are stored as JSON numbers (IEEE 754 doubles), which round-trip any
/// decimal of up to 15 significant digits exactly.
pub const MAX_PRICE_DIGITS: u32 = 15;

/// Check that `amount` is a usable unit price: not negative, and storable as
/// a JSON number without losing digits.
///
/// # Errors
///
/// Returns [`PriceError::Negative`] or [`PriceError::TooPrecise`].
pub fn check_amount(amount: Decimal) -> Result<(), PriceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative);
    }
    if amount.normalize().mantissa().unsigned_abs() >= 10_u128.pow(MAX_PRICE_DIGITS) {
        return Err(PriceError::TooPrecise(amount));
    }
    Ok(())
}

/// Parse a non-negative unit price such as `"120"` or `"99.50"`.
///
/// The amount is rounded to two decimal places.
///
/// # Errors
///
/// Returns [`PriceError::Invalid`] if the input is not a decimal number,
/// [`PriceError::Negative`] if it is below zero and
/// [`PriceError::TooPrecise`] if it cannot be stored exactly.
pub fn parse_amount(s: &str) -> Result<Decimal, PriceError> {
    let amount = Decimal::from_str(s.trim())
        .map_err(|e| PriceError::Invalid(format!("{s}: {e}")))?
        .round_dp(2);
    check_amount(amount)?;
    Ok(amount)
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "₹1,250", "₹99.5", "$12.99").
    ///
    /// Uses Indian digit grouping for INR and thousands grouping for every
    /// other currency. At most two fraction digits are shown and trailing
    /// zeros are dropped.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.amount.round_dp(2).normalize();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits
            .split_once('.')
            .map_or((digits.as_str(), None), |(w, f)| (w, Some(f)));

        let grouping = match self.currency_code {
            CurrencyCode::INR => Grouping::Indian,
            _ => Grouping::Thousands,
        };
        let mut out = format!(
            "{sign}{}{}",
            self.currency_code.symbol(),
            group_digits(whole, grouping)
        );
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[derive(Debug, Clone, Copy)]
enum Grouping {
    /// 1,234,567
    Thousands,
    /// 12,34,567
    Indian,
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let mut reversed: Vec<char> = Vec::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in digits.chars().rev().enumerate() {
        let boundary = match grouping {
            Grouping::Thousands => i > 0 && i % 3 == 0,
            Grouping::Indian => i == 3 || (i > 3 && (i - 3) % 2 == 0),
        };
        if boundary {
            reversed.push(',');
        }
        reversed.push(c);
    }
    reversed.iter().rev().collect()
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}
