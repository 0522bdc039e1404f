//! Money types with exact minor-unit arithmetic
//!
//! Every amount handled by a protection policy is a whole number of the
//! smallest indivisible unit of its currency (cents, pence, ...). Amounts are
//! stored as `rust_decimal::Decimal` with a scale of zero so proportional
//! calculations never go through floating point.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    BRL,
    JPY,
}

impl Currency {
    /// Returns the number of decimal places between minor and major units
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::BRL => "R$",
            Currency::JPY => "¥",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::BRL => "BRL",
            Currency::JPY => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "BRL" => Ok(Currency::BRL),
            "JPY" => Ok(Currency::JPY),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Result would be negative: {minuend} - {subtrahend}")]
    NegativeResult {
        minuend: Decimal,
        subtrahend: Decimal,
    },

    #[error("Overflow during calculation")]
    Overflow,
}

/// A non-negative amount of minor units in a single currency
///
/// Deserialization goes through `Money::try_new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

/// Unchecked wire form of `Money`
#[derive(Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: Currency,
}

impl TryFrom<RawMoney> for Money {
    type Error = MoneyError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::try_new(raw.amount, raw.currency)
    }
}

impl Money {
    /// Creates Money from a count of minor units
    pub fn from_minor(minor_units: u64, currency: Currency) -> Self {
        Self {
            amount: Decimal::from(minor_units),
            currency,
        }
    }

    /// Creates Money from a decimal count of minor units
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAmount` if the amount is negative or has a
    /// fractional part (minor units are indivisible).
    pub fn try_new(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::InvalidAmount(format!(
                "{} is negative",
                amount
            )));
        }
        if !amount.fract().is_zero() {
            return Err(MoneyError::InvalidAmount(format!(
                "{} is not a whole number of minor units",
                amount
            )));
        }
        Ok(Self {
            amount: amount.trunc().abs(),
            currency,
        })
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns the amount in minor units
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount expressed in major units (e.g. dollars for cents)
    pub fn to_major(&self) -> Decimal {
        let divisor = Decimal::from(10_u64.pow(self.currency.decimal_places()));
        self.amount / divisor
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        !self.amount.is_zero()
    }

    /// Fails unless both amounts share a currency
    pub fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }

    /// Checked addition that returns an error on currency mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self {
            amount,
            currency: self.currency,
        })
    }

    /// Checked subtraction; fails on currency mismatch or a negative result
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        if other.amount > self.amount {
            return Err(MoneyError::NegativeResult {
                minuend: self.amount,
                subtrahend: other.amount,
            });
        }
        Ok(Self {
            amount: self.amount - other.amount,
            currency: self.currency,
        })
    }

    /// Subtraction floored at zero
    pub fn saturating_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = if other.amount > self.amount {
            Decimal::ZERO
        } else {
            self.amount - other.amount
        };
        Ok(Self {
            amount,
            currency: self.currency,
        })
    }

    /// Returns the smaller of two amounts in the same currency
    pub fn min(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(match self.amount.cmp(&other.amount) {
            Ordering::Greater => *other,
            _ => *self,
        })
    }

    /// Compares two amounts in the same currency
    pub fn compare(&self, other: &Money) -> Result<Ordering, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.to_major(),
            dp = dp as usize
        )
    }
}

/// A whole-number percentage (e.g. 7 for 7%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(u32);

impl Percent {
    /// Creates a percentage from a whole number
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the whole-number value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the percentage as a decimal rate (0.07 for 7%)
    pub fn as_rate(&self) -> Decimal {
        Decimal::from(self.0) / dec!(100)
    }

    /// Sums two percentages
    pub fn checked_add(&self, other: Percent) -> Option<Percent> {
        self.0.checked_add(other.0).map(Percent)
    }

    /// Applies this percentage to an amount, flooring to whole minor units
    ///
    /// `floor(amount * percent / 100)`; the multiplication happens before the
    /// division so no precision is lost on exact fixtures.
    pub fn apply_floor(&self, money: &Money) -> Result<Money, MoneyError> {
        let scaled = money
            .amount
            .checked_mul(Decimal::from(self.0))
            .ok_or(MoneyError::Overflow)?;
        let amount = (scaled / dec!(100)).round_dp_with_strategy(0, RoundingStrategy::ToZero);
        Ok(Money {
            amount,
            currency: money.currency,
        })
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<u32> for Percent {
    fn from(value: u32) -> Self {
        Self(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn percent_share_never_exceeds_whole(
            amount in 0u64..10_000_000_000_000u64,
            percent in 0u32..=100u32
        ) {
            let money = Money::from_minor(amount, Currency::USD);
            let share = Percent::new(percent).apply_floor(&money).unwrap();
            prop_assert!(share.amount() <= money.amount());
            prop_assert!(share.amount().fract().is_zero());
        }

        #[test]
        fn saturating_sub_is_never_negative(
            a in 0u64..1_000_000u64,
            b in 0u64..1_000_000u64
        ) {
            let ma = Money::from_minor(a, Currency::EUR);
            let mb = Money::from_minor(b, Currency::EUR);
            let diff = ma.saturating_sub(&mb).unwrap();
            prop_assert_eq!(diff.amount(), Decimal::from(a.saturating_sub(b)));
        }
    }
}
