//! Money types with precise decimal arithmetic
//!
//! Repair cost figures are whole-currency amounts, but they are still carried
//! as `rust_decimal` values so sums and midpoints never pass through floats.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    CAD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CAD => "C$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A monetary amount with associated currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(currency.decimal_places()),
            currency,
        }
    }

    /// Creates Money from a whole number of currency units (e.g. dollars)
    pub fn from_whole(units: i64, currency: Currency) -> Self {
        Self::new(Decimal::from(units), currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Parses a user-typed amount such as `3150`, `3,150.50` or `$3150`
    pub fn parse(input: &str, currency: Currency) -> Result<Self, MoneyError> {
        let cleaned: String = input
            .trim()
            .trim_start_matches(currency.symbol())
            .chars()
            .filter(|c| *c != ',')
            .collect();
        cleaned
            .parse::<Decimal>()
            .map(|amount| Self::new(amount, currency))
            .map_err(|_| MoneyError::InvalidAmount(input.to_string()))
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Midpoint of two amounts, rounded to whole units with halves going up
    pub fn midpoint(&self, other: &Money) -> Result<Money, MoneyError> {
        let total = self.checked_add(other)?;
        let half = (total.amount / dec!(2))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Ok(Self::new(half, self.currency))
    }

    /// Whole-unit amount with thousands separators, e.g. `$2,100`
    pub fn to_grouped_string(&self) -> String {
        let whole = self
            .amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .abs()
            .to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.amount.is_sign_negative() && !self.amount.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{}", sign, self.currency.symbol(), grouped)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn grouped_string_round_trips_through_parse(units in 0i64..100_000_000i64) {
            let money = Money::from_whole(units, Currency::USD);
            let parsed = Money::parse(&money.to_grouped_string(), Currency::USD).unwrap();
            prop_assert_eq!(parsed, money);
        }

        #[test]
        fn addition_is_associative(
            a in 0i64..1_000_000i64,
            b in 0i64..1_000_000i64,
            c in 0i64..1_000_000i64
        ) {
            let ma = Money::from_whole(a, Currency::USD);
            let mb = Money::from_whole(b, Currency::USD);
            let mc = Money::from_whole(c, Currency::USD);

            let left = ma.checked_add(&mb).and_then(|ab| ab.checked_add(&mc));
            let right = mb.checked_add(&mc).and_then(|bc| ma.checked_add(&bc));
            prop_assert_eq!(left, right);
        }
    }
}
