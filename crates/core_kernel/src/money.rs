//! Yen amounts and rates with exact decimal arithmetic
//!
//! The clinic bills in Japanese yen, which has no minor unit, so amounts are
//! whole integers. Rates (consumption tax, insurance ratios) are held as
//! `rust_decimal::Decimal` so that `amount × rate` is computed exactly before
//! flooring, never through binary floating point.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during money parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A whole-yen monetary amount
///
/// Arithmetic saturates at the `i64` bounds instead of panicking so that
/// display-feeding calculations can never abort on absurd input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Yen(i64);

impl Yen {
    pub const ZERO: Yen = Yen(0);

    /// Creates a new amount
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Returns the raw amount
    pub fn amount(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Returns the amount, or zero when it is negative
    pub fn non_negative(&self) -> Self {
        Self(self.0.max(0))
    }

    /// Rounds up to the next multiple of `unit` (e.g. the next ¥1,000)
    ///
    /// Non-positive units leave the amount unchanged.
    pub fn round_up_to(&self, unit: i64) -> Self {
        if unit <= 0 {
            return *self;
        }
        let remainder = self.0.rem_euclid(unit);
        if remainder == 0 {
            *self
        } else {
            Self(self.0.saturating_add(unit - remainder))
        }
    }

    /// Returns the amount as a decimal
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Parses register input the way the payment field is read
    ///
    /// Empty or non-numeric input yields zero. Surrounding whitespace, a
    /// leading `¥`/`￥`, thousands separators and full-width digits are
    /// accepted; the leading run of digits is taken and anything after it is
    /// ignored (`"3000円"` reads as 3000). A leading minus sign reads as zero.
    pub fn parse_lenient(input: &str) -> Self {
        let mut chars = input.trim().chars().peekable();
        if matches!(chars.peek(), Some('¥') | Some('￥')) {
            chars.next();
        }

        let mut digits = String::new();
        for c in chars {
            match c {
                '0'..='9' => digits.push(c),
                '０'..='９' => {
                    let offset = c as u32 - '０' as u32;
                    digits.push(char::from(b'0' + offset as u8));
                }
                ',' | '，' if !digits.is_empty() => continue,
                _ => break,
            }
        }

        digits.parse::<i64>().map(Self).unwrap_or(Self::ZERO)
    }

    /// Formats the amount with ja-JP digit grouping, without a currency sign
    pub fn format_grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            out.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for Yen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-¥{}", Yen(self.0.saturating_abs()).format_grouped())
        } else {
            write!(f, "¥{}", self.format_grouped())
        }
    }
}

/// Strict parsing, used where a malformed amount must be rejected
impl FromStr for Yen {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map(Self)
            .map_err(|_| MoneyError::InvalidAmount(trimmed.to_string()))
    }
}

impl From<i64> for Yen {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl Add for Yen {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Yen {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Yen {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Yen {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Yen {
    fn sum<I: Iterator<Item = Yen>>(iter: I) -> Self {
        iter.fold(Yen::ZERO, |acc, y| acc + y)
    }
}

impl<'a> Sum<&'a Yen> for Yen {
    fn sum<I: Iterator<Item = &'a Yen>>(iter: I) -> Self {
        iter.fold(Yen::ZERO, |acc, y| acc + *y)
    }
}

/// A fractional rate such as a consumption tax rate or an insurance ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.08 for 8%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.1 for 10%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 8 for 8%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to an amount and floors the result
    ///
    /// `floor(amount × rate)`, computed exactly. For the non-negative
    /// amounts the register deals in this truncates toward zero.
    pub fn apply_floor(&self, amount: Yen) -> Yen {
        let product = amount.to_decimal().saturating_mul(self.value).floor();
        match product.to_i64() {
            Some(v) => Yen(v),
            None if product.is_sign_negative() => Yen(i64::MIN),
            None => Yen(i64::MAX),
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yen_display_grouping() {
        assert_eq!(Yen::new(0).to_string(), "¥0");
        assert_eq!(Yen::new(999).to_string(), "¥999");
        assert_eq!(Yen::new(1000).to_string(), "¥1,000");
        assert_eq!(Yen::new(1234567).to_string(), "¥1,234,567");
        assert_eq!(Yen::new(-12500).to_string(), "-¥12,500");
        assert_eq!(Yen::new(-12500).format_grouped(), "-12,500");
    }

    #[test]
    fn test_rate_floor_exact() {
        let reduced = Rate::new(dec!(0.08));
        assert_eq!(reduced.apply_floor(Yen::new(9000)), Yen::new(720));

        let standard = Rate::new(dec!(0.1));
        assert_eq!(standard.apply_floor(Yen::new(805)), Yen::new(80));
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::new(dec!(0.10)).to_string(), "10%");
        assert_eq!(Rate::from_percentage(dec!(8)).to_string(), "8%");
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Yen::parse_lenient(""), Yen::ZERO);
        assert_eq!(Yen::parse_lenient("abc"), Yen::ZERO);
        assert_eq!(Yen::parse_lenient(" 4000 "), Yen::new(4000));
        assert_eq!(Yen::parse_lenient("３０８０"), Yen::new(3080));
        assert_eq!(Yen::parse_lenient("¥10,000"), Yen::new(10000));
        assert_eq!(Yen::parse_lenient("3000円"), Yen::new(3000));
        assert_eq!(Yen::parse_lenient("-500"), Yen::ZERO);
    }

    #[test]
    fn test_round_up_to() {
        assert_eq!(Yen::new(3080).round_up_to(1000), Yen::new(4000));
        assert_eq!(Yen::new(3000).round_up_to(1000), Yen::new(3000));
        assert_eq!(Yen::new(3080).round_up_to(10000), Yen::new(10000));
        assert_eq!(Yen::new(3080).round_up_to(0), Yen::new(3080));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn apply_floor_never_exceeds_exact_product(
            amount in 0i64..100_000_000i64,
            basis_points in 0i64..10_000i64
        ) {
            let rate = Rate::new(Decimal::new(basis_points, 4));
            let floored = rate.apply_floor(Yen::new(amount));
            let exact = Decimal::from(amount) * rate.as_decimal();

            prop_assert!(floored.to_decimal() <= exact);
            prop_assert!(exact - floored.to_decimal() < Decimal::ONE);
        }

        #[test]
        fn parse_lenient_reads_back_plain_digits(amount in 0i64..1_000_000_000i64) {
            prop_assert_eq!(Yen::parse_lenient(&amount.to_string()), Yen::new(amount));
            prop_assert_eq!(Yen::parse_lenient(&Yen::new(amount).to_string()), Yen::new(amount));
        }
    }
}
