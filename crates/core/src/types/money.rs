//! Monetary amounts using decimal arithmetic.
//!
//! All storefront prices are rupee amounts (INR). The payment gateway
//! operates in minor units (paise), so [`Money::to_minor_units`] performs
//! the conversion at the single point where the two worlds meet.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount in the currency's major unit (rupees, not paise).
///
/// Backed by [`Decimal`] so that `19.99` stays `19.99` through arithmetic
/// and serialization. Stored in `NUMERIC` columns with the `postgres`
/// feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Convert to minor units (paise) for the payment gateway.
    ///
    /// Multiplies by 100 and rounds to the nearest integer, matching the
    /// gateway's integer-paise order amounts. Returns `None` if the result
    /// does not fit in an `i64` (never the case for real order totals).
    #[must_use]
    pub fn to_minor_units(&self) -> Option<i64> {
        (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Money {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Money {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(mantissa: i64, scale: u32) -> Money {
        Money::new(Decimal::new(mantissa, scale))
    }

    #[test]
    fn test_to_minor_units_whole() {
        assert_eq!(money(499, 0).to_minor_units(), Some(49900));
    }

    #[test]
    fn test_to_minor_units_fractional() {
        assert_eq!(money(1999, 2).to_minor_units(), Some(1999));
    }

    #[test]
    fn test_to_minor_units_rounds() {
        // Sub-paise fractions round to the nearest paise
        assert_eq!(money(10_005, 3).to_minor_units(), Some(1001));
        assert_eq!(money(10_004, 3).to_minor_units(), Some(1000));
    }

    #[test]
    fn test_to_minor_units_zero() {
        assert_eq!(Money::ZERO.to_minor_units(), Some(0));
    }

    #[test]
    fn test_sum() {
        let total: Money = [money(1050, 2), money(425, 2), money(25, 2)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), Decimal::new(1500, 2));
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(money(5, 0).to_string(), "5.00");
        assert_eq!(money(199, 1).to_string(), "19.90");
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = money(12_995, 2);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
