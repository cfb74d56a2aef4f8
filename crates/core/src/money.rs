//! Integer money arithmetic.
//!
//! All monetary amounts are held in the smallest currency unit (pesewas for
//! GHS, cents for USD) as `i64`. Percentage rates (VAT, service charge,
//! percentage discounts) are basis points. Intermediate products widen to
//! `i128` so large amounts cannot overflow mid-computation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in smallest currency units.
///
/// Signed: balances can go negative (e.g. an overpaid deposit) and the caller
/// decides the policy. The currency itself is tracked next to the amount by
/// the owning record, never inside `Money`.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Build from major units (e.g. whole cedis). `from_major(60)` is 60.00.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiply by a unit count (line quantities, nights).
    #[inline]
    pub const fn times(&self, quantity: i64) -> Self {
        Money(self.0 * quantity)
    }

    /// Apply a basis-point rate with round-half-up at the minor unit.
    ///
    /// `Money::from_minor(5000).apply_rate(RateBps::new(1250))` is 625 —
    /// 12.5% VAT on 50.00.
    pub fn apply_rate(&self, rate: RateBps) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money(((scaled + 5_000) / 10_000) as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    #[inline]
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Currency of a monetary amount. Closed set: the business operates in
/// exactly two currencies, and all aggregation happens in the base currency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Ghs,
}

impl Currency {
    /// The single currency all amounts are normalized to for aggregation.
    pub const BASE: Currency = Currency::Ghs;

    pub const fn is_base(&self) -> bool {
        matches!(self, Currency::Ghs)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ghs => "GHS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A percentage rate in basis points (1250 = 12.5%).
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RateBps(u32);

impl RateBps {
    pub const ZERO: RateBps = RateBps(0);

    #[inline]
    pub const fn new(bps: u32) -> Self {
        RateBps(bps)
    }

    /// Whole-percent convenience: `from_percent(10)` is 10%.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        RateBps(percent * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RateBps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn minor_and_major_constructors_agree() {
        assert_eq!(Money::from_major(60), Money::from_minor(6000));
        assert_eq!(Money::from_minor(1099).minor(), 1099);
    }

    #[test]
    fn display_formats_major_dot_minor() {
        assert_eq!(Money::from_minor(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn vat_example_from_pricing_rules() {
        // 12.5% of 50.00 is exactly 6.25.
        let subtotal = Money::from_major(50);
        assert_eq!(subtotal.apply_rate(RateBps::new(1250)), Money::from_minor(625));
        // 10% service charge on the same subtotal is 5.00.
        assert_eq!(subtotal.apply_rate(RateBps::from_percent(10)), Money::from_major(5));
    }

    #[test]
    fn apply_rate_rounds_half_up() {
        // 8.25% of 10.00 is 0.825, rounded to 0.83.
        assert_eq!(
            Money::from_minor(1000).apply_rate(RateBps::new(825)),
            Money::from_minor(83)
        );
    }

    #[test]
    fn arithmetic_and_sum() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);
        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!(a.times(3).minor(), 3000);
        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.minor(), 2000);
    }

    proptest! {
        /// Applying a zero rate is always zero; a 100% rate is the identity.
        #[test]
        fn rate_boundaries(minor in 0i64..10_000_000i64) {
            let amount = Money::from_minor(minor);
            prop_assert_eq!(amount.apply_rate(RateBps::ZERO), Money::ZERO);
            prop_assert_eq!(amount.apply_rate(RateBps::new(10_000)), amount);
        }
    }
}
