//! Human-readable business identifiers.
//!
//! Booking/order/transaction codes of the form
//! `<prefix><YY><MM><DD><4-digit random suffix>`, e.g. `HB2503011234`.
//! Generated once at record creation and immutable afterwards. Uniqueness is
//! probabilistic: callers that need strict uniqueness must check the store and
//! regenerate on collision.

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The record category a business identifier encodes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    HotelBooking,
    RestaurantOrder,
    PubOrder,
    IncomeTransaction,
    ExpenseTransaction,
    TransferTransaction,
}

impl RecordKind {
    /// Two-letter code prefix.
    pub const fn prefix(&self) -> &'static str {
        match self {
            RecordKind::HotelBooking => "HB",
            RecordKind::RestaurantOrder => "RO",
            RecordKind::PubOrder => "PO",
            RecordKind::IncomeTransaction => "IN",
            RecordKind::ExpenseTransaction => "EX",
            RecordKind::TransferTransaction => "TR",
        }
    }
}

/// A generated business identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(String);

impl BusinessId {
    /// Generate an identifier for `kind` dated `date`.
    ///
    /// The random source is injected so tests can be deterministic.
    pub fn generate(kind: RecordKind, date: NaiveDate, rng: &mut impl Rng) -> Self {
        let suffix: u32 = rng.gen_range(0..10_000);
        BusinessId(format!(
            "{}{:02}{:02}{:02}{:04}",
            kind.prefix(),
            date.year() % 100,
            date.month(),
            date.day(),
            suffix
        ))
    }

    /// Generate with the current date and the thread RNG.
    pub fn new(kind: RecordKind) -> Self {
        Self::generate(kind, Utc::now().date_naive(), &mut rand::thread_rng())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BusinessId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn march_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn encodes_prefix_date_and_padded_suffix() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = BusinessId::generate(RecordKind::HotelBooking, march_first(), &mut rng);
        let s = id.as_str();
        assert_eq!(s.len(), 12);
        assert!(s.starts_with("HB250301"));
        assert!(s[8..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn each_kind_has_its_own_prefix() {
        let mut rng = StdRng::seed_from_u64(7);
        for (kind, prefix) in [
            (RecordKind::HotelBooking, "HB"),
            (RecordKind::RestaurantOrder, "RO"),
            (RecordKind::PubOrder, "PO"),
            (RecordKind::IncomeTransaction, "IN"),
            (RecordKind::ExpenseTransaction, "EX"),
            (RecordKind::TransferTransaction, "TR"),
        ] {
            let id = BusinessId::generate(kind, march_first(), &mut rng);
            assert!(id.as_str().starts_with(prefix));
        }
    }

    #[test]
    fn generation_is_deterministic_for_a_seeded_rng() {
        let a = BusinessId::generate(
            RecordKind::RestaurantOrder,
            march_first(),
            &mut StdRng::seed_from_u64(42),
        );
        let b = BusinessId::generate(
            RecordKind::RestaurantOrder,
            march_first(),
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(a, b);
    }
}
