use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use innkeep_core::{BusinessId, Currency, DomainError, Money, RecordKind};

/// Room categories offered by the property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Double,
    Executive,
    Master,
}

/// Booking status lifecycle.
///
/// pending → confirmed → checked_in → checked_out; cancelled and no_show are
/// reachable from any state before check-out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Whether a booking in this status keeps its room out of the market.
    pub const fn blocks_room(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::CheckedIn)
    }

    const fn is_settled(&self) -> bool {
        matches!(
            self,
            BookingStatus::CheckedOut | BookingStatus::Cancelled | BookingStatus::NoShow
        )
    }
}

/// Payment state derived from deposit vs. total (refunds are set externally).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
    Refunded,
}

/// How the booking reached us.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    WalkIn,
    Phone,
    Email,
    Online,
    Agent,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("invalid date range: check-out must be after check-in")]
    InvalidDateRange,

    #[error("{0}")]
    Domain(#[from] DomainError),
}

impl BookingError {
    pub fn http_status(&self) -> u16 {
        match self {
            BookingError::InvalidDateRange => 400,
            BookingError::Domain(e) => e.http_status(),
        }
    }
}

/// Guest identity captured at booking time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl GuestInfo {
    fn validate(&self) -> Result<(), DomainError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(DomainError::validation("guest name cannot be empty"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(DomainError::validation("invalid guest email"));
        }
        Ok(())
    }
}

/// Derived payment fields for a stay.
///
/// Recomputed whenever dates, rate or deposit change; a booking with stale
/// derived fields is never a valid observable state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingQuote {
    pub nights: u32,
    pub total: Money,
    pub balance: Money,
    pub payment_status: PaymentStatus,
}

impl BookingQuote {
    /// A deposit larger than the total leaves a negative balance. The
    /// computation stays a plain subtraction; callers surface the warning.
    pub const fn overpaid(&self) -> bool {
        self.balance.is_negative()
    }
}

/// Compute nights, total and balance for a stay.
///
/// `nights = ceil(check_out - check_in)` in days, minimum 1; requires
/// `check_out > check_in`. Idempotent by construction: it reads only source
/// fields.
pub fn quote(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    rate: Money,
    deposit: Money,
) -> Result<BookingQuote, BookingError> {
    if check_out <= check_in {
        return Err(BookingError::InvalidDateRange);
    }

    let seconds = (check_out - check_in).num_seconds();
    // `div_ceil` is unstable on this toolchain; this is the same
    // round-toward-positive-infinity division for a positive divisor.
    let nights = (seconds / 86_400 + i64::from(seconds % 86_400 > 0)).max(1) as u32;

    let total = rate.times(nights as i64);
    let balance = total - deposit;
    let payment_status = if deposit.is_zero() {
        PaymentStatus::Unpaid
    } else if deposit < total {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Paid
    };

    Ok(BookingQuote {
        nights,
        total,
        balance,
        payment_status,
    })
}

/// Typed input for creating a booking — fields arrive validated, never spread
/// from arbitrary JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub guest: GuestInfo,
    pub room_number: String,
    pub room_type: RoomType,
    pub rate: Money,
    pub currency: Currency,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    #[serde(default)]
    pub deposit: Money,
    pub source: BookingSource,
}

/// A hotel booking with its derived payment fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BusinessId,
    pub guest: GuestInfo,
    pub room_number: String,
    pub room_type: RoomType,
    pub rate: Money,
    pub currency: Currency,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub deposit: Money,
    pub status: BookingStatus,
    pub nights: u32,
    pub total: Money,
    pub balance: Money,
    pub payment_status: PaymentStatus,
}

impl Booking {
    /// Validate a request and build a pending booking with derived fields
    /// populated and a fresh `HB...` identifier.
    pub fn create(request: BookingRequest) -> Result<Booking, BookingError> {
        Self::create_with(request, Utc::now().date_naive(), &mut rand::thread_rng())
    }

    /// [`create`](Self::create) with the identifier date and random source
    /// injected, for deterministic callers and tests.
    pub fn create_with(
        request: BookingRequest,
        created_on: NaiveDate,
        rng: &mut impl Rng,
    ) -> Result<Booking, BookingError> {
        request.guest.validate()?;
        if request.room_number.trim().is_empty() {
            return Err(DomainError::validation("room number cannot be empty").into());
        }
        if request.rate <= Money::ZERO {
            return Err(DomainError::validation("rate must be positive").into());
        }
        if request.deposit.is_negative() {
            return Err(DomainError::validation("deposit cannot be negative").into());
        }

        let quote = quote(
            request.check_in,
            request.check_out,
            request.rate,
            request.deposit,
        )?;

        Ok(Booking {
            booking_id: BusinessId::generate(RecordKind::HotelBooking, created_on, rng),
            guest: request.guest,
            room_number: request.room_number,
            room_type: request.room_type,
            rate: request.rate,
            currency: request.currency,
            check_in: request.check_in,
            check_out: request.check_out,
            deposit: request.deposit,
            status: BookingStatus::Pending,
            nights: quote.nights,
            total: quote.total,
            balance: quote.balance,
            payment_status: quote.payment_status,
        })
    }

    /// Recompute derived fields after any source-field mutation.
    pub fn recompute(&mut self) -> Result<(), BookingError> {
        let quote = quote(self.check_in, self.check_out, self.rate, self.deposit)?;
        self.nights = quote.nights;
        self.total = quote.total;
        self.balance = quote.balance;
        self.payment_status = quote.payment_status;
        Ok(())
    }

    pub fn overpaid(&self) -> bool {
        self.balance.is_negative()
    }

    pub fn confirm(&mut self) -> Result<(), DomainError> {
        if self.status != BookingStatus::Pending {
            return Err(DomainError::invariant("only pending bookings can be confirmed"));
        }
        self.status = BookingStatus::Confirmed;
        Ok(())
    }

    pub fn check_in_guest(&mut self) -> Result<(), DomainError> {
        if self.status != BookingStatus::Confirmed {
            return Err(DomainError::invariant(
                "only confirmed bookings can be checked in",
            ));
        }
        self.status = BookingStatus::CheckedIn;
        Ok(())
    }

    pub fn check_out_guest(&mut self) -> Result<(), DomainError> {
        if self.status != BookingStatus::CheckedIn {
            return Err(DomainError::invariant(
                "only checked-in bookings can be checked out",
            ));
        }
        self.status = BookingStatus::CheckedOut;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status.is_settled() {
            return Err(DomainError::invariant("booking is already settled"));
        }
        self.status = BookingStatus::Cancelled;
        Ok(())
    }

    pub fn mark_no_show(&mut self) -> Result<(), DomainError> {
        if self.status.is_settled() {
            return Err(DomainError::invariant("booking is already settled"));
        }
        self.status = BookingStatus::NoShow;
        Ok(())
    }

    /// Double-booking detection: same room, both bookings in a room-blocking
    /// status, and overlapping half-open [check_in, check_out) ranges.
    pub fn conflicts_with(&self, other: &Booking) -> bool {
        self.room_number == other.room_number
            && self.status.blocks_room()
            && other.status.blocks_room()
            && self.check_in < other.check_out
            && other.check_in < self.check_out
    }
}
