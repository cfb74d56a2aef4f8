use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use innkeep_core::{BusinessId, Currency, DomainError, Money, RecordKind};

/// Transaction direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
    Adjustment,
}

impl TransactionKind {
    /// Record category for identifier generation. Transfers and adjustments
    /// share the `TR` prefix.
    pub const fn record_kind(&self) -> RecordKind {
        match self {
            TransactionKind::Income => RecordKind::IncomeTransaction,
            TransactionKind::Expense => RecordKind::ExpenseTransaction,
            TransactionKind::Transfer | TransactionKind::Adjustment => {
                RecordKind::TransferTransaction
            }
        }
    }
}

/// Ledger category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    // Income
    HotelBooking,
    RestaurantSales,
    PubSales,
    RoomService,
    Laundry,
    OtherIncome,
    // Expense
    InventoryPurchase,
    Supplies,
    Utilities,
    Salaries,
    Rent,
    Maintenance,
    Marketing,
    Insurance,
    Taxes,
    BankCharges,
    Equipment,
    Fuel,
    Transportation,
    OtherExpense,
}

impl TransactionCategory {
    pub const fn is_income(&self) -> bool {
        matches!(
            self,
            TransactionCategory::HotelBooking
                | TransactionCategory::RestaurantSales
                | TransactionCategory::PubSales
                | TransactionCategory::RoomService
                | TransactionCategory::Laundry
                | TransactionCategory::OtherIncome
        )
    }

    /// Whether this category is admissible for `kind`. Transfers and
    /// adjustments may use any category.
    pub const fn fits(&self, kind: TransactionKind) -> bool {
        match kind {
            TransactionKind::Income => self.is_income(),
            TransactionKind::Expense => !self.is_income(),
            TransactionKind::Transfer | TransactionKind::Adjustment => true,
        }
    }
}

/// How the money moved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    MobileMoney,
    BankTransfer,
    Cheque,
}

/// Reconciliation lifecycle.
///
/// pending → completed → reconciled; cancellable only while pending.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Reconciled,
    Cancelled,
}

/// An exchange rate in fixed-point, scaled by 10^4 (12.5 → 125_000).
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExchangeRate(u64);

impl ExchangeRate {
    pub const SCALE: u64 = 10_000;

    /// Build from a pre-scaled value: `from_scaled(125_000)` is a rate of
    /// 12.5 base units per foreign unit.
    #[inline]
    pub const fn from_scaled(scaled: u64) -> Self {
        ExchangeRate(scaled)
    }

    /// Whole-unit convenience: `from_whole(12)` is a rate of 12.0.
    #[inline]
    pub const fn from_whole(units: u64) -> Self {
        ExchangeRate(units * Self::SCALE)
    }

    #[inline]
    pub const fn scaled(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert an amount with round-half-up at the minor unit.
    pub fn apply(&self, amount: Money) -> Money {
        let scaled = amount.minor() as i128 * self.0 as i128;
        let half = Self::SCALE as i128 / 2;
        Money::from_minor(((scaled + half) / Self::SCALE as i128) as i64)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("missing or zero exchange rate for {currency}")]
    MissingExchangeRate { currency: Currency },

    #[error("{0}")]
    Domain(#[from] DomainError),
}

impl TransactionError {
    pub fn http_status(&self) -> u16 {
        match self {
            TransactionError::MissingExchangeRate { .. } => 400,
            TransactionError::Domain(e) => e.http_status(),
        }
    }
}

/// Normalize an amount to the base currency.
///
/// Base-currency amounts pass through untouched (any supplied rate is
/// ignored). Foreign amounts require a positive rate.
pub fn to_base(
    amount: Money,
    currency: Currency,
    rate: Option<ExchangeRate>,
) -> Result<Money, TransactionError> {
    if currency.is_base() {
        return Ok(amount);
    }
    match rate {
        Some(rate) if !rate.is_zero() => Ok(rate.apply(amount)),
        _ => Err(TransactionError::MissingExchangeRate { currency }),
    }
}

/// Typed input for recording a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub description: String,
    pub amount: Money,
    pub currency: Currency,
    #[serde(default)]
    pub exchange_rate: Option<ExchangeRate>,
    pub payment_method: PaymentMethod,
    pub occurred_at: DateTime<Utc>,
}

/// A financial transaction with its derived base-currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: BusinessId,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub description: String,
    pub amount: Money,
    pub currency: Currency,
    pub exchange_rate: Option<ExchangeRate>,
    pub amount_in_base: Money,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    /// Validate a request and build a pending transaction with the base
    /// amount derived and a fresh kind-prefixed identifier.
    pub fn create(request: TransactionRequest) -> Result<Transaction, TransactionError> {
        Self::create_with(request, Utc::now().date_naive(), &mut rand::thread_rng())
    }

    /// [`create`](Self::create) with the identifier date and random source
    /// injected, for deterministic callers and tests.
    pub fn create_with(
        request: TransactionRequest,
        created_on: NaiveDate,
        rng: &mut impl Rng,
    ) -> Result<Transaction, TransactionError> {
        if request.description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty").into());
        }
        if request.amount <= Money::ZERO {
            return Err(DomainError::validation("amount must be positive").into());
        }
        if !request.category.fits(request.kind) {
            return Err(DomainError::validation(
                "category does not match transaction kind",
            )
            .into());
        }

        let amount_in_base = to_base(request.amount, request.currency, request.exchange_rate)?;

        Ok(Transaction {
            transaction_id: BusinessId::generate(request.kind.record_kind(), created_on, rng),
            kind: request.kind,
            category: request.category,
            description: request.description,
            amount: request.amount,
            currency: request.currency,
            exchange_rate: request.exchange_rate,
            amount_in_base,
            payment_method: request.payment_method,
            status: TransactionStatus::Pending,
            occurred_at: request.occurred_at,
        })
    }

    /// Recompute the base-currency amount after any source-field mutation.
    pub fn recompute(&mut self) -> Result<(), TransactionError> {
        self.amount_in_base = to_base(self.amount, self.currency, self.exchange_rate)?;
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status != TransactionStatus::Pending {
            return Err(DomainError::invariant(
                "only pending transactions can be completed",
            ));
        }
        self.status = TransactionStatus::Completed;
        Ok(())
    }

    pub fn reconcile(&mut self) -> Result<(), DomainError> {
        if self.status != TransactionStatus::Completed {
            return Err(DomainError::invariant(
                "only completed transactions can be reconciled",
            ));
        }
        self.status = TransactionStatus::Reconciled;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status != TransactionStatus::Pending {
            return Err(DomainError::invariant(
                "only pending transactions can be cancelled",
            ));
        }
        self.status = TransactionStatus::Cancelled;
        Ok(())
    }
}

/// A transaction proposed by another subsystem (e.g. a stock adjustment),
/// to be completed with payment details by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub description: String,
    pub amount: Money,
    pub currency: Currency,
}

impl TransactionDraft {
    /// Promote the draft to a full request.
    pub fn into_request(
        self,
        payment_method: PaymentMethod,
        occurred_at: DateTime<Utc>,
    ) -> TransactionRequest {
        TransactionRequest {
            kind: self.kind,
            category: self.category,
            description: self.description,
            amount: self.amount,
            currency: self.currency,
            exchange_rate: None,
            payment_method,
            occurred_at,
        }
    }
}
