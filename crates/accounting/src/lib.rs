//! `innkeep-accounting` — financial transactions and base-currency
//! normalization.

pub mod transaction;

pub use transaction::{
    ExchangeRate, PaymentMethod, Transaction, TransactionCategory, TransactionDraft,
    TransactionError, TransactionKind, TransactionRequest, TransactionStatus, to_base,
};
