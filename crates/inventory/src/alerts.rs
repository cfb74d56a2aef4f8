//! Stock and expiry alert derivation.
//!
//! The active alert set for an item is always exactly the set implied by its
//! current stock, thresholds and expiry dates. Derivation is a total
//! replacement of the previous set, never an incremental patch, so a stored
//! item can never carry a partially stale alert.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Forward window for `expiring_soon`, in days.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowStock,
    OutOfStock,
    ExpiringSoon,
    Expired,
}

/// An active alert attached to an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub is_active: bool,
}

impl Alert {
    fn active(kind: AlertKind, message: String) -> Self {
        Alert {
            kind,
            message,
            is_active: true,
        }
    }
}

/// Derive the complete alert set for an item.
///
/// Stock alerts are exclusive: `out_of_stock` at zero, `low_stock` when
/// `0 < stock <= minimum_stock`. Expiry alerts are exclusive too: `expired`
/// when any date has passed, otherwise `expiring_soon` when any date falls
/// within the warning window. Deterministic in (stock, minimum_stock,
/// expiry_dates, today) — no hidden clock.
pub fn derive_alerts(
    name: &str,
    stock: i64,
    minimum_stock: i64,
    expiry_dates: &[NaiveDate],
    today: NaiveDate,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if stock == 0 {
        alerts.push(Alert::active(
            AlertKind::OutOfStock,
            format!("{name} is out of stock"),
        ));
    } else if stock <= minimum_stock {
        alerts.push(Alert::active(
            AlertKind::LowStock,
            format!("{name} is low on stock: {stock} left (minimum {minimum_stock})"),
        ));
    }

    let earliest_expired = expiry_dates.iter().filter(|d| **d <= today).min();
    if let Some(date) = earliest_expired {
        alerts.push(Alert::active(
            AlertKind::Expired,
            format!("{name} has a batch that expired on {date}"),
        ));
    } else if let Some(date) = expiry_dates
        .iter()
        .filter(|d| (**d - today).num_days() <= EXPIRY_WARNING_DAYS)
        .min()
    {
        alerts.push(Alert::active(
            AlertKind::ExpiringSoon,
            format!("{name} has a batch expiring on {date}"),
        ));
    }

    alerts
}
