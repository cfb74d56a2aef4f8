//! `innkeep-inventory` — stock items, clamped adjustments and alert
//! derivation.

pub mod alerts;
pub mod item;

pub use alerts::{Alert, AlertKind, EXPIRY_WARNING_DAYS, derive_alerts};
pub use item::{
    AdjustmentOutcome, InventoryItem, ItemCategory, ItemRequest, MovementKind, StockMovement,
    Unit, item_code,
};
