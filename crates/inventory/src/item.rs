use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use innkeep_accounting::{TransactionCategory, TransactionDraft, TransactionKind};
use innkeep_core::{Currency, DomainError, DomainResult, Money};

use crate::alerts::{Alert, derive_alerts};

/// Stock category. Also the source of the item-code prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Food,
    Beverage,
    Cleaning,
    Linen,
    Toiletries,
    Stationery,
    Equipment,
    Other,
}

impl ItemCategory {
    /// First three letters of the category, uppercased.
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            ItemCategory::Food => "FOO",
            ItemCategory::Beverage => "BEV",
            ItemCategory::Cleaning => "CLE",
            ItemCategory::Linen => "LIN",
            ItemCategory::Toiletries => "TOI",
            ItemCategory::Stationery => "STA",
            ItemCategory::Equipment => "EQU",
            ItemCategory::Other => "OTH",
        }
    }
}

/// Unit of measure for stock counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Piece,
    Kg,
    Litre,
    Pack,
    Box,
    Bottle,
    Crate,
}

/// Why stock moved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Purchase,
    Sale,
    Transfer,
    Adjustment,
    Waste,
    Return,
}

/// One entry in an item's movement log.
///
/// `requested_delta` is what the caller asked for; `applied_delta` is what the
/// zero-floor clamp actually allowed. The two differ only when a deduction
/// would have driven stock negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub kind: MovementKind,
    pub requested_delta: i64,
    pub applied_delta: i64,
    pub stock_after: i64,
    pub note: Option<String>,
    pub moved_on: NaiveDate,
}

/// Generate an item code: category prefix plus a 4-digit random suffix.
///
/// Uniqueness is probabilistic, same as business identifiers: callers needing
/// strict uniqueness check the store and regenerate on collision.
pub fn item_code(category: ItemCategory, rng: &mut impl Rng) -> String {
    format!("{}{:04}", category.code_prefix(), rng.gen_range(0..10_000))
}

/// Typed input for registering an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub category: ItemCategory,
    pub unit: Unit,
    pub stock: i64,
    pub minimum_stock: i64,
    pub unit_cost: Money,
    pub currency: Currency,
    #[serde(default)]
    pub expiry_dates: Vec<NaiveDate>,
}

/// Result of a stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentOutcome {
    pub applied_delta: i64,
    pub new_stock: i64,
    /// Proposed accounting entry for the value of the adjustment, when the
    /// caller asked for one and stock actually moved.
    pub draft: Option<TransactionDraft>,
}

/// An inventory item with its movement log and derived alert set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_code: String,
    pub name: String,
    pub category: ItemCategory,
    pub unit: Unit,
    pub stock: i64,
    pub minimum_stock: i64,
    pub unit_cost: Money,
    pub currency: Currency,
    pub expiry_dates: Vec<NaiveDate>,
    pub movements: Vec<StockMovement>,
    pub alerts: Vec<Alert>,
}

impl InventoryItem {
    /// Validate a request and register an item with a fresh code and its
    /// alert set derived as of `today`.
    pub fn create(
        request: ItemRequest,
        today: NaiveDate,
        rng: &mut impl Rng,
    ) -> DomainResult<InventoryItem> {
        if request.name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if request.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        if request.minimum_stock < 0 {
            return Err(DomainError::validation("minimum stock cannot be negative"));
        }
        if request.unit_cost.is_negative() {
            return Err(DomainError::validation("unit cost cannot be negative"));
        }

        let mut item = InventoryItem {
            item_code: item_code(request.category, rng),
            name: request.name,
            category: request.category,
            unit: request.unit,
            stock: request.stock,
            minimum_stock: request.minimum_stock,
            unit_cost: request.unit_cost,
            currency: request.currency,
            expiry_dates: request.expiry_dates,
            movements: Vec::new(),
            alerts: Vec::new(),
        };
        item.refresh_alerts(today);
        Ok(item)
    }

    /// Replace the alert set with the one implied by current stock and
    /// expiry dates.
    pub fn refresh_alerts(&mut self, today: NaiveDate) {
        self.alerts = derive_alerts(
            &self.name,
            self.stock,
            self.minimum_stock,
            &self.expiry_dates,
            today,
        );
    }

    /// Apply a stock delta with the zero-floor clamp, log the movement, and
    /// re-derive alerts.
    ///
    /// `new_stock = max(0, stock + delta)`: stock never goes negative, even
    /// when the requested deduction exceeds what is on hand. When
    /// `with_draft` is set and stock actually moved, the outcome carries a
    /// transaction draft valued at `|applied_delta| × unit_cost` — an
    /// inventory-purchase expense for restocks, an adjustment for deductions.
    pub fn apply_adjustment(
        &mut self,
        kind: MovementKind,
        delta: i64,
        note: Option<String>,
        today: NaiveDate,
        with_draft: bool,
    ) -> DomainResult<AdjustmentOutcome> {
        if delta == 0 {
            return Err(DomainError::validation("adjustment delta cannot be zero"));
        }

        let new_stock = (self.stock + delta).max(0);
        let applied_delta = new_stock - self.stock;
        self.stock = new_stock;
        self.movements.push(StockMovement {
            kind,
            requested_delta: delta,
            applied_delta,
            stock_after: new_stock,
            note,
            moved_on: today,
        });
        self.refresh_alerts(today);

        let draft = if with_draft && applied_delta != 0 {
            let (txn_kind, category, verb) = if applied_delta > 0 {
                (
                    TransactionKind::Expense,
                    TransactionCategory::InventoryPurchase,
                    "Restock",
                )
            } else {
                (
                    TransactionKind::Adjustment,
                    TransactionCategory::OtherExpense,
                    "Stock deduction",
                )
            };
            Some(TransactionDraft {
                kind: txn_kind,
                category,
                description: format!("{verb}: {} x{}", self.name, applied_delta.abs()),
                amount: self.unit_cost.times(applied_delta.abs()),
                currency: self.currency,
            })
        } else {
            None
        };

        Ok(AdjustmentOutcome {
            applied_delta,
            new_stock,
            draft,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertKind;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn request() -> ItemRequest {
        ItemRequest {
            name: "Rice 25kg".to_string(),
            category: ItemCategory::Food,
            unit: Unit::Kg,
            stock: 5,
            minimum_stock: 10,
            unit_cost: Money::from_major(8),
            currency: Currency::Ghs,
            expiry_dates: Vec::new(),
        }
    }

    fn item() -> InventoryItem {
        InventoryItem::create(request(), today(), &mut StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn item_codes_carry_the_category_prefix() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = item_code(ItemCategory::Beverage, &mut rng);
        assert_eq!(code.len(), 7);
        assert!(code.starts_with("BEV"));
        assert!(code[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn create_derives_alerts_immediately() {
        // Registered below the minimum: low stock from the start.
        let item = item();
        assert!(item.item_code.starts_with("FOO"));
        assert_eq!(item.alerts.len(), 1);
        assert_eq!(item.alerts[0].kind, AlertKind::LowStock);
    }

    #[test]
    fn create_rejects_bad_input() {
        let mut negative_stock = request();
        negative_stock.stock = -1;
        assert!(
            InventoryItem::create(negative_stock, today(), &mut StdRng::seed_from_u64(7)).is_err()
        );

        let mut blank = request();
        blank.name = " ".to_string();
        assert!(InventoryItem::create(blank, today(), &mut StdRng::seed_from_u64(7)).is_err());
    }

    #[test]
    fn deduction_clamps_at_zero_and_logs_what_actually_happened() {
        let mut item = item();
        let outcome = item
            .apply_adjustment(MovementKind::Waste, -8, None, today(), false)
            .unwrap();
        assert_eq!(outcome.new_stock, 0);
        assert_eq!(outcome.applied_delta, -5);

        let movement = item.movements.last().unwrap();
        assert_eq!(movement.requested_delta, -8);
        assert_eq!(movement.applied_delta, -5);
        assert_eq!(movement.stock_after, 0);
        assert_eq!(item.alerts[0].kind, AlertKind::OutOfStock);
    }

    #[test]
    fn restock_moves_stock_and_clears_alerts() {
        let mut item = item();
        let outcome = item
            .apply_adjustment(MovementKind::Purchase, 20, None, today(), false)
            .unwrap();
        assert_eq!(outcome.new_stock, 25);
        assert!(item.alerts.is_empty());
    }

    #[test]
    fn zero_delta_is_rejected() {
        let mut item = item();
        assert!(
            item.apply_adjustment(MovementKind::Adjustment, 0, None, today(), false)
                .is_err()
        );
        assert!(item.movements.is_empty());
    }

    #[test]
    fn restock_draft_is_an_inventory_purchase_expense() {
        let mut item = item();
        let outcome = item
            .apply_adjustment(MovementKind::Purchase, 10, None, today(), true)
            .unwrap();
        let draft = outcome.draft.unwrap();
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.category, TransactionCategory::InventoryPurchase);
        assert_eq!(draft.amount, Money::from_major(80));
        assert_eq!(draft.currency, Currency::Ghs);
    }

    #[test]
    fn deduction_draft_is_an_adjustment_valued_at_the_applied_delta() {
        let mut item = item();
        // Requested −8 but only 5 on hand: the draft covers the 5 that moved.
        let outcome = item
            .apply_adjustment(MovementKind::Waste, -8, None, today(), true)
            .unwrap();
        let draft = outcome.draft.unwrap();
        assert_eq!(draft.kind, TransactionKind::Adjustment);
        assert_eq!(draft.amount, Money::from_major(40));
    }

    #[test]
    fn no_draft_when_the_clamp_swallows_the_whole_delta() {
        let mut item = item();
        item.apply_adjustment(MovementKind::Waste, -5, None, today(), false)
            .unwrap();
        // Already at zero: a further deduction moves nothing.
        let outcome = item
            .apply_adjustment(MovementKind::Waste, -3, None, today(), true)
            .unwrap();
        assert_eq!(outcome.applied_delta, 0);
        assert!(outcome.draft.is_none());
        assert_eq!(item.movements.last().unwrap().applied_delta, 0);
    }

    #[test]
    fn expiry_dates_feed_the_alert_set() {
        let mut req = request();
        req.stock = 50;
        req.expiry_dates = vec![NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()];
        let item = InventoryItem::create(req, today(), &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(item.alerts[0].kind, AlertKind::ExpiringSoon);
    }

    proptest! {
        /// Stock never goes negative and the movement log always records the
        /// clamped delta.
        #[test]
        fn stock_stays_non_negative(
            start in 0i64..1_000i64,
            deltas in proptest::collection::vec(-100i64..100i64, 1..20),
        ) {
            let mut req = request();
            req.stock = start;
            let mut item =
                InventoryItem::create(req, today(), &mut StdRng::seed_from_u64(7)).unwrap();

            for delta in deltas {
                if delta == 0 {
                    continue;
                }
                let before = item.stock;
                let outcome = item
                    .apply_adjustment(MovementKind::Adjustment, delta, None, today(), false)
                    .unwrap();
                prop_assert!(outcome.new_stock >= 0);
                prop_assert_eq!(outcome.new_stock, before + outcome.applied_delta);
                prop_assert_eq!(item.stock, outcome.new_stock);
            }
        }
    }
}
