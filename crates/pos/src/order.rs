use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use innkeep_core::{BusinessId, Currency, DomainError, Money, RateBps, RecordKind};

/// VAT applied to order subtotals unless the request overrides it. 12.5%.
pub const DEFAULT_VAT_RATE: RateBps = RateBps::new(1250);

/// Service charge applied to order subtotals unless overridden. 10%.
pub const DEFAULT_SERVICE_CHARGE_RATE: RateBps = RateBps::new(1000);

/// Which point-of-sale outlet an order belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlet {
    Restaurant,
    Pub,
}

impl Outlet {
    /// Record category for identifier generation (`RO...` / `PO...`).
    pub const fn record_kind(&self) -> RecordKind {
        match self {
            Outlet::Restaurant => RecordKind::RestaurantOrder,
            Outlet::Pub => RecordKind::PubOrder,
        }
    }
}

/// How the order is fulfilled. Dine-in needs a table, room service a room.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    DineIn,
    Takeaway,
    RoomService,
}

/// Kitchen lifecycle.
///
/// pending → confirmed → preparing → ready → served; cancellable at any point
/// before the order is served.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    const fn is_settled(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }
}

/// Discount applied to the whole order, after VAT and service charge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Discount {
    /// Percentage of the order subtotal, in basis points.
    Percentage(RateBps),
    /// Flat amount.
    Fixed(Money),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("order must contain at least one item")]
    EmptyOrder,

    #[error("invalid quantity on line {line}: must be at least 1")]
    InvalidQuantity { line: usize },

    #[error("discount exceeds order total")]
    DiscountExceedsTotal,

    #[error("{0}")]
    Domain(#[from] DomainError),
}

impl OrderError {
    pub fn http_status(&self) -> u16 {
        match self {
            OrderError::EmptyOrder
            | OrderError::InvalidQuantity { .. }
            | OrderError::DiscountExceedsTotal => 400,
            OrderError::Domain(e) => e.http_status(),
        }
    }
}

/// One requested menu item, as it arrives from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// An order line with its derived subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub subtotal: Money,
    pub special_instructions: Option<String>,
}

/// Derived totals for an order.
///
/// Recomputed whenever lines, rates or the discount change; never authored
/// directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub subtotal: Money,
    pub vat: Money,
    pub service_charge: Money,
    pub discount_amount: Money,
    pub total: Money,
}

/// Compute order totals from source fields only.
///
/// `subtotal = Σ unit_price × quantity`, VAT and service charge are rates on
/// the subtotal, percentage discounts are a rate on the subtotal, and
/// `total = subtotal + vat + service_charge − discount`. A discount that would
/// drive the total negative is rejected, never silently clamped.
pub fn price(
    lines: &[OrderLine],
    vat_rate: RateBps,
    service_charge_rate: RateBps,
    discount: Option<Discount>,
) -> Result<Pricing, OrderError> {
    if lines.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    for (index, line) in lines.iter().enumerate() {
        if line.quantity == 0 {
            return Err(OrderError::InvalidQuantity { line: index });
        }
    }

    let subtotal: Money = lines
        .iter()
        .map(|line| line.unit_price.times(line.quantity as i64))
        .sum();
    let vat = subtotal.apply_rate(vat_rate);
    let service_charge = subtotal.apply_rate(service_charge_rate);
    let discount_amount = match discount {
        None => Money::ZERO,
        Some(Discount::Percentage(rate)) => subtotal.apply_rate(rate),
        Some(Discount::Fixed(amount)) => amount,
    };

    let gross = subtotal + vat + service_charge;
    if discount_amount > gross {
        return Err(OrderError::DiscountExceedsTotal);
    }

    Ok(Pricing {
        subtotal,
        vat,
        service_charge,
        discount_amount,
        total: gross - discount_amount,
    })
}

/// Typed input for creating an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub outlet: Outlet,
    pub order_type: OrderType,
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    pub lines: Vec<LineInput>,
    pub currency: Currency,
    #[serde(default)]
    pub vat_rate: Option<RateBps>,
    #[serde(default)]
    pub service_charge_rate: Option<RateBps>,
    #[serde(default)]
    pub discount: Option<Discount>,
}

/// A restaurant or pub order with its derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: BusinessId,
    pub outlet: Outlet,
    pub order_type: OrderType,
    pub table_number: Option<String>,
    pub room_number: Option<String>,
    pub lines: Vec<OrderLine>,
    pub currency: Currency,
    pub vat_rate: RateBps,
    pub service_charge_rate: RateBps,
    pub discount: Option<Discount>,
    pub status: OrderStatus,
    pub pricing: Pricing,
}

impl Order {
    /// Validate a request and build a pending order with derived totals
    /// populated and a fresh outlet-prefixed identifier.
    pub fn create(request: OrderRequest) -> Result<Order, OrderError> {
        Self::create_with(request, Utc::now().date_naive(), &mut rand::thread_rng())
    }

    /// [`create`](Self::create) with the identifier date and random source
    /// injected, for deterministic callers and tests.
    pub fn create_with(
        request: OrderRequest,
        created_on: NaiveDate,
        rng: &mut impl Rng,
    ) -> Result<Order, OrderError> {
        match request.order_type {
            OrderType::DineIn if none_or_blank(&request.table_number) => {
                return Err(DomainError::validation("dine-in orders require a table number").into());
            }
            OrderType::RoomService if none_or_blank(&request.room_number) => {
                return Err(
                    DomainError::validation("room service orders require a room number").into(),
                );
            }
            _ => {}
        }
        for (index, line) in request.lines.iter().enumerate() {
            if line.name.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "line {index} has an empty item name"
                ))
                .into());
            }
            if line.unit_price.is_negative() {
                return Err(DomainError::validation(format!(
                    "line {index} has a negative unit price"
                ))
                .into());
            }
        }

        let lines: Vec<OrderLine> = request
            .lines
            .into_iter()
            .map(|line| OrderLine {
                subtotal: line.unit_price.times(line.quantity as i64),
                name: line.name,
                unit_price: line.unit_price,
                quantity: line.quantity,
                special_instructions: line.special_instructions,
            })
            .collect();

        let vat_rate = request.vat_rate.unwrap_or(DEFAULT_VAT_RATE);
        let service_charge_rate = request
            .service_charge_rate
            .unwrap_or(DEFAULT_SERVICE_CHARGE_RATE);
        let pricing = price(&lines, vat_rate, service_charge_rate, request.discount)?;

        Ok(Order {
            order_id: BusinessId::generate(request.outlet.record_kind(), created_on, rng),
            outlet: request.outlet,
            order_type: request.order_type,
            table_number: request.table_number,
            room_number: request.room_number,
            lines,
            currency: request.currency,
            vat_rate,
            service_charge_rate,
            discount: request.discount,
            status: OrderStatus::Pending,
            pricing,
        })
    }

    /// Recompute line subtotals and order totals after any source-field
    /// mutation.
    ///
    /// All-or-nothing: on a pricing failure the stored lines and totals are
    /// left exactly as they were.
    pub fn recompute(&mut self) -> Result<(), OrderError> {
        let mut lines = self.lines.clone();
        for line in &mut lines {
            line.subtotal = line.unit_price.times(line.quantity as i64);
        }
        let pricing = price(&lines, self.vat_rate, self.service_charge_rate, self.discount)?;
        self.lines = lines;
        self.pricing = pricing;
        Ok(())
    }

    pub fn confirm(&mut self) -> Result<(), DomainError> {
        if self.status != OrderStatus::Pending {
            return Err(DomainError::invariant("only pending orders can be confirmed"));
        }
        self.status = OrderStatus::Confirmed;
        Ok(())
    }

    pub fn start_preparing(&mut self) -> Result<(), DomainError> {
        if self.status != OrderStatus::Confirmed {
            return Err(DomainError::invariant(
                "only confirmed orders can move to preparing",
            ));
        }
        self.status = OrderStatus::Preparing;
        Ok(())
    }

    pub fn mark_ready(&mut self) -> Result<(), DomainError> {
        if self.status != OrderStatus::Preparing {
            return Err(DomainError::invariant("only preparing orders can be ready"));
        }
        self.status = OrderStatus::Ready;
        Ok(())
    }

    pub fn serve(&mut self) -> Result<(), DomainError> {
        if self.status != OrderStatus::Ready {
            return Err(DomainError::invariant("only ready orders can be served"));
        }
        self.status = OrderStatus::Served;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status.is_settled() {
            return Err(DomainError::invariant("order is already settled"));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}

fn none_or_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
