//! `innkeep-pos` — restaurant and pub orders with derived pricing.

pub mod order;

pub use order::{
    DEFAULT_SERVICE_CHARGE_RATE, DEFAULT_VAT_RATE, Discount, LineInput, Order, OrderError,
    OrderLine, OrderRequest, OrderStatus, OrderType, Outlet, Pricing, price,
};
