//! `innkeep-hotel` — hotel booking records and their derived payment fields.

pub mod booking;

pub use booking::{
    Booking, BookingError, BookingQuote, BookingRequest, BookingSource, BookingStatus, GuestInfo,
    PaymentStatus, RoomType, quote,
};
