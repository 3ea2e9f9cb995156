//! Document models for the ordering store

pub mod serde_helpers;

pub mod booking;
pub mod cart;
pub mod coupon;
pub mod vendor;

// Re-exports
pub use booking::{
    Booking, CreateBookingRequest, ModifiedItemRequest, PaymentConfirmRequest, RespondAction,
    RespondRequest,
};
pub use cart::{Cart, CartAddOn, CartCustomization, CartItem};
pub use coupon::{Coupon, DiscountKind};
pub use vendor::Vendor;
