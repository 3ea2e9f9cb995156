//! Booking Domain Module
//!
//! This module provides the vocabulary of the booking lifecycle:
//! - Service types: the closed set of fulfilment channels and their groups
//! - Status: order/payment state machines and the per-group transition table
//! - Tracking: ordered milestone templates shown to the end user
//! - Snapshot: the immutable cart copy taken at booking time
//! - View: wire representation of a booking
//! - Event: live status-stream frames

pub mod event;
pub mod service_type;
pub mod snapshot;
pub mod status;
pub mod tracking;
pub mod view;

// Re-exports
pub use event::StreamEvent;
pub use service_type::{ServiceGroup, ServiceType, ServiceTypeParseError};
pub use snapshot::{CartSnapshot, CartTotals, SnapshotAddOn, SnapshotCustomization, SnapshotItem};
pub use status::{OrderStatus, PaymentStatus};
pub use tracking::{TrackingStep, tracking_steps};
pub use view::{
    BookingView, ModifiedItemView, PaymentDetailsView, RejectionDetails, ServiceDetailsView,
};
