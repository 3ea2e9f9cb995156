//! Shared types for the Ladle ordering platform
//!
//! Domain vocabulary used by the server and clients: service types,
//! booking status machines, tracking-step templates, cart snapshots and
//! live-stream event frames. Pure types, no I/O.

pub mod booking;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use booking::{
    BookingView, CartSnapshot, OrderStatus, PaymentStatus, ServiceGroup, ServiceType, StreamEvent,
    TrackingStep,
};
