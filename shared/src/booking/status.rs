//! Booking status machines
//!
//! `OrderStatus` moves `pending → {accepted, rejected, timeout}` via the
//! vendor respond operation, then forward through the group-specific table
//! one step at a time until `completed`. `rejected`, `timeout` and
//! `completed` are terminal. `PaymentStatus` is an independent axis and
//! gates the first advance past `accepted`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::service_type::ServiceGroup;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Timeout,
    Preparing,
    OutForDelivery,
    ReadyForPickup,
    Served,
    Completed,
}

/// Payment status (independent axis)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

impl OrderStatus {
    /// Wire/storage key (snake_case, matches serde rename)
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Timeout => "timeout",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::ReadyForPickup => "ready_for_pickup",
            OrderStatus::Served => "served",
            OrderStatus::Completed => "completed",
        }
    }

    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Rejected | OrderStatus::Timeout | OrderStatus::Completed
        )
    }

    /// The single next status in the group's progression, if any.
    ///
    /// There is deliberately no entry from `Pending`: only the vendor
    /// respond operation leaves `Pending`.
    pub fn next_in_group(&self, group: ServiceGroup) -> Option<OrderStatus> {
        match (group, self) {
            (_, OrderStatus::Accepted) => Some(OrderStatus::Preparing),
            (ServiceGroup::Delivery, OrderStatus::Preparing) => Some(OrderStatus::OutForDelivery),
            (ServiceGroup::Delivery, OrderStatus::OutForDelivery) => Some(OrderStatus::Completed),
            (ServiceGroup::Takeaway, OrderStatus::Preparing) => Some(OrderStatus::ReadyForPickup),
            (ServiceGroup::Takeaway, OrderStatus::ReadyForPickup) => Some(OrderStatus::Completed),
            (ServiceGroup::DineIn, OrderStatus::Preparing) => Some(OrderStatus::Served),
            (ServiceGroup::DineIn, OrderStatus::Served) => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
