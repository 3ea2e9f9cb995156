//! Tracking-step templates
//!
//! Ordered milestone lists shown to the end user, selected by service
//! group. A step is `completed` when its position precedes or equals the
//! current status position in the template, and `active` only on the
//! exact current-status step.

use serde::{Deserialize, Serialize};

use super::service_type::ServiceGroup;
use super::status::OrderStatus;

/// One milestone in the user-facing progress bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStep {
    /// Status key this step corresponds to
    pub status: OrderStatus,
    /// Human label
    pub label: String,
    pub completed: bool,
    pub active: bool,
}

/// The ordered (status, label) template for a group.
fn template(group: ServiceGroup) -> &'static [(OrderStatus, &'static str)] {
    match group {
        ServiceGroup::Delivery => &[
            (OrderStatus::Pending, "Order placed"),
            (OrderStatus::Accepted, "Order accepted"),
            (OrderStatus::Preparing, "Preparing"),
            (OrderStatus::OutForDelivery, "Out for delivery"),
            (OrderStatus::Completed, "Delivered"),
        ],
        ServiceGroup::Takeaway => &[
            (OrderStatus::Pending, "Order placed"),
            (OrderStatus::Accepted, "Order accepted"),
            (OrderStatus::Preparing, "Preparing"),
            (OrderStatus::ReadyForPickup, "Ready for pickup"),
            (OrderStatus::Completed, "Picked up"),
        ],
        ServiceGroup::DineIn => &[
            (OrderStatus::Pending, "Order placed"),
            (OrderStatus::Accepted, "Order accepted"),
            (OrderStatus::Preparing, "Preparing"),
            (OrderStatus::Served, "Served"),
            (OrderStatus::Completed, "Completed"),
        ],
    }
}

/// Compute the tracking steps for a booking's current status.
///
/// Statuses outside the template (rejected, timeout) can only occur from
/// `pending`, so they keep "Order placed" completed and mark no step
/// active.
pub fn tracking_steps(group: ServiceGroup, current: OrderStatus) -> Vec<TrackingStep> {
    let template = template(group);
    let current_pos = template.iter().position(|(s, _)| *s == current);
    let completed_through = current_pos.unwrap_or(0);

    template
        .iter()
        .enumerate()
        .map(|(idx, (status, label))| TrackingStep {
            status: *status,
            label: (*label).to_string(),
            completed: idx <= completed_through,
            active: current_pos == Some(idx),
        })
        .collect()
}
