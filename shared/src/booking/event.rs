//! Live status-stream frames
//!
//! Serialized onto the booking status stream. The first frame after
//! subscribing is always `Initial` with the full booking projection;
//! subsequent frames are `StatusUpdate`. Keep-alive comments between
//! frames are a transport concern and never appear here.

use serde::{Deserialize, Serialize};

use super::status::OrderStatus;
use super::tracking::TrackingStep;
use super::view::BookingView;

/// One frame on a booking status stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StreamEvent {
    /// Full state at subscription time
    #[serde(rename = "INITIAL")]
    Initial { booking: Box<BookingView> },

    /// Pushed on every accepted status advance
    #[serde(rename = "STATUS_UPDATE")]
    #[serde(rename_all = "camelCase")]
    StatusUpdate {
        order_status: OrderStatus,
        tracking_steps: Vec<TrackingStep>,
        updated_at: String,
    },
}

impl StreamEvent {
    /// Frame type tag as serialized on the wire
    pub fn frame_type(&self) -> &'static str {
        match self {
            StreamEvent::Initial { .. } => "INITIAL",
            StreamEvent::StatusUpdate { .. } => "STATUS_UPDATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::service_type::ServiceGroup;
    use crate::booking::tracking::tracking_steps;

    #[test]
    fn status_update_wire_shape() {
        let event = StreamEvent::StatusUpdate {
            order_status: OrderStatus::Preparing,
            tracking_steps: tracking_steps(ServiceGroup::DineIn, OrderStatus::Preparing),
            updated_at: "2026-08-07T12:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "STATUS_UPDATE");
        assert_eq!(json["orderStatus"], "preparing");
        assert!(json["trackingSteps"].is_array());
    }
}
