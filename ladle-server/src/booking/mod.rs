//! 订单生命周期引擎
//!
//! 从可变购物车到终态订单的完整流程：
//!
//! - [`snapshot`] - 购物车解析与快照冻结
//! - [`coupon`] - 下单时刻的优惠券复核
//! - [`lifecycle`] - 创建订单 + 同步等待商家响应
//! - [`respond`] - 商家接单/拒单
//! - [`advance`] - 按服务组状态表单步推进
//! - [`format`] - 订单文档到线上表示的纯投影

pub mod advance;
pub mod coupon;
pub mod format;
pub mod lifecycle;
pub mod respond;
pub mod snapshot;

#[cfg(test)]
mod tests;

// Re-exports
pub use advance::advance_booking_status;
pub use coupon::{ReconciledCoupon, reconcile_coupon};
pub use format::format_booking;
pub use lifecycle::{BookingOutcome, create_booking};
pub use respond::{RespondOutcome, respond_to_booking};
pub use snapshot::{freeze, resolve_bookable_cart};
