//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`bookings`] - 用户侧订单接口（创建、查询、支付确认、状态流）
//! - [`orders`] - 商家侧订单接口（列表、接单/拒单、状态推进）

pub mod bookings;
pub mod health;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
