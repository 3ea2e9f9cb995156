//! 服务类型词汇表
//!
//! 客户端提交的 serviceType 字段格式宽松（大小写、连字符、空格变体），
//! 入口处统一归一化为封闭枚举。无法识别的输入立即拒绝，
//! 绝不回退到默认组。

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Canonical fulfilment channels accepted by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// 外送
    Delivery,
    /// 堂食
    DineIn,
    /// 打包自取
    Takeaway,
    /// 到店取餐
    Pickup,
    /// 车内用餐
    CarDineIn,
}

/// Tracking/transition template selector derived from [`ServiceType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceGroup {
    Delivery,
    Takeaway,
    DineIn,
}

/// Unrecognized service type input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unrecognized service type: '{input}'")]
pub struct ServiceTypeParseError {
    pub input: String,
}

impl ServiceType {
    /// Canonical display form shown on receipts and API responses.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::Delivery => "Delivery",
            ServiceType::DineIn => "Dine in",
            ServiceType::Takeaway => "Takeaway",
            ServiceType::Pickup => "Pickup",
            ServiceType::CarDineIn => "Car Dine in",
        }
    }

    /// The tracking-step group this channel belongs to.
    ///
    /// Pickup and car dine-in share the takeaway progression
    /// (preparing → ready_for_pickup).
    pub fn group(&self) -> ServiceGroup {
        match self {
            ServiceType::Delivery => ServiceGroup::Delivery,
            ServiceType::DineIn => ServiceGroup::DineIn,
            ServiceType::Takeaway | ServiceType::Pickup | ServiceType::CarDineIn => {
                ServiceGroup::Takeaway
            }
        }
    }

    /// Parse loosely formatted client input into a canonical value.
    ///
    /// Case-insensitive; hyphens, underscores and spaces are
    /// interchangeable. Parsing a canonical display form returns the
    /// same variant (idempotent normalization).
    pub fn parse(input: &str) -> Result<Self, ServiceTypeParseError> {
        let key: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "delivery" => Ok(ServiceType::Delivery),
            "dinein" => Ok(ServiceType::DineIn),
            "takeaway" => Ok(ServiceType::Takeaway),
            "pickup" => Ok(ServiceType::Pickup),
            "cardinein" => Ok(ServiceType::CarDineIn),
            _ => Err(ServiceTypeParseError {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = ServiceTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::parse(s)
    }
}
