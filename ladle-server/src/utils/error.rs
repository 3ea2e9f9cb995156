//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`AppResponse`] - API 响应结构
//!
//! # 错误分类
//!
//! | 分类 | HTTP | 说明 |
//! |------|------|------|
//! | Validation | 400 | 请求字段缺失或格式错误（附字段错误列表） |
//! | Conflict | 400 | 业务规则冲突（券失效、状态表外转移等） |
//! | State | 400 | 针对终态或错误状态的操作 |
//! | NotFound | 404 | 资源不存在或不属于调用方（不泄露存在性） |
//! | Database / Internal | 500 | 系统错误，记录日志，返回通用消息 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order"))
//!
//! // 返回成功响应
//! Ok(ok_with_message(data, "Booking accepted"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API 统一响应结构
///
/// ```json
/// {
///   "success": true,
///   "message": "Booking accepted",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    /// 说明消息（接受/拒绝/超时等结果都经由此字段区分）
    pub message: String,
    /// 响应数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// 字段级错误列表 (仅验证失败时出现)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// One field-level validation failure
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (4xx) ==========
    #[error("Authentication required")]
    /// 未登录 (401)
    Unauthorized,

    #[error("Invalid token")]
    /// 无效令牌 (401)
    InvalidToken,

    #[error("Token expired")]
    /// 令牌过期 (401)
    TokenExpired,

    #[error("Permission denied: {0}")]
    /// 无权限 (403)
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Validation failed")]
    /// 验证失败，携带字段错误列表 (400)
    Validation(Vec<FieldError>),

    #[error("Resource not found: {0}")]
    /// 资源不存在或不属于调用方 (404)
    NotFound(String),

    #[error("Conflict: {0}")]
    /// 业务规则冲突 (400)
    Conflict(String),

    #[error("Invalid state: {0}")]
    /// 状态机拒绝的操作 (400)
    State(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            // Authentication errors (401)
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Please login first".to_string(),
                None,
            ),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string(), None)
            }
            AppError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "Token expired".to_string(), None)
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),

            // Validation (400) — structured field errors, no retry
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(fields),
            ),

            // Not found (404) — same shape whether absent or unowned
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),

            // Conflict / state machine rejection (400)
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::State(msg) => (StatusCode::BAD_REQUEST, msg, None),

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    None,
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(AppResponse::<()> {
            success: false,
            message,
            data: None,
            errors,
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    /// Single-field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(format!("{} not found", resource.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    ok_with_message(data, "Success")
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        success: true,
        message: message.into(),
        data: Some(data),
        errors: None,
    })
}
