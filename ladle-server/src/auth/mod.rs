//! 认证模块 - JWT 验证与请求主体提取

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

/// Authenticated customer making booking requests
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User record id ("user:xxx")
    pub id: String,
}

/// Authenticated vendor operating on its own orders
#[derive(Debug, Clone)]
pub struct CurrentVendor {
    /// Vendor record id ("vendor:xxx")
    pub id: String,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        if claims.role != "customer" {
            return Err(format!("expected customer role, got '{}'", claims.role));
        }
        Ok(Self { id: claims.sub })
    }
}

impl TryFrom<Claims> for CurrentVendor {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        if claims.role != "vendor" {
            return Err(format!("expected vendor role, got '{}'", claims.role));
        }
        Ok(Self { id: claims.sub })
    }
}
