//! Vendor Model
//!
//! Consumed as a lookup collaborator: booking creation verifies the
//! cart's vendor still exists before persisting.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Vendor document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
