//! Account model and operation inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    Lead,
    Customer,
}

/// Account record.
///
/// The secret is stored as given; hashing is out of scope for this
/// service. It is never serialized outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub secret: String,
    pub category: AccountCategory,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating a new account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    pub secret: String,
    pub category: AccountCategory,
}

/// Input for updating an account. All four mutable fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccount {
    pub name: String,
    pub email: String,
    pub secret: String,
    pub category: AccountCategory,
}

/// Caller-facing account shape (no secret, with media count).
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub category: AccountCategory,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub media_count: i64,
}

impl AccountSummary {
    /// Build a summary from an account record and its media count.
    pub fn from_account(account: &Account, media_count: i64) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            category: account.category,
            created: account.created,
            updated: account.updated,
            media_count,
        }
    }
}
