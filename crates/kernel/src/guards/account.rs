//! Account guard: field validation and email uniqueness ahead of
//! directory mutations.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{GuardError, GuardResult};
use crate::guards::validate::{validate_email, validate_name, validate_secret};
use crate::models::{Account, CreateAccount, UpdateAccount};
use crate::store::AccountDirectory;

/// Enforces account invariants before delegating to the directory.
pub struct AccountGuard {
    directory: Arc<dyn AccountDirectory>,
}

impl AccountGuard {
    /// Create a guard over the given directory.
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }

    /// Create a new account.
    ///
    /// Validates name, email, and secret in that order (first failure
    /// wins), then rejects a duplicate email before inserting with
    /// both timestamps set to now.
    pub async fn create(&self, input: CreateAccount) -> GuardResult<Account> {
        let name = validate_name(&input.name)?;
        validate_email(&input.email)?;
        validate_secret(&input.secret)?;

        if self.directory.find_by_email(&input.email).await?.is_some() {
            return Err(GuardError::Conflict(format!(
                "User with email '{}' already exists",
                input.email
            )));
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::now_v7(),
            name,
            email: input.email,
            secret: input.secret,
            category: input.category,
            created: now,
            updated: now,
        };

        let account = self.directory.insert(account).await?;
        debug!(id = %account.id, email = %account.email, "account created");

        Ok(account)
    }

    /// Update an existing account, applying all four mutable fields.
    ///
    /// Returns `Ok(None)` when the account does not exist. Uniqueness
    /// is re-checked only when the email actually changed; an
    /// unchanged email trivially cannot collide, so the query is
    /// skipped entirely.
    pub async fn update(&self, id: Uuid, input: UpdateAccount) -> GuardResult<Option<Account>> {
        let name = validate_name(&input.name)?;
        validate_email(&input.email)?;
        validate_secret(&input.secret)?;

        let Some(mut account) = self.directory.find_by_id(id).await? else {
            return Ok(None);
        };

        if input.email != account.email
            && self.directory.find_by_email(&input.email).await?.is_some()
        {
            return Err(GuardError::Conflict(format!(
                "User with email '{}' already exists",
                input.email
            )));
        }

        account.name = name;
        account.email = input.email;
        account.secret = input.secret;
        account.category = input.category;
        account.updated = Utc::now();

        let updated = self.directory.update(account).await?;
        if updated.is_some() {
            debug!(id = %id, "account updated");
        }

        Ok(updated)
    }

    /// Delete an account by id. Pure delegation; the store's
    /// referential policy removes owned media.
    pub async fn delete(&self, id: Uuid) -> GuardResult<bool> {
        let removed = self.directory.delete(id).await?;
        if removed {
            debug!(id = %id, "account deleted");
        }
        Ok(removed)
    }

    /// Fetch an account by id.
    pub async fn find_by_id(&self, id: Uuid) -> GuardResult<Option<Account>> {
        Ok(self.directory.find_by_id(id).await?)
    }

    /// Fetch an account by email.
    pub async fn find_by_email(&self, email: &str) -> GuardResult<Option<Account>> {
        Ok(self.directory.find_by_email(email).await?)
    }

    /// List all accounts.
    pub async fn list_all(&self) -> GuardResult<Vec<Account>> {
        Ok(self.directory.list_all().await?)
    }
}

impl std::fmt::Debug for AccountGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountGuard").finish()
    }
}
