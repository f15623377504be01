//! Request orchestration: authentication, dispatch, and outcome
//! mapping.
//!
//! Each operation runs request-scoped with no state carried across
//! requests and no lock held across collaborator awaits. Guard
//! failures map onto a closed outcome vocabulary that the transport
//! layer translates to status codes.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::auth::TokenCodec;
use crate::error::GuardError;
use crate::guards::{AccountGuard, MediaGuard};
use crate::models::{
    Account, AccountSummary, CreateAccount, MediaItem, UpdateAccount, UploadMedia,
};
use crate::store::{AccountDirectory, MediaStore};

/// Terminal outcome of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation succeeded.
    Ok(T),
    /// Token missing, invalid, or expired; never distinguishes which.
    AuthFailed,
    /// Malformed input; the message is safe to echo verbatim.
    BadRequest(String),
    /// Uniqueness violation; the message is safe to echo verbatim.
    Conflict(String),
    /// The referenced record does not exist.
    NotFound,
    /// Authenticated but not authorized for this resource.
    Forbidden(String),
    /// Collaborator failure; logged server-side, no message echoed.
    Internal,
}

/// Orchestrates authentication and guarded mutations.
pub struct AccessController {
    tokens: TokenCodec,
    accounts: AccountGuard,
    media: MediaGuard,
}

impl AccessController {
    /// Wire a controller over the token codec and the two stores.
    pub fn new(
        tokens: TokenCodec,
        directory: Arc<dyn AccountDirectory>,
        store: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            tokens,
            accounts: AccountGuard::new(directory),
            media: MediaGuard::new(store),
        }
    }

    /// Authenticate with email and secret; on success returns the
    /// account and a freshly issued bearer token.
    ///
    /// Unknown email and wrong secret are both `AuthFailed`.
    pub async fn login(&self, email: &str, secret: &str) -> Outcome<(Account, String)> {
        let account = match self.accounts.find_by_email(email).await {
            Ok(Some(account)) => account,
            Ok(None) => return Outcome::AuthFailed,
            Err(err) => return guard_failure("login", err),
        };

        if account.secret != secret {
            return Outcome::AuthFailed;
        }

        match self.tokens.issue(account.id, &account.email, account.category) {
            Ok(token) => Outcome::Ok((account, token)),
            Err(err) => {
                error!(operation = "login", error = %err, "token issuance failed");
                Outcome::Internal
            }
        }
    }

    /// Register a new account. Open operation.
    pub async fn create_account(&self, input: CreateAccount) -> Outcome<Account> {
        match self.accounts.create(input).await {
            Ok(account) => Outcome::Ok(account),
            Err(err) => guard_failure("create_account", err),
        }
    }

    /// Fetch one account (without secret, with media count).
    pub async fn get_account(&self, id: Uuid) -> Outcome<AccountSummary> {
        let account = match self.accounts.find_by_id(id).await {
            Ok(Some(account)) => account,
            Ok(None) => return Outcome::NotFound,
            Err(err) => return guard_failure("get_account", err),
        };

        match self.media.count_by_owner(account.id).await {
            Ok(count) => Outcome::Ok(AccountSummary::from_account(&account, count)),
            Err(err) => guard_failure("get_account", err),
        }
    }

    /// List all accounts as caller-facing summaries.
    pub async fn list_accounts(&self) -> Outcome<Vec<AccountSummary>> {
        let accounts = match self.accounts.list_all().await {
            Ok(accounts) => accounts,
            Err(err) => return guard_failure("list_accounts", err),
        };

        let mut summaries = Vec::with_capacity(accounts.len());
        for account in &accounts {
            match self.media.count_by_owner(account.id).await {
                Ok(count) => summaries.push(AccountSummary::from_account(account, count)),
                Err(err) => return guard_failure("list_accounts", err),
            }
        }

        Outcome::Ok(summaries)
    }

    /// Update an account.
    pub async fn update_account(&self, id: Uuid, input: UpdateAccount) -> Outcome<Account> {
        match self.accounts.update(id, input).await {
            Ok(Some(account)) => Outcome::Ok(account),
            Ok(None) => Outcome::NotFound,
            Err(err) => guard_failure("update_account", err),
        }
    }

    /// Delete an account; owned media go with it (store policy).
    pub async fn delete_account(&self, id: Uuid) -> Outcome<()> {
        match self.accounts.delete(id).await {
            Ok(true) => Outcome::Ok(()),
            Ok(false) => Outcome::NotFound,
            Err(err) => guard_failure("delete_account", err),
        }
    }

    /// Upload a media item. Requires identity; the owner is the token
    /// subject.
    pub async fn upload_media(&self, token: Option<&str>, input: UploadMedia) -> Outcome<MediaItem> {
        let Some(caller_id) = self.authenticate(token) else {
            return Outcome::AuthFailed;
        };

        match self.media.upload(input, caller_id).await {
            Ok(item) => Outcome::Ok(item),
            Err(err) => guard_failure("upload_media", err),
        }
    }

    /// Delete a media item. Requires identity.
    ///
    /// A refusal from the guard is indistinguishable from absence, so
    /// the item is re-fetched to report the correct outcome: gone is
    /// `NotFound`, present under another owner is `Forbidden` naming
    /// that owner.
    pub async fn delete_media(&self, token: Option<&str>, id: Uuid) -> Outcome<()> {
        let Some(caller_id) = self.authenticate(token) else {
            return Outcome::AuthFailed;
        };

        match self.media.delete_owned(id, caller_id).await {
            Ok(true) => Outcome::Ok(()),
            Ok(false) => match self.media.find_by_id(id).await {
                Ok(None) => Outcome::NotFound,
                Ok(Some(item)) => Outcome::Forbidden(format!(
                    "You don't have permission to delete this media item. Item belongs to account {}",
                    item.owner_id
                )),
                Err(err) => guard_failure("delete_media", err),
            },
            Err(err) => guard_failure("delete_media", err),
        }
    }

    /// Fetch one media item. Open read.
    pub async fn get_media(&self, id: Uuid) -> Outcome<MediaItem> {
        match self.media.find_by_id(id).await {
            Ok(Some(item)) => Outcome::Ok(item),
            Ok(None) => Outcome::NotFound,
            Err(err) => guard_failure("get_media", err),
        }
    }

    /// List media items, optionally scoped to one owner. Open read.
    pub async fn list_media(&self, owner_id: Option<Uuid>) -> Outcome<Vec<MediaItem>> {
        let result = match owner_id {
            Some(owner_id) => self.media.list_by_owner(owner_id).await,
            None => self.media.list_all().await,
        };

        match result {
            Ok(items) => Outcome::Ok(items),
            Err(err) => guard_failure("list_media", err),
        }
    }

    /// Administrative wipe of the media store. Returns the count
    /// removed.
    pub async fn reset_media(&self) -> Outcome<u64> {
        match self.media.reset_all().await {
            Ok(count) => Outcome::Ok(count),
            Err(err) => guard_failure("reset_media", err),
        }
    }

    fn authenticate(&self, token: Option<&str>) -> Option<Uuid> {
        token.and_then(|t| self.tokens.verify(t))
    }
}

/// Map a guard failure onto the outcome vocabulary.
///
/// Conflict and bad-request messages are echoed verbatim; internal
/// failures are logged with operation context and never echoed.
fn guard_failure<T>(operation: &'static str, err: GuardError) -> Outcome<T> {
    match err {
        GuardError::InvalidInput(msg) | GuardError::QuotaExceeded(msg) => Outcome::BadRequest(msg),
        GuardError::Conflict(msg) => Outcome::Conflict(msg),
        GuardError::Internal(err) => {
            error!(operation, error = %err, "collaborator failure");
            Outcome::Internal
        }
    }
}

impl std::fmt::Debug for AccessController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessController").finish()
    }
}
