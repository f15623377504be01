//! Persistence collaborator contracts.
//!
//! The kernel treats storage as an external collaborator: a small set
//! of async CRUD operations behind object-safe traits. Absence is
//! `None`/`false`, never an error; I/O failures surface as
//! `anyhow::Error` and propagate unchanged.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Account, MediaItem};

pub use memory::MemoryBackend;

/// Account persistence contract.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Fetch an account by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Fetch an account by email (case-sensitive exact match).
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// List all accounts.
    async fn list_all(&self) -> Result<Vec<Account>>;

    /// Insert a new account record.
    async fn insert(&self, account: Account) -> Result<Account>;

    /// Replace an existing account record. Returns `None` if absent.
    async fn update(&self, account: Account) -> Result<Option<Account>>;

    /// Delete an account by id. Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Media persistence contract.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Fetch a media item by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>>;

    /// List all media items.
    async fn list_all(&self) -> Result<Vec<MediaItem>>;

    /// List media items held by one owner.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<MediaItem>>;

    /// Insert a new media item.
    async fn insert(&self, item: MediaItem) -> Result<MediaItem>;

    /// Delete a media item by id. Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Count media items held by one owner.
    async fn count_by_owner(&self, owner_id: Uuid) -> Result<i64>;

    /// Delete every media item. Returns the count removed.
    async fn delete_all(&self) -> Result<u64>;
}
