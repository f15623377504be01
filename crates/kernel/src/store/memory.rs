//! In-memory persistence backend.
//!
//! Reference implementation of both collaborator contracts, used by
//! every test and suitable for demos. This is also where the
//! authoritative integrity constraints live: email uniqueness, the
//! per-owner media quota, owner liveness, and the account-to-media
//! cascade are all enforced under a single write lock, so the guard
//! level checks remain a user-friendly fast path rather than the sole
//! enforcement point.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::guards::media::MAX_MEDIA_PER_OWNER;
use crate::models::{Account, MediaItem};
use crate::store::{AccountDirectory, MediaStore};

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    media: HashMap<Uuid, MediaItem>,
}

/// Shared in-memory backend implementing both [`AccountDirectory`]
/// and [`MediaStore`]. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountDirectory for MemoryBackend {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>> {
        let inner = self.inner.read().await;
        let mut accounts: Vec<Account> = inner.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(accounts)
    }

    async fn insert(&self, account: Account) -> Result<Account> {
        let mut inner = self.inner.write().await;
        if inner.accounts.values().any(|a| a.email == account.email) {
            bail!("email '{}' already in use", account.email);
        }
        inner.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Option<Account>> {
        let mut inner = self.inner.write().await;
        if !inner.accounts.contains_key(&account.id) {
            return Ok(None);
        }
        if inner
            .accounts
            .values()
            .any(|a| a.id != account.id && a.email == account.email)
        {
            bail!("email '{}' already in use", account.email);
        }
        inner.accounts.insert(account.id, account.clone());
        Ok(Some(account))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let removed = inner.accounts.remove(&id).is_some();
        if removed {
            // Referential integrity: no orphaned media survive their owner.
            inner.media.retain(|_, item| item.owner_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl MediaStore for MemoryBackend {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>> {
        let inner = self.inner.read().await;
        Ok(inner.media.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<MediaItem>> {
        let inner = self.inner.read().await;
        let mut items: Vec<MediaItem> = inner.media.values().cloned().collect();
        items.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(items)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<MediaItem>> {
        let inner = self.inner.read().await;
        let mut items: Vec<MediaItem> = inner
            .media
            .values()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(items)
    }

    async fn insert(&self, item: MediaItem) -> Result<MediaItem> {
        let mut inner = self.inner.write().await;
        if !inner.accounts.contains_key(&item.owner_id) {
            bail!("owner account {} does not exist", item.owner_id);
        }
        let held = inner
            .media
            .values()
            .filter(|m| m.owner_id == item.owner_id)
            .count() as i64;
        if held >= MAX_MEDIA_PER_OWNER {
            bail!("media quota exhausted for owner {}", item.owner_id);
        }
        inner.media.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.media.remove(&id).is_some())
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<i64> {
        let inner = self.inner.read().await;
        Ok(inner
            .media
            .values()
            .filter(|item| item.owner_id == owner_id)
            .count() as i64)
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let count = inner.media.len() as u64;
        inner.media.clear();
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::AccountCategory;

    fn account(email: &str) -> Account {
        Account {
            id: Uuid::now_v7(),
            name: "Test".to_string(),
            email: email.to_string(),
            secret: "secret1".to_string(),
            category: AccountCategory::Lead,
            created: Utc::now(),
            updated: Utc::now(),
        }
    }

    fn media(owner_id: Uuid) -> MediaItem {
        MediaItem {
            id: Uuid::now_v7(),
            title: "img".to_string(),
            data: "aGVsbG8=".to_string(),
            created: Utc::now(),
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_at_store() {
        let backend = MemoryBackend::new();
        AccountDirectory::insert(&backend, account("a@x.com"))
            .await
            .unwrap();

        let err = AccountDirectory::insert(&backend, account("a@x.com")).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_account_delete_cascades_to_media() {
        let backend = MemoryBackend::new();
        let owner = AccountDirectory::insert(&backend, account("a@x.com"))
            .await
            .unwrap();
        MediaStore::insert(&backend, media(owner.id)).await.unwrap();
        MediaStore::insert(&backend, media(owner.id)).await.unwrap();

        assert!(AccountDirectory::delete(&backend, owner.id).await.unwrap());
        assert!(backend.list_by_owner(owner.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_media_insert_requires_live_owner() {
        let backend = MemoryBackend::new();
        let result = MediaStore::insert(&backend, media(Uuid::now_v7())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_media_quota_enforced_at_store() {
        let backend = MemoryBackend::new();
        let owner = AccountDirectory::insert(&backend, account("a@x.com"))
            .await
            .unwrap();

        for _ in 0..MAX_MEDIA_PER_OWNER {
            MediaStore::insert(&backend, media(owner.id)).await.unwrap();
        }
        assert!(MediaStore::insert(&backend, media(owner.id)).await.is_err());
        assert_eq!(backend.count_by_owner(owner.id).await.unwrap(), 10);
    }
}
