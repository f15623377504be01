//! Media guard: payload validation, per-owner quota, and ownership
//! checks ahead of store mutations.

use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{GuardError, GuardResult};
use crate::models::{MediaItem, UploadMedia};
use crate::store::MediaStore;

/// Maximum media items one owner may hold concurrently.
pub const MAX_MEDIA_PER_OWNER: i64 = 10;

/// Maximum payload size (10 MiB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Allowed file extensions, matched case-insensitively against the
/// declared filename.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// Enforces media invariants before delegating to the store.
pub struct MediaGuard {
    store: Arc<dyn MediaStore>,
}

impl MediaGuard {
    /// Create a guard over the given store.
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    /// Upload a media item for the given owner.
    ///
    /// Check order is load-bearing: title and payload presence fail
    /// before any store access, then content type, then size, and only
    /// then the quota query. A failed validation never touches the
    /// store.
    pub async fn upload(&self, input: UploadMedia, owner_id: Uuid) -> GuardResult<MediaItem> {
        if input.title.trim().is_empty() {
            return Err(GuardError::InvalidInput("Title is required".to_string()));
        }
        if input.data.is_empty() {
            return Err(GuardError::InvalidInput(
                "Image file is required".to_string(),
            ));
        }

        let extension = Path::new(&input.filename)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(GuardError::InvalidInput(format!(
                "File type not allowed. Accepted types: {}",
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        if input.data.len() > MAX_FILE_SIZE {
            return Err(GuardError::InvalidInput(
                "File too large. Maximum allowed size: 10MB".to_string(),
            ));
        }

        let held = self.store.count_by_owner(owner_id).await?;
        if held >= MAX_MEDIA_PER_OWNER {
            return Err(GuardError::QuotaExceeded(format!(
                "Maximum image limit reached. Cannot add more than {MAX_MEDIA_PER_OWNER} images."
            )));
        }

        let item = MediaItem {
            id: Uuid::now_v7(),
            title: input.title.trim().to_string(),
            data: STANDARD.encode(&input.data),
            created: Utc::now(),
            owner_id,
        };

        let item = self.store.insert(item).await?;
        info!(
            id = %item.id,
            title = %item.title,
            owner_id = %owner_id,
            size = input.data.len(),
            "media uploaded"
        );

        Ok(item)
    }

    /// Delete a media item on behalf of a caller.
    ///
    /// Returns `Ok(false)` both when the item does not exist and when
    /// the caller is not its owner (the item is left intact); the
    /// orchestration layer disambiguates the two by re-fetching.
    pub async fn delete_owned(&self, id: Uuid, caller_id: Uuid) -> GuardResult<bool> {
        let Some(item) = self.store.find_by_id(id).await? else {
            warn!(id = %id, "attempt to delete non-existent media item");
            return Ok(false);
        };

        if item.owner_id != caller_id {
            warn!(
                id = %id,
                owner_id = %item.owner_id,
                caller_id = %caller_id,
                "caller is not the owner, media item not deleted"
            );
            return Ok(false);
        }

        let removed = self.store.delete(id).await?;
        if removed {
            debug!(id = %id, caller_id = %caller_id, "media item deleted");
        }
        Ok(removed)
    }

    /// Delete every media item and return the count removed.
    ///
    /// Administrative reset path: deliberately unguarded, no ownership
    /// check.
    pub async fn reset_all(&self) -> GuardResult<u64> {
        let count = self.store.delete_all().await?;
        info!(count = count, "media store reset");
        Ok(count)
    }

    /// Fetch a media item by id.
    pub async fn find_by_id(&self, id: Uuid) -> GuardResult<Option<MediaItem>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// List all media items.
    pub async fn list_all(&self) -> GuardResult<Vec<MediaItem>> {
        Ok(self.store.list_all().await?)
    }

    /// List media items held by one owner.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> GuardResult<Vec<MediaItem>> {
        Ok(self.store.list_by_owner(owner_id).await?)
    }

    /// Count media items held by one owner.
    pub async fn count_by_owner(&self, owner_id: Uuid) -> GuardResult<i64> {
        Ok(self.store.count_by_owner(owner_id).await?)
    }
}

impl std::fmt::Debug for MediaGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaGuard").finish()
    }
}
