//! Media item model and upload input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored media item. The payload is held as a base64 string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: Uuid,
    pub title: String,
    pub data: String,
    pub created: DateTime<Utc>,
    pub owner_id: Uuid,
}

/// Input for uploading a media item. The declared filename carries the
/// extension checked against the allow-list; the raw bytes are encoded
/// on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadMedia {
    pub title: String,
    pub filename: String,
    pub data: Vec<u8>,
}
