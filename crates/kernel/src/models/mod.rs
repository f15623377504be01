//! Service records and operation inputs.

pub mod account;
pub mod media;

pub use account::{Account, AccountCategory, AccountSummary, CreateAccount, UpdateAccount};
pub use media::{MediaItem, UploadMedia};
