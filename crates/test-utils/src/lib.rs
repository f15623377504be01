//! Lustra test utilities.
//!
//! Fixture builders for integration testing: valid-by-default
//! operation inputs with `with_*` modifiers for the field under test.

use lustra_kernel::models::{AccountCategory, CreateAccount, UpdateAccount, UploadMedia};

/// A valid account-creation input with default values.
pub fn account_input(email: &str) -> AccountInput {
    AccountInput {
        name: "Test Account".to_string(),
        email: email.to_string(),
        secret: "secret1".to_string(),
        category: AccountCategory::Lead,
    }
}

/// A valid upload input with default values.
pub fn upload_input(title: &str) -> UploadInput {
    UploadInput {
        title: title.to_string(),
        filename: format!("{title}.png"),
        data: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

/// Builder for account operation inputs.
#[derive(Debug, Clone)]
pub struct AccountInput {
    pub name: String,
    pub email: String,
    pub secret: String,
    pub category: AccountCategory,
}

impl AccountInput {
    /// Set a custom name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set a custom secret.
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_string();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: AccountCategory) -> Self {
        self.category = category;
        self
    }

    /// Finish as a creation input.
    pub fn create(self) -> CreateAccount {
        CreateAccount {
            name: self.name,
            email: self.email,
            secret: self.secret,
            category: self.category,
        }
    }

    /// Finish as an update input.
    pub fn update(self) -> UpdateAccount {
        UpdateAccount {
            name: self.name,
            email: self.email,
            secret: self.secret,
            category: self.category,
        }
    }
}

/// Builder for upload inputs.
#[derive(Debug, Clone)]
pub struct UploadInput {
    pub title: String,
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadInput {
    /// Set a custom declared filename.
    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = filename.to_string();
        self
    }

    /// Set a custom payload.
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Finish as an upload input.
    pub fn build(self) -> UploadMedia {
        UploadMedia {
            title: self.title,
            filename: self.filename,
            data: self.data,
        }
    }
}
