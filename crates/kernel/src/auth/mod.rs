//! Stateless bearer-token authentication.

pub mod token;

pub use token::{TokenClaims, TokenCodec};
