//! Business-invariant guards.
//!
//! Guards validate input shape and state-dependent invariants ahead of
//! every storage mutation, then delegate to the collaborator contracts
//! in [`crate::store`].

pub mod account;
pub mod media;
mod validate;

pub use account::AccountGuard;
pub use media::MediaGuard;
