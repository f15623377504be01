//! Lustra service kernel.
//!
//! Access control and business invariants for a small multi-tenant
//! resource service: accounts, owned media items, stateless bearer
//! tokens, and the guards that enforce uniqueness, quota, and
//! ownership ahead of every mutation. Persistence and transport are
//! external collaborators behind the contracts in [`store`] and the
//! outcome vocabulary in [`access`].

pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod guards;
pub mod models;
pub mod store;
