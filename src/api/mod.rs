//! Collection API module.
//!
//! This module provides:
//! - The `CollectionApi` contract and its REST client
//! - Credential handling
//! - HTTP transport with timeout and backoff
//! - API response types

pub mod auth;
pub mod client;
pub mod transport;
pub mod types;

pub use auth::{ConfigCredentialProvider, Credential, CredentialProvider};
pub use client::{CollectionApi, RestCollectionApi};
pub use transport::TransportClient;
pub use types::User;
