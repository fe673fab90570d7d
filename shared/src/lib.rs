//! Shared types for the OrderQ staff client
//!
//! Wire-level data model exchanged with the OrderQ backend: entities,
//! request/response DTOs, the response envelope, and serde helpers for
//! the backend's loosely-typed JSON.

pub mod client;
pub mod models;
pub mod request;
pub mod response;
pub mod serde_helpers;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginData, LoginRequest, UserInfo};
pub use response::ApiResponse;
