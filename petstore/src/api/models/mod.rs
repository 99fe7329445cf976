//! API request and response data models.
//!
//! This module contains the data structures used for HTTP request
//! deserialization and response serialization. These models define the
//! public API contract.
//!
//! # Design Principles
//!
//! - **Separation of Concerns**: API models are distinct from database
//!   models, allowing independent evolution of API and storage
//!   representations
//! - **OpenAPI**: All models are annotated with `utoipa` for automatic API
//!   docs
//! - **Find-or-create ids**: a null `id` on a save body means "create new";
//!   a non-null `id` means "look up and update"
//!
//! # Model Categories
//!
//! - [`stores`]: full store payloads, flat list summaries
//! - [`employees`]: employee payloads with the store back-link
//! - [`customers`]: customer payloads
//!
//! Wire field names are camelCase (`firstName`, `jobTitle`, ...).

pub mod customers;
pub mod employees;
pub mod stores;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Simple `{"message": ...}` body, used for deletion confirmations. Errors
/// share the same shape via [`crate::errors::Error`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable description of the outcome
    pub message: String,
}
