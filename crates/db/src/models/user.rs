//! User entity model and DTOs.

use muzer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    /// Identity provider that first signed the user in (e.g. `"google"`).
    pub provider: String,
    pub created_at: Timestamp,
}

/// DTO for provisioning a user on first sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub provider: String,
}
