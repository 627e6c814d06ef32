//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Create*` DTO for inserts, where the entity has one
//!
//! None of the entities have update DTOs: users, tracks and votes are
//! immutable once written.

pub mod track;
pub mod user;
pub mod vote;
