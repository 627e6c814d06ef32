//! Authentication primitives.
//!
//! - [`jwt`] -- access-token generation and validation. Tokens are issued
//!   by the identity provider; this server only verifies them.

pub mod jwt;
