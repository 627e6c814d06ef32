//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that take `&PgPool` run in autocommit mode; methods that take
//! `&mut PgConnection` are meant to run inside a caller-owned transaction.

pub mod track_repo;
pub mod user_repo;
pub mod vote_repo;

pub use track_repo::TrackRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
