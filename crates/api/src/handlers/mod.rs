pub mod stream;
pub mod vote;
