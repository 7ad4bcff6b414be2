//! Splitting engine for sorted fixed-width record streams.
//!
//! - [`ShardWriter`] - configures and initiates a split
//! - [`ShardIter`] - iterator that writes shard files from a [`std::io::Read`] source

mod engine;

pub use engine::{ShardIter, ShardWriter};
