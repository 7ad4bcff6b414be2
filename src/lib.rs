//! shardrs
//!
//! Streaming prefix sharding for sorted fixed-width record streams.
//!
//! `shardrs` partitions a lexicographically sorted stream of fixed-width
//! records into one file per distinct prefix, naming each file from the
//! prefix via a `%`-wildcard path template. The motivating use case is
//! splitting a sorted password-hash corpus into per-prefix shards for
//! k-anonymity-style lookups, but any sorted fixed-width stream works.
//!
//! The crate intentionally:
//! - does NOT verify that the input is sorted (output is only correct if it is)
//! - does NOT index or re-read the written shards
//! - does NOT create parent directories
//! - does NOT manage concurrency
//!
//! It only does one thing: **read sorted records → write per-prefix files**
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use shardrs::{ShardConfig, ShardWriter, ShardError};
//!
//! fn main() -> Result<(), ShardError> {
//!     let input = File::open("pwned-passwords-ordered.txt")?;
//!     let writer = ShardWriter::new(ShardConfig::default());
//!
//!     for shard in writer.split(input) {
//!         let shard = shard?;
//!         println!("wrote {} records to {}", shard.records, shard.path.display());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod shard;
mod template;
mod writer;

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_BUFFER_RECORDS, DEFAULT_PATH_TEMPLATE, DEFAULT_RECORD_SIZE, ShardConfig};
pub use error::ShardError;
pub use shard::Shard;
pub use template::{PathTemplate, WILDCARD};
pub use writer::{ShardIter, ShardWriter};
