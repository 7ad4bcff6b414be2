//! Error types for shardrs.

use std::fmt;

/// Errors that can occur while splitting a record stream into shards.
#[derive(Debug)]
pub enum ShardError {
    /// An I/O error occurred while reading input or writing a shard file.
    Io(std::io::Error),

    /// A prefix run filled the entire working buffer without reaching a
    /// boundary, so the run cannot be flushed as a single file.
    RunTooLong {
        /// The prefix whose run overflowed the buffer.
        prefix: Vec<u8>,
        /// The buffer capacity in records.
        capacity: usize,
    },

    /// A rendered output path was not valid UTF-8.
    PathEncoding {
        /// The prefix whose bytes could not be encoded into a path.
        prefix: Vec<u8>,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for ShardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShardError::Io(e) => write!(f, "io error: {}", e),
            ShardError::RunTooLong { prefix, capacity } => {
                write!(
                    f,
                    "buffer too small: run for prefix {:?} exceeds {} records",
                    String::from_utf8_lossy(prefix),
                    capacity
                )
            }
            ShardError::PathEncoding { prefix } => {
                write!(
                    f,
                    "prefix {:?} does not render to a valid utf-8 path",
                    prefix
                )
            }
            ShardError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ShardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShardError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShardError {
    fn from(e: std::io::Error) -> Self {
        ShardError::Io(e)
    }
}
