//! Core splitting engine - ShardWriter and ShardIter.
//!
//! This module implements the single-pass streaming partition: a bounded
//! working buffer is filled from the input, the leading run of records
//! sharing one prefix is located with a lower-bound binary search, the run
//! is written to the file the template names for that prefix, and the
//! buffer is compacted and refilled. Input must already be sorted by
//! prefix; the search is only correct because equal prefixes are then
//! contiguous.

use std::fs;
use std::io::Read;

use bytes::Bytes;
use log::warn;

use crate::config::ShardConfig;
use crate::error::ShardError;
use crate::shard::Shard;

/// A writer that splits a sorted record stream into per-prefix shard files.
///
/// `ShardWriter` is the high-level API. It holds a configuration and turns a
/// reader into a [`ShardIter`] that performs the split lazily, one shard
/// file per iteration step.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use shardrs::{ShardConfig, ShardWriter};
///
/// fn main() -> Result<(), shardrs::ShardError> {
///     let input = File::open("pwned-passwords-ordered.txt")?;
///     let writer = ShardWriter::new(ShardConfig::default());
///
///     for shard in writer.split(input) {
///         let shard = shard?;
///         println!("{}", shard);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ShardWriter {
    config: ShardConfig,
}

impl ShardWriter {
    /// Creates a new writer with the given configuration.
    pub fn new(config: ShardConfig) -> Self {
        Self { config }
    }

    /// Creates a splitting iterator from a reader.
    ///
    /// The iterator reads through a working buffer of
    /// [`buffer_capacity()`](ShardConfig::buffer_capacity) bytes and yields
    /// one [`Shard`] per written file, in input (and therefore prefix)
    /// order. Parent directories of the rendered paths must already exist.
    pub fn split<R: Read>(self, reader: R) -> ShardIter<R> {
        ShardIter::new(reader, self.config)
    }

    /// Splits an in-memory byte slice, collecting the written shards.
    ///
    /// Convenience over [`ShardWriter::split`] for input that is already in
    /// memory; the files are written exactly as in the streaming case.
    pub fn split_slice(&self, data: &[u8]) -> Result<Vec<Shard>, ShardError> {
        self.clone().split(data).collect()
    }

    /// Returns the configuration used by this writer.
    pub fn config(&self) -> &ShardConfig {
        &self.config
    }
}

impl Default for ShardWriter {
    fn default() -> Self {
        Self::new(ShardConfig::default())
    }
}

/// An iterator that writes shard files from a reader.
///
/// Each call to `next()` performs one partition step: locate the leading run
/// of records sharing the first record's prefix, write it to the path the
/// template renders for that prefix (creating or overwriting the file),
/// slide the buffer, and refill from the reader. Yields the metadata of the
/// file just written, or the first error encountered, after which the
/// iterator is fused.
pub struct ShardIter<R> {
    reader: R,
    config: ShardConfig,
    buffer: Vec<u8>,
    scratch: Vec<u8>,
    started: bool,
    finished: bool,
}

impl<R: Read> ShardIter<R> {
    fn new(reader: R, config: ShardConfig) -> Self {
        let capacity = config.buffer_capacity();
        Self {
            reader,
            config,
            buffer: Vec::with_capacity(capacity),
            scratch: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Tops the working buffer up to full capacity.
    ///
    /// A short read at end of input leaves the buffer below capacity; that
    /// is the normal termination path. Any other read failure is an error.
    fn fill(&mut self) -> Result<(), ShardError> {
        let capacity = self.config.buffer_capacity();
        while self.buffer.len() < capacity {
            let len = self.buffer.len();
            self.buffer.resize(capacity, 0);
            match self.reader.read(&mut self.buffer[len..]) {
                Ok(0) => {
                    self.buffer.truncate(len);
                    break;
                }
                Ok(n) => self.buffer.truncate(len + n),
                Err(e) => {
                    self.buffer.truncate(len);
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// Performs one partition step.
    ///
    /// Returns `Ok(None)` when only a malformed tail shorter than one
    /// record remains, which terminates the split.
    fn flush_run(&mut self) -> Result<Option<Shard>, ShardError> {
        let record_size = self.config.record_size();
        let prefix_len = self.config.prefix_len();

        if self.buffer.len() % record_size != 0 {
            warn!(
                "buffer length {} not divisible by record size {}",
                self.buffer.len(),
                record_size
            );
        }

        let records = self.buffer.len() / record_size;
        if records == 0 {
            // Malformed tail with no further input; reported above.
            return Ok(None);
        }

        let run = run_len(&self.buffer, record_size, prefix_len, records);
        let prefix = Bytes::copy_from_slice(&self.buffer[..prefix_len]);

        if run == self.config.buffer_records() {
            // The run has no visible boundary; flushing now would split a
            // logical run across files.
            return Err(ShardError::RunTooLong {
                prefix: prefix.to_vec(),
                capacity: self.config.buffer_records(),
            });
        }

        let path = self.config.template().render(&prefix)?;
        let run_bytes = run * record_size;

        let written = if self.config.strip_prefix() {
            self.scratch.clear();
            for record in self.buffer[..run_bytes].chunks_exact(record_size) {
                self.scratch.extend_from_slice(&record[prefix_len..]);
            }
            fs::write(&path, &self.scratch)?;
            self.scratch.len()
        } else {
            fs::write(&path, &self.buffer[..run_bytes])?;
            run_bytes
        };

        // Discard the flushed run and shift the remainder to the front.
        self.buffer.copy_within(run_bytes.., 0);
        self.buffer.truncate(self.buffer.len() - run_bytes);
        self.fill()?;

        Ok(Some(Shard {
            prefix,
            path,
            records: run,
            bytes: written,
        }))
    }
}

impl<R: Read> Iterator for ShardIter<R> {
    type Item = Result<Shard, ShardError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            if let Err(e) = self.fill() {
                self.finished = true;
                return Some(Err(e));
            }
        }

        if self.buffer.is_empty() {
            self.finished = true;
            return None;
        }

        match self.flush_run() {
            Ok(Some(shard)) => Some(Ok(shard)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Lower-bound search for the length of the leading prefix run.
///
/// Finds the smallest record index whose prefix differs from record 0's
/// prefix. The predicate is monotone only because the input is sorted, which
/// keeps equal prefixes contiguous.
fn run_len(buffer: &[u8], record_size: usize, prefix_len: usize, records: usize) -> usize {
    let prefix = &buffer[..prefix_len];
    let mut lo = 0;
    let mut hi = records;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let start = mid * record_size;
        if &buffer[start..start + prefix_len] == prefix {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::PathTemplate;

    fn records(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[test]
    fn test_run_len_single_prefix() {
        let buf = records(&[b"aaaa", b"aabb", b"aacc"]);
        assert_eq!(run_len(&buf, 4, 2, 3), 3);
    }

    #[test]
    fn test_run_len_boundary_mid_buffer() {
        let buf = records(&[b"aaaa", b"aabb", b"bbaa"]);
        assert_eq!(run_len(&buf, 4, 2, 3), 2);
    }

    #[test]
    fn test_run_len_boundary_after_first() {
        let buf = records(&[b"aaaa", b"bbbb"]);
        assert_eq!(run_len(&buf, 4, 2, 2), 1);
    }

    #[test]
    fn test_run_len_empty_prefix() {
        // A zero-length prefix makes every record part of one run.
        let buf = records(&[b"aaaa", b"bbbb", b"cccc"]);
        assert_eq!(run_len(&buf, 4, 0, 3), 3);
    }

    #[test]
    fn test_run_len_ignores_partial_tail() {
        // The record count caps the search; trailing bytes are not touched.
        let buf = records(&[b"aaaa", b"bbbb", b"cc"]);
        assert_eq!(run_len(&buf, 4, 2, 2), 1);
    }

    #[test]
    fn test_split_empty_input() {
        let writer = ShardWriter::new(
            ShardConfig::new(4, 8, PathTemplate::new("%")).unwrap(),
        );
        let shards = writer.split_slice(b"").unwrap();
        assert!(shards.is_empty());
    }

    #[test]
    fn test_writer_keeps_config() {
        let config = ShardConfig::default().with_record_size(10);
        let writer = ShardWriter::new(config.clone());
        assert_eq!(writer.config(), &config);
    }
}
