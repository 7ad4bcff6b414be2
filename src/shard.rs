//! The Shard type - describes one written shard file.

use bytes::Bytes;
use std::fmt;
use std::path::PathBuf;

/// Metadata for one shard file produced by a split.
///
/// # Example
///
/// ```
/// use shardrs::Shard;
/// use bytes::Bytes;
///
/// let shard = Shard {
///     prefix: Bytes::from_static(b"1a2b"),
///     path: "1/a2b".into(),
///     records: 12,
///     bytes: 12 * 59,
/// };
///
/// assert_eq!(shard.records, 12);
/// ```
#[derive(Debug, Clone)]
pub struct Shard {
    /// The prefix shared by every record in this shard.
    pub prefix: Bytes,

    /// The path the shard file was written to.
    pub path: PathBuf,

    /// The number of records written.
    pub records: usize,

    /// The number of bytes written (after any prefix stripping).
    pub bytes: usize,
}

impl Shard {
    /// Returns the prefix shared by every record in this shard.
    pub fn prefix(&self) -> &Bytes {
        &self.prefix
    }

    /// Returns the path the shard file was written to.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the number of records written.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Returns the number of bytes written.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Returns true if the shard file contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shard({:?} -> {}, {} records, {} bytes)",
            String::from_utf8_lossy(&self.prefix),
            self.path.display(),
            self.records,
            self.bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Shard {
        Shard {
            prefix: Bytes::from_static(b"ab"),
            path: "a/b".into(),
            records: 3,
            bytes: 6,
        }
    }

    #[test]
    fn test_accessors() {
        let shard = sample();
        assert_eq!(shard.prefix().as_ref(), b"ab");
        assert_eq!(shard.path(), &PathBuf::from("a/b"));
        assert_eq!(shard.records(), 3);
        assert_eq!(shard.bytes(), 6);
        assert!(!shard.is_empty());
    }

    #[test]
    fn test_display() {
        let s = sample().to_string();
        assert!(s.contains("a/b"));
        assert!(s.contains("3 records"));
    }
}
