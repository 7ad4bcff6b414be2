//! Wildcard path templates.
//!
//! A [`PathTemplate`] is a path string in which every `%` marker stands for
//! one prefix byte. The number of markers defines the prefix length used for
//! grouping, and rendering a template substitutes the markers, left to right,
//! with the successive bytes of a concrete prefix.

use std::fmt;
use std::path::PathBuf;

use crate::error::ShardError;

/// The wildcard marker substituted with prefix bytes.
pub const WILDCARD: u8 = b'%';

/// A path template with positional `%` wildcards.
///
/// # Example
///
/// ```
/// use shardrs::PathTemplate;
///
/// let template = PathTemplate::new("%/%%%");
/// assert_eq!(template.wildcards(), 4);
///
/// let path = template.render(b"ab12").unwrap();
/// assert_eq!(path, std::path::PathBuf::from("a/b12"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    raw: String,
}

impl PathTemplate {
    /// Creates a template from a path string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Returns the number of `%` wildcards, which is the prefix length in
    /// bytes that this template encodes.
    pub fn wildcards(&self) -> usize {
        self.raw.bytes().filter(|&b| b == WILDCARD).count()
    }

    /// Returns the template string as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Renders a concrete path by substituting each wildcard, left to right,
    /// with the successive bytes of `prefix`.
    ///
    /// `prefix` must hold exactly [`wildcards()`](Self::wildcards) bytes; the
    /// caller (the shard writer) slices it from the current record. The
    /// substitution is raw byte replacement, so the prefix alphabet must
    /// produce a valid UTF-8 path; [`ShardError::PathEncoding`] is returned
    /// otherwise.
    pub fn render(&self, prefix: &[u8]) -> Result<PathBuf, ShardError> {
        let mut rendered = Vec::with_capacity(self.raw.len());
        let mut bytes = prefix.iter();
        for &b in self.raw.as_bytes() {
            if b == WILDCARD {
                match bytes.next() {
                    Some(&p) => rendered.push(p),
                    None => rendered.push(b),
                }
            } else {
                rendered.push(b);
            }
        }
        match String::from_utf8(rendered) {
            Ok(path) => Ok(PathBuf::from(path)),
            Err(_) => Err(ShardError::PathEncoding {
                prefix: prefix.to_vec(),
            }),
        }
    }
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PATH_TEMPLATE)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
