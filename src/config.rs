//! Configuration for shard splitting.
//!
//! - [`ShardConfig`] - record geometry, buffer capacity, and output template

use crate::error::ShardError;
use crate::template::PathTemplate;

/// Default record size in bytes (one line of the Pwned Passwords corpus).
pub const DEFAULT_RECORD_SIZE: usize = 63;

/// Default working-buffer capacity in records.
pub const DEFAULT_BUFFER_RECORDS: usize = 1024;

/// Default output path template: one-byte directory, three-byte filename.
pub const DEFAULT_PATH_TEMPLATE: &str = "%/%%%";

/// Configuration for splitting a sorted fixed-width record stream.
///
/// Constraints: `record_size` and `buffer_records` must be non-zero, and the
/// template's wildcard count (the prefix length) must be strictly smaller
/// than `record_size`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShardConfig {
    record_size: usize,
    buffer_records: usize,
    template: PathTemplate,
    strip_prefix: bool,
}

impl ShardConfig {
    /// Creates a new configuration.
    ///
    /// Returns an error if a size is zero or the template's prefix length is
    /// not smaller than the record size.
    pub fn new(
        record_size: usize,
        buffer_records: usize,
        template: PathTemplate,
    ) -> Result<Self, ShardError> {
        if record_size == 0 {
            return Err(ShardError::InvalidConfig {
                message: "record size must be non-zero",
            });
        }

        if buffer_records == 0 {
            return Err(ShardError::InvalidConfig {
                message: "buffer capacity must be non-zero",
            });
        }

        if template.wildcards() >= record_size {
            return Err(ShardError::InvalidConfig {
                message: "prefix length must be smaller than the record size",
            });
        }

        Ok(Self {
            record_size,
            buffer_records,
            template,
            strip_prefix: true,
        })
    }

    /// Sets the record size in bytes.
    pub fn with_record_size(mut self, size: usize) -> Self {
        self.record_size = size;
        self
    }

    /// Sets the working-buffer capacity in records.
    pub fn with_buffer_records(mut self, records: usize) -> Self {
        self.buffer_records = records;
        self
    }

    /// Sets the output path template.
    pub fn with_template(mut self, template: PathTemplate) -> Self {
        self.template = template;
        self
    }

    /// Sets whether the prefix bytes are omitted from written records.
    pub fn with_strip_prefix(mut self, strip: bool) -> Self {
        self.strip_prefix = strip;
        self
    }

    /// Returns the record size in bytes.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Returns the working-buffer capacity in records.
    pub fn buffer_records(&self) -> usize {
        self.buffer_records
    }

    /// Returns the output path template.
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Returns whether prefix bytes are omitted from written records.
    pub fn strip_prefix(&self) -> bool {
        self.strip_prefix
    }

    /// Returns the prefix length in bytes, defined by the template.
    pub fn prefix_len(&self) -> usize {
        self.template.wildcards()
    }

    /// Returns the working-buffer capacity in bytes.
    pub fn buffer_capacity(&self) -> usize {
        self.record_size * self.buffer_records
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ShardError> {
        Self::new(self.record_size, self.buffer_records, self.template.clone()).map(|_| ())
    }
}

impl Default for ShardConfig {
    fn default() -> Self {
        Self {
            record_size: DEFAULT_RECORD_SIZE,
            buffer_records: DEFAULT_BUFFER_RECORDS,
            template: PathTemplate::new(DEFAULT_PATH_TEMPLATE),
            strip_prefix: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_config_default() {
        let config = ShardConfig::default();
        assert_eq!(config.record_size(), 63);
        assert_eq!(config.buffer_records(), 1024);
        assert_eq!(config.prefix_len(), 4);
        assert!(config.strip_prefix());
    }

    #[test]
    fn test_shard_config_builder() {
        let config = ShardConfig::default()
            .with_record_size(16)
            .with_buffer_records(8)
            .with_template(PathTemplate::new("%%"))
            .with_strip_prefix(false);
        assert_eq!(config.record_size(), 16);
        assert_eq!(config.buffer_records(), 8);
        assert_eq!(config.prefix_len(), 2);
        assert!(!config.strip_prefix());
    }

    #[test]
    fn test_shard_config_valid() {
        let config = ShardConfig::new(8, 32, PathTemplate::new("%%")).unwrap();
        assert_eq!(config.buffer_capacity(), 8 * 32);
    }

    #[test]
    fn test_shard_config_invalid_zero() {
        assert!(ShardConfig::new(0, 32, PathTemplate::new("%")).is_err());
        assert!(ShardConfig::new(8, 0, PathTemplate::new("%")).is_err());
    }

    #[test]
    fn test_shard_config_prefix_not_smaller_than_record() {
        assert!(ShardConfig::new(2, 32, PathTemplate::new("%%")).is_err());
        assert!(ShardConfig::new(2, 32, PathTemplate::new("%%%")).is_err());
        assert!(ShardConfig::new(3, 32, PathTemplate::new("%%")).is_ok());
    }

    #[test]
    fn test_shard_config_validate() {
        let config = ShardConfig::default().with_record_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_wildcards_allowed() {
        // A wildcard-free template groups everything into a single shard.
        let config = ShardConfig::new(4, 32, PathTemplate::new("all.bin")).unwrap();
        assert_eq!(config.prefix_len(), 0);
    }
}
