//! Construction parameters for a [`StreamPipe`](crate::StreamPipe).

/// Default pipe capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 8192;

/// Pipe configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeConfig {
    /// Size of the ring storage in bytes. Must be greater than 0.
    pub capacity: usize,
}

impl PipeConfig {
    /// Creates a config with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(PipeConfig::default().capacity, 8192);
        assert_eq!(PipeConfig::with_capacity(4).capacity, 4);
    }
}
