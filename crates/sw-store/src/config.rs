/// Configuration for opening a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum size of the memory map, in bytes. Bounds the size of the store.
    pub map_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            map_size: usize::try_from(4u64 << 30).unwrap_or(usize::MAX),
        }
    }
}

impl StoreConfig {
    /// Set the maximum size of the memory map.
    pub fn with_map_size(mut self, bytes: usize) -> Self {
        self.map_size = bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_is_four_gib() {
        assert_eq!(StoreConfig::default().map_size as u64, 4 << 30);
    }

    #[test]
    fn builder_sets_map_size() {
        let config = StoreConfig::default().with_map_size(1 << 20);
        assert_eq!(config.map_size, 1 << 20);
    }
}
