//! Registry configuration.

/// Order in which a descriptor yields its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnOrder {
    /// Sorted by column name.
    #[default]
    Lexical,
    /// Order in which the flattener claimed the backing fields: outer fields
    /// first in declaration order, then embedded fields level by level.
    Declaration,
}

/// Configuration for a metadata [`Registry`](crate::Registry).
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Column ordering used by the write path.
    pub column_order: ColumnOrder,

    /// Number of descriptor slots reserved up front.
    pub initial_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            column_order: ColumnOrder::Lexical,
            initial_capacity: 64,
        }
    }
}

impl RegistryConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column ordering.
    pub fn column_order(mut self, order: ColumnOrder) -> Self {
        self.column_order = order;
        self
    }

    /// Set the initial capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.column_order, ColumnOrder::Lexical);
        assert_eq!(config.initial_capacity, 64);
    }

    #[test]
    fn test_builder() {
        let config = RegistryConfig::new()
            .column_order(ColumnOrder::Declaration)
            .initial_capacity(8);

        assert_eq!(config.column_order, ColumnOrder::Declaration);
        assert_eq!(config.initial_capacity, 8);
    }
}
