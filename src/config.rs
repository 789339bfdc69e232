//! Interpreter configuration.

/// How the closing brace of a nested block is found.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BlockMatching {
    /// A nested block ends at the first line containing `}`, whatever the
    /// nesting. Inner blocks written on their own lines therefore close the
    /// outer block early.
    #[default]
    Shallow,
    /// Braces outside string literals are counted, so every block ends at
    /// the brace that balances its opener.
    Nested,
}

/// Settings for one interpreter run.
///
/// # Example
/// ```
/// use relief::config::{BlockMatching, Config};
///
/// let config = Config::default();
/// assert_eq!(config.block_matching, BlockMatching::Shallow);
///
/// let config = Config::default().with_block_matching(BlockMatching::Nested);
/// assert_eq!(config.block_matching, BlockMatching::Nested);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// How nested blocks are delimited.
    pub block_matching: BlockMatching,
}

impl Config {
    /// Returns the configuration with `block_matching` replaced.
    #[must_use]
    pub const fn with_block_matching(mut self, block_matching: BlockMatching) -> Self {
        self.block_matching = block_matching;
        self
    }
}
