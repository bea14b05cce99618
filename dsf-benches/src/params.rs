//! Benchmark parameter types.

use std::fmt;

/// Parameters for a forest benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ForestBenchParams {
    /// Number of elements in the forest.
    pub element_count: usize,
    /// Whether lookups compress paths.
    pub path_compression: bool,
}

impl fmt::Display for ForestBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.path_compression {
            "compress"
        } else {
            "plain"
        };
        write!(f, "n={},{mode}", self.element_count)
    }
}
