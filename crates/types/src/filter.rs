//! Level filter configuration.
//!
//! Two independent instances exist per conversion: one for the inline table
//! of contents and one for the navigation outline.

use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Default heading levels included in both the table of contents and the outline.
pub const DEFAULT_LEVELS: [u8; 3] = [1, 2, 3];

/// Default maximum filtered depth.
pub const DEFAULT_MAX_DEPTH: usize = 6;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterConfigError {
    #[error("Invalid heading level '{0}': expected an integer between 1 and 6")]
    InvalidLevel(String),
}

/// Which headings survive filtering.
///
/// A node is kept iff its level is in `allowed_levels` and its filtered
/// depth (1 for direct children of the root) does not exceed `max_depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub allowed_levels: BTreeSet<u8>,
    pub max_depth: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allowed_levels: DEFAULT_LEVELS.into_iter().collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FilterConfig {
    pub fn new(levels: impl IntoIterator<Item = u8>, max_depth: usize) -> Self {
        Self {
            allowed_levels: levels.into_iter().collect(),
            max_depth,
        }
    }

    /// Parses a comma separated list of heading levels such as `"1,2,3"`.
    /// Blank items are ignored.
    pub fn parse_levels(list: &str) -> Result<BTreeSet<u8>, FilterConfigError> {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| match item.parse::<u8>() {
                Ok(level @ 1..=6) => Ok(level),
                _ => Err(FilterConfigError::InvalidLevel(item.to_string())),
            })
            .collect()
    }

    pub fn with_levels(mut self, levels: BTreeSet<u8>) -> Self {
        self.allowed_levels = levels;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether a node at `level`, sitting at filtered depth `depth`, is kept.
    pub fn admits(&self, level: u8, depth: usize) -> bool {
        depth <= self.max_depth && self.allowed_levels.contains(&level)
    }
}

impl fmt::Display for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels: Vec<String> = self.allowed_levels.iter().map(u8::to_string).collect();
        write!(f, "levels={} depth={}", levels.join(","), self.max_depth)
    }
}
