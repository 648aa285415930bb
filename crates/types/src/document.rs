use crate::geometry::Destination;
use serde::{Deserialize, Serialize};

/// A heading found in the source markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1 = h1, 2 = h2, etc.)
    pub level: u8,
    /// Unique identifier of the heading within one tagging run.
    pub identifier: String,
    /// The raw inner markup of the heading element.
    pub content: String,
}

impl Heading {
    pub fn new(level: u8, identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            level,
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}

/// A heading bound to the location where its marker was found after rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub heading: Heading,
    pub destination: Destination,
}

impl Entry {
    pub fn new(heading: Heading, destination: Destination) -> Self {
        Self {
            heading,
            destination,
        }
    }

    pub fn level(&self) -> u8 {
        self.heading.level
    }
}
