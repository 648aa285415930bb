use std::fmt;

/// Index of a node inside a [`Tree`](crate::Tree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tree node. The root carries no value and sits at level 0, below every
/// real heading level.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    pub(crate) level: u8,
    pub(crate) value: Option<T>,
    pub(crate) children: Vec<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn root() -> Self {
        Self {
            level: 0,
            value: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn leaf(level: u8, value: T) -> Self {
        Self {
            level,
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// `None` only for the synthetic root.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Child ids in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
