use crate::node::{Node, NodeId};

/// An ordered tree stored as an arena of nodes addressed by [`NodeId`].
///
/// Node 0 is the synthetic root. Every other node is owned by exactly one
/// parent and children are kept in document order.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// A tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.node(id).value()
    }

    /// Number of nodes, not counting the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a new node as the last child of `parent`.
    pub(crate) fn push_child(&mut self, parent: NodeId, level: u8, value: T) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::leaf(level, value));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Pre-order walk over every node except the root, yielding each node
    /// with its depth (1 for children of the root).
    pub fn depth_first(&self) -> DepthFirst<'_, T> {
        let stack = self
            .children(NodeId::ROOT)
            .iter()
            .rev()
            .map(|&id| (id, 1))
            .collect();
        DepthFirst { tree: self, stack }
    }

    /// Maps every value into a new tree of identical shape.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Tree<U> {
        let nodes = self
            .nodes
            .iter()
            .map(|node| Node {
                level: node.level,
                value: node.value.as_ref().map(&mut f),
                children: node.children.clone(),
            })
            .collect();
        Tree { nodes }
    }
}

/// Iterator returned by [`Tree::depth_first`].
pub struct DepthFirst<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, T> Iterator for DepthFirst<'a, T> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        self.stack.extend(
            self.tree
                .children(id)
                .iter()
                .rev()
                .map(|&child| (child, depth + 1)),
        );
        Some((id, depth))
    }
}

/// Two trees are equal when they have the same shape, levels and values,
/// regardless of how their arenas are laid out.
impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.depth_first().zip(other.depth_first()).all(|((a, da), (b, db))| {
                let (a, b) = (self.node(a), other.node(b));
                da == db && a.level == b.level && a.value == b.value
            })
    }
}
