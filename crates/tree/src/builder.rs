use crate::node::NodeId;
use crate::tree::Tree;

/// Rebuilds nesting from a flat, document-ordered sequence of leveled values.
///
/// The open sections form a stack seeded with the root. Each new value first
/// closes every section at the same or a deeper level, then becomes the last
/// child of whatever is left on top. A skipped level nests directly under
/// the nearest shallower node; no placeholder is synthesized.
pub struct TreeBuilder<T> {
    tree: Tree<T>,
    stack: Vec<NodeId>,
}

impl<T> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeBuilder<T> {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            stack: vec![NodeId::ROOT],
        }
    }

    pub fn push(&mut self, level: u8, value: T) -> NodeId {
        // The root never leaves the stack, so even level 0 input has a parent.
        while self.stack.len() > 1 {
            let top = self.stack[self.stack.len() - 1];
            if self.tree.node(top).level() < level {
                break;
            }
            self.stack.pop();
        }
        let parent = self.stack[self.stack.len() - 1];
        let id = self.tree.push_child(parent, level, value);
        self.stack.push(id);
        id
    }

    pub fn finish(self) -> Tree<T> {
        self.tree
    }
}

impl<T> Extend<(u8, T)> for TreeBuilder<T> {
    fn extend<I: IntoIterator<Item = (u8, T)>>(&mut self, iter: I) {
        for (level, value) in iter {
            self.push(level, value);
        }
    }
}

/// Builds a tree from `(level, value)` pairs in document order.
pub fn build_tree<T, I>(entries: I) -> Tree<T>
where
    I: IntoIterator<Item = (u8, T)>,
{
    let mut builder = TreeBuilder::new();
    builder.extend(entries);
    builder.finish()
}
