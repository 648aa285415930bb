use crate::node::NodeId;
use crate::tree::Tree;
use log::trace;
use toclink_types::FilterConfig;

impl<T: Clone> Tree<T> {
    /// Projects the tree onto the levels and depth allowed by `config`.
    ///
    /// Depth is counted only through kept ancestors. A rejected node takes
    /// its whole subtree with it; nothing is promoted to the grandparent.
    /// The result is a new tree and `self` is left untouched, so the same
    /// source can be filtered for several outputs.
    pub fn filtered(&self, config: &FilterConfig) -> Tree<T> {
        let mut target = Tree::new();
        copy_admitted(self, NodeId::ROOT, &mut target, NodeId::ROOT, 1, config);
        trace!("Filter ({}) kept {} of {} node(s).", config, target.len(), self.len());
        target
    }
}

fn copy_admitted<T: Clone>(
    source: &Tree<T>,
    source_parent: NodeId,
    target: &mut Tree<T>,
    target_parent: NodeId,
    depth: usize,
    config: &FilterConfig,
) {
    for &child in source.children(source_parent) {
        let node = source.node(child);
        let Some(value) = node.value() else { continue };
        if !config.admits(node.level(), depth) {
            continue;
        }
        let copied = target.push_child(target_parent, node.level(), value.clone());
        copy_admitted(source, child, target, copied, depth + 1, config);
    }
}
