use crate::NodeId;
use std::collections::BTreeMap;

/// a fixed outcome assignment for a subset of nodes. ordered, so every
/// arithmetic pass derived from it runs in the same sequence regardless of
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence(BTreeMap<NodeId, usize>);

impl Evidence {
    /// pin a node to an outcome, displacing any earlier assignment
    pub fn fix(&mut self, node: NodeId, outcome: usize) -> Option<usize> {
        self.0.insert(node, outcome)
    }

    pub fn lift(&mut self, node: NodeId) -> Option<usize> {
        self.0.remove(&node)
    }

    pub fn get(&self, node: NodeId) -> Option<usize> {
        self.0.get(&node).copied()
    }

    pub fn fixes(&self, node: NodeId) -> bool {
        self.0.contains_key(&node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.0.iter().map(|(&node, &outcome)| (node, outcome))
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(NodeId, usize)> for Evidence {
    fn from_iter<I: IntoIterator<Item = (NodeId, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
