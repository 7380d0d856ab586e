use crate::model::Network;
use crate::NodeId;
use std::collections::BTreeSet;

/// the undirected moral graph of a network: one edge per parent-child
/// pair, plus a marriage edge between every two common parents of a node
#[derive(Debug, Clone)]
pub struct MoralGraph {
    adjacency: Vec<BTreeSet<NodeId>>,
}

impl From<&Network> for MoralGraph {
    fn from(network: &Network) -> Self {
        let mut adjacency = vec![BTreeSet::new(); network.size()];
        for (child, node) in network.nodes() {
            for (i, &a) in node.parents().iter().enumerate() {
                adjacency[a].insert(child);
                adjacency[child].insert(a);
                for &b in node.parents().iter().skip(i + 1) {
                    if a != b {
                        adjacency[a].insert(b);
                        adjacency[b].insert(a);
                    }
                }
            }
        }
        Self { adjacency }
    }
}

impl MoralGraph {
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbors(&self, id: NodeId) -> &BTreeSet<NodeId> {
        &self.adjacency[id]
    }
}
