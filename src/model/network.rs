use super::descriptor::NetworkDescriptor;
use super::error::Error;
use super::node::Node;
use crate::NodeId;
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use std::collections::HashMap;

/// a directed acyclic graph of discrete nodes, addressable by identifier.
/// built once from a decoded descriptor; immutable afterwards. nodes are
/// referenced by stable index everywhere downstream.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
}

impl Network {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn id(&self, identifier: &str) -> Option<NodeId> {
        self.index.get(identifier).copied()
    }
}

impl TryFrom<NetworkDescriptor> for Network {
    type Error = Error;

    /// whole-model validation: duplicate identifiers, undeclared parents,
    /// undersized outcome sets, malformed tables, and cycles all fail here.
    /// nothing of a failed construction escapes.
    fn try_from(descriptor: NetworkDescriptor) -> Result<Self, Self::Error> {
        let mut index = HashMap::new();
        for (id, node) in descriptor.nodes.iter().enumerate() {
            if index.insert(node.identifier.clone(), id).is_some() {
                return Err(Error::InvalidModel(format!(
                    "duplicate node {}",
                    node.identifier
                )));
            }
        }
        let mut nodes = Vec::with_capacity(descriptor.nodes.len());
        for described in descriptor.nodes.iter() {
            let mut node = Node::new(&described.identifier);
            for label in described.outcomes.iter() {
                node.witness_outcome(label)?;
            }
            if node.outcome_count() < 2 {
                return Err(Error::InvalidModel(format!(
                    "node {} has fewer than two outcomes",
                    described.identifier
                )));
            }
            let parents = described
                .parents
                .iter()
                .map(|parent| {
                    index.get(parent).copied().ok_or_else(|| {
                        Error::InvalidModel(format!(
                            "undeclared parent {} of node {}",
                            parent, described.identifier
                        ))
                    })
                })
                .collect::<Result<Vec<NodeId>, Error>>()?;
            let cardinalities = parents
                .iter()
                .map(|&parent| descriptor.nodes[parent].outcomes.len())
                .collect::<Vec<usize>>();
            node.set_parents(parents, cardinalities);
            node.set_probabilities(described.probabilities.clone())?;
            nodes.push(node);
        }
        let mut dag = DiGraph::<(), ()>::new();
        let indices = nodes.iter().map(|_| dag.add_node(())).collect::<Vec<_>>();
        for (child, node) in nodes.iter().enumerate() {
            for &parent in node.parents() {
                dag.add_edge(indices[parent], indices[child], ());
            }
        }
        toposort(&dag, None)
            .map_err(|_| Error::InvalidModel("cycle in network".to_string()))?;
        Ok(Self { nodes, index })
    }
}
