use crate::Arbitrary;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

/// the decoded input model: an ordered collection of node descriptors.
/// parents may refer to earlier or later entries; acyclicity is checked
/// when the descriptor is turned into a Network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub nodes: Vec<NodeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub identifier: String,
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    pub probabilities: Vec<Probability>,
}

impl Arbitrary for NetworkDescriptor {
    fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let n = rng.random_range(3..8);
        let mut cardinalities = Vec::<usize>::with_capacity(n);
        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let cardinality = rng.random_range(2..4);
            let mut parents = Vec::new();
            for j in 0..i {
                if parents.len() < 2 && rng.random_range(0..3) == 0 {
                    parents.push(j);
                }
            }
            let rows = parents
                .iter()
                .map(|&p| cardinalities[p])
                .product::<usize>();
            let probabilities = (0..rows * cardinality)
                .map(|_| 0.1 + rng.random::<Probability>())
                .collect();
            nodes.push(NodeDescriptor {
                identifier: format!("n{}", i),
                outcomes: (0..cardinality).map(|s| format!("s{}", s)).collect(),
                parents: parents.into_iter().map(|p| format!("n{}", p)).collect(),
                probabilities,
            });
            cardinalities.push(cardinality);
        }
        Self { nodes }
    }
}
