use super::clique::Clique;
use super::moral::MoralGraph;
use crate::NodeId;
use std::collections::BTreeSet;

/// min-fill node elimination over the moral graph. eliminating a node
/// turns its remaining neighborhood into a clique; the union of node and
/// neighborhood is recorded as a triangulation candidate. ties on fill-in
/// count break toward the lower node index, so identical inputs eliminate
/// identically.
#[derive(Debug, Clone)]
pub struct Elimination {
    order: Vec<NodeId>,
    candidates: Vec<Clique>,
}

impl From<&MoralGraph> for Elimination {
    fn from(moral: &MoralGraph) -> Self {
        let n = moral.size();
        let mut neighbors = (0..n)
            .map(|v| moral.neighbors(v).clone())
            .collect::<Vec<_>>();
        let mut remaining = (0..n).collect::<BTreeSet<NodeId>>();
        let mut order = Vec::with_capacity(n);
        let mut candidates = Vec::with_capacity(n);
        while let Some(v) = remaining
            .iter()
            .copied()
            .map(|v| (Self::fill(&neighbors, v), v))
            .min()
            .map(|(_, v)| v)
        {
            candidates.push(
                neighbors[v]
                    .iter()
                    .copied()
                    .chain(std::iter::once(v))
                    .collect::<Clique>(),
            );
            let adjacent = neighbors[v].iter().copied().collect::<Vec<_>>();
            for (i, &a) in adjacent.iter().enumerate() {
                for &b in adjacent.iter().skip(i + 1) {
                    neighbors[a].insert(b);
                    neighbors[b].insert(a);
                }
            }
            for &a in adjacent.iter() {
                neighbors[a].remove(&v);
            }
            neighbors[v].clear();
            remaining.remove(&v);
            order.push(v);
        }
        log::trace!("eliminated {} nodes: {:?}", order.len(), order);
        Self { order, candidates }
    }
}

impl Elimination {
    /// pairs of neighbors of v that are not yet adjacent
    fn fill(neighbors: &[BTreeSet<NodeId>], v: NodeId) -> usize {
        let adjacent = neighbors[v].iter().copied().collect::<Vec<_>>();
        adjacent
            .iter()
            .enumerate()
            .flat_map(|(i, &a)| adjacent.iter().skip(i + 1).map(move |&b| (a, b)))
            .filter(|(a, b)| !neighbors[*a].contains(b))
            .count()
    }

    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn candidates(&self) -> &[Clique] {
        &self.candidates
    }
}
