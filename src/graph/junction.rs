use super::clique::Clique;
use super::clique::Separator;
use super::elimination::Elimination;
use super::moral::MoralGraph;
use crate::model::Error;
use crate::model::Network;
use crate::NodeId;
use petgraph::unionfind::UnionFind;
use std::collections::VecDeque;

/// an undirected tree of cliques with separators on its edges, compiled
/// once per network. cliques and edges are addressed by index into flat
/// arrays. the maximum-weight spanning construction over separator sizes
/// preserves the running intersection property, so marginalizing any
/// clique containing a node yields the same distribution for it.
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionTree {
    cliques: Vec<Clique>,
    edges: Vec<(usize, usize, Separator)>,
    home: Vec<usize>,
}

impl TryFrom<&Network> for JunctionTree {
    type Error = Error;

    fn try_from(network: &Network) -> Result<Self, Self::Error> {
        let moral = MoralGraph::from(network);
        let elimination = Elimination::from(&moral);
        let cliques = Self::maximal(elimination.candidates());
        let edges = Self::spanning(&cliques);
        let home = Self::homes(network, &cliques)?;
        log::debug!(
            "compiled junction tree over {} nodes: {} cliques, widest {}",
            network.size(),
            cliques.len(),
            cliques.iter().map(Clique::size).max().unwrap_or(0),
        );
        Ok(Self {
            cliques,
            edges,
            home,
        })
    }
}

impl JunctionTree {
    pub fn cliques(&self) -> &[Clique] {
        &self.cliques
    }

    pub fn clique(&self, index: usize) -> &Clique {
        &self.cliques[index]
    }

    pub fn edges(&self) -> &[(usize, usize, Separator)] {
        &self.edges
    }

    /// the clique whose potential carries the node's table
    pub fn home(&self, id: NodeId) -> usize {
        self.home[id]
    }

    /// edges oriented away from clique 0 in breadth-first discovery order,
    /// as (parent clique, child clique, edge index). collect replays this
    /// deepest-first, distribute replays it as is.
    pub fn schedule(&self) -> Vec<(usize, usize, usize)> {
        if self.cliques.is_empty() {
            return Vec::new();
        }
        let mut adjacency = vec![Vec::new(); self.cliques.len()];
        for (e, (i, j, _)) in self.edges.iter().enumerate() {
            adjacency[*i].push((*j, e));
            adjacency[*j].push((*i, e));
        }
        let mut seen = vec![false; self.cliques.len()];
        let mut queue = VecDeque::from([0]);
        let mut schedule = Vec::with_capacity(self.edges.len());
        seen[0] = true;
        while let Some(parent) = queue.pop_front() {
            for &(child, edge) in adjacency[parent].iter() {
                if !seen[child] {
                    seen[child] = true;
                    schedule.push((parent, child, edge));
                    queue.push_back(child);
                }
            }
        }
        schedule
    }

    /// discard every candidate contained in another; duplicates keep their
    /// first occurrence
    fn maximal(candidates: &[Clique]) -> Vec<Clique> {
        candidates
            .iter()
            .enumerate()
            .filter(|(i, c)| {
                !candidates
                    .iter()
                    .enumerate()
                    .any(|(j, d)| *i != j && c.is_subset(d) && (*c != d || j < *i))
            })
            .map(|(_, c)| c.clone())
            .collect()
    }

    /// kruskal over all clique pairs, heaviest separator first, ties
    /// toward the smaller clique-id pair. zero-weight edges are admitted
    /// last so that a disconnected network still yields a single tree,
    /// joined over empty separators.
    fn spanning(cliques: &[Clique]) -> Vec<(usize, usize, Separator)> {
        let mut pairs = Vec::new();
        for i in 0..cliques.len() {
            for j in (i + 1)..cliques.len() {
                let separator = cliques[i].intersection(&cliques[j]);
                pairs.push((separator.size(), i, j, separator));
            }
        }
        pairs.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));
        let mut forest = UnionFind::<usize>::new(cliques.len());
        pairs
            .into_iter()
            .filter(|(_, i, j, _)| forest.union(*i, *j))
            .map(|(_, i, j, separator)| (i, j, separator))
            .collect()
    }

    /// the lowest-index clique covering each node's family. moralization
    /// makes every family a clique of the triangulated graph, so one of
    /// the maximal cliques must contain it.
    fn homes(network: &Network, cliques: &[Clique]) -> Result<Vec<usize>, Error> {
        network
            .nodes()
            .map(|(id, node)| {
                cliques
                    .iter()
                    .position(|c| c.contains(id) && node.parents().iter().all(|&p| c.contains(p)))
                    .ok_or_else(|| {
                        Error::InvalidModel(format!(
                            "no clique covers the family of node {}",
                            node.identifier()
                        ))
                    })
            })
            .collect()
    }
}
