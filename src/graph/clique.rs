use crate::NodeId;
use std::collections::BTreeSet;

/// a set of network nodes: the vertex set of one clique of the
/// triangulated moral graph. ordered, so iteration over members is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Clique(BTreeSet<NodeId>);

/// the intersection of the two cliques at the ends of a tree edge
pub type Separator = Clique;

impl Clique {
    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// members in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn intersection(&self, other: &Self) -> Separator {
        Self(self.0.intersection(&other.0).copied().collect())
    }
}

impl FromIterator<NodeId> for Clique {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Clique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}
