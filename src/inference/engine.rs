use super::evidence::Evidence;
use super::potential::Potential;
use crate::graph::JunctionTree;
use crate::model::Error;
use crate::model::Network;
use crate::NodeId;
use crate::Probability;

/// exact marginal inference over a compiled junction tree.
///
/// clique potentials and per-edge message buffers are allocated once at
/// construction. every evidence change marks the engine dirty; the next
/// query restores the priors, applies the evidence, and runs one
/// collect/distribute sweep. queries after that reuse the propagated
/// potentials untouched.
#[derive(Debug, Clone)]
pub struct Engine {
    network: Network,
    tree: JunctionTree,
    priors: Vec<Potential>,
    working: Vec<Potential>,
    messages: Vec<Potential>,
    scratch: Vec<Potential>,
    schedule: Vec<(usize, usize, usize)>,
    evidence: Evidence,
    dirty: bool,
    inconsistent: bool,
}

impl TryFrom<Network> for Engine {
    type Error = Error;

    fn try_from(network: Network) -> Result<Self, Self::Error> {
        let tree = JunctionTree::try_from(&network)?;
        let mut priors = tree
            .cliques()
            .iter()
            .map(|clique| {
                let nodes = clique.nodes().collect::<Vec<NodeId>>();
                let cards = nodes
                    .iter()
                    .map(|&n| network.node(n).outcome_count())
                    .collect::<Vec<usize>>();
                Potential::ones(nodes, cards)
            })
            .collect::<Vec<Potential>>();
        for (id, node) in network.nodes() {
            priors[tree.home(id)].absorb(id, node.parents(), node.cpt());
        }
        let messages = tree
            .edges()
            .iter()
            .map(|(_, _, separator)| {
                let nodes = separator.nodes().collect::<Vec<NodeId>>();
                let cards = nodes
                    .iter()
                    .map(|&n| network.node(n).outcome_count())
                    .collect::<Vec<usize>>();
                Potential::ones(nodes, cards)
            })
            .collect::<Vec<Potential>>();
        Ok(Self {
            schedule: tree.schedule(),
            working: priors.clone(),
            scratch: messages.clone(),
            evidence: Evidence::default(),
            dirty: true,
            inconsistent: false,
            network,
            tree,
            priors,
            messages,
        })
    }
}

impl Engine {
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn tree(&self) -> &JunctionTree {
        &self.tree
    }

    /// record evidence by outcome label. unknown labels are an error and
    /// leave the evidence untouched.
    pub fn observe(&mut self, node: NodeId, label: &str) -> Result<(), Error> {
        match self.network.node(node).outcome_index(label) {
            Some(outcome) => {
                self.evidence.fix(node, outcome);
                self.dirty = true;
                Ok(())
            }
            None => Err(Error::UnknownOutcome {
                node: self.network.node(node).identifier().to_string(),
                outcome: label.to_string(),
            }),
        }
    }

    /// atomically replace the whole evidence set
    pub fn assume(&mut self, evidence: Evidence) {
        self.evidence = evidence;
        self.dirty = true;
    }

    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }

    /// forget all evidence; the tree and its tables stay
    pub fn reset(&mut self) {
        self.evidence.clear();
        self.dirty = true;
    }

    /// whether the current evidence zeroed out the joint distribution
    pub fn inconsistent(&mut self) -> bool {
        self.refresh();
        self.inconsistent
    }

    /// posterior over the node's outcomes given current evidence. sums to
    /// one, or is all zero when the evidence is contradictory.
    pub fn beliefs(&mut self, node: NodeId) -> Vec<Probability> {
        self.refresh();
        let card = self.network.node(node).outcome_count();
        if self.inconsistent {
            vec![0.; card]
        } else {
            self.working[self.tree.home(node)].belief(node, card)
        }
    }

    /// two-phase message passing, skipped while evidence is unchanged
    fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        for (working, prior) in self.working.iter_mut().zip(self.priors.iter()) {
            working.copy_from(prior);
        }
        for (node, outcome) in self.evidence.iter() {
            for working in self.working.iter_mut() {
                working.observe(node, outcome);
            }
        }
        // collect: deepest edges first, children send marginals rootward
        for &(parent, child, edge) in self.schedule.iter().rev() {
            self.working[child].marginalize(&mut self.messages[edge]);
            self.working[parent].multiply(&self.messages[edge]);
        }
        // distribute: the root's view flows back down, divided by what
        // each separator already carries
        for &(parent, child, edge) in self.schedule.iter() {
            self.working[parent].marginalize(&mut self.scratch[edge]);
            self.scratch[edge].divide(&self.messages[edge]);
            self.working[child].multiply(&self.scratch[edge]);
        }
        self.inconsistent = self.working.iter().any(Potential::is_vacuous);
        self.dirty = false;
        log::trace!(
            "propagated {} cliques under {} observations, consistent: {}",
            self.working.len(),
            self.evidence.len(),
            !self.inconsistent,
        );
    }
}
