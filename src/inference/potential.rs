use crate::NodeId;
use crate::Probability;

/// a non-normalized distribution over the joint outcome space of a set of
/// nodes, stored flat. the first node varies fastest. products over empty
/// node sets degenerate to a single scalar cell, which is what lets
/// messages cross empty separators.
#[derive(Debug, Clone, PartialEq)]
pub struct Potential {
    nodes: Vec<NodeId>,
    cards: Vec<usize>,
    strides: Vec<usize>,
    values: Vec<Probability>,
}

impl Potential {
    /// the unit potential over the given nodes
    pub fn ones(nodes: Vec<NodeId>, cards: Vec<usize>) -> Self {
        debug_assert!(nodes.len() == cards.len());
        let mut strides = Vec::with_capacity(nodes.len());
        let mut len = 1;
        for &card in cards.iter() {
            strides.push(len);
            len *= card;
        }
        Self {
            nodes,
            cards,
            strides,
            values: vec![1.; len],
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn values(&self) -> &[Probability] {
        &self.values
    }

    pub fn sum(&self) -> Probability {
        self.values.iter().sum()
    }

    pub fn is_vacuous(&self) -> bool {
        self.sum() == 0.
    }

    fn axis(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// outcome index of the given axis at flat index i
    fn digit(&self, i: usize, axis: usize) -> usize {
        (i / self.strides[axis]) % self.cards[axis]
    }

    pub fn fill(&mut self, x: Probability) {
        self.values.fill(x);
    }

    /// overwrite with another potential over the same nodes
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert!(self.nodes == other.nodes);
        self.values.copy_from_slice(&other.values);
    }

    /// multiply a conditional table over (child, parents) into this
    /// potential, broadcasting over our remaining axes. the table has the
    /// child index fastest, then parents in declaration order.
    pub fn absorb(&mut self, child: NodeId, parents: &[NodeId], table: &[Probability]) {
        let child_axis = self.axis(child).expect("home clique covers the child");
        let parent_axes = parents
            .iter()
            .map(|&p| self.axis(p).expect("home clique covers the parents"))
            .collect::<Vec<_>>();
        let width = self.cards[child_axis];
        for i in 0..self.values.len() {
            let mut offset = 0;
            for &axis in parent_axes.iter().rev() {
                offset = offset * self.cards[axis] + self.digit(i, axis);
            }
            self.values[i] *= table[self.digit(i, child_axis) + width * offset];
        }
    }

    /// zero every entry whose outcome on the given node disagrees. nodes
    /// outside this potential are ignored.
    pub fn observe(&mut self, node: NodeId, outcome: usize) {
        if let Some(axis) = self.axis(node) {
            for i in 0..self.values.len() {
                if self.digit(i, axis) != outcome {
                    self.values[i] = 0.;
                }
            }
        }
    }

    /// sum onto the axes of the target, whose nodes must be a subset of
    /// ours. overwrites the target.
    pub fn marginalize(&self, target: &mut Self) {
        let axes = target
            .nodes
            .iter()
            .map(|&n| self.axis(n).expect("target nodes lie inside the source"))
            .zip(target.strides.iter().copied())
            .collect::<Vec<_>>();
        target.values.fill(0.);
        for i in 0..self.values.len() {
            let t = axes
                .iter()
                .map(|&(axis, stride)| self.digit(i, axis) * stride)
                .sum::<usize>();
            target.values[t] += self.values[i];
        }
    }

    /// multiply by a potential over a subset of our nodes, broadcast over
    /// the rest
    pub fn multiply(&mut self, other: &Self) {
        let axes = other
            .nodes
            .iter()
            .map(|&n| self.axis(n).expect("factor nodes lie inside the product"))
            .zip(other.strides.iter().copied())
            .collect::<Vec<_>>();
        for i in 0..self.values.len() {
            let o = axes
                .iter()
                .map(|&(axis, stride)| self.digit(i, axis) * stride)
                .sum::<usize>();
            self.values[i] *= other.values[o];
        }
    }

    /// elementwise quotient against a potential over the same nodes, with
    /// the message-passing convention 0 / 0 = 0
    pub fn divide(&mut self, other: &Self) {
        debug_assert!(self.nodes == other.nodes);
        for (v, d) in self.values.iter_mut().zip(other.values.iter()) {
            if *d > 0. {
                *v /= d;
            } else {
                *v = 0.;
            }
        }
    }

    /// marginal over a single node, normalized to unit mass when there is
    /// any, all zeros otherwise
    pub fn belief(&self, node: NodeId, card: usize) -> Vec<Probability> {
        let mut out = vec![0.; card];
        if let Some(axis) = self.axis(node) {
            for i in 0..self.values.len() {
                out[self.digit(i, axis)] += self.values[i];
            }
        }
        let sum = out.iter().sum::<Probability>();
        if sum > crate::BELIEF_TOLERANCE {
            out.iter_mut().for_each(|p| *p /= sum);
        } else {
            out.fill(0.);
        }
        out
    }
}
