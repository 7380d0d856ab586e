use super::error::Error;
use crate::NodeId;
use crate::Probability;

/// a discrete variable of the network: an ordered set of outcome labels,
/// parent edges in declaration order, and a flat conditional probability
/// table.
///
/// table layout: for a fixed parent assignment the |outcomes| entries are
/// contiguous, so index = self + |self| * (p0 + |p0| * (p1 + ...)), with
/// parents in declaration order. everything downstream assumes this and
/// never reorders parents.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    identifier: String,
    outcomes: Vec<String>,
    parents: Vec<NodeId>,
    cardinalities: Vec<usize>,
    cpt: Vec<Probability>,
}

impl Node {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            outcomes: Vec::new(),
            parents: Vec::new(),
            cardinalities: Vec::new(),
            cpt: Vec::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// append an outcome label, preserving insertion order
    pub fn witness_outcome(&mut self, label: &str) -> Result<(), Error> {
        if self.outcomes.iter().any(|o| o == label) {
            Err(Error::InvalidModel(format!(
                "duplicate outcome {} on node {}",
                label, self.identifier
            )))
        } else {
            self.outcomes.push(label.to_string());
            Ok(())
        }
    }

    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    pub fn outcome(&self, index: usize) -> &str {
        &self.outcomes[index]
    }

    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn outcome_index(&self, label: &str) -> Option<usize> {
        self.outcomes.iter().position(|o| o == label)
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// fix parent order, and thereby the stride layout of the table.
    /// must precede set_probabilities.
    pub fn set_parents(&mut self, parents: Vec<NodeId>, cardinalities: Vec<usize>) {
        debug_assert!(parents.len() == cardinalities.len());
        self.parents = parents;
        self.cardinalities = cardinalities;
    }

    /// install the flat table. its length must be the product of all
    /// parent cardinalities and our own outcome count, and every entry
    /// nonnegative. rows whose mass strays from 1 are renormalized
    /// silently; all-zero rows stay zero.
    pub fn set_probabilities(&mut self, table: Vec<Probability>) -> Result<(), Error> {
        let width = self.outcome_count();
        let rows = self.cardinalities.iter().product::<usize>();
        if table.len() != width * rows {
            return Err(Error::InvalidModel(format!(
                "table of node {} has {} entries, expected {}",
                self.identifier,
                table.len(),
                width * rows
            )));
        }
        if table.iter().any(|p| !p.is_finite() || *p < 0.) {
            return Err(Error::InvalidModel(format!(
                "table of node {} has a negative or non-finite entry",
                self.identifier
            )));
        }
        self.cpt = table;
        for row in self.cpt.chunks_mut(width) {
            let sum = row.iter().sum::<Probability>();
            if sum > crate::ROW_TOLERANCE && (sum - 1.).abs() > crate::ROW_TOLERANCE {
                row.iter_mut().for_each(|p| *p /= sum);
            }
        }
        Ok(())
    }

    pub fn cpt(&self) -> &[Probability] {
        &self.cpt
    }

    /// table row for a fixed parent assignment, one entry per outcome
    pub fn row(&self, assignment: &[usize]) -> &[Probability] {
        debug_assert!(assignment.len() == self.parents.len());
        let mut offset = 0;
        for (digit, card) in assignment.iter().zip(self.cardinalities.iter()).rev() {
            offset = offset * card + digit;
        }
        let width = self.outcome_count();
        &self.cpt[offset * width..][..width]
    }
}
