pub mod graph;
pub mod inference;
pub mod model;
pub mod recommend;

/// dimensional analysis types
pub type Probability = f64;
pub type Relevance = f64;
pub type NodeId = usize;

// numeric policy parameters
const ROW_TOLERANCE: Probability = 1e-6;
const BELIEF_TOLERANCE: Probability = 1e-9;
const DEFINITION_FLOOR: Relevance = 0.05;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}
