/// tagged failure modes of model construction and evidence lookup.
///
/// construction errors are fatal to whatever was being built; evidence and
/// lookup misses leave all state untouched so callers can keep going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("unknown outcome {outcome} on node {node}")]
    UnknownOutcome { node: String, outcome: String },
    #[error("evidence is contradictory")]
    Inconsistent,
    #[error("not found: {0}")]
    NotFound(String),
}
