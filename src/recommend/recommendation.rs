use crate::Relevance;
use std::cmp::Ordering;

/// a ranked suggestion: an opaque value and the posterior mass behind it
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub value: String,
    pub relevance: Relevance,
}

impl Recommendation {
    pub fn new(value: impl Into<String>, relevance: Relevance) -> Self {
        Self {
            value: value.into(),
            relevance,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>6.3} {}", self.relevance, self.value)
    }
}

/// strict weak ordering by descending relevance, value as the tiebreak
pub fn by_descending_relevance(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.relevance
        .partial_cmp(&a.relevance)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.value.cmp(&b.value))
}

/// predicate passing relevance of at least the threshold
pub fn at_least(threshold: Relevance) -> impl Fn(&Recommendation) -> bool {
    move |r| r.relevance >= threshold
}

/// predicate passing everything
pub fn any(_: &Recommendation) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_relevance_then_value() {
        let mut recommendations = vec![
            Recommendation::new("b", 0.3),
            Recommendation::new("a", 0.3),
            Recommendation::new("c", 0.9),
        ];
        recommendations.sort_by(by_descending_relevance);
        let values = recommendations
            .iter()
            .map(|r| r.value.as_str())
            .collect::<Vec<_>>();
        assert!(values == ["c", "a", "b"]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let filter = at_least(0.1);
        assert!(filter(&Recommendation::new("x", 0.1)));
        assert!(!filter(&Recommendation::new("x", 0.0999)));
    }
}
