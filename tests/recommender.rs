use augury::inference::Engine;
use augury::model::Network;
use augury::model::NetworkDescriptor;
use augury::recommend::any;
use augury::recommend::at_least;
use augury::recommend::by_descending_relevance;
use augury::recommend::DefinitionKind;
use augury::recommend::TypeRecommender;
use augury::recommend::DUMMY_METHOD;
use augury::recommend::NONE_METHOD;
use augury::recommend::UNKNOWN_METHOD;

const RECEIVER: &str = "Ljava/lang/String";
const TO_LOWER: &str = "Ljava/lang/String.toLowerCase()Ljava/lang/String;";
const TRIM: &str = "Ljava/lang/String.trim()Ljava/lang/String;";
const LENGTH: &str = "Ljava/lang/String.length()I";

/// the serialized form of a small trained network for java.lang.String
fn string_network() -> serde_json::Value {
    serde_json::json!({
        "nodes": [
            {
                "identifier": "patterns",
                "outcomes": ["dummy", "p1", "p2"],
                "probabilities": [0.2, 0.5, 0.3]
            },
            {
                "identifier": "contexts",
                "outcomes": ["dummy", "Lcom/acme/Client.run()V", UNKNOWN_METHOD],
                "parents": ["patterns"],
                "probabilities": [0.8, 0.1, 0.1, 0.1, 0.6, 0.3, 0.1, 0.2, 0.7]
            },
            {
                "identifier": "definitions",
                "outcomes": [NONE_METHOD, "LX.foo()V", UNKNOWN_METHOD, DUMMY_METHOD],
                "parents": ["patterns"],
                "probabilities": [0.4, 0.1, 0.3, 0.2, 0.2, 0.5, 0.2, 0.1, 0.3, 0.3, 0.3, 0.1]
            },
            {
                "identifier": "kinds",
                "outcomes": ["METHOD_RETURN", "NEW", "FIELD", "PARAMETER", "THIS", "UNKNOWN", "ANY"],
                "parents": ["patterns"],
                "probabilities": [
                    0.1, 0.1, 0.1, 0.1, 0.1, 0.4, 0.1,
                    0.3, 0.2, 0.1, 0.1, 0.05, 0.2, 0.05,
                    0.05, 0.45, 0.1, 0.1, 0.05, 0.2, 0.05
                ]
            },
            {
                "identifier": TO_LOWER,
                "outcomes": ["True", "False"],
                "parents": ["patterns"],
                "probabilities": [0.01, 0.99, 0.8, 0.2, 0.3, 0.7]
            },
            {
                "identifier": TRIM,
                "outcomes": ["True", "False"],
                "parents": ["patterns"],
                "probabilities": [0.01, 0.99, 0.6, 0.4, 0.1, 0.9]
            },
            {
                "identifier": LENGTH,
                "outcomes": ["True", "False"],
                "parents": ["patterns"],
                "probabilities": [0.01, 0.99, 0.3, 0.7, 0.9, 0.1]
            },
            {
                "identifier": "LNull.null()V",
                "outcomes": ["True", "False"],
                "parents": ["patterns"],
                "probabilities": [0.99, 0.01, 0.05, 0.95, 0.05, 0.95]
            }
        ]
    })
}

fn load() -> TypeRecommender {
    let descriptor =
        serde_json::from_value::<NetworkDescriptor>(string_network()).expect("well-formed fixture");
    let network = Network::try_from(descriptor).expect("valid fixture network");
    TypeRecommender::new(RECEIVER, network).expect("complete fixture roles")
}

/// the empty query: nothing known but the fact that we are asking
fn empty_query(recommender: &mut TypeRecommender) {
    recommender.reset();
    assert!(recommender.set_observed_enclosing_method(None));
    assert!(recommender.set_observed_kind(None));
    assert!(recommender.set_observed_calls(&[]));
}

#[test]
fn s1_empty_query_ranks_string_methods() {
    let mut recommender = load();
    empty_query(&mut recommender);
    let calls = recommender.recommended_calls(at_least(0.1), by_descending_relevance, 5);
    assert!(calls.len() <= 5);
    assert!(!calls.is_empty());
    assert!(calls.iter().all(|r| r.relevance >= 0.1 && r.relevance <= 1.));
    assert!(calls
        .windows(2)
        .all(|w| w[0].relevance >= w[1].relevance));
}

#[test]
fn s2_observed_calls_are_never_recommended() {
    let mut recommender = load();
    empty_query(&mut recommender);
    assert!(recommender.set_observed_call(TO_LOWER));
    let calls = recommender.recommended_calls(any, by_descending_relevance, usize::MAX);
    assert!(!calls.iter().any(|r| r.value == TO_LOWER));
    assert!(calls.iter().any(|r| r.value == TRIM));
}

#[test]
fn s3_unknown_pattern_is_a_soft_miss() {
    let mut recommender = load();
    let before = recommender.recommended_patterns(any, by_descending_relevance, usize::MAX);
    assert!(!recommender.set_observed_pattern("does_not_exist"));
    let after = recommender.recommended_patterns(any, by_descending_relevance, usize::MAX);
    assert!(before == after);
    assert!(after.len() == 3);
}

#[test]
fn s4_conflicting_pins_overwrite_and_zero_rows_survive() {
    // second pin displaces the first
    let descriptor =
        serde_json::from_value::<NetworkDescriptor>(string_network()).expect("well-formed fixture");
    let mut engine = Engine::try_from(Network::try_from(descriptor).unwrap()).unwrap();
    let node = engine.network().id(TO_LOWER).unwrap();
    engine.observe(node, "True").unwrap();
    engine.observe(node, "False").unwrap();
    assert!(engine.beliefs(node) == [0., 1.]);
    assert!(!engine.inconsistent());
    // pinning an outcome of zero prior mass zeroes all beliefs, quietly
    let impossible = serde_json::json!({
        "nodes": [
            {
                "identifier": "a",
                "outcomes": ["y", "n"],
                "probabilities": [1.0, 0.0]
            },
            {
                "identifier": "b",
                "outcomes": ["y", "n"],
                "parents": ["a"],
                "probabilities": [0.7, 0.3, 0.5, 0.5]
            }
        ]
    });
    let descriptor = serde_json::from_value::<NetworkDescriptor>(impossible).unwrap();
    let mut engine = Engine::try_from(Network::try_from(descriptor).unwrap()).unwrap();
    engine.observe(0, "n").unwrap();
    assert!(engine.inconsistent());
    assert!(engine.beliefs(0) == [0., 0.]);
    assert!(engine.beliefs(1) == [0., 0.]);
}

#[test]
fn s5_definition_sentinels_are_filtered() {
    let fixture = serde_json::json!({
        "nodes": [
            {
                "identifier": "patterns",
                "outcomes": ["dummy", "p1"],
                "probabilities": [0.5, 0.5]
            },
            {
                "identifier": "contexts",
                "outcomes": ["dummy", UNKNOWN_METHOD],
                "parents": ["patterns"],
                "probabilities": [0.5, 0.5, 0.5, 0.5]
            },
            {
                "identifier": "definitions",
                "outcomes": [NONE_METHOD, "LX.foo()V", UNKNOWN_METHOD],
                "probabilities": [0.5, 0.4, 0.1]
            },
            {
                "identifier": "kinds",
                "outcomes": ["UNKNOWN", "ANY"],
                "probabilities": [0.5, 0.5]
            }
        ]
    });
    let descriptor = serde_json::from_value::<NetworkDescriptor>(fixture).unwrap();
    let network = Network::try_from(descriptor).unwrap();
    let mut recommender = TypeRecommender::new("LX", network).unwrap();
    let definitions = recommender.recommended_definitions(any, by_descending_relevance, usize::MAX);
    let values = definitions
        .iter()
        .map(|r| r.value.as_str())
        .collect::<Vec<_>>();
    assert!(values == ["LX.foo()V"]);
    assert!((definitions[0].relevance - 0.4).abs() < 1e-9);
}

#[test]
fn s6_node_order_does_not_matter() {
    let mut straight = load();
    let mut shuffled = {
        let mut value = string_network();
        let nodes = value["nodes"].as_array_mut().unwrap();
        nodes.reverse();
        let descriptor = serde_json::from_value::<NetworkDescriptor>(value).unwrap();
        TypeRecommender::new(RECEIVER, Network::try_from(descriptor).unwrap()).unwrap()
    };
    for recommender in [&mut straight, &mut shuffled] {
        empty_query(recommender);
        assert!(recommender.set_observed_call(TO_LOWER));
        assert!(recommender.set_observed_kind(Some(DefinitionKind::New)));
    }
    let a = straight.recommended_calls(any, by_descending_relevance, usize::MAX);
    let b = shuffled.recommended_calls(any, by_descending_relevance, usize::MAX);
    assert!(agree(&a, &b));
    let a = straight.recommended_patterns(any, by_descending_relevance, usize::MAX);
    let b = shuffled.recommended_patterns(any, by_descending_relevance, usize::MAX);
    assert!(agree(&a, &b));
}

/// same values in the same order, relevances equal up to summation order
fn agree(
    a: &[augury::recommend::Recommendation],
    b: &[augury::recommend::Recommendation],
) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.value == y.value && (x.relevance - y.relevance).abs() < 1e-9)
}

#[test]
fn replaying_observations_is_bit_identical() {
    let mut recommender = load();
    let replay = |r: &mut TypeRecommender| {
        r.reset();
        r.set_observed_enclosing_method(Some("Lcom/acme/Client.run()V"));
        r.set_observed_kind(Some(DefinitionKind::MethodReturn));
        r.set_observed_calls(&[TRIM]);
        r.recommended_calls(any, by_descending_relevance, usize::MAX)
    };
    let once = replay(&mut recommender);
    let twice = replay(&mut recommender);
    assert!(once == twice);
}

#[test]
fn observation_order_does_not_matter() {
    let mut ab = load();
    ab.set_observed_call(TO_LOWER);
    ab.set_observed_call(LENGTH);
    let mut ba = load();
    ba.set_observed_call(LENGTH);
    ba.set_observed_call(TO_LOWER);
    let a = ab.recommended_patterns(any, by_descending_relevance, usize::MAX);
    let b = ba.recommended_patterns(any, by_descending_relevance, usize::MAX);
    assert!(a == b);
}

#[test]
fn beliefs_stay_normalized_under_evidence() {
    let mut recommender = load();
    empty_query(&mut recommender);
    recommender.set_observed_call(TRIM);
    let patterns = recommender.recommended_patterns(any, by_descending_relevance, usize::MAX);
    let sum = patterns.iter().map(|r| r.relevance).sum::<f64>();
    assert!((sum - 1.).abs() < 1e-9);
}
