use super::kind::DefinitionKind;
use super::method::MethodName;
use super::recommendation::Recommendation;
use crate::inference::Engine;
use crate::model::Error;
use crate::model::Network;
use crate::NodeId;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// identifiers of the four singleton nodes inside every trained network
pub const NODE_CONTEXT: &str = "contexts";
pub const NODE_CALL_GROUPS: &str = "patterns";
pub const NODE_DEF: &str = "definitions";
pub const NODE_DEF_KIND: &str = "kinds";

/// outcome sentinels
pub const STATE_DUMMY_CTX: &str = "dummy";
pub const STATE_TRUE: &str = "True";
pub const STATE_FALSE: &str = "False";

/// method sentinels baked into trained networks
pub const UNKNOWN_METHOD: &str = "LUnknown.unknown()V";
pub const DUMMY_METHOD: &str = "LDummy.dummy()V";
pub const NULL_METHOD: &str = "LNull.null()V";
pub const NONE_METHOD: &str = "LNone.none()V";

/// per-type recommendation facade. binds the semantic roles of a trained
/// network to a live inference engine, translates observations about one
/// receiver variable into evidence, and ranked marginals back out.
///
/// every node beside the four singletons is a boolean per-method node
/// whose identifier is the fully qualified method name.
#[derive(Debug, Clone)]
pub struct TypeRecommender {
    receiver: String,
    context: NodeId,
    groups: NodeId,
    definition: NodeId,
    kind: NodeId,
    methods: BTreeMap<MethodName, NodeId>,
    engine: Engine,
}

impl TypeRecommender {
    pub fn new(receiver: &str, network: Network) -> Result<Self, Error> {
        let engine = Engine::try_from(network)?;
        let network = engine.network();
        let context = Self::singleton(network, NODE_CONTEXT)?;
        let groups = Self::singleton(network, NODE_CALL_GROUPS)?;
        let definition = Self::singleton(network, NODE_DEF)?;
        let kind = Self::singleton(network, NODE_DEF_KIND)?;
        let methods = network
            .nodes()
            .filter(|(id, _)| ![context, groups, definition, kind].contains(id))
            .map(|(id, node)| (MethodName::from(node.identifier()), id))
            .collect::<BTreeMap<MethodName, NodeId>>();
        for (name, &id) in methods.iter() {
            let node = network.node(id);
            if node.outcome_index(STATE_TRUE).is_none() || node.outcome_index(STATE_FALSE).is_none()
            {
                return Err(Error::InvalidModel(format!(
                    "method node {} lacks True and False outcomes",
                    name
                )));
            }
        }
        log::debug!(
            "bound {} to a network of {} candidate methods",
            receiver,
            methods.len()
        );
        Ok(Self {
            receiver: receiver.to_string(),
            context,
            groups,
            definition,
            kind,
            methods,
            engine,
        })
    }

    fn singleton(network: &Network, identifier: &str) -> Result<NodeId, Error> {
        let id = network
            .id(identifier)
            .ok_or_else(|| Error::InvalidModel(format!("missing {} node", identifier)))?;
        match network.node(id).outcome_count() {
            0 | 1 => Err(Error::InvalidModel(format!(
                "{} node needs at least two outcomes",
                identifier
            ))),
            _ => Ok(id),
        }
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    // ------------------------------------------------------------------
    // observations

    /// observe the method whose body the completion was requested in.
    /// methods the network never saw collapse onto the unknown sentinel.
    pub fn set_observed_enclosing_method(&mut self, method: Option<&str>) -> bool {
        let label = method
            .filter(|m| self.engine.network().node(self.context).outcome_index(m).is_some())
            .unwrap_or(UNKNOWN_METHOD);
        self.engine.observe(self.context, label).is_ok()
    }

    /// observe how the receiver was produced; absent means unknown
    pub fn set_observed_kind(&mut self, kind: Option<DefinitionKind>) -> bool {
        let label = kind.unwrap_or(DefinitionKind::Unknown).label();
        self.engine.observe(self.kind, label).is_ok()
    }

    /// observe the concrete definition site; absent pins the dummy
    pub fn set_observed_definition(&mut self, method: Option<&str>) -> bool {
        let label = method.unwrap_or(DUMMY_METHOD);
        self.engine.observe(self.definition, label).is_ok()
    }

    /// observe membership in an abstract usage pattern
    pub fn set_observed_pattern(&mut self, label: &str) -> bool {
        self.engine.observe(self.groups, label).is_ok()
    }

    /// pin a single observed call. the method is rebased onto our receiver
    /// before lookup; absent nodes are a soft miss.
    pub fn set_observed_call(&mut self, method: &str) -> bool {
        let rebased = MethodName::from(method).rebase(&self.receiver);
        match self.methods.get(&rebased).copied() {
            Some(node) => self.engine.observe(node, STATE_TRUE).is_ok(),
            None => false,
        }
    }

    /// pin every member of an observed call set, then pin the no-call
    /// sentinel to False to mark the query as live. true iff every member
    /// was known; one stray member never blocks the rest.
    pub fn set_observed_calls(&mut self, methods: &[&str]) -> bool {
        let known = methods
            .iter()
            .fold(true, |all, method| self.set_observed_call(method) && all);
        self.pin(NULL_METHOD, STATE_FALSE);
        known
    }

    fn pin(&mut self, method: &str, state: &str) -> bool {
        match self.methods.get(&MethodName::from(method)).copied() {
            Some(node) => self.engine.observe(node, state).is_ok(),
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // recommendations

    /// ranked candidate calls: the True belief of every method node not
    /// already pinned as evidence
    pub fn recommended_calls<F, C>(&mut self, filter: F, order: C, limit: usize) -> Vec<Recommendation>
    where
        F: Fn(&Recommendation) -> bool,
        C: Fn(&Recommendation, &Recommendation) -> Ordering,
    {
        let candidates = self
            .methods
            .iter()
            .map(|(name, &node)| (name.clone(), node))
            .filter(|&(_, node)| !self.engine.evidence().fixes(node))
            .collect::<Vec<(MethodName, NodeId)>>();
        let recommendations = candidates
            .into_iter()
            .map(|(name, node)| {
                let truth = self
                    .engine
                    .network()
                    .node(node)
                    .outcome_index(STATE_TRUE)
                    .expect("method nodes carry a True outcome");
                Recommendation::new(name.to_string(), self.engine.beliefs(node)[truth])
            })
            .collect();
        Self::ranked(recommendations, filter, order, limit)
    }

    /// ranked definition sites, with the corpus sentinels and near-zero
    /// mass filtered out
    pub fn recommended_definitions<F, C>(
        &mut self,
        filter: F,
        order: C,
        limit: usize,
    ) -> Vec<Recommendation>
    where
        F: Fn(&Recommendation) -> bool,
        C: Fn(&Recommendation, &Recommendation) -> Ordering,
    {
        let beliefs = self.engine.beliefs(self.definition);
        let recommendations = self
            .engine
            .network()
            .node(self.definition)
            .outcomes()
            .iter()
            .zip(beliefs)
            .filter(|(_, relevance)| *relevance > crate::DEFINITION_FLOOR)
            .filter(|(label, _)| label.as_str() != NONE_METHOD)
            .filter(|(label, _)| label.as_str() != UNKNOWN_METHOD)
            .map(|(label, relevance)| Recommendation::new(label.clone(), relevance))
            .collect();
        Self::ranked(recommendations, filter, order, limit)
    }

    /// ranked usage patterns over every call-group outcome
    pub fn recommended_patterns<F, C>(
        &mut self,
        filter: F,
        order: C,
        limit: usize,
    ) -> Vec<Recommendation>
    where
        F: Fn(&Recommendation) -> bool,
        C: Fn(&Recommendation, &Recommendation) -> Ordering,
    {
        let beliefs = self.engine.beliefs(self.groups);
        let recommendations = self
            .engine
            .network()
            .node(self.groups)
            .outcomes()
            .iter()
            .zip(beliefs)
            .map(|(label, relevance)| Recommendation::new(label.clone(), relevance))
            .collect();
        Self::ranked(recommendations, filter, order, limit)
    }

    fn ranked<F, C>(
        recommendations: Vec<Recommendation>,
        filter: F,
        order: C,
        limit: usize,
    ) -> Vec<Recommendation>
    where
        F: Fn(&Recommendation) -> bool,
        C: Fn(&Recommendation, &Recommendation) -> Ordering,
    {
        let mut recommendations = recommendations
            .into_iter()
            .filter(|r| filter(r))
            .collect::<Vec<Recommendation>>();
        recommendations.sort_by(|a, b| order(a, b));
        recommendations.truncate(limit);
        recommendations
    }

    // ------------------------------------------------------------------
    // introspection

    /// every candidate method this network can recommend
    pub fn known_calls(&self) -> impl Iterator<Item = &MethodName> {
        self.methods.keys()
    }

    /// every enclosing method the context node enumerates
    pub fn known_enclosing_methods(&self) -> &[String] {
        self.engine.network().node(self.context).outcomes()
    }

    /// every abstract usage pattern the call-group node enumerates
    pub fn known_patterns(&self) -> &[String] {
        self.engine.network().node(self.groups).outcomes()
    }

    /// every definition site the definition node enumerates, sentinels
    /// included
    pub fn known_definitions(&self) -> &[String] {
        self.engine.network().node(self.definition).outcomes()
    }

    /// methods currently pinned as observed calls, the no-call sentinel
    /// aside
    pub fn observed_calls(&self) -> Vec<&MethodName> {
        self.methods
            .iter()
            .filter(|(name, _)| name.as_str() != NULL_METHOD)
            .filter(|(_, node)| {
                self.engine.evidence().fixes(**node)
                    && self.engine.evidence().get(**node)
                        == self.engine.network().node(**node).outcome_index(STATE_TRUE)
            })
            .map(|(name, _)| name)
            .collect()
    }

    pub fn observed_kind(&self) -> Option<DefinitionKind> {
        self.engine
            .evidence()
            .get(self.kind)
            .map(|outcome| self.engine.network().node(self.kind).outcome(outcome))
            .and_then(|label| DefinitionKind::try_from(label).ok())
    }

    pub fn observed_definition(&self) -> Option<&str> {
        self.engine
            .evidence()
            .get(self.definition)
            .map(|outcome| self.engine.network().node(self.definition).outcome(outcome))
    }

    pub fn observed_enclosing_method(&self) -> Option<&str> {
        self.engine
            .evidence()
            .get(self.context)
            .map(|outcome| self.engine.network().node(self.context).outcome(outcome))
    }

    /// whether the pinned evidence zeroed out the joint distribution
    pub fn inconsistent(&mut self) -> bool {
        self.engine.inconsistent()
    }

    /// forget all evidence; the compiled tree and its tables stay
    pub fn reset(&mut self) {
        self.engine.reset();
    }
}
