//! Boolean networks.
//!
//! A [`Network`] is an ordered collection of nodes, each with a [`Mechanism`]
//! and an ordered list of input nodes. The declaration order of the nodes is
//! the node order used everywhere else: in states, transition tables,
//! connectivity matrices and induced subsystems.
//!
//! ```
//! use bnet_rs::network::{Network, NodeConfig};
//! use bnet_rs::state::State;
//!
//! let net = Network::build([
//!     NodeConfig::new("A", "OR", ["B", "C"]),
//!     NodeConfig::new("B", "AND", ["A", "C"]),
//!     NodeConfig::new("C", "XOR", ["A", "B"]),
//! ])
//! .unwrap();
//!
//! let next = net.update(&State::from([1, 0, 0])).unwrap();
//! assert_eq!(next, State::from([0, 0, 1]));
//! ```

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::connectivity::ConnectivityMatrix;
use crate::error::{ConfigError, StateError};
use crate::mechanism::{Mechanism, MechanismSpec};
use crate::state::State;

/// Declaration of a single node: its label, its mechanism and its inputs.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub label: String,
    pub mechanism: MechanismSpec,
    pub inputs: Vec<String>,
}

impl NodeConfig {
    pub fn new<S: Into<String>>(
        label: impl Into<String>,
        mechanism: impl Into<MechanismSpec>,
        inputs: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            label: label.into(),
            mechanism: mechanism.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    /// A node without inputs. Its state persists across updates.
    pub fn inputless(label: impl Into<String>, mechanism: impl Into<MechanismSpec>) -> Self {
        Self::new(label, mechanism, Vec::<String>::new())
    }
}

#[derive(Debug, Clone)]
struct Node {
    label: String,
    mechanism: Mechanism,
    /// Parents, in declared input order.
    inputs: Vec<usize>,
    /// Children, in node order.
    outputs: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

// Construction
impl Network {
    /// Builds a network from node declarations.
    ///
    /// Nodes are ordered by declaration. An input listed several times by the
    /// same node is kept once, at its first position.
    pub fn build(config: impl IntoIterator<Item = NodeConfig>) -> Result<Self, ConfigError> {
        let config: Vec<NodeConfig> = config.into_iter().collect();

        let mut index = HashMap::with_capacity(config.len());
        let mut duplicate = None;
        for (i, node) in config.iter().enumerate() {
            if index.contains_key(&node.label) {
                duplicate.get_or_insert_with(|| node.label.clone());
            } else {
                index.insert(node.label.clone(), i);
            }
        }

        let mut undeclared = Vec::new();
        for input in config.iter().flat_map(|node| &node.inputs) {
            if !index.contains_key(input) && !undeclared.contains(input) {
                undeclared.push(input.clone());
            }
        }
        if !undeclared.is_empty() {
            return Err(ConfigError::UndeclaredInputs(undeclared));
        }
        if let Some(label) = duplicate {
            return Err(ConfigError::DuplicateLabel(label));
        }

        let mut nodes = Vec::with_capacity(config.len());
        for NodeConfig { label, mechanism, inputs } in config {
            let mechanism = mechanism.resolve()?;
            let mut seen = HashSet::new();
            let inputs: Vec<usize> = inputs.iter().map(|input| index[input]).filter(|&i| seen.insert(i)).collect();
            mechanism
                .check_arity(inputs.len())
                .map_err(|source| ConfigError::Arity {
                    label: label.clone(),
                    source,
                })?;
            nodes.push(Node {
                label,
                mechanism,
                inputs,
                outputs: Vec::new(),
            });
        }

        let network = Self::from_nodes(nodes);
        debug!(
            "build: {} nodes, {} edges: {:?}",
            network.len(),
            network.num_edges(),
            network.labels().collect::<Vec<_>>()
        );
        Ok(network)
    }

    /// Assembles a network from nodes whose `inputs` are set, deriving `outputs`.
    fn from_nodes(mut nodes: Vec<Node>) -> Self {
        for node in nodes.iter_mut() {
            node.outputs.clear();
        }
        for child in 0..nodes.len() {
            for k in 0..nodes[child].inputs.len() {
                let parent = nodes[child].inputs[k];
                nodes[parent].outputs.push(child);
            }
        }
        let index = nodes.iter().enumerate().map(|(i, node)| (node.label.clone(), i)).collect();
        Self { nodes, index }
    }

    /// The network induced on the given node positions.
    ///
    /// Nodes keep their relative order. Edges from nodes outside the subset
    /// are dropped, so a mechanism only sees the inputs that remain; a node
    /// left without inputs becomes inputless and persists its state.
    pub(crate) fn restrict(&self, indices: &[usize]) -> Network {
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();

        let local: HashMap<usize, usize> = indices.iter().enumerate().map(|(new, &old)| (old, new)).collect();
        let nodes = indices
            .iter()
            .map(|&i| {
                let node = &self.nodes[i];
                Node {
                    label: node.label.clone(),
                    mechanism: node.mechanism.clone(),
                    inputs: node.inputs.iter().filter_map(|p| local.get(p).copied()).collect(),
                    outputs: Vec::new(),
                }
            })
            .collect();
        Self::from_nodes(nodes)
    }
}

// Getters
impl Network {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.nodes.iter().map(|node| node.inputs.len()).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|node| node.label.as_str())
    }

    pub fn label(&self, index: usize) -> &str {
        &self.nodes[index].label
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Positions of the given labels, or the first unknown label.
    pub fn indices_of<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Result<Vec<usize>, &'a str> {
        labels
            .into_iter()
            .map(|label| self.index_of(label).ok_or(label))
            .collect()
    }

    pub fn mechanism(&self, index: usize) -> &Mechanism {
        &self.nodes[index].mechanism
    }

    /// Parents of a node, in its declared input order.
    pub fn inputs(&self, index: usize) -> &[usize] {
        &self.nodes[index].inputs
    }

    /// Children of a node, in node order.
    pub fn outputs(&self, index: usize) -> &[usize] {
        &self.nodes[index].outputs
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.nodes[to].inputs.contains(&from)
    }

    pub fn connectivity_matrix(&self) -> ConnectivityMatrix {
        ConnectivityMatrix::from_edges(
            self.len(),
            self.nodes
                .iter()
                .enumerate()
                .flat_map(|(child, node)| node.inputs.iter().map(move |&parent| (parent, child))),
        )
    }
}

// Dynamics
impl Network {
    /// Computes the next state of every node from the same snapshot.
    ///
    /// Inputless nodes keep their current value.
    pub fn update(&self, current: &State) -> Result<State, StateError> {
        current.check_len(self.len())?;
        Ok(self.step(current))
    }

    pub(crate) fn step(&self, current: &State) -> State {
        let mut buffer = Vec::new();
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                if node.inputs.is_empty() {
                    current.get(i)
                } else {
                    buffer.clear();
                    buffer.extend(node.inputs.iter().map(|&p| current.get(p)));
                    node.mechanism.apply(&buffer)
                }
            })
            .collect()
    }

    /// Applies [`update`][Network::update] `steps` times.
    pub fn evolve(&self, state: &State, steps: usize) -> Result<State, StateError> {
        state.check_len(self.len())?;
        let mut state = state.clone();
        for _ in 0..steps {
            state = self.step(&state);
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::gate::Gate;

    fn fig4() -> Network {
        Network::build([
            NodeConfig::new("A", "OR", ["B", "C"]),
            NodeConfig::new("B", "AND", ["A", "C"]),
            NodeConfig::new("C", "XOR", ["A", "B"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_order() {
        let net = Network::build([
            NodeConfig::new("C", "COPY", ["A"]),
            NodeConfig::inputless("A", "NULL"),
            NodeConfig::new("B", "NOT", ["C"]),
        ])
        .unwrap();
        assert_eq!(net.labels().collect::<Vec<_>>(), ["C", "A", "B"]);
        assert_eq!(net.index_of("A"), Some(1));
        assert_eq!(net.index_of("Z"), None);
        assert_eq!(net.inputs(0), &[1]);
        assert_eq!(net.outputs(1), &[0]);
        assert_eq!(net.num_edges(), 2);
    }

    #[test]
    fn test_build_undeclared_input() {
        let err = Network::build([
            NodeConfig::new("A", "XOR", ["B", "C"]),
            NodeConfig::new("B", "NOT", ["D"]),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::UndeclaredInputs(vec!["C".to_string(), "D".to_string()]));
    }

    #[test]
    fn test_build_duplicate_label() {
        let err = Network::build([
            NodeConfig::new("A", "NOT", ["A"]),
            NodeConfig::new("A", "COPY", ["A"]),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLabel("A".to_string()));
    }

    #[test]
    fn test_build_arity() {
        let err = Network::build([
            NodeConfig::new("A", "NOT", ["A", "B"]),
            NodeConfig::new("B", "OR", ["A"]),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Arity { ref label, .. } if label == "A"));
    }

    #[test]
    fn test_build_unknown_gate() {
        let err = Network::build([NodeConfig::inputless("A", "FLIP")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownGate("FLIP".to_string()));
    }

    #[test]
    fn test_parallel_inputs_collapse() {
        let net = Network::build([
            NodeConfig::new("A", "XOR", ["B", "A", "B"]),
            NodeConfig::new("B", "NOT", ["A", "A"]),
        ])
        .unwrap();
        assert_eq!(net.inputs(0), &[1, 0]);
        assert_eq!(net.inputs(1), &[0]);
    }

    #[test]
    fn test_update() {
        let net = fig4();
        assert_eq!(net.update(&State::from([1, 0, 0])).unwrap(), State::from([0, 0, 1]));
        assert_eq!(net.update(&State::from([0, 0, 1])).unwrap(), State::from([1, 0, 0]));
        assert_eq!(net.update(&State::from([1, 1, 1])).unwrap(), State::from([1, 1, 0]));
    }

    #[test]
    fn test_update_is_synchronous() {
        // A swap: each node copies the other. A sequential update would make both equal.
        let net = Network::build([
            NodeConfig::new("A", Gate::Copy, ["B"]),
            NodeConfig::new("B", Gate::Copy, ["A"]),
        ])
        .unwrap();
        assert_eq!(net.update(&State::from([1, 0])).unwrap(), State::from([0, 1]));
    }

    #[test]
    fn test_update_input_order() {
        let first = Mechanism::custom("FIRST", |xs| xs[0]);
        let net = Network::build([
            NodeConfig::new("A", first, ["C", "B"]),
            NodeConfig::inputless("B", "AND"),
            NodeConfig::inputless("C", "AND"),
        ])
        .unwrap();
        assert_eq!(net.update(&State::from([0, 0, 1])).unwrap(), State::from([1, 0, 1]));
        assert_eq!(net.update(&State::from([0, 1, 0])).unwrap(), State::from([0, 1, 0]));
    }

    #[test]
    fn test_update_inputless_persist() {
        let net = Network::build([
            NodeConfig::inputless("A", "NOT"),
            NodeConfig::new("B", "NOT", ["A"]),
        ])
        .unwrap();
        assert_eq!(net.update(&State::from([1, 1])).unwrap(), State::from([1, 0]));
        assert_eq!(net.update(&State::from([0, 0])).unwrap(), State::from([0, 1]));
    }

    #[test]
    fn test_update_wrong_size() {
        let net = fig4();
        assert_eq!(
            net.update(&State::from([1, 0])),
            Err(StateError::Size { expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_evolve() {
        let net = fig4();
        let s0 = State::from([1, 0, 0]);
        assert_eq!(net.evolve(&s0, 0).unwrap(), s0);
        let s2 = net.update(&net.update(&s0).unwrap()).unwrap();
        assert_eq!(net.evolve(&s0, 2).unwrap(), s2);
    }

    #[test]
    fn test_restrict() {
        let net = fig4();
        let sub = net.restrict(&[2, 0]);
        assert_eq!(sub.labels().collect::<Vec<_>>(), ["A", "C"]);
        assert_eq!(sub.inputs(0), &[1]);
        assert_eq!(sub.inputs(1), &[0]);
        assert_eq!(sub.num_edges(), 2);
    }
}
