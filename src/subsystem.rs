//! Induced subsystems and structural queries.
//!
//! A [`Subsystem`] pairs a network with a state and optionally marks some of
//! its nodes as background. Structural queries (neighborhoods, Markov
//! blankets, arbitrary node subsets) return new subsystems induced on a subset
//! of nodes:
//!
//! - nodes keep the order of the parent network, whatever order the subset was
//!   given in;
//! - only edges between nodes of the subset are kept;
//! - the state is the projection of the parent state;
//! - background tagging is intersected with the subset.
//!
//! Subsystems are plain values built on demand; nothing is cached.

use std::collections::BTreeSet;

use log::debug;

use crate::codec::Convention;
use crate::connectivity::ConnectivityMatrix;
use crate::error::{Error, StateError};
use crate::network::Network;
use crate::state::{parse_state_config, State, StateConfig};
use crate::tpm::Tpm;

#[derive(Debug, Clone)]
pub struct Subsystem {
    network: Network,
    state: State,
    /// Position of each node in the root network.
    global: Vec<usize>,
    /// Background nodes, as local indices.
    background: BTreeSet<usize>,
}

// Construction
impl Subsystem {
    /// The whole network in the given state.
    pub fn new(network: Network, state: State) -> Result<Self, StateError> {
        state.check_len(network.len())?;
        let global = (0..network.len()).collect();
        Ok(Self {
            network,
            state,
            global,
            background: BTreeSet::new(),
        })
    }

    pub fn from_config(network: Network, config: &StateConfig) -> Result<Self, StateError> {
        let state = parse_state_config(&network, config)?;
        Self::new(network, state)
    }

    /// Marks the given nodes as background, replacing any previous marking.
    pub fn with_background<'a>(mut self, labels: impl IntoIterator<Item = &'a str>) -> Result<Self, Error> {
        let indices = self.lookup_all(labels)?;
        self.background = indices.into_iter().collect();
        Ok(self)
    }

    /// Marks every node outside the given region of interest as background.
    pub fn with_foreground<'a>(mut self, labels: impl IntoIterator<Item = &'a str>) -> Result<Self, Error> {
        let foreground: BTreeSet<usize> = self.lookup_all(labels)?.into_iter().collect();
        self.background = (0..self.len()).filter(|i| !foreground.contains(i)).collect();
        Ok(self)
    }

    /// Replaces the state, keeping structure and background.
    pub fn with_state(mut self, state: State) -> Result<Self, StateError> {
        state.check_len(self.len())?;
        self.state = state;
        Ok(self)
    }
}

// Getters
impl Subsystem {
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.network.len()
    }

    pub fn is_empty(&self) -> bool {
        self.network.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.network.labels()
    }

    pub fn label(&self, index: usize) -> &str {
        self.network.label(index)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.network.index_of(label)
    }

    /// Positions of this subsystem's nodes in the root network.
    pub fn global_indices(&self) -> &[usize] {
        &self.global
    }

    pub fn background_indices(&self) -> Vec<usize> {
        self.background.iter().copied().collect()
    }

    pub fn foreground_indices(&self) -> Vec<usize> {
        (0..self.len()).filter(|i| !self.background.contains(i)).collect()
    }

    pub fn is_background(&self, index: usize) -> bool {
        self.background.contains(&index)
    }

    pub fn tpm(&self, convention: Convention) -> Tpm {
        Tpm::build(&self.network, convention)
    }

    pub fn connectivity_matrix(&self) -> ConnectivityMatrix {
        self.network.connectivity_matrix()
    }

    /// Whether the subsystem has no edges at all.
    pub fn is_trivial(&self) -> bool {
        self.network.num_edges() == 0
    }

    fn lookup(&self, label: &str) -> Result<usize, Error> {
        self.index_of(label).ok_or_else(|| Error::UnknownNode(label.to_string()))
    }

    fn lookup_all<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Result<Vec<usize>, Error> {
        self.network
            .indices_of(labels)
            .map_err(|label| Error::UnknownNode(label.to_string()))
    }
}

// Structural queries
impl Subsystem {
    /// Direct predecessors of a node, in node order.
    pub fn parents(&self, label: &str) -> Result<Vec<&str>, Error> {
        let i = self.lookup(label)?;
        Ok(self.labels_of(self.parent_set(i)))
    }

    /// Direct successors of a node, in node order.
    pub fn children(&self, label: &str) -> Result<Vec<&str>, Error> {
        let i = self.lookup(label)?;
        Ok(self.labels_of(self.network.outputs(i).iter().copied().collect()))
    }

    /// The node together with its parents and children.
    pub fn neighborhood(&self, label: &str) -> Result<Subsystem, Error> {
        let i = self.lookup(label)?;
        let mut nodes = self.parent_set(i);
        nodes.insert(i);
        nodes.extend(self.network.outputs(i));
        debug!("neighborhood({}) = {:?}", label, self.labels_of(nodes.clone()));
        Ok(self.induced_indices(nodes))
    }

    /// The node, its parents, its children and the other parents of its children.
    ///
    /// An isolated node is its own blanket.
    pub fn markov_blanket(&self, label: &str) -> Result<Subsystem, Error> {
        let i = self.lookup(label)?;
        let mut nodes = self.parent_set(i);
        nodes.insert(i);
        for &child in self.network.outputs(i) {
            nodes.insert(child);
            nodes.extend(self.parent_set(child));
        }
        debug!("markov_blanket({}) = {:?}", label, self.labels_of(nodes.clone()));
        Ok(self.induced_indices(nodes))
    }

    /// The subsystem induced on the given nodes.
    pub fn induced<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Result<Subsystem, Error> {
        let nodes = self.lookup_all(labels)?.into_iter().collect();
        Ok(self.induced_indices(nodes))
    }

    fn induced_indices(&self, nodes: BTreeSet<usize>) -> Subsystem {
        let nodes: Vec<usize> = nodes.into_iter().collect();
        let background = nodes
            .iter()
            .enumerate()
            .filter(|&(_, i)| self.background.contains(i))
            .map(|(local, _)| local)
            .collect();
        Subsystem {
            network: self.network.restrict(&nodes),
            state: self.state.project(&nodes),
            global: nodes.iter().map(|&i| self.global[i]).collect(),
            background,
        }
    }

    fn parent_set(&self, index: usize) -> BTreeSet<usize> {
        self.network.inputs(index).iter().copied().collect()
    }

    fn labels_of(&self, nodes: BTreeSet<usize>) -> Vec<&str> {
        nodes.into_iter().map(|i| self.network.label(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::network::NodeConfig;

    /// ```text
    /// A -> C <- B
    /// C -> D
    /// E -> D
    /// F (isolated)
    /// ```
    fn chain() -> Subsystem {
        let net = Network::build([
            NodeConfig::inputless("A", "COPY"),
            NodeConfig::inputless("B", "COPY"),
            NodeConfig::new("C", "AND", ["B", "A"]),
            NodeConfig::new("D", "OR", ["E", "C"]),
            NodeConfig::inputless("E", "COPY"),
            NodeConfig::inputless("F", "COPY"),
        ])
        .unwrap();
        Subsystem::new(net, State::from([1, 0, 1, 1, 0, 1])).unwrap()
    }

    fn labels(sub: &Subsystem) -> Vec<&str> {
        sub.labels().collect()
    }

    #[test]
    fn test_parents_children() {
        let sub = chain();
        assert_eq!(sub.parents("C").unwrap(), ["A", "B"]);
        assert_eq!(sub.children("C").unwrap(), ["D"]);
        assert!(sub.parents("A").unwrap().is_empty());
        assert_eq!(sub.parents("Z"), Err(Error::UnknownNode("Z".to_string())));
    }

    #[test]
    fn test_neighborhood() {
        let sub = chain();
        let hood = sub.neighborhood("C").unwrap();
        assert_eq!(labels(&hood), ["A", "B", "C", "D"]);
        assert_eq!(hood.global_indices(), &[0, 1, 2, 3]);
        assert_eq!(hood.state(), &State::from([1, 0, 1, 1]));
        // E is outside, so D only sees C.
        assert_eq!(hood.network().inputs(3), &[2]);
    }

    #[test]
    fn test_markov_blanket() {
        let sub = chain();
        let blanket = sub.markov_blanket("C").unwrap();
        assert_eq!(labels(&blanket), ["A", "B", "C", "D", "E"]);
        assert_eq!(blanket.network().inputs(3), &[4, 2]);

        let blanket = sub.markov_blanket("A").unwrap();
        assert_eq!(labels(&blanket), ["A", "B", "C"]);
        assert_eq!(blanket.state(), &State::from([1, 0, 1]));
    }

    #[test]
    fn test_blanket_contains_neighborhood() {
        let sub = chain();
        for label in ["A", "B", "C", "D", "E", "F"] {
            let blanket = labels(&sub.markov_blanket(label).unwrap()).join(",");
            let hood = sub.neighborhood(label).unwrap();
            for node in hood.labels() {
                assert!(blanket.split(',').any(|b| b == node), "{} not in blanket of {}", node, label);
            }
            assert!(blanket.split(',').any(|b| b == label));
        }
    }

    #[test]
    fn test_isolated_node() {
        let sub = chain();
        let blanket = sub.markov_blanket("F").unwrap();
        assert_eq!(labels(&blanket), ["F"]);
        assert_eq!(blanket.global_indices(), &[5]);
        assert!(blanket.is_trivial());
    }

    #[test]
    fn test_induced_keeps_global_order() {
        let sub = chain();
        let induced = sub.induced(["E", "A", "D", "C"]).unwrap();
        assert_eq!(labels(&induced), ["A", "C", "D", "E"]);
        assert_eq!(induced.global_indices(), &[0, 2, 3, 4]);
        assert_eq!(induced.state(), &State::from([1, 1, 1, 0]));
        // C lost B, D kept both inputs in declared order.
        assert_eq!(induced.network().inputs(1), &[0]);
        assert_eq!(induced.network().inputs(2), &[3, 1]);
    }

    #[test]
    fn test_nested_induction() {
        let sub = chain();
        let blanket = sub.markov_blanket("C").unwrap();
        let inner = blanket.neighborhood("D").unwrap();
        assert_eq!(labels(&inner), ["C", "D", "E"]);
        assert_eq!(inner.global_indices(), &[2, 3, 4]);
    }

    #[test]
    fn test_background() {
        let sub = chain().with_background(["B", "E"]).unwrap();
        assert_eq!(sub.background_indices(), [1, 4]);
        let blanket = sub.markov_blanket("A").unwrap();
        assert_eq!(blanket.background_indices(), [1]);
        assert_eq!(blanket.foreground_indices(), [0, 2]);

        let sub = chain().with_foreground(["A", "C"]).unwrap();
        assert_eq!(sub.foreground_indices(), [0, 2]);
        assert!(sub.is_background(5));
        assert!(chain().with_background(["Q"]).is_err());
    }

    #[test]
    fn test_state_config() {
        let net = chain().network().clone();
        let sub = Subsystem::from_config(net.clone(), &StateConfig::on(["D"])).unwrap();
        assert_eq!(sub.state(), &State::from([0, 0, 0, 1, 0, 0]));
        assert!(Subsystem::new(net, State::zeros(2)).is_err());
    }
}
