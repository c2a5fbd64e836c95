//! Network states and state configurations.

use std::fmt::{Debug, Display, Formatter};
use std::ops::Index;

use bitvec::prelude::*;

use crate::error::StateError;
use crate::network::Network;

/// A state of a network: one bit per node, indexed by node position.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct State {
    bits: BitVec<u64, Lsb0>,
}

impl State {
    /// The all-zero state of `n` nodes.
    pub fn zeros(n: usize) -> Self {
        Self {
            bits: bitvec![u64, Lsb0; 0; n],
        }
    }

    /// The all-one state of `n` nodes.
    pub fn ones(n: usize) -> Self {
        Self {
            bits: bitvec![u64, Lsb0; 1; n],
        }
    }

    pub fn from_bits(bits: BitVec<u64, Lsb0>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.bits.set(index, value);
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    pub fn as_bitslice(&self) -> &BitSlice<u64, Lsb0> {
        &self.bits
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }

    /// Projects the state onto the given node positions, in the given order.
    pub fn project(&self, indices: &[usize]) -> State {
        indices.iter().map(|&i| self.bits[i]).collect()
    }

    /// Checks that the state covers exactly `n` nodes.
    pub fn check_len(&self, n: usize) -> Result<(), StateError> {
        if self.len() == n {
            Ok(())
        } else {
            Err(StateError::Size {
                expected: n,
                found: self.len(),
            })
        }
    }
}

impl FromIterator<bool> for State {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl From<&[bool]> for State {
    fn from(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }
}

impl<const N: usize> From<[u8; N]> for State {
    fn from(bits: [u8; N]) -> Self {
        bits.iter().map(|&b| b != 0).collect()
    }
}

impl Index<usize> for State {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for b in self.iter() {
            write!(f, "{}", b as u8)?;
        }
        Ok(())
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "State({})", self)
    }
}

/// How a caller describes the state of a network.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StateConfig {
    /// Explicit bit per node, in node order.
    Bits(Vec<bool>),
    /// Nodes switched on (all others off), or switched off (all others on).
    /// Exactly one of the two lists must be given.
    Nodes {
        on: Option<Vec<String>>,
        off: Option<Vec<String>>,
    },
}

impl StateConfig {
    pub fn on<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        StateConfig::Nodes {
            on: Some(labels.into_iter().map(Into::into).collect()),
            off: None,
        }
    }

    pub fn off<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        StateConfig::Nodes {
            on: None,
            off: Some(labels.into_iter().map(Into::into).collect()),
        }
    }
}

impl<const N: usize> From<[u8; N]> for StateConfig {
    fn from(bits: [u8; N]) -> Self {
        StateConfig::Bits(bits.iter().map(|&b| b != 0).collect())
    }
}

impl From<Vec<bool>> for StateConfig {
    fn from(bits: Vec<bool>) -> Self {
        StateConfig::Bits(bits)
    }
}

/// Turns a state configuration into a state of `network`.
pub fn parse_state_config(network: &Network, config: &StateConfig) -> Result<State, StateError> {
    match config {
        StateConfig::Bits(bits) => {
            let state = State::from(bits.as_slice());
            state.check_len(network.len())?;
            Ok(state)
        }
        StateConfig::Nodes {
            on: Some(on),
            off: None,
        } => {
            let mut state = State::zeros(network.len());
            for label in on {
                state.set(lookup(network, label)?, true);
            }
            Ok(state)
        }
        StateConfig::Nodes {
            on: None,
            off: Some(off),
        } => {
            let mut state = State::ones(network.len());
            for label in off {
                state.set(lookup(network, label)?, false);
            }
            Ok(state)
        }
        StateConfig::Nodes { .. } => Err(StateError::Spec),
    }
}

fn lookup(network: &Network, label: &str) -> Result<usize, StateError> {
    network
        .index_of(label)
        .ok_or_else(|| StateError::UnknownNode(label.to_string()))
}
