//! State-by-node transition tables.
//!
//! Row `r` of a [`Tpm`] over `n` nodes holds the next state of the network
//! from the state that `r` denotes under the table's [`Convention`]. Tables of
//! deterministic networks are 0/1 valued, so rows are stored as packed bits.

use std::fmt::{Debug, Display, Formatter};

use bitvec::prelude::*;
use log::debug;

use crate::codec::{convert_table, index_to_state, state_to_index, Convention};
use crate::network::Network;
use crate::state::State;

#[derive(Clone, Eq, PartialEq)]
pub struct Tpm {
    num_nodes: usize,
    convention: Convention,
    bits: BitVec<u64, Lsb0>,
}

impl Tpm {
    /// Builds the transition table of `network` by enumerating all `2^n` states.
    ///
    /// # Panics
    ///
    /// Panics if the network has too many nodes to enumerate its states.
    pub fn build(network: &Network, convention: Convention) -> Self {
        let n = network.len();
        assert!(n < usize::BITS as usize, "Too many nodes ({}) to enumerate states", n);
        debug!("build_tpm(n = {}, convention = {})", n, convention);

        let mut bits = BitVec::with_capacity(n << n);
        for index in 0..1usize << n {
            let current = index_to_state(index, n, convention);
            let next = network.step(&current);
            bits.extend_from_bitslice(next.as_bitslice());
        }

        Self {
            num_nodes: n,
            convention,
            bits,
        }
    }

    /// Assembles a table from explicit rows given in `convention`.
    ///
    /// # Panics
    ///
    /// Panics if the row count is not `2^n` or a row is not of length `n`.
    pub fn from_rows(rows: &[State], convention: Convention) -> Self {
        assert!(!rows.is_empty(), "Table must have at least one row");
        let n = rows.len().trailing_zeros() as usize;
        assert_eq!(rows.len(), 1 << n, "Table must have 2^n rows, got {}", rows.len());
        let mut bits = BitVec::with_capacity(n << n);
        for row in rows {
            assert_eq!(row.len(), n, "Row {} must have {} columns", row, n);
            bits.extend_from_bitslice(row.as_bitslice());
        }
        Self {
            num_nodes: n,
            convention,
            bits,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_states(&self) -> usize {
        1 << self.num_nodes
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    pub fn row(&self, index: usize) -> State {
        let n = self.num_nodes;
        State::from_bits(self.bits[index * n..(index + 1) * n].to_bitvec())
    }

    pub fn rows(&self) -> impl Iterator<Item = State> + '_ {
        (0..self.num_states()).map(|i| self.row(i))
    }

    /// Looks up the successor of `state`, whatever the table's convention.
    pub fn next_state(&self, state: &State) -> State {
        assert_eq!(state.len(), self.num_nodes, "State {} does not match table of {} nodes", state, self.num_nodes);
        self.row(state_to_index(state, self.convention))
    }

    /// Re-indexes the table into another convention.
    pub fn to_convention(&self, convention: Convention) -> Tpm {
        if convention == self.convention {
            return self.clone();
        }
        debug!("convert tpm: {} -> {}", self.convention, convention);
        let rows: Vec<State> = self.rows().collect();
        Tpm::from_rows(&convert_table(&rows, self.convention, convention), convention)
    }
}

impl Display for Tpm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl Debug for Tpm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tpm")
            .field("num_nodes", &self.num_nodes)
            .field("convention", &self.convention)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::network::NodeConfig;

    fn fig4() -> Network {
        Network::build([
            NodeConfig::new("A", "OR", ["B", "C"]),
            NodeConfig::new("B", "AND", ["A", "C"]),
            NodeConfig::new("C", "XOR", ["A", "B"]),
        ])
        .unwrap()
    }

    const FIG4_LOW_FIRST: [[u8; 3]; 8] = [
        [0, 0, 0],
        [0, 0, 1],
        [1, 0, 1],
        [1, 0, 0],
        [1, 0, 0],
        [1, 1, 1],
        [1, 0, 1],
        [1, 1, 0],
    ];

    #[test]
    fn test_fig4_golden() {
        let tpm = Tpm::build(&fig4(), Convention::LowFirst);
        assert_eq!(tpm.num_states(), 8);
        assert_eq!(tpm.num_nodes(), 3);
        for (i, row) in FIG4_LOW_FIRST.iter().enumerate() {
            assert_eq!(tpm.row(i), State::from(*row), "row {}", i);
        }
        // State (A, B, C) = (1, 0, 0) is row 1.
        assert_eq!(tpm.row(1), State::from([0, 0, 1]));
    }

    #[test]
    fn test_rows_match_update() {
        let net = fig4();
        for convention in [Convention::LowFirst, Convention::HighFirst] {
            let tpm = Tpm::build(&net, convention);
            for (i, row) in tpm.rows().enumerate() {
                let state = index_to_state(i, 3, convention);
                assert_eq!(row, net.update(&state).unwrap());
                assert_eq!(tpm.next_state(&state), row);
            }
        }
    }

    #[test]
    fn test_to_convention() {
        let net = fig4();
        let low = Tpm::build(&net, Convention::LowFirst);
        let high = Tpm::build(&net, Convention::HighFirst);
        assert_ne!(low, high);
        assert_eq!(low.to_convention(Convention::HighFirst), high);
        assert_eq!(high.to_convention(Convention::LowFirst), low);
        assert_eq!(low.to_convention(Convention::LowFirst), low);
    }

    #[test]
    fn test_build_is_repeatable() {
        let net = fig4();
        assert_eq!(Tpm::build(&net, Convention::LowFirst), Tpm::build(&net, Convention::LowFirst));
    }

    #[test]
    fn test_empty_network() {
        let net = Network::build([]).unwrap();
        let tpm = Tpm::build(&net, Convention::LowFirst);
        assert_eq!(tpm.num_states(), 1);
        assert!(tpm.row(0).is_empty());
    }
}
