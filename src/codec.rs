//! Conversions between state indices and state vectors.
//!
//! A state of `n` nodes is addressed by an integer in `0..2^n`. Two
//! conventions are in use:
//!
//! - [`Convention::LowFirst`]: bit `i` of the index is the state of node `i`.
//!   Node 0 is the least significant bit.
//! - [`Convention::HighFirst`]: bit `i` of the index is the state of node
//!   `n - 1 - i`. Node 0 is the most significant bit.
//!
//! For `n = 3` and the state `(A, B, C) = (1, 0, 0)`:
//!
//! ```text
//! LowFirst:  index = 0b001 = 1
//! HighFirst: index = 0b100 = 4
//! ```
//!
//! Tables built in one convention are re-indexed into the other only through
//! [`convert_table`]; never reinterpret a row index directly.

use std::fmt::{Display, Formatter};

use crate::state::State;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Convention {
    #[default]
    LowFirst,
    HighFirst,
}

impl Display for Convention {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Convention::LowFirst => write!(f, "low-order-first"),
            Convention::HighFirst => write!(f, "high-order-first"),
        }
    }
}

/// Index bit holding the state of node `node` among `n` nodes.
const fn bit_of(node: usize, n: usize, convention: Convention) -> usize {
    match convention {
        Convention::LowFirst => node,
        Convention::HighFirst => n - 1 - node,
    }
}

/// Decodes `index` into the state of `n` nodes.
///
/// # Panics
///
/// Panics if `index >= 2^n`.
pub fn index_to_state(index: usize, n: usize, convention: Convention) -> State {
    assert!(
        n >= usize::BITS as usize || index >> n == 0,
        "State index {} out of range for {} nodes",
        index,
        n
    );
    (0..n).map(|node| (index >> bit_of(node, n, convention)) & 1 == 1).collect()
}

/// Encodes a state into its index.
pub fn state_to_index(state: &State, convention: Convention) -> usize {
    let n = state.len();
    state
        .iter()
        .enumerate()
        .filter(|&(_, b)| b)
        .fold(0, |acc, (node, _)| acc | (1 << bit_of(node, n, convention)))
}

/// Re-indexes the rows of a state-by-node table from one convention to another.
///
/// Row `i` of the result is the row of `table` describing the same state that
/// index `i` denotes under `to`.
///
/// # Panics
///
/// Panics if the number of rows is not a power of two.
pub fn convert_table<T: Clone>(table: &[T], from: Convention, to: Convention) -> Vec<T> {
    assert!(
        table.len().is_power_of_two(),
        "Table must have 2^n rows, got {}",
        table.len()
    );
    if from == to {
        return table.to_vec();
    }
    let n = table.len().trailing_zeros() as usize;
    (0..table.len())
        .map(|i| {
            let state = index_to_state(i, n, to);
            table[state_to_index(&state, from)].clone()
        })
        .collect()
}

/// All states of `n` nodes, in index order under `convention`.
pub fn all_states(n: usize, convention: Convention) -> impl Iterator<Item = State> {
    (0..1usize << n).map(move |i| index_to_state(i, n, convention))
}
