//! Directional cuts.
//!
//! A [`DirectedCut`] severs every edge from a node in `from` to a node in
//! `to`. Cuts are expressed in the node indices of the subsystem they apply
//! to, which is also what an oracle receives.

use std::fmt::{Display, Formatter};

use crate::connectivity::ConnectivityMatrix;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CutDirection {
    /// Baseline: nothing is severed.
    None,
    /// The node no longer affects any other node; its own inputs are kept.
    Outgoing,
    /// No other node affects the node; its outputs are kept.
    Incoming,
}

impl CutDirection {
    pub const ALL: [CutDirection; 3] = [CutDirection::None, CutDirection::Outgoing, CutDirection::Incoming];

    /// The cut of `node` in this direction, within a subsystem of `n` nodes.
    pub fn cut_of(self, node: usize, n: usize) -> Option<DirectedCut> {
        match self {
            CutDirection::None => None,
            CutDirection::Outgoing => Some(DirectedCut::outgoing(node, n)),
            CutDirection::Incoming => Some(DirectedCut::incoming(node, n)),
        }
    }
}

impl Display for CutDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CutDirection::None => write!(f, "uncut"),
            CutDirection::Outgoing => write!(f, "outgoing"),
            CutDirection::Incoming => write!(f, "incoming"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DirectedCut {
    pub from: Vec<usize>,
    pub to: Vec<usize>,
}

impl DirectedCut {
    pub fn new(from: Vec<usize>, to: Vec<usize>) -> Self {
        Self { from, to }
    }

    /// Severs the edges from `node` to every other node.
    pub fn outgoing(node: usize, n: usize) -> Self {
        Self::new(vec![node], Self::complement(node, n))
    }

    /// Severs the edges from every other node into `node`.
    pub fn incoming(node: usize, n: usize) -> Self {
        Self::new(Self::complement(node, n), vec![node])
    }

    fn complement(node: usize, n: usize) -> Vec<usize> {
        (0..n).filter(|&i| i != node).collect()
    }

    pub fn severs(&self, from: usize, to: usize) -> bool {
        self.from.contains(&from) && self.to.contains(&to)
    }

    /// Removes the severed edges from a connectivity matrix.
    pub fn apply(&self, cm: &ConnectivityMatrix) -> ConnectivityMatrix {
        let mut cut = cm.clone();
        for &i in &self.from {
            for &j in &self.to {
                cut.set(i, j, false);
            }
        }
        cut
    }
}

impl Display for DirectedCut {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -/-> {:?}", self.from, self.to)
    }
}
