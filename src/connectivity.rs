use std::fmt::{Debug, Display, Formatter};

use bitvec::prelude::*;

/// Square connectivity matrix: `cm[(i, j)]` is set iff node `i` is an input of node `j`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct ConnectivityMatrix {
    n: usize,
    bits: BitVec<u64, Lsb0>,
}

impl ConnectivityMatrix {
    /// The matrix of `n` nodes without edges.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            bits: bitvec![u64, Lsb0; 0; n * n],
        }
    }

    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut cm = Self::empty(n);
        for (from, to) in edges {
            cm.set(from, to, true);
        }
        cm
    }

    pub fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        Self::from_edges(
            N,
            rows.iter()
                .enumerate()
                .flat_map(|(i, row)| row.iter().enumerate().filter(|&(_, &b)| b != 0).map(move |(j, _)| (i, j))),
        )
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, from: usize, to: usize) -> bool {
        self.bits[from * self.n + to]
    }

    pub fn set(&mut self, from: usize, to: usize, value: bool) {
        assert!(from < self.n && to < self.n, "Edge ({}, {}) out of range for {} nodes", from, to, self.n);
        self.bits.set(from * self.n + to, value);
    }

    pub fn num_edges(&self) -> usize {
        self.bits.count_ones()
    }

    /// Edges `(from, to)` in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bits.iter_ones().map(move |k| (k / self.n, k % self.n))
    }

    pub fn row(&self, from: usize) -> Vec<bool> {
        self.bits[from * self.n..(from + 1) * self.n].iter().by_vals().collect()
    }
}

impl Display for ConnectivityMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.n {
            let row: Vec<&str> = (0..self.n).map(|j| if self.get(i, j) { "1" } else { "0" }).collect();
            writeln!(f, "[{}]", row.join(" "))?;
        }
        Ok(())
    }
}

impl Debug for ConnectivityMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityMatrix")
            .field("n", &self.n)
            .field("edges", &self.edges().collect::<Vec<_>>())
            .finish()
    }
}
