//! Interface to the integrated-information computation.
//!
//! The crate prepares subsystems and cuts; measuring how much integrated
//! information a mechanism supports is delegated to an [`InformationOracle`].

use crate::codec::Convention;
use crate::connectivity::ConnectivityMatrix;
use crate::cut::DirectedCut;
use crate::error::OracleError;
use crate::state::State;
use crate::tpm::Tpm;

/// Everything an oracle needs to evaluate one mechanism of one subsystem.
///
/// Indices refer to the nodes of the subsystem, in its node order.
#[derive(Debug, Clone, Copy)]
pub struct OracleQuery<'a> {
    /// Transition table of the subsystem, in the oracle's convention.
    pub tpm: &'a Tpm,
    /// Connectivity of the subsystem before any cut.
    pub connectivity: &'a ConnectivityMatrix,
    /// Current state of the subsystem.
    pub state: &'a State,
    /// Nodes taking part in the evaluation; the others are held fixed as background.
    pub nodes: &'a [usize],
    /// Mechanism to evaluate.
    pub mechanism: &'a [usize],
    pub cut: Option<&'a DirectedCut>,
}

impl OracleQuery<'_> {
    /// Connectivity with the cut (if any) applied.
    pub fn cut_connectivity(&self) -> ConnectivityMatrix {
        match self.cut {
            Some(cut) => cut.apply(self.connectivity),
            None => self.connectivity.clone(),
        }
    }
}

pub trait InformationOracle {
    /// Row convention the oracle expects transition tables in.
    fn convention(&self) -> Convention {
        Convention::LowFirst
    }

    /// Integrated information supported by `query.mechanism`.
    fn phi(&self, query: &OracleQuery<'_>) -> Result<f64, OracleError>;
}

impl<O: InformationOracle + ?Sized> InformationOracle for &O {
    fn convention(&self) -> Convention {
        (**self).convention()
    }

    fn phi(&self, query: &OracleQuery<'_>) -> Result<f64, OracleError> {
        (**self).phi(query)
    }
}

/// Oracle backed by a closure.
pub struct FnOracle<F> {
    convention: Convention,
    func: F,
}

impl<F> FnOracle<F>
where
    F: Fn(&OracleQuery<'_>) -> Result<f64, OracleError>,
{
    pub fn new(func: F) -> Self {
        Self {
            convention: Convention::LowFirst,
            func,
        }
    }

    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }
}

impl<F> InformationOracle for FnOracle<F>
where
    F: Fn(&OracleQuery<'_>) -> Result<f64, OracleError>,
{
    fn convention(&self) -> Convention {
        self.convention
    }

    fn phi(&self, query: &OracleQuery<'_>) -> Result<f64, OracleError> {
        (self.func)(query)
    }
}
