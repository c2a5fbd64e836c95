//! Single-node cut analysis.
//!
//! Cutting a node severs either all of its outgoing edges or all of its
//! incoming edges. The information a cut destroys is estimated locally: for
//! every node `c` in the neighborhood of the cut node, the mechanism `c` is
//! evaluated by the oracle inside the Markov blanket of `c`, three times:
//!
//! ```text
//! phi_uncut   no cut
//! phi_out     outgoing edges of the cut node severed
//! phi_in      incoming edges of the cut node severed
//! ```
//!
//! The cheaper of the two directions is assumed, so
//! `destroyed(c) = phi_uncut - max(phi_out, phi_in)`. Candidates with
//! `destroyed(c) <= 0` are unaffected. The node whose cut destroys the least
//! in total approximates the minimum information partition.
//!
//! ```
//! use bnet_rs::analysis::CutAnalysis;
//! use bnet_rs::network::{Network, NodeConfig};
//! use bnet_rs::oracle::FnOracle;
//! use bnet_rs::state::State;
//! use bnet_rs::subsystem::Subsystem;
//!
//! let net = Network::build([
//!     NodeConfig::new("A", "COPY", ["B"]),
//!     NodeConfig::new("B", "COPY", ["A"]),
//!     NodeConfig::inputless("C", "NULL"),
//! ])
//! .unwrap();
//! let sub = Subsystem::new(net, State::from([1, 0, 0])).unwrap();
//!
//! // Toy oracle: a mechanism needs both a cause and an effect.
//! let oracle = FnOracle::new(|q| {
//!     let cm = q.cut_connectivity();
//!     let m = q.mechanism[0];
//!     let fan_in = (0..cm.size()).filter(|&i| cm.get(i, m)).count();
//!     let fan_out = (0..cm.size()).filter(|&j| cm.get(m, j)).count();
//!     Ok(fan_in.min(fan_out) as f64)
//! });
//!
//! let analysis = CutAnalysis::new(&sub, oracle);
//! assert_eq!(analysis.analyze_cut("A").unwrap().total_destroyed, 2.0);
//! let mip = analysis.minimum_cut().unwrap().unwrap();
//! assert_eq!(mip.node, "C");
//! assert_eq!(mip.total_destroyed, 0.0);
//! ```

use log::debug;

use crate::codec::Convention;
use crate::connectivity::ConnectivityMatrix;
use crate::cut::{CutDirection, DirectedCut};
use crate::error::{Error, OracleError};
use crate::oracle::{InformationOracle, OracleQuery};
use crate::subsystem::Subsystem;
use crate::tpm::Tpm;

/// How per-candidate effects are combined into the total of a cut.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Aggregation {
    /// `Σ max(0, uncut - max(out, in))` over candidates.
    #[default]
    PerCandidate,
    /// `Σ uncut - max(Σ out, Σ in)`, without any floor.
    Cumulative,
}

/// Configuration for [`CutAnalysis`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Table convention handed to the oracle. Defaults to the oracle's own.
    pub convention: Option<Convention>,
    pub aggregation: Aggregation,
    /// Restrict first-order evaluations to the foreground nodes of each blanket.
    ///
    /// Cut evaluations always see the whole blanket.
    pub use_foreground: bool,
}

impl AnalysisConfig {
    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = Some(convention);
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_foreground(mut self, use_foreground: bool) -> Self {
        self.use_foreground = use_foreground;
        self
    }
}

/// Effect of cutting one node on one candidate mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEffect {
    pub node: String,
    pub phi_uncut: f64,
    pub phi_out: f64,
    pub phi_in: f64,
    /// The oracle could not evaluate the candidate's blanket; it contributes nothing.
    pub degenerate: bool,
}

impl CandidateEffect {
    fn degenerate(node: String) -> Self {
        Self {
            node,
            phi_uncut: 0.0,
            phi_out: 0.0,
            phi_in: 0.0,
            degenerate: true,
        }
    }

    /// Information lost under the less damaging of the two directions.
    pub fn destroyed(&self) -> f64 {
        if self.degenerate {
            0.0
        } else {
            self.phi_uncut - self.phi_out.max(self.phi_in)
        }
    }

    pub fn is_affected(&self) -> bool {
        self.destroyed() > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CutReport {
    pub target: String,
    pub candidates: Vec<CandidateEffect>,
    pub total_destroyed: f64,
}

impl CutReport {
    pub fn affected(&self) -> impl Iterator<Item = &CandidateEffect> + '_ {
        self.candidates.iter().filter(|c| c.is_affected())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimumCut {
    pub node: String,
    pub total_destroyed: f64,
}

/// Tables and connectivity of a blanket, prepared once for its three queries.
struct Prepared {
    tpm: Tpm,
    connectivity: ConnectivityMatrix,
    nodes: Vec<usize>,
}

pub struct CutAnalysis<'a, O> {
    subsystem: &'a Subsystem,
    oracle: O,
    config: AnalysisConfig,
}

impl<'a, O: InformationOracle> CutAnalysis<'a, O> {
    pub fn new(subsystem: &'a Subsystem, oracle: O) -> Self {
        Self::with_config(subsystem, oracle, AnalysisConfig::default())
    }

    pub fn with_config(subsystem: &'a Subsystem, oracle: O, config: AnalysisConfig) -> Self {
        Self {
            subsystem,
            oracle,
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn convention(&self) -> Convention {
        self.config.convention.unwrap_or_else(|| self.oracle.convention())
    }

    fn prepare(&self, blanket: &Subsystem, foreground_only: bool) -> Prepared {
        // Enumerated low-order-first, handed over in the oracle's convention.
        let tpm = blanket.tpm(Convention::LowFirst).to_convention(self.convention());
        let nodes = if foreground_only {
            blanket.foreground_indices()
        } else {
            (0..blanket.len()).collect()
        };
        Prepared {
            tpm,
            connectivity: blanket.connectivity_matrix(),
            nodes,
        }
    }

    /// Queries the oracle; `None` when the blanket is degenerate.
    fn query(
        &self,
        blanket: &Subsystem,
        prepared: &Prepared,
        mechanism: usize,
        cut: Option<&DirectedCut>,
    ) -> Result<Option<f64>, Error> {
        let query = OracleQuery {
            tpm: &prepared.tpm,
            connectivity: &prepared.connectivity,
            state: blanket.state(),
            nodes: &prepared.nodes,
            mechanism: &[mechanism],
            cut,
        };
        match self.oracle.phi(&query) {
            Ok(phi) => {
                debug!(
                    "phi({} in {:?}, cut = {:?}) = {}",
                    blanket.label(mechanism),
                    blanket.labels().collect::<Vec<_>>(),
                    cut,
                    phi
                );
                Ok(Some(phi))
            }
            Err(OracleError::Degenerate(msg)) => {
                debug!("degenerate blanket for {}: {}", blanket.label(mechanism), msg);
                Ok(None)
            }
            Err(e) if blanket.is_trivial() => {
                debug!("oracle failed on trivial blanket for {}: {}", blanket.label(mechanism), e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Phi of a node's first-order mechanism, evaluated in its own Markov blanket.
    ///
    /// With [`AnalysisConfig::use_foreground`], background nodes have zero phi.
    pub fn node_phi(&self, label: &str) -> Result<f64, Error> {
        let blanket = self.subsystem.markov_blanket(label)?;
        let mechanism = blanket.index_of(label).ok_or_else(|| Error::UnknownNode(label.to_string()))?;
        if self.config.use_foreground && blanket.is_background(mechanism) {
            return Ok(0.0);
        }
        let prepared = self.prepare(&blanket, self.config.use_foreground);
        Ok(self.query(&blanket, &prepared, mechanism, None)?.unwrap_or(0.0))
    }

    /// [`node_phi`][Self::node_phi] for every node (only the foreground if configured).
    pub fn first_order_phis(&self) -> Result<Vec<(String, f64)>, Error> {
        let nodes = if self.config.use_foreground {
            self.subsystem.foreground_indices()
        } else {
            (0..self.subsystem.len()).collect()
        };
        nodes
            .into_iter()
            .map(|i| {
                let label = self.subsystem.label(i);
                Ok((label.to_string(), self.node_phi(label)?))
            })
            .collect()
    }

    /// Effects of cutting `target` on each node of its neighborhood, in node order.
    pub fn candidate_effects(&self, target: &str) -> Result<Vec<CandidateEffect>, Error> {
        let neighborhood = self.subsystem.neighborhood(target)?;
        let mut effects = Vec::with_capacity(neighborhood.len());

        for candidate in neighborhood.labels() {
            let blanket = self.subsystem.markov_blanket(candidate)?;
            let mechanism = blanket
                .index_of(candidate)
                .ok_or_else(|| Error::UnknownNode(candidate.to_string()))?;
            let cut_node = blanket
                .index_of(target)
                .ok_or_else(|| Error::UnknownNode(target.to_string()))?;
            let prepared = self.prepare(&blanket, false);

            let mut phis = [0.0; 3];
            let mut degenerate = false;
            for (phi, direction) in phis.iter_mut().zip(CutDirection::ALL) {
                let cut = direction.cut_of(cut_node, blanket.len());
                match self.query(&blanket, &prepared, mechanism, cut.as_ref())? {
                    Some(value) => *phi = value,
                    None => {
                        degenerate = true;
                        break;
                    }
                }
            }

            let effect = if degenerate {
                CandidateEffect::degenerate(candidate.to_string())
            } else {
                let [phi_uncut, phi_out, phi_in] = phis;
                CandidateEffect {
                    node: candidate.to_string(),
                    phi_uncut,
                    phi_out,
                    phi_in,
                    degenerate: false,
                }
            };
            debug!("cut {}: {} destroys {}", target, effect.node, effect.destroyed());
            effects.push(effect);
        }

        Ok(effects)
    }

    /// Total information destroyed by cutting `target`.
    pub fn analyze_cut(&self, target: &str) -> Result<CutReport, Error> {
        let candidates = self.candidate_effects(target)?;
        let total_destroyed = match self.config.aggregation {
            Aggregation::PerCandidate => candidates.iter().map(|c| c.destroyed()).filter(|&d| d > 0.0).sum(),
            Aggregation::Cumulative => {
                let live = || candidates.iter().filter(|c| !c.degenerate);
                let uncut: f64 = live().map(|c| c.phi_uncut).sum();
                let out: f64 = live().map(|c| c.phi_out).sum();
                let inc: f64 = live().map(|c| c.phi_in).sum();
                uncut - out.max(inc)
            }
        };
        debug!("analyze_cut({}) = {}", target, total_destroyed);
        Ok(CutReport {
            target: target.to_string(),
            candidates,
            total_destroyed,
        })
    }

    /// Reports for cutting every node, in node order.
    pub fn cut_reports(&self) -> Result<Vec<CutReport>, Error> {
        self.subsystem.labels().map(|label| self.analyze_cut(label)).collect()
    }

    /// The node whose cut destroys the least information.
    ///
    /// Ties go to the first node in node order. A NaN total never beats a
    /// number; it is only returned when every total is NaN. Returns `None` for
    /// an empty subsystem.
    pub fn minimum_cut(&self) -> Result<Option<MinimumCut>, Error> {
        let mut best: Option<MinimumCut> = None;
        for label in self.subsystem.labels() {
            let report = self.analyze_cut(label)?;
            if best.as_ref().map_or(true, |b| improves(report.total_destroyed, b.total_destroyed)) {
                best = Some(MinimumCut {
                    node: report.target,
                    total_destroyed: report.total_destroyed,
                });
            }
        }
        if let Some(best) = &best {
            debug!("minimum_cut = {} ({})", best.node, best.total_destroyed);
        }
        Ok(best)
    }
}

/// Whether `total` is a strictly better minimum than `best`.
fn improves(total: f64, best: f64) -> bool {
    match (total.is_nan(), best.is_nan()) {
        (false, true) => true,
        (true, _) => false,
        (false, false) => total < best,
    }
}
