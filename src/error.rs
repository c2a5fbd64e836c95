//! Error types.
//!
//! Configuration and state errors are raised while a network or a state is
//! being built, so a malformed network never reaches table construction or
//! cut analysis. Oracle errors come from the integrated-information
//! computation behind [`InformationOracle`][crate::oracle::InformationOracle].

use std::fmt::{Display, Formatter};

use crate::gate::Gate;

/// A single-input gate was given several inputs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ArityError {
    pub gate: Gate,
    pub max: usize,
    pub given: usize,
}

impl Display for ArityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} gates accept at most {} input(s), got {}",
            self.gate, self.max, self.given
        )
    }
}

impl std::error::Error for ArityError {}

/// Malformed or inconsistent network configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// Labels used as inputs but never declared as nodes.
    UndeclaredInputs(Vec<String>),
    /// A node label declared more than once.
    DuplicateLabel(String),
    /// A gate name missing from the registry.
    UnknownGate(String),
    /// A node declares more inputs than its gate accepts.
    Arity { label: String, source: ArityError },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UndeclaredInputs(labels) => {
                write!(f, "Nodes {:?} are given as inputs but are not declared as nodes", labels)
            }
            ConfigError::DuplicateLabel(label) => write!(f, "Duplicate node label: {}", label),
            ConfigError::UnknownGate(name) => write!(f, "Unknown gate: {}", name),
            ConfigError::Arity { label, source } => write!(f, "Node {}: {}", label, source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Arity { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Invalid state or state configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StateError {
    /// State vector length does not match the node count.
    Size { expected: usize, found: usize },
    /// A node-list configuration gives both `on` and `off`, or neither.
    Spec,
    /// A node-list configuration names a node that does not exist.
    UnknownNode(String),
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::Size { expected, found } => write!(
                f,
                "Mis-sized state: expected the state of all {} nodes, got {}",
                expected, found
            ),
            StateError::Spec => write!(f, "State config must specify exactly one of `on` or `off` nodes"),
            StateError::UnknownNode(label) => write!(f, "Unknown node in state config: {}", label),
        }
    }
}

impl std::error::Error for StateError {}

/// Failure reported by an information oracle.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleError {
    /// The subsystem has no causal structure to evaluate.
    Degenerate(String),
    /// Any other failure. Never retried or swallowed.
    Failed(String),
}

impl Display for OracleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleError::Degenerate(msg) => write!(f, "Degenerate subsystem: {}", msg),
            OracleError::Failed(msg) => write!(f, "Oracle failure: {}", msg),
        }
    }
}

impl std::error::Error for OracleError {}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Config(ConfigError),
    State(StateError),
    Oracle(OracleError),
    /// A label that is not a node of the network or subsystem at hand.
    UnknownNode(String),
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Error::State(e)
    }
}

impl From<OracleError> for Error {
    fn from(e: OracleError) -> Self {
        Error::Oracle(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::State(e) => write!(f, "State error: {}", e),
            Error::Oracle(e) => write!(f, "{}", e),
            Error::UnknownNode(label) => write!(f, "Unknown node: {}", label),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::State(e) => Some(e),
            Error::Oracle(e) => Some(e),
            Error::UnknownNode(_) => None,
        }
    }
}
