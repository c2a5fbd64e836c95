use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use crate::error::{ArityError, ConfigError};
use crate::gate::Gate;

type MechanismFn = dyn Fn(&[bool]) -> bool + Send + Sync;

/// The update function of a node: a library gate or a user-supplied closure.
///
/// Custom mechanisms must be pure; they are called once per row of every
/// transition table built over the node.
#[derive(Clone)]
pub enum Mechanism {
    Gate(Gate),
    Custom { name: String, func: Arc<MechanismFn> },
}

// Constructors
impl Mechanism {
    pub fn custom(name: impl Into<String>, func: impl Fn(&[bool]) -> bool + Send + Sync + 'static) -> Self {
        Mechanism::Custom {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Resolves a gate name through the [`Gate`] registry.
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        name.parse().map(Mechanism::Gate)
    }
}

impl Mechanism {
    pub fn name(&self) -> String {
        match self {
            Mechanism::Gate(gate) => gate.to_string(),
            Mechanism::Custom { name, .. } => name.clone(),
        }
    }

    pub fn check_arity(&self, num_inputs: usize) -> Result<(), ArityError> {
        match self {
            Mechanism::Gate(gate) => gate.check_arity(num_inputs),
            Mechanism::Custom { .. } => Ok(()),
        }
    }

    pub fn evaluate(&self, inputs: &[bool]) -> Result<bool, ArityError> {
        self.check_arity(inputs.len())?;
        Ok(self.apply(inputs))
    }

    pub(crate) fn apply(&self, inputs: &[bool]) -> bool {
        match self {
            Mechanism::Gate(gate) => gate.apply(inputs),
            Mechanism::Custom { func, .. } => func(inputs),
        }
    }
}

impl From<Gate> for Mechanism {
    fn from(gate: Gate) -> Self {
        Mechanism::Gate(gate)
    }
}

impl Display for Mechanism {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mechanism::Gate(gate) => Display::fmt(gate, f),
            Mechanism::Custom { name, .. } => write!(f, "{}", name),
        }
    }
}

impl Debug for Mechanism {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mechanism::Gate(gate) => f.debug_tuple("Gate").field(gate).finish(),
            Mechanism::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish_non_exhaustive(),
        }
    }
}

/// How a node configuration names its mechanism.
#[derive(Debug, Clone)]
pub enum MechanismSpec {
    Named(String),
    Direct(Mechanism),
}

impl MechanismSpec {
    pub fn resolve(self) -> Result<Mechanism, ConfigError> {
        match self {
            MechanismSpec::Named(name) => Mechanism::named(&name),
            MechanismSpec::Direct(mechanism) => Ok(mechanism),
        }
    }
}

impl From<&str> for MechanismSpec {
    fn from(name: &str) -> Self {
        MechanismSpec::Named(name.to_string())
    }
}

impl From<String> for MechanismSpec {
    fn from(name: String) -> Self {
        MechanismSpec::Named(name)
    }
}

impl From<Gate> for MechanismSpec {
    fn from(gate: Gate) -> Self {
        MechanismSpec::Direct(Mechanism::Gate(gate))
    }
}

impl From<Mechanism> for MechanismSpec {
    fn from(mechanism: Mechanism) -> Self {
        MechanismSpec::Direct(mechanism)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_named() {
        let m = Mechanism::named("XOR").unwrap();
        assert_eq!(m.name(), "XOR");
        assert_eq!(m.evaluate(&[true, false, true]), Ok(false));
        assert!(Mechanism::named("xor").is_err());
    }

    #[test]
    fn test_custom() {
        let m = Mechanism::custom("FIRST", |xs| xs.first().copied().unwrap_or(false));
        assert_eq!(m.to_string(), "FIRST");
        assert_eq!(m.evaluate(&[true, false]), Ok(true));
        assert_eq!(m.evaluate(&[]), Ok(false));
    }

    #[test]
    fn test_single_input_gate() {
        let m = Mechanism::from(Gate::Not);
        assert!(m.check_arity(1).is_ok());
        assert!(m.check_arity(2).is_err());
    }

    #[test]
    fn test_spec_resolve() {
        let spec = MechanismSpec::from("OR");
        assert_eq!(spec.resolve().unwrap().name(), "OR");
        let spec = MechanismSpec::from("BOGUS");
        assert_eq!(spec.resolve().unwrap_err(), ConfigError::UnknownGate("BOGUS".to_string()));
    }
}
