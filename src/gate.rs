//! Logic gates used as node mechanisms.
//!
//! Every gate is a pure function from an ordered list of input bits to a
//! single output bit. Gates are resolved from their names once, when a
//! network is built, so evaluation never has to look anything up.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::{ArityError, ConfigError};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Gate {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Not,
    Copy,
    Majority,
    Minority,
    Parity,
    /// Outputs 1 iff at least `k` inputs are 1.
    AtLeast(usize),
    /// Outputs 1 iff fewer than `k` inputs are 1.
    Below(usize),
    /// Constant 0, regardless of inputs.
    Null,
}

// Registry
impl Gate {
    /// Gate names accepted in network configurations, with aliases.
    pub const NAMES: &'static [(&'static str, Gate)] = &[
        ("AND", Gate::And),
        ("NAND", Gate::Nand),
        ("OR", Gate::Or),
        ("NOR", Gate::Nor),
        ("COPY", Gate::Copy),
        ("NOT", Gate::Not),
        ("XOR", Gate::Xor),
        ("MAJORITY", Gate::Majority),
        ("MAJ", Gate::Majority),
        ("MINORITY", Gate::Minority),
        ("MIN", Gate::Minority),
        ("PARITY", Gate::Parity),
        ("PAR", Gate::Parity),
        ("NULL", Gate::Null),
    ];

    pub fn from_name(name: &str) -> Option<Gate> {
        Self::NAMES.iter().find(|(n, _)| *n == name).map(|&(_, gate)| gate)
    }
}

impl FromStr for Gate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gate::from_name(s).ok_or_else(|| ConfigError::UnknownGate(s.to_string()))
    }
}

// Getters
impl Gate {
    /// Largest number of inputs the gate accepts, if bounded.
    pub const fn max_inputs(&self) -> Option<usize> {
        match self {
            Gate::Not | Gate::Copy => Some(1),
            _ => None,
        }
    }

    pub fn check_arity(&self, num_inputs: usize) -> Result<(), ArityError> {
        match self.max_inputs() {
            Some(max) if num_inputs > max => Err(ArityError {
                gate: *self,
                max,
                given: num_inputs,
            }),
            _ => Ok(()),
        }
    }
}

// Evaluation
impl Gate {
    /// Evaluates the gate on the given inputs.
    ///
    /// Fails with [`ArityError`] if a single-input gate (`COPY`, `NOT`)
    /// receives more than one input.
    pub fn evaluate(&self, inputs: &[bool]) -> Result<bool, ArityError> {
        self.check_arity(inputs.len())?;
        Ok(self.apply(inputs))
    }

    /// Evaluates the gate without checking its arity.
    ///
    /// Networks validate arity when they are built, so their update step goes
    /// through here.
    pub(crate) fn apply(&self, inputs: &[bool]) -> bool {
        let total = inputs.len();
        let ones = inputs.iter().filter(|&&b| b).count();
        match self {
            Gate::And => ones == total,
            Gate::Nand => ones != total,
            Gate::Or | Gate::Copy => ones >= 1,
            Gate::Nor | Gate::Not => ones == 0,
            Gate::Xor => ones % 2 == 1,
            Gate::Parity => ones % 2 == 0,
            // `ones > total / 2` over the reals
            Gate::Majority => 2 * ones > total,
            Gate::Minority => 2 * ones <= total,
            Gate::AtLeast(k) => ones >= *k,
            Gate::Below(k) => ones < *k,
            Gate::Null => false,
        }
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::And => write!(f, "AND"),
            Gate::Or => write!(f, "OR"),
            Gate::Xor => write!(f, "XOR"),
            Gate::Nand => write!(f, "NAND"),
            Gate::Nor => write!(f, "NOR"),
            Gate::Not => write!(f, "NOT"),
            Gate::Copy => write!(f, "COPY"),
            Gate::Majority => write!(f, "MAJORITY"),
            Gate::Minority => write!(f, "MINORITY"),
            Gate::Parity => write!(f, "PARITY"),
            Gate::AtLeast(k) => write!(f, "AT_LEAST({})", k),
            Gate::Below(k) => write!(f, "BELOW({})", k),
            Gate::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn check(gate: Gate, expected: &[(&[u8], bool)]) {
        for &(inputs, output) in expected {
            let inputs: Vec<bool> = inputs.iter().map(|&b| b == 1).collect();
            assert_eq!(gate.evaluate(&inputs), Ok(output), "{} on {:?}", gate, inputs);
        }
    }

    #[test]
    fn test_and() {
        check(Gate::And, &[(&[0, 0], false), (&[0, 1], false), (&[1, 0], false), (&[1, 1], true)]);
    }

    #[test]
    fn test_or() {
        check(Gate::Or, &[(&[0, 0], false), (&[0, 1], true), (&[1, 0], true), (&[1, 1], true)]);
    }

    #[test]
    fn test_nand_nor() {
        check(Gate::Nand, &[(&[1, 1], false), (&[1, 0], true)]);
        check(Gate::Nor, &[(&[0, 0], true), (&[0, 1], false)]);
    }

    #[test]
    fn test_copy() {
        check(Gate::Copy, &[(&[0], false), (&[1], true)]);
        let err = Gate::Copy.evaluate(&[false, true]).unwrap_err();
        assert_eq!(err.gate, Gate::Copy);
        assert_eq!(err.given, 2);
    }

    #[test]
    fn test_not() {
        check(Gate::Not, &[(&[0], true), (&[1], false)]);
        assert!(Gate::Not.evaluate(&[false, true]).is_err());
        assert!(Gate::Not.evaluate(&[true, true, true]).is_err());
    }

    #[test]
    fn test_xor() {
        check(
            Gate::Xor,
            &[
                (&[0, 0], false),
                (&[0, 1], true),
                (&[1, 0], true),
                (&[1, 1], false),
                (&[0, 1, 0], true),
                (&[1, 0, 1], false),
                (&[1, 1, 1], true),
            ],
        );
    }

    #[test]
    fn test_majority_minority() {
        check(
            Gate::Majority,
            &[
                (&[0, 0], false),
                (&[0, 1], false),
                (&[1, 1], true),
                (&[0, 1, 0], false),
                (&[1, 0, 1], true),
                (&[1, 1, 1], true),
            ],
        );
        // Exactly half counts as a minority.
        check(Gate::Minority, &[(&[0, 1], true), (&[1, 1], false), (&[1, 0, 0], true), (&[1, 1, 0], false)]);
    }

    #[test]
    fn test_parity() {
        check(Gate::Parity, &[(&[], true), (&[1], false), (&[1, 1], true), (&[1, 1, 1], false)]);
    }

    #[test]
    fn test_thresholds() {
        check(Gate::AtLeast(2), &[(&[1, 0, 0], false), (&[1, 0, 1], true)]);
        check(Gate::Below(2), &[(&[1, 0, 0], true), (&[1, 1, 0], false)]);
        check(Gate::Null, &[(&[1, 1], false), (&[], false)]);
    }

    #[test]
    fn test_registry() {
        assert_eq!("AND".parse::<Gate>().unwrap(), Gate::And);
        assert_eq!("MAJ".parse::<Gate>().unwrap(), Gate::Majority);
        assert_eq!("PAR".parse::<Gate>().unwrap(), Gate::Parity);
        assert!(matches!("FOO".parse::<Gate>(), Err(ConfigError::UnknownGate(name)) if name == "FOO"));
    }
}
