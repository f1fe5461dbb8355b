//! Errors reported before a simulation starts.
//!
//! Engines never return partial results: input is validated up front and a
//! run that starts always completes.

use std::fmt;

/// Input column or parameter an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ArrivalTime,
    BurstTime,
    Priority,
    TimeQuantum,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArrivalTime => "arrival time",
            Self::BurstTime => "burst time",
            Self::Priority => "priority",
            Self::TimeQuantum => "time quantum",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// No processes were supplied
    EmptyInput,
    /// A column's length differs from the number of process names
    InvalidInputLength {
        field: Field,
        expected: usize,
        found: usize,
    },
    /// Negative arrival time, non-positive burst time or quantum.
    /// `index` is `None` for scalar parameters.
    InvalidValue {
        field: Field,
        index: Option<usize>,
        value: i64,
    },
    DuplicateName {
        name: String,
    },
    UnknownAlgorithm {
        code: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no processes to schedule"),
            Self::InvalidInputLength {
                field,
                expected,
                found,
            } => write!(f, "expected {expected} values for {field}, found {found}"),
            Self::InvalidValue {
                field,
                index: Some(index),
                value,
            } => write!(f, "invalid {field} {value} for process #{index}"),
            Self::InvalidValue {
                field,
                index: None,
                value,
            } => write!(f, "invalid {field} {value}"),
            Self::DuplicateName { name } => write!(f, "process name {name:?} is used twice"),
            Self::UnknownAlgorithm { code } => write!(f, "unknown scheduling algorithm {code:?}"),
        }
    }
}

impl std::error::Error for SimError {}

pub type SimResult<T> = Result<T, SimError>;
