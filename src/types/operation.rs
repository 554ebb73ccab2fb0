//! Block aggregation operators

use crate::error::RebinError;
use std::fmt;
use std::str::FromStr;

/// Aggregation applied to every block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Sum,
    /// Arithmetic mean, also accepted as `average` and `avg`
    Mean,
    Min,
    Max,
    Median,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Sum,
        Operation::Mean,
        Operation::Min,
        Operation::Max,
        Operation::Median,
    ];

    /// Canonical lower-case name
    pub fn name(self) -> &'static str {
        match self {
            Operation::Sum => "sum",
            Operation::Mean => "mean",
            Operation::Min => "min",
            Operation::Max => "max",
            Operation::Median => "median",
        }
    }

    /// Look up an operation by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "sum" => Some(Operation::Sum),
            "mean" | "average" | "avg" => Some(Operation::Mean),
            "min" => Some(Operation::Min),
            "max" => Some(Operation::Max),
            "median" => Some(Operation::Median),
            _ => None,
        }
    }
}

impl FromStr for Operation {
    type Err = RebinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::from_name(s).ok_or_else(|| RebinError::UnsupportedOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
