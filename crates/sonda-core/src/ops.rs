// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::SondaError;
use std::fmt;
use std::str::FromStr;

/// Relational operator used by template conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessOrEqual,
}

impl Op {
    /// Every operator, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Equal,
        Self::NotEqual,
        Self::GreaterThan,
        Self::GreaterOrEqual,
        Self::LessThan,
        Self::LessOrEqual,
    ];

    /// Apply the operator to two values of the same kind.
    ///
    /// Uses `PartialOrd`, so any comparison involving a float NaN is false
    /// except `NotEqual`.
    #[must_use]
    pub fn eval<T: PartialOrd + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            Self::Equal => left == right,
            Self::NotEqual => left != right,
            Self::GreaterThan => left > right,
            Self::GreaterOrEqual => left >= right,
            Self::LessThan => left < right,
            Self::LessOrEqual => left <= right,
        }
    }

    /// True for the operators that hold when both sides are equal
    #[must_use]
    pub const fn is_reflexive(self) -> bool {
        matches!(self, Self::Equal | Self::GreaterOrEqual | Self::LessOrEqual)
    }

    /// Operator symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Op {
    type Err = SondaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" | "eq" => Ok(Self::Equal),
            "!=" | "ne" => Ok(Self::NotEqual),
            ">" | "gt" => Ok(Self::GreaterThan),
            ">=" | "ge" => Ok(Self::GreaterOrEqual),
            "<" | "lt" => Ok(Self::LessThan),
            "<=" | "le" => Ok(Self::LessOrEqual),
            _ => Err(SondaError::InvalidOperator(s.to_string())),
        }
    }
}

/// Signal returned by a loop callback after each element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopCtl {
    /// Proceed to the next element
    #[default]
    Continue,
    /// Stop the whole iteration
    Break,
    /// Skip the rest of the current element's processing
    ContinueLoop,
}
