//! Polynomials over arbitrary rings.
//!
//! Univariate polynomials are dense and are the workhorse of all field and
//! factorization code. Multivariate polynomials are sparse and are used as an
//! interchange format, most notably for the two-variable encoding of
//! polynomials over a number field.

pub mod factor;
pub mod polynomial;
pub mod resultant;
pub mod univariate;

use std::fmt::Display;

use smartstring::alias::String as SmartString;

/// A variable of a polynomial.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Variable {
    Symbol(SmartString),
    Temporary(usize),
}

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable::Symbol(name.into())
    }

    pub fn to_id(&self) -> Option<&str> {
        match self {
            Variable::Symbol(s) => Some(s.as_str()),
            Variable::Temporary(_) => None,
        }
    }
}

impl From<&str> for Variable {
    fn from(s: &str) -> Variable {
        Variable::new(s)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variable::Symbol(v) => f.write_str(v),
            Variable::Temporary(t) => f.write_fmt(format_args!("_TMP_{}", *t)),
        }
    }
}
