//! The evaluator's single fatal-error type (§4.I, §7 class 3): unbound name
//! during folding, a non-constant aggregate where one was required, or an
//! unevaluable statement/expression kind. A fatal is always the caller's bug
//! — callers should invoke the evaluator only on calls already known to be
//! pure and constant-argumented — and is never caught inside the evaluator.

use thiserror::Error;
use vhdl_source::types::Location;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct EvalFatal {
    pub loc: Location,
    pub message: String,
}

impl EvalFatal {
    #[must_use]
    pub fn new(loc: Location, message: impl Into<String>) -> Self {
        Self { loc, message: message.into() }
    }
}
