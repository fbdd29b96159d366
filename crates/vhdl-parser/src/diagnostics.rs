//! The diagnostic & recovery controller (§4.C): cascade-suppression error
//! reporting. Coupled deliberately to `consume`/`one_of` rather than split
//! into a separate skip-until-resync pass (§9 design note) — the buffer only
//! ever advances one token per reported or suppressed error.

use thiserror::Error;
use vhdl_source::types::Location;

use crate::lexer::TokenKind;

/// Number of consecutive correct consumes required before another error is
/// reported (§4.C).
pub const RECOVER_THRESH: u32 = 5;

/// An unrecognised byte the scanner's DFA could not classify (§1: lexical
/// detail is out of scope, but the byte is still surfaced rather than
/// silently vanishing from every diagnostic-facing API).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("unrecognised byte {byte_repr:?} in input")]
pub struct LexError {
    pub byte_repr: String,
    pub loc: Location,
}

/// A recoverable parse error (§7, class 1): an expected-token mismatch.
/// Never aborts the parse; the lookahead buffer has already advanced past
/// the offending token by the time this is constructed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// `consume(expected)` saw a different token.
    #[error("expected {expected} but found {found} while parsing {hint}")]
    Mismatch { expected: TokenKind, found: TokenKind, hint: String, loc: Location },

    /// `expect`/`one_of` saw a token outside the acceptable set.
    #[error("unexpected {found} while parsing {hint}, expecting one of {}", format_set(expected))]
    NoneOf { found: TokenKind, expected: Vec<TokenKind>, hint: String, loc: Location },
}

fn format_set(set: &[TokenKind]) -> String {
    set.iter().map(|t| t.describe()).collect::<Vec<_>>().join(", ")
}

impl ParseError {
    #[must_use]
    pub const fn loc(&self) -> &Location {
        match self {
            Self::Mismatch { loc, .. } | Self::NoneOf { loc, .. } => loc,
        }
    }
}

/// Tracks `n_errors` (reported) and `n_correct` (consecutive successful
/// consumes) and applies the cascade-suppression policy (§4.C, §8: "exactly
/// one error is reported; further mismatches are suppressed until another
/// ≥ `RECOVER_THRESH` run").
#[derive(Debug)]
pub struct DiagnosticReporter {
    n_errors: u32,
    n_correct: u32,
    errors: Vec<ParseError>,
}

impl Default for DiagnosticReporter {
    fn default() -> Self { Self::new() }
}

impl DiagnosticReporter {
    #[must_use]
    pub fn new() -> Self {
        // `parse()` primes `n_correct` to the threshold (§6 `parse()`
        // resets it this way) so the very first mismatch in a unit is
        // reported rather than suppressed.
        Self { n_errors: 0, n_correct: RECOVER_THRESH, errors: Vec::new() }
    }

    pub fn reset(&mut self) {
        self.n_errors = 0;
        self.n_correct = RECOVER_THRESH;
        self.errors.clear();
    }

    #[must_use]
    pub const fn n_errors(&self) -> u32 { self.n_errors }

    #[must_use]
    pub fn errors(&self) -> &[ParseError] { &self.errors }

    pub fn record_match(&mut self) {
        self.n_correct += 1;
    }

    /// Records a mismatch, emitting `build()` only if the cascade-suppression
    /// threshold has been reached (§4.C). Always resets the correct-run
    /// counter, matching `consume`'s `n_correct = 0` on every mismatch.
    pub fn record_mismatch(&mut self, build: impl FnOnce() -> ParseError) {
        if self.n_correct >= RECOVER_THRESH {
            let err = build();
            log::debug!("parse error: {err}");
            self.errors.push(err);
            self.n_errors += 1;
        } else {
            log::trace!("suppressing cascade error ({}/{RECOVER_THRESH} correct)", self.n_correct);
        }
        self.n_correct = 0;
    }
}

#[cfg(test)]
mod tests {
    use vhdl_source::types::Location;

    use super::*;

    fn dummy_err() -> ParseError {
        ParseError::Mismatch {
            expected: TokenKind::Semi,
            found: TokenKind::End,
            hint: "test".into(),
            loc: Location::INVALID,
        }
    }

    #[test]
    fn suppresses_cascade_after_first_error() {
        let mut r = DiagnosticReporter::new();
        r.record_mismatch(dummy_err);
        assert_eq!(r.n_errors(), 1);

        // Fewer than RECOVER_THRESH correct consumes follow immediately.
        for _ in 0..(RECOVER_THRESH - 1) {
            r.record_match();
            r.record_mismatch(dummy_err);
        }
        assert_eq!(r.n_errors(), 1, "cascade after the first error must stay suppressed");
    }

    #[test]
    fn resumes_reporting_after_a_full_correct_run() {
        let mut r = DiagnosticReporter::new();
        r.record_mismatch(dummy_err);
        for _ in 0..RECOVER_THRESH {
            r.record_match();
        }
        r.record_mismatch(dummy_err);
        assert_eq!(r.n_errors(), 2);
    }
}
