//! A hand-written recursive-descent parser for a VHDL-like hardware
//! description language, producing the tree shape defined by `vhdl-ast`.
//!
//! The scanner's internal DFA (`lexer`) is a concrete implementation used to
//! drive the parser, but only its token/position interface is load-bearing:
//! the parser consumes a stream of [`lexer::Token`] values and never inspects
//! how they were produced.

pub mod diagnostics;
pub mod lexer;
pub mod parser;

pub use diagnostics::{DiagnosticReporter, LexError, ParseError};
pub use parser::{ParseUnits, Parser};
