//! Source file handling and position tracking for the VHDL-like front end.
//!
//! This crate provides the fundamental types used for working with source code
//! throughout the compiler: file identifiers, positions, spans, and the
//! memory-mapped file mapper that turns a path on disk into a source buffer.
//!
//! The crate consists of two modules:
//! - [`types`]: `FileID`, `Position`, `Span`/`SourceSpan`, `Location`, `SourceFile`, `SourceManager`
//! - [`mapper`]: the memory-mapped file mapper (`input_from_file`) and line counter

pub mod mapper;
pub mod types;
