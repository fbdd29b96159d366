//! Command implementations for the front end's CLI.

pub mod fold;
pub mod parse;
