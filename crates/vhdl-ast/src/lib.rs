//! Tree (AST) definitions for the VHDL-like front end.
//!
//! The parser builds trees; the evaluator rewrites function-call nodes into
//! literal nodes in place. Both subsystems share the single node shape defined
//! in [`node`] and the arena defined in [`arena`].

pub mod arena;
pub mod ident;
pub mod node;

pub use arena::{Arena, NodeId};
pub use ident::Ident;
pub use node::*;
