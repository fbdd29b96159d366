//! A tree-walking constant-folding evaluator for the `vhdl-ast` tree shape
//! (§4, §6): a value-table frame stack, a built-in operator folder, and the
//! interpreter that ties them together into `eval(call) → tree`.

pub mod builtins;
pub mod error;
pub mod interp;
pub mod vtable;

pub use builtins::{FoldedValue, MAX_BUILTIN_ARGS};
pub use error::EvalFatal;
pub use interp::eval;
pub use vtable::{Vtable, VTABLE_SZ};
