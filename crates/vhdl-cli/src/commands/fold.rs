//! Fold command implementation: walks a parsed tree and offers every
//! function-call node it finds to the constant folder (§4.I, §10.D
//! `--fold`).
//!
//! The grammar driver performs no name resolution (§1), so a call node
//! fresh off the parser never carries a `referent`; `vhdl_eval::eval`
//! correctly leaves such calls unchanged (§4.I: "callee cannot be resolved
//! ⇒ return the call unchanged"). This command is therefore most useful
//! against hand- or tool-resolved trees; against raw parser output it
//! reports that nothing could be folded, which is the honest answer.

use anyhow::{Context, Result};
use vhdl_ast::arena::{Arena, NodeId};
use vhdl_ast::node::NodeKind;

use super::parse::children_of;

/// Replaces every foldable function call reachable from `units` with its
/// folded value, reporting how many calls were folded.
pub fn run(arena: &mut Arena, units: &[NodeId]) -> Result<()> {
    let calls = collect_fcalls(arena, units);
    let mut folded = 0usize;

    for call in calls {
        let replacement = vhdl_eval::eval(arena, call).with_context(|| format!("folding {call}"))?;
        if replacement != call {
            if let Some(node) = arena.get(replacement).cloned() {
                arena.replace(call, node);
                folded += 1;
            }
        }
    }

    println!("folded {folded} function call(s)");
    Ok(())
}

fn collect_fcalls(arena: &Arena, units: &[NodeId]) -> Vec<NodeId> {
    let mut calls = Vec::new();
    let mut stack: Vec<NodeId> = units.to_vec();
    while let Some(id) = stack.pop() {
        let Some(node) = arena.get(id) else { continue };
        if node.kind == NodeKind::FCall {
            calls.push(id);
        }
        stack.extend(children_of(node));
    }
    calls
}
