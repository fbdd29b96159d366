//! Parse command implementation: reads a source file, runs the grammar
//! driver over it, and reports diagnostics (§10.C: both error families are
//! aggregated into `anyhow::Error` at this process boundary).

use std::path::Path;

use anyhow::{bail, Context, Result};
use vhdl_ast::arena::{Arena, NodeId};
use vhdl_ast::node::Node;
use vhdl_parser::{ParseUnits, Parser};
use vhdl_source::mapper;
use vhdl_source::types::SourceManager;

/// Reads and parses `path`, printing every collected diagnostic. Parse
/// errors are recoverable (§4.E) so parsing always runs to completion; the
/// command itself fails only once every design unit has been produced and
/// at least one error was recorded.
pub fn run(path: &Path) -> Result<(Arena, Vec<NodeId>)> {
    let mut manager = SourceManager::new();
    let file_id = mapper::input_from_file(path, &mut manager).with_context(|| format!("reading {}", path.display()))?;
    let file = manager.get_file(file_id).expect("just-registered file is present");
    let mut parser = Parser::new(file);

    let mut units = Vec::new();
    while let Some(unit) = parser.parse() {
        units.push(unit);
    }

    for err in parser.lex_errors() {
        log::warn!("{err}");
    }
    for err in parser.errors() {
        eprintln!("error: {err}");
    }

    let n_errors = parser.n_errors();
    let arena = parser.into_arena();
    if n_errors > 0 {
        bail!("{n_errors} parse error(s) in {}", path.display());
    }

    println!("parsed {} design unit(s) from {}", units.len(), path.display());
    Ok((arena, units))
}

/// Prints an indented outline of the tree rooted at each design unit
/// (`--dump-tree`).
pub fn dump_tree(arena: &Arena, units: &[NodeId]) {
    for unit in units {
        dump_node(arena, *unit, 0);
    }
}

fn dump_node(arena: &Arena, id: NodeId, depth: usize) {
    let Some(node) = arena.get(id) else { return };
    let name = node.ident.as_ref().map_or_else(String::new, |ident| format!(" {ident}"));
    println!("{}{:?}{name}", "  ".repeat(depth), node.kind);

    for child in children_of(node) {
        dump_node(arena, child, depth + 1);
    }
}

pub(crate) fn children_of(node: &Node) -> Vec<NodeId> {
    let mut children = Vec::new();
    children.extend(node.ports.iter().copied());
    children.extend(node.generics.iter().copied());
    children.extend(node.decls.iter().copied());
    children.extend(node.stmts.iter().copied());
    children.extend(node.else_stmts.iter().copied());
    children.extend(node.params.iter().copied());
    children.extend(node.assocs.iter().copied());
    children.extend(node.waveforms.iter().copied());
    children.extend(node.triggers.iter().copied());
    children.extend(node.value);
    children.extend(node.target);
    children.extend(node.message);
    children.extend(node.severity);
    children
}
