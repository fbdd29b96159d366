//! The built-in folder (§4.H): applies integer/real/logical/aggregate
//! operators to literal arguments. Folding a call is always a best-effort,
//! never-fail operation from the caller's point of view — an unrecognised
//! builtin name inside a matched domain, or a call outside every domain,
//! simply falls through unfolded rather than being treated as an error.

use vhdl_ast::arena::{Arena, NodeId};
use vhdl_ast::ident::Ident;
use vhdl_ast::node::{AssocKind, LiteralValue, Node, NodeKind};
use vhdl_source::types::Location;

/// A call with more parameters than this is never folded (§4.H).
pub const MAX_BUILTIN_ARGS: usize = 2;

/// The canonical type name a boolean reference's referent must belong to
/// (§4.H: "a reference to an enumeration literal of a type whose canonical
/// name is `STD.STANDARD.BOOLEAN`").
pub const BOOLEAN_TYPE_NAME: &str = "STD.STANDARD.BOOLEAN";

/// A folded scalar result, re-materialised into a tree node by [`to_node`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoldedValue {
    Int(i64),
    Real(f64),
    Bool(bool),
}

/// Turns a host-level folded result back into a tree node (§4.H: booleans
/// are represented structurally as a `Ref` to an enumeration literal).
pub fn to_node(arena: &mut Arena, value: FoldedValue, loc: Location) -> NodeId {
    match value {
        FoldedValue::Int(n) => {
            arena.alloc(|id| Node::new(id, NodeKind::Literal, loc.clone()).with_literal(LiteralValue::Integer(n)))
        }
        FoldedValue::Real(r) => {
            arena.alloc(|id| Node::new(id, NodeKind::Literal, loc.clone()).with_literal(LiteralValue::Real(r)))
        }
        FoldedValue::Bool(b) => make_bool_ref(arena, b, loc),
    }
}

/// Builds a `Ref` to a fresh `TRUE`/`FALSE` enumeration literal of
/// `STD.STANDARD.BOOLEAN` (§4.H: "a boolean literal is produced as a
/// reference to the corresponding enumeration literal of that same type").
pub fn make_bool_ref(arena: &mut Arena, value: bool, loc: Location) -> NodeId {
    let ty = arena.alloc(|id| Node::new(id, NodeKind::TypeRef, loc.clone()).with_ident(BOOLEAN_TYPE_NAME));
    let enum_lit = arena.alloc(|id| {
        let mut node =
            Node::new(id, NodeKind::EnumLit, loc.clone()).with_ident(if value { "TRUE" } else { "FALSE" });
        node.ty = Some(ty);
        node.ordinal = Some(i64::from(value));
        node
    });
    arena.alloc(|id| {
        let mut node = Node::new(id, NodeKind::Ref, loc.clone());
        node.referent = Some(enum_lit);
        node
    })
}

#[must_use]
pub fn get_int_lit(arena: &Arena, id: NodeId) -> Option<i64> {
    match arena.get(id)?.literal {
        Some(LiteralValue::Integer(n)) => Some(n),
        _ => None,
    }
}

#[must_use]
pub fn get_real_lit(arena: &Arena, id: NodeId) -> Option<f64> {
    match arena.get(id)?.literal {
        Some(LiteralValue::Real(r)) => Some(r),
        _ => None,
    }
}

/// Recognises a boolean value (§4.H): a `Ref` whose referent is an `EnumLit`
/// of `STD.STANDARD.BOOLEAN`, read off by its ordinal.
#[must_use]
pub fn get_bool_lit(arena: &Arena, id: NodeId) -> Option<bool> {
    let node = arena.get(id)?;
    if node.kind != NodeKind::Ref {
        return None;
    }
    let enum_node = arena.get(node.referent?)?;
    if enum_node.kind != NodeKind::EnumLit {
        return None;
    }
    let ty_node = arena.get(enum_node.ty?)?;
    if !ty_node.ident.as_ref().is_some_and(|name| name.icmp(BOOLEAN_TYPE_NAME)) {
        return None;
    }
    match enum_node.ordinal {
        Some(0) => Some(false),
        Some(1) => Some(true),
        _ => None,
    }
}

#[must_use]
pub fn folded_int(arena: &Arena, id: NodeId) -> bool { get_int_lit(arena, id).is_some() }

#[must_use]
pub fn folded_real(arena: &Arena, id: NodeId) -> bool { get_real_lit(arena, id).is_some() }

#[must_use]
pub fn folded_bool(arena: &Arena, id: NodeId) -> bool { get_bool_lit(arena, id).is_some() }

/// An aggregate whose every `named` key and every `ranged` endpoint is an
/// integer literal (§4.I: required before the interpreter will treat an
/// aggregate as a constant value).
#[must_use]
pub fn folded_agg(arena: &Arena, id: NodeId) -> bool {
    let Some(node) = arena.get(id) else { return false };
    if node.kind != NodeKind::Aggregate {
        return false;
    }
    node.assocs.iter().all(|assoc_id| {
        let Some(assoc) = arena.get(*assoc_id) else { return false };
        match assoc.assoc_kind {
            Some(AssocKind::Named) => assoc.target.is_some_and(|key| folded_int(arena, key)),
            Some(AssocKind::Ranged) => assoc.range.is_some_and(|r| folded_int(arena, r.left) && folded_int(arena, r.right)),
            Some(AssocKind::Positional | AssocKind::Others) | None => true,
        }
    })
}

/// A value the interpreter can bind or return as-is (§4.I: "`folded()`
/// (literal, foldable aggregate, or boolean)").
#[must_use]
pub fn folded(arena: &Arena, id: NodeId) -> bool {
    folded_int(arena, id) || folded_real(arena, id) || folded_bool(arena, id) || folded_agg(arena, id)
}

/// Given a foldable aggregate, collects the integer index keys appearing in
/// its `named` and `ranged` associations (§4.H: "ranges contribute both
/// endpoints").
fn agg_index_keys(arena: &Arena, agg: NodeId) -> Vec<i64> {
    let Some(node) = arena.get(agg) else { return Vec::new() };
    let mut keys = Vec::new();
    for assoc_id in &node.assocs {
        let Some(assoc) = arena.get(*assoc_id) else { continue };
        match assoc.assoc_kind {
            Some(AssocKind::Named) => {
                if let Some(key) = assoc.target.and_then(|key| get_int_lit(arena, key)) {
                    keys.push(key);
                }
            }
            Some(AssocKind::Ranged) => {
                if let Some(range) = assoc.range {
                    keys.extend(get_int_lit(arena, range.left));
                    keys.extend(get_int_lit(arena, range.right));
                }
            }
            Some(AssocKind::Positional | AssocKind::Others) | None => {}
        }
    }
    keys
}

/// Logical operators (§4.H): all operands and the result are booleans.
pub fn simp_fcall_log(builtin: &Ident, args: &[bool]) -> Option<FoldedValue> {
    let lower = builtin.as_str().to_ascii_lowercase();
    let result = match (lower.as_str(), args) {
        ("not", [a]) => !a,
        ("and", [a, b]) => *a && *b,
        ("nand", [a, b]) => !(*a && *b),
        ("or", [a, b]) => *a || *b,
        ("nor", [a, b]) => !(*a || *b),
        ("xor", [a, b]) => a != b,
        ("xnor", [a, b]) => a == b,
        _ => return None,
    };
    Some(FoldedValue::Bool(result))
}

/// Integer operators (§4.H): `mul`/`div`/`add`/`sub`/`neg`/`identity` plus
/// the integer-only `leq`/`geq`, and the shared comparisons. Division
/// truncates toward zero (host two's-complement semantics); overflow wraps.
pub fn simp_fcall_int(builtin: &Ident, args: &[i64]) -> Option<FoldedValue> {
    let lower = builtin.as_str().to_ascii_lowercase();
    match (lower.as_str(), args) {
        ("mul", [a, b]) => Some(FoldedValue::Int(a.wrapping_mul(*b))),
        ("div", [a, b]) if *b != 0 => Some(FoldedValue::Int(a.wrapping_div(*b))),
        ("add", [a, b]) => Some(FoldedValue::Int(a.wrapping_add(*b))),
        ("sub", [a, b]) => Some(FoldedValue::Int(a.wrapping_sub(*b))),
        ("neg", [a]) => Some(FoldedValue::Int(a.wrapping_neg())),
        ("identity", [a]) => Some(FoldedValue::Int(*a)),
        ("eq", [a, b]) => Some(FoldedValue::Bool(a == b)),
        ("neq", [a, b]) => Some(FoldedValue::Bool(a != b)),
        ("gt", [a, b]) => Some(FoldedValue::Bool(a > b)),
        ("lt", [a, b]) => Some(FoldedValue::Bool(a < b)),
        ("leq", [a, b]) => Some(FoldedValue::Bool(a <= b)),
        ("geq", [a, b]) => Some(FoldedValue::Bool(a >= b)),
        _ => None,
    }
}

/// Real operators (§4.H): the shared numeric set minus `leq`/`geq`
/// (integer-only). Comparisons use host IEEE-754 equality as-is.
pub fn simp_fcall_real(builtin: &Ident, args: &[f64]) -> Option<FoldedValue> {
    let lower = builtin.as_str().to_ascii_lowercase();
    match (lower.as_str(), args) {
        ("mul", [a, b]) => Some(FoldedValue::Real(a * b)),
        ("div", [a, b]) => Some(FoldedValue::Real(a / b)),
        ("add", [a, b]) => Some(FoldedValue::Real(a + b)),
        ("sub", [a, b]) => Some(FoldedValue::Real(a - b)),
        ("neg", [a]) => Some(FoldedValue::Real(-a)),
        ("identity", [a]) => Some(FoldedValue::Real(*a)),
        ("eq", [a, b]) => Some(FoldedValue::Bool(a == b)),
        ("neq", [a, b]) => Some(FoldedValue::Bool(a != b)),
        ("gt", [a, b]) => Some(FoldedValue::Bool(a > b)),
        ("lt", [a, b]) => Some(FoldedValue::Bool(a < b)),
        _ => None,
    }
}

/// Aggregate operators (§4.H): `agg_low`/`agg_high` over a single aggregate
/// argument's explicit integer index keys.
pub fn simp_fcall_agg(arena: &Arena, builtin: &Ident, args: &[NodeId]) -> Option<FoldedValue> {
    let [agg] = args else { return None };
    let keys = agg_index_keys(arena, *agg);
    if keys.is_empty() {
        return None;
    }
    if builtin.icmp("agg_low") {
        return keys.iter().min().copied().map(FoldedValue::Int);
    }
    if builtin.icmp("agg_high") {
        return keys.iter().max().copied().map(FoldedValue::Int);
    }
    None
}

/// Folds a builtin call given its already-reduced argument nodes, trying
/// each domain in the fixed order int → log → agg → real (§4.H, §9's second
/// open question: "fold-order dispatch is implemented exactly as
/// `int → log → agg → real`").
#[must_use]
pub fn fold_builtin(arena: &mut Arena, builtin: &Ident, params: &[NodeId], loc: Location) -> Option<NodeId> {
    if params.is_empty() || params.len() > MAX_BUILTIN_ARGS {
        return None;
    }

    if let Some(ints) = params.iter().map(|p| get_int_lit(arena, *p)).collect::<Option<Vec<_>>>() {
        if let Some(value) = simp_fcall_int(builtin, &ints) {
            return Some(to_node(arena, value, loc));
        }
    }
    if let Some(bools) = params.iter().map(|p| get_bool_lit(arena, *p)).collect::<Option<Vec<_>>>() {
        if let Some(value) = simp_fcall_log(builtin, &bools) {
            return Some(to_node(arena, value, loc));
        }
    }
    if params.iter().all(|p| folded_agg(arena, *p)) {
        if let Some(value) = simp_fcall_agg(arena, builtin, params) {
            return Some(to_node(arena, value, loc));
        }
    }
    if let Some(reals) = params.iter().map(|p| get_real_lit(arena, *p)).collect::<Option<Vec<_>>>() {
        if let Some(value) = simp_fcall_real(builtin, &reals) {
            return Some(to_node(arena, value, loc));
        }
    }
    None
}
