//! Black-box coverage of the built-in folder's domain partitioning (§4.H,
//! §8 scenario 2: "`not true` folds to the ordinal-0 boolean literal").

use vhdl_ast::arena::{Arena, NodeId};
use vhdl_ast::ident::Ident;
use vhdl_ast::node::{LiteralValue, Node, NodeKind};
use vhdl_eval::builtins::{fold_builtin, get_bool_lit, get_int_lit, get_real_lit, make_bool_ref};
use vhdl_source::types::Location;

fn int(arena: &mut Arena, n: i64) -> NodeId {
    arena.alloc(|id| Node::new(id, NodeKind::Literal, Location::INVALID).with_literal(LiteralValue::Integer(n)))
}

fn real(arena: &mut Arena, r: f64) -> NodeId {
    arena.alloc(|id| Node::new(id, NodeKind::Literal, Location::INVALID).with_literal(LiteralValue::Real(r)))
}

#[test]
fn not_true_folds_to_the_ordinal_zero_boolean_literal() {
    let mut arena = Arena::new();
    let t = make_bool_ref(&mut arena, true, Location::INVALID);
    let result = fold_builtin(&mut arena, &Ident::new("not"), &[t], Location::INVALID).unwrap();
    assert_eq!(get_bool_lit(&arena, result), Some(false));
}

#[test]
fn and_of_two_booleans_folds_correctly() {
    let mut arena = Arena::new();
    let t = make_bool_ref(&mut arena, true, Location::INVALID);
    let f = make_bool_ref(&mut arena, false, Location::INVALID);
    let result = fold_builtin(&mut arena, &Ident::new("and"), &[t, f], Location::INVALID).unwrap();
    assert_eq!(get_bool_lit(&arena, result), Some(false));
}

#[test]
fn real_division_folds_to_a_real_literal() {
    let mut arena = Arena::new();
    let a = real(&mut arena, 7.0);
    let b = real(&mut arena, 2.0);
    let result = fold_builtin(&mut arena, &Ident::new("div"), &[a, b], Location::INVALID).unwrap();
    assert_eq!(get_real_lit(&arena, result), Some(3.5));
}

#[test]
fn integer_only_leq_does_not_apply_to_reals() {
    let mut arena = Arena::new();
    let a = real(&mut arena, 1.0);
    let b = real(&mut arena, 2.0);
    assert!(fold_builtin(&mut arena, &Ident::new("leq"), &[a, b], Location::INVALID).is_none());
}

#[test]
fn integer_overflow_wraps_rather_than_panicking() {
    let mut arena = Arena::new();
    let a = int(&mut arena, i64::MAX);
    let b = int(&mut arena, 1);
    let result = fold_builtin(&mut arena, &Ident::new("add"), &[a, b], Location::INVALID).unwrap();
    assert_eq!(get_int_lit(&arena, result), Some(i64::MIN));
}

#[test]
fn division_by_zero_is_never_folded() {
    let mut arena = Arena::new();
    let a = int(&mut arena, 10);
    let b = int(&mut arena, 0);
    assert!(fold_builtin(&mut arena, &Ident::new("div"), &[a, b], Location::INVALID).is_none());
}

#[test]
fn builtin_names_are_case_insensitive() {
    let mut arena = Arena::new();
    let a = int(&mut arena, 3);
    let b = int(&mut arena, 4);
    let result = fold_builtin(&mut arena, &Ident::new("ADD"), &[a, b], Location::INVALID).unwrap();
    assert_eq!(get_int_lit(&arena, result), Some(7));
}

#[test]
fn zero_arguments_is_never_folded() {
    let mut arena = Arena::new();
    assert!(fold_builtin(&mut arena, &Ident::new("identity"), &[], Location::INVALID).is_none());
}
