//! Operator precedence and the binary-operator-call encoding (§8 scenario 1:
//! `1 + 2 * 3` parses as `"+"(1, "*"(2, 3))`, never `"*"("+"(1, 2), 3)`).

use vhdl_ast::node::{LiteralValue, NodeKind};
use vhdl_parser::{ParseUnits, Parser};
use vhdl_source::types::{FileID, SourceFile};

fn variable_value(src_stmt: &str) -> (Parser<'_>, vhdl_ast::arena::NodeId) {
    let src = format!(
        "architecture rtl of e is\n\
         begin\n\
         process\n\
         variable x : integer;\n\
         begin\n\
         x := {src_stmt};\n\
         end process;\n\
         end rtl;"
    );
    let file = Box::leak(Box::new(SourceFile::new(FileID::new(1), "t.vhd".into(), src.as_str())));
    let mut parser = Parser::new(file);
    let unit = parser.parse().expect("expected a parsed design unit");
    assert_eq!(parser.n_errors(), 0, "unexpected parse errors: {:?}", parser.errors());
    let arena = parser.arena();
    let design_unit = arena.get(unit).unwrap();
    let arch = arena.get(design_unit.stmts[0]).unwrap();
    let process = arena.get(arch.stmts[0]).unwrap();
    let assign = arena.get(process.stmts[0]).unwrap();
    let value = assign.value.unwrap();
    drop(arena);
    (parser, value)
}

fn int_lit(arena: &vhdl_ast::arena::Arena, id: vhdl_ast::arena::NodeId, expected: i64) {
    let node = arena.get(id).unwrap();
    assert_eq!(node.kind, NodeKind::Literal);
    match node.literal {
        Some(LiteralValue::Integer(v)) => assert_eq!(v, expected),
        ref other => panic!("expected integer literal {expected}, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let (parser, value) = variable_value("1 + 2 * 3");
    let arena = parser.arena();

    let plus = arena.get(value).unwrap();
    assert_eq!(plus.kind, NodeKind::FCall);
    assert_eq!(plus.ident.as_ref().unwrap().as_str(), "+");
    assert_eq!(plus.params.len(), 2);
    int_lit(arena, plus.params[0], 1);

    let star = arena.get(plus.params[1]).unwrap();
    assert_eq!(star.kind, NodeKind::FCall);
    assert_eq!(star.ident.as_ref().unwrap().as_str(), "*");
    int_lit(arena, star.params[0], 2);
    int_lit(arena, star.params[1], 3);
}

#[test]
fn unary_minus_binds_tighter_than_addition() {
    let (parser, value) = variable_value("-1 + 2");
    let arena = parser.arena();

    let plus = arena.get(value).unwrap();
    assert_eq!(plus.kind, NodeKind::FCall);
    assert_eq!(plus.ident.as_ref().unwrap().as_str(), "+");

    let neg = arena.get(plus.params[0]).unwrap();
    assert_eq!(neg.kind, NodeKind::FCall);
    assert_eq!(neg.ident.as_ref().unwrap().as_str(), "-");
    assert_eq!(neg.params.len(), 1);
    int_lit(arena, neg.params[0], 1);
}

#[test]
fn relational_operators_sit_below_simple_expressions() {
    let (parser, value) = variable_value("1 + 1 = 2");
    let arena = parser.arena();

    let eq = arena.get(value).unwrap();
    assert_eq!(eq.kind, NodeKind::FCall);
    assert_eq!(eq.ident.as_ref().unwrap().as_str(), "=");

    let plus = arena.get(eq.params[0]).unwrap();
    assert_eq!(plus.kind, NodeKind::FCall);
    assert_eq!(plus.ident.as_ref().unwrap().as_str(), "+");
    int_lit(arena, eq.params[1], 2);
}

#[test]
fn exponentiation_binds_tighter_than_multiplication() {
    let (parser, value) = variable_value("2 * 3 ** 2");
    let arena = parser.arena();

    let star = arena.get(value).unwrap();
    assert_eq!(star.kind, NodeKind::FCall);
    assert_eq!(star.ident.as_ref().unwrap().as_str(), "*");
    int_lit(arena, star.params[0], 2);

    let exp = arena.get(star.params[1]).unwrap();
    assert_eq!(exp.kind, NodeKind::FCall);
    assert_eq!(exp.ident.as_ref().unwrap().as_str(), "**");
    int_lit(arena, exp.params[0], 3);
    int_lit(arena, exp.params[1], 2);
}

#[test]
fn parentheses_override_precedence() {
    let (parser, value) = variable_value("(1 + 2) * 3");
    let arena = parser.arena();

    let star = arena.get(value).unwrap();
    assert_eq!(star.kind, NodeKind::FCall);
    assert_eq!(star.ident.as_ref().unwrap().as_str(), "*");

    let plus = arena.get(star.params[0]).unwrap();
    assert_eq!(plus.kind, NodeKind::FCall);
    assert_eq!(plus.ident.as_ref().unwrap().as_str(), "+");
    int_lit(arena, star.params[1], 3);
}
