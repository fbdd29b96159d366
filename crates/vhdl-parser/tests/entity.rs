//! Entity-declaration shapes (§8 scenario 5: "an entity with two `in`
//! ports parses without error and both ports are visible in `ports`").

use vhdl_ast::node::{NodeKind, PortMode};
use vhdl_parser::{ParseUnits, Parser};
use vhdl_source::types::{FileID, SourceFile};

#[test]
fn entity_with_two_in_ports() {
    let src = "entity adder is\n\
               port (a : in bit; b : in bit);\n\
               end entity;";
    let file = SourceFile::new(FileID::new(1), "t.vhd".into(), src);
    let mut parser = Parser::new(&file);
    let unit = parser.parse().expect("a design unit should always be produced for non-empty input");
    assert_eq!(parser.n_errors(), 0, "unexpected parse errors: {:?}", parser.errors());

    let arena = parser.arena();
    let design_unit = arena.get(unit).unwrap();
    assert_eq!(design_unit.kind, NodeKind::DesignUnit);
    let entity_id = design_unit.stmts[0];
    let entity = arena.get(entity_id).unwrap();
    assert_eq!(entity.kind, NodeKind::EntityDecl);
    assert_eq!(entity.ports.len(), 2);

    for port_id in &entity.ports {
        let port = arena.get(*port_id).unwrap();
        assert_eq!(port.kind, NodeKind::PortDecl);
        assert_eq!(port.mode, Some(PortMode::In));
    }
}

#[test]
fn entity_end_label_mismatch_is_accepted() {
    // §4.F design note: the closing identifier is never checked against the
    // entity's own name; a mismatch is silently accepted rather than
    // reported as an error.
    let src = "entity foo is\nend entity bar;";
    let file = SourceFile::new(FileID::new(1), "t.vhd".into(), src);
    let mut parser = Parser::new(&file);
    let unit = parser.parse();
    assert!(unit.is_some());
    assert_eq!(parser.n_errors(), 0);
}

#[test]
fn entity_with_generic_and_port_clauses() {
    let src = "entity counter is\n\
               generic (width : in natural);\n\
               port (clk : in bit; q : out bit);\n\
               end counter;";
    let file = SourceFile::new(FileID::new(1), "t.vhd".into(), src);
    let mut parser = Parser::new(&file);
    let unit = parser.parse();
    assert!(unit.is_some());
    assert_eq!(parser.n_errors(), 0);
}
