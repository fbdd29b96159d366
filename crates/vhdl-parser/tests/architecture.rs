//! Architecture bodies with processes and assertions (§8 scenario 6: process
//! declarative/statement parts and the `assert`/`report` desugarings).

use vhdl_ast::node::NodeKind;
use vhdl_parser::{ParseUnits, Parser};
use vhdl_source::types::{FileID, SourceFile};

#[test]
fn architecture_with_process_and_assert() {
    let src = "architecture rtl of adder is\n\
               signal s : bit;\n\
               begin\n\
               p : process (s)\n\
               begin\n\
               assert s = '1' report \"bad\" severity error;\n\
               end process;\n\
               end rtl;";
    let file = SourceFile::new(FileID::new(1), "t.vhd".into(), src);
    let mut parser = Parser::new(&file);
    let unit = parser.parse().expect("expected a parsed design unit");
    assert_eq!(parser.n_errors(), 0, "unexpected parse errors: {:?}", parser.errors());

    let arena = parser.arena();
    let design_unit = arena.get(unit).unwrap();
    let arch = arena.get(design_unit.stmts[0]).unwrap();
    assert_eq!(arch.kind, NodeKind::ArchitectureBody);
    assert_eq!(arch.decls.len(), 1);
    assert_eq!(arch.stmts.len(), 1);

    let process = arena.get(arch.stmts[0]).unwrap();
    assert_eq!(process.kind, NodeKind::Process);
    assert_eq!(process.ident.as_ref().unwrap().as_str(), "p");
    assert_eq!(process.triggers.len(), 1);
    assert_eq!(process.stmts.len(), 1);

    let assertion = arena.get(process.stmts[0]).unwrap();
    assert_eq!(assertion.kind, NodeKind::Assert);
    assert!(!assertion.attrs.is_report);
}

#[test]
fn report_statement_desugars_to_assert_false() {
    let src = "architecture rtl of e is\n\
               begin\n\
               process\n\
               begin\n\
               report \"hello\";\n\
               wait;\n\
               end process;\n\
               end rtl;";
    let file = SourceFile::new(FileID::new(1), "t.vhd".into(), src);
    let mut parser = Parser::new(&file);
    let unit = parser.parse().expect("expected a parsed design unit");
    assert_eq!(parser.n_errors(), 0);

    let arena = parser.arena();
    let design_unit = arena.get(unit).unwrap();
    let arch = arena.get(design_unit.stmts[0]).unwrap();
    let process = arena.get(arch.stmts[0]).unwrap();
    let report = arena.get(process.stmts[0]).unwrap();

    assert_eq!(report.kind, NodeKind::Assert);
    assert!(report.attrs.is_report);
    let condition = arena.get(report.value.unwrap()).unwrap();
    assert_eq!(condition.kind, NodeKind::Ref);
    assert_eq!(condition.ident.as_ref().unwrap().as_str(), "FALSE");
}

#[test]
fn if_elsif_else_desugars_into_nested_if_nodes() {
    let src = "architecture rtl of e is\n\
               begin\n\
               process\n\
               variable x : integer;\n\
               begin\n\
               if x = 0 then\n\
               x := 1;\n\
               elsif x = 1 then\n\
               x := 2;\n\
               else\n\
               x := 3;\n\
               end if;\n\
               end process;\n\
               end rtl;";
    let file = SourceFile::new(FileID::new(1), "t.vhd".into(), src);
    let mut parser = Parser::new(&file);
    let unit = parser.parse().expect("expected a parsed design unit");
    assert_eq!(parser.n_errors(), 0);

    let arena = parser.arena();
    let design_unit = arena.get(unit).unwrap();
    let arch = arena.get(design_unit.stmts[0]).unwrap();
    let process = arena.get(arch.stmts[0]).unwrap();
    let top_if = arena.get(process.stmts[0]).unwrap();
    assert_eq!(top_if.kind, NodeKind::If);
    assert_eq!(top_if.else_stmts.len(), 1);

    let nested_if = arena.get(top_if.else_stmts[0]).unwrap();
    assert_eq!(nested_if.kind, NodeKind::If);
    assert_eq!(nested_if.stmts.len(), 1);
    assert_eq!(nested_if.else_stmts.len(), 1);
}

#[test]
fn bare_assert_defaults_severity_to_a_reference_to_error() {
    let src = "architecture rtl of e is\n\
               begin\n\
               process\n\
               begin\n\
               assert false;\n\
               wait;\n\
               end process;\n\
               end rtl;";
    let file = SourceFile::new(FileID::new(1), "t.vhd".into(), src);
    let mut parser = Parser::new(&file);
    let unit = parser.parse().expect("expected a parsed design unit");
    assert_eq!(parser.n_errors(), 0);

    let arena = parser.arena();
    let design_unit = arena.get(unit).unwrap();
    let arch = arena.get(design_unit.stmts[0]).unwrap();
    let process = arena.get(arch.stmts[0]).unwrap();
    let assertion = arena.get(process.stmts[0]).unwrap();
    assert_eq!(assertion.kind, NodeKind::Assert);

    let severity = arena.get(assertion.severity.unwrap()).unwrap();
    assert_eq!(severity.kind, NodeKind::Ref);
    assert_eq!(severity.ident.as_ref().unwrap().as_str(), "ERROR");
}
