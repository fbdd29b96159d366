//! Top-level grammar (§4.F, §6): context clauses, entity declarations,
//! architecture bodies, and the `design_unit` entry point `parse()` drives.

use vhdl_ast::arena::NodeId;
use vhdl_ast::node::NodeKind;

use super::declarations::ParseDeclarations;
use super::statements::ParseStatements;
use super::Parser;
use crate::lexer::TokenKind;

pub trait ParseUnits {
    fn parse(&mut self) -> Option<NodeId>;
}

impl ParseUnits for Parser<'_> {
    /// `parse`: the compilation-unit entry point (§4.F `parse()`). Resets the
    /// diagnostic reporter so repeated calls on the same `Parser` each start
    /// a fresh cascade-suppression run, then drives `p_design_unit`; a unit
    /// with any reported error yields `None` rather than a partial tree (§6).
    fn parse(&mut self) -> Option<NodeId> {
        self.diagnostics.reset();
        if self.peek_kind() == TokenKind::Eof {
            return None;
        }
        let unit = self.p_design_unit();
        if self.diagnostics.n_errors() > 0 {
            return None;
        }
        Some(unit)
    }
}

impl Parser<'_> {
    /// `p_context_clause`: zero or more `library`/`use` clauses (§6). Full
    /// VHDL resolves these against an external library system that is out
    /// of scope (§1); here they are parsed for shape and discarded, matching
    /// the distilled source's treatment of context items as non-semantic for
    /// the evaluator.
    fn p_context_clause(&mut self) -> NodeId {
        self.begin("context clause");
        let loc0 = self.current_loc();
        let id = self.alloc(NodeKind::ContextClause, loc0);
        while matches!(self.peek_kind(), TokenKind::Library | TokenKind::Use) {
            match self.peek_kind() {
                TokenKind::Library => self.p_library_clause(),
                TokenKind::Use => self.p_use_clause(),
                _ => unreachable!(),
            }
        }
        self.node_mut(id).loc = self.current_loc();
        self.leave();
        id
    }

    /// `p_library_clause`: `library identifier_list ;`.
    fn p_library_clause(&mut self) {
        self.begin("library clause");
        drop(self.consume(TokenKind::Library));
        drop(self.identifier_list());
        drop(self.consume(TokenKind::Semi));
        self.leave();
    }

    /// `p_use_clause`: `use name { . name } { , name { . name } } ;`,
    /// parsed loosely as a dotted identifier list.
    fn p_use_clause(&mut self) {
        self.begin("use clause");
        drop(self.consume(TokenKind::Use));
        loop {
            drop(self.identifier());
            while self.optional(TokenKind::Dot) {
                drop(self.identifier());
            }
            if !self.optional(TokenKind::Comma) {
                break;
            }
        }
        drop(self.consume(TokenKind::Semi));
        self.leave();
    }

    /// `p_entity_declaration`: `entity identifier is entity_header
    /// entity_declarative_part [begin entity_statement_part] end [entity]
    /// [identifier] ;`.
    fn p_entity_declaration(&mut self) -> NodeId {
        self.begin("entity declaration");
        drop(self.consume(TokenKind::Entity));
        let name = self.identifier();
        drop(self.consume(TokenKind::Is));

        let generics = if self.peek_kind() == TokenKind::Generic { self.p_generic_clause() } else { Vec::new() };
        let ports = if self.peek_kind() == TokenKind::Port { self.p_port_clause() } else { Vec::new() };
        let decls = self.p_entity_declarative_part();

        let stmts = if self.optional(TokenKind::Begin) { self.p_entity_statement_part() } else { Vec::new() };

        drop(self.consume(TokenKind::End));
        drop(self.optional(TokenKind::Entity));
        // The closing identifier, if present, is not checked against the
        // opening name (§4.F design note: end-labels are accepted
        // unconditionally, mismatches included).
        if self.peek_kind() == TokenKind::Ident {
            drop(self.identifier());
        }
        drop(self.consume(TokenKind::Semi));

        let loc = self.current_loc();
        let id = self.alloc(NodeKind::EntityDecl, loc);
        {
            let node = self.node_mut(id);
            node.ident = Some(name);
            node.generics = generics;
            node.ports = ports;
            node.decls = decls;
            node.stmts = stmts;
        }
        self.leave();
        id
    }

    /// `entity_statement_part`: `{ concurrent_assertion }` — the only
    /// concurrent statement an entity's statement part may hold (§6).
    fn p_entity_statement_part(&mut self) -> Vec<NodeId> {
        let mut stmts = Vec::new();
        while self.peek_kind() == TokenKind::Assert
            || (self.peek_kind() == TokenKind::Ident && self.peek2_kind() == TokenKind::Colon)
        {
            stmts.push(self.p_concurrent_assertion_statement());
        }
        stmts
    }

    /// `p_architecture_body`: `architecture identifier of identifier is
    /// architecture_declarative_part begin architecture_statement_part end
    /// [architecture] [identifier] ;`.
    fn p_architecture_body(&mut self) -> NodeId {
        self.begin("architecture body");
        drop(self.consume(TokenKind::Architecture));
        let name = self.identifier();
        drop(self.consume(TokenKind::Of));
        let entity_name = self.identifier();
        drop(self.consume(TokenKind::Is));

        let decls = self.p_architecture_declarative_part();
        drop(self.consume(TokenKind::Begin));

        let mut stmts = Vec::new();
        while let Some(stmt) = self.p_concurrent_statement() {
            stmts.push(stmt);
        }

        drop(self.consume(TokenKind::End));
        drop(self.optional(TokenKind::Architecture));
        if self.peek_kind() == TokenKind::Ident {
            drop(self.identifier());
        }
        drop(self.consume(TokenKind::Semi));

        let loc = self.current_loc();
        let id = self.alloc(NodeKind::ArchitectureBody, loc);
        {
            let node = self.node_mut(id);
            node.ident = Some(name);
            node.secondary_ident = Some(entity_name);
            node.decls = decls;
            node.stmts = stmts;
        }
        self.leave();
        id
    }

    /// `p_library_unit`: dispatches on `entity` vs `architecture`, the two
    /// primary/secondary unit kinds this grammar subset supports (§6).
    fn p_library_unit(&mut self) -> NodeId {
        self.begin("library unit");
        let id = match self.peek_kind() {
            TokenKind::Entity => self.p_entity_declaration(),
            TokenKind::Architecture => self.p_architecture_body(),
            _ => {
                self.expect(&[TokenKind::Entity, TokenKind::Architecture]);
                let loc = self.current_loc();
                self.alloc(NodeKind::EntityDecl, loc)
            }
        };
        self.leave();
        id
    }

    /// `p_design_unit`: `context_clause library_unit`.
    fn p_design_unit(&mut self) -> NodeId {
        self.begin("design unit");
        let context = self.p_context_clause();
        let unit = self.p_library_unit();
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::DesignUnit, loc);
        {
            let node = self.node_mut(id);
            node.decls = vec![context];
            node.stmts = vec![unit];
        }
        self.leave();
        id
    }
}
