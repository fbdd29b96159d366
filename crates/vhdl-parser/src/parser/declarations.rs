//! Declarative-part grammar (§4.F, §6): generic/port clauses, interface
//! elements, signal/variable/attribute declarations, and the declarative
//! parts of entities, architectures, and processes.

use vhdl_ast::arena::NodeId;
use vhdl_ast::node::{NodeKind, PortMode};

use super::expressions::ParseExpressions;
use super::Parser;
use crate::lexer::TokenKind;

pub(super) trait ParseDeclarations {
    fn p_mode(&mut self) -> PortMode;
    fn p_interface_element(&mut self, kind: NodeKind) -> Vec<NodeId>;
    fn p_interface_list(&mut self, kind: NodeKind) -> Vec<NodeId>;
    fn p_generic_clause(&mut self) -> Vec<NodeId>;
    fn p_port_clause(&mut self) -> Vec<NodeId>;
    fn p_signal_declaration(&mut self) -> NodeId;
    fn p_variable_declaration(&mut self) -> NodeId;
    fn p_entity_declarative_item(&mut self) -> Option<NodeId>;
    fn p_entity_declarative_part(&mut self) -> Vec<NodeId>;
    fn p_block_declarative_item(&mut self) -> Option<NodeId>;
    fn p_architecture_declarative_part(&mut self) -> Vec<NodeId>;
    fn p_process_declarative_item(&mut self) -> Option<NodeId>;
    fn p_process_declarative_part(&mut self) -> Vec<NodeId>;
}

impl ParseDeclarations for Parser<'_> {
    /// `p_mode`: `in | out | inout | buffer | linkage`, defaulting to `in`
    /// when omitted (§6).
    fn p_mode(&mut self) -> PortMode {
        match self.peek_kind() {
            TokenKind::In => {
                drop(self.consume(TokenKind::In));
                PortMode::In
            }
            TokenKind::Out => {
                drop(self.consume(TokenKind::Out));
                PortMode::Out
            }
            TokenKind::Inout => {
                drop(self.consume(TokenKind::Inout));
                PortMode::InOut
            }
            TokenKind::Buffer => {
                drop(self.consume(TokenKind::Buffer));
                PortMode::Buffer
            }
            TokenKind::Linkage => {
                drop(self.consume(TokenKind::Linkage));
                PortMode::Linkage
            }
            _ => PortMode::In,
        }
    }

    /// `p_interface_element`: `identifier_list : [mode] type_mark [:= expr]`,
    /// instantiated for both port and generic lists via `kind`
    /// (`NodeKind::PortDecl` / `NodeKind::GenericDecl`).
    fn p_interface_element(&mut self, kind: NodeKind) -> Vec<NodeId> {
        self.begin("interface element");
        let names = self.identifier_list();
        drop(self.consume(TokenKind::Colon));
        let mode = self.p_mode();
        let ty = self.p_type_mark();
        let default = if self.optional(TokenKind::Assign) { Some(self.p_expression()) } else { None };
        let loc = self.current_loc();

        let mut decls = Vec::with_capacity(names.len());
        for name in names {
            let id = self.alloc(kind, loc.clone());
            {
                let node = self.node_mut(id);
                node.ident = Some(name);
                node.mode = Some(mode);
                node.ty = Some(ty);
                node.value = default;
            }
            decls.push(id);
        }
        self.leave();
        decls
    }

    /// `p_interface_list`: `interface_element { ; interface_element }`.
    fn p_interface_list(&mut self, kind: NodeKind) -> Vec<NodeId> {
        let mut decls = self.p_interface_element(kind);
        while self.optional(TokenKind::Semi) {
            decls.extend(self.p_interface_element(kind));
        }
        decls
    }

    /// `p_generic_clause`: `generic ( interface_list ) ;`.
    fn p_generic_clause(&mut self) -> Vec<NodeId> {
        self.begin("generic clause");
        drop(self.consume(TokenKind::Generic));
        drop(self.consume(TokenKind::LParen));
        let decls = self.p_interface_list(NodeKind::GenericDecl);
        drop(self.consume(TokenKind::RParen));
        drop(self.consume(TokenKind::Semi));
        self.leave();
        decls
    }

    /// `p_port_clause`: `port ( interface_list ) ;`.
    fn p_port_clause(&mut self) -> Vec<NodeId> {
        self.begin("port clause");
        drop(self.consume(TokenKind::Port));
        drop(self.consume(TokenKind::LParen));
        let decls = self.p_interface_list(NodeKind::PortDecl);
        drop(self.consume(TokenKind::RParen));
        drop(self.consume(TokenKind::Semi));
        self.leave();
        decls
    }

    /// `p_signal_declaration`: `signal identifier_list : type_mark [:=
    /// expression] ;`.
    fn p_signal_declaration(&mut self) -> NodeId {
        self.begin("signal declaration");
        drop(self.consume(TokenKind::Signal));
        let names = self.identifier_list();
        drop(self.consume(TokenKind::Colon));
        let ty = self.p_type_mark();
        let init = if self.optional(TokenKind::Assign) { Some(self.p_expression()) } else { None };
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::SignalDecl, loc);
        {
            let node = self.node_mut(id);
            node.ident = names.first().cloned();
            node.secondary_ident = names.get(1).cloned();
            node.ty = Some(ty);
            node.value = init;
        }
        self.leave();
        id
    }

    /// `p_variable_declaration`: `variable identifier_list : type_mark [:=
    /// expression] ;`.
    fn p_variable_declaration(&mut self) -> NodeId {
        self.begin("variable declaration");
        drop(self.consume(TokenKind::Variable));
        let names = self.identifier_list();
        drop(self.consume(TokenKind::Colon));
        let ty = self.p_type_mark();
        let init = if self.optional(TokenKind::Assign) { Some(self.p_expression()) } else { None };
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::VariableDecl, loc);
        {
            let node = self.node_mut(id);
            node.ident = names.first().cloned();
            node.secondary_ident = names.get(1).cloned();
            node.ty = Some(ty);
            node.value = init;
        }
        self.leave();
        id
    }

    /// `p_entity_declarative_item`: a signal, variable, attribute
    /// declaration/specification, or `;`-terminated noise to skip, or `None`
    /// at the `end`/`begin` boundary.
    fn p_entity_declarative_item(&mut self) -> Option<NodeId> {
        match self.peek_kind() {
            TokenKind::Signal => Some(self.p_signal_declaration()),
            TokenKind::Variable => Some(self.p_variable_declaration()),
            TokenKind::Attribute => {
                if self.peek2_kind() == TokenKind::Ident {
                    Some(self.p_attribute_declaration_or_specification())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// `p_entity_declarative_part`: zero or more declarative items, stopping
    /// at `begin`/`end`.
    fn p_entity_declarative_part(&mut self) -> Vec<NodeId> {
        let mut decls = Vec::new();
        while !self.scan(&[TokenKind::Begin, TokenKind::End, TokenKind::Eof]) {
            match self.p_entity_declarative_item() {
                Some(id) => decls.push(id),
                None => break,
            }
        }
        decls
    }

    /// `p_block_declarative_item`: as `p_entity_declarative_item`, an
    /// architecture body's declarative part accepts the same item set (§6).
    fn p_block_declarative_item(&mut self) -> Option<NodeId> { self.p_entity_declarative_item() }

    /// `p_architecture_declarative_part`: zero or more block declarative
    /// items up to `begin`.
    fn p_architecture_declarative_part(&mut self) -> Vec<NodeId> {
        let mut decls = Vec::new();
        while !self.scan(&[TokenKind::Begin, TokenKind::Eof]) {
            match self.p_block_declarative_item() {
                Some(id) => decls.push(id),
                None => break,
            }
        }
        decls
    }

    /// `p_process_declarative_item`: a process body only ever declares
    /// variables locally (§6); signal/attribute declarations inside a
    /// process are rejected by falling through to `None`, which the caller
    /// treats as "declarative part finished".
    fn p_process_declarative_item(&mut self) -> Option<NodeId> {
        match self.peek_kind() {
            TokenKind::Variable => Some(self.p_variable_declaration()),
            _ => None,
        }
    }

    /// `p_process_declarative_part`: zero or more variable declarations up
    /// to `begin`.
    fn p_process_declarative_part(&mut self) -> Vec<NodeId> {
        let mut decls = Vec::new();
        while !self.scan(&[TokenKind::Begin, TokenKind::Eof]) {
            match self.p_process_declarative_item() {
                Some(id) => decls.push(id),
                None => break,
            }
        }
        decls
    }
}

impl Parser<'_> {
    /// Disambiguates `attribute name : type` from `attribute name of target :
    /// class is expr`. The buffer's two-token lookahead cannot see past the
    /// declared name, so this commits to consuming `attribute identifier`
    /// once and dispatches on whichever of `of`/`:` follows (§4.B), the same
    /// commit-then-branch shape `p_function_call` uses for its own
    /// disambiguation.
    fn p_attribute_declaration_or_specification(&mut self) -> NodeId {
        self.begin("attribute declaration or specification");
        drop(self.consume(TokenKind::Attribute));
        let name = self.identifier();
        let id = if self.optional(TokenKind::Of) {
            self.finish_attribute_specification(name)
        } else {
            self.finish_attribute_declaration(name)
        };
        self.leave();
        id
    }

    /// Continuation of `p_attribute_declaration` once `attribute identifier`
    /// has already been consumed.
    fn finish_attribute_declaration(&mut self, name: vhdl_ast::ident::Ident) -> NodeId {
        drop(self.consume(TokenKind::Colon));
        let ty = self.p_type_mark();
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::AttrDecl, loc);
        {
            let node = self.node_mut(id);
            node.ident = Some(name);
            node.ty = Some(ty);
        }
        id
    }

    /// Continuation of `p_attribute_specification` once `attribute
    /// identifier of` has already been consumed.
    fn finish_attribute_specification(&mut self, attr_name: vhdl_ast::ident::Ident) -> NodeId {
        let target_name = self.identifier();
        drop(self.consume(TokenKind::Colon));
        drop(self.identifier());
        drop(self.consume(TokenKind::Is));
        let value = self.p_expression();
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::AttrSpec, loc);
        {
            let node = self.node_mut(id);
            node.ident = Some(attr_name);
            node.secondary_ident = Some(target_name);
            node.value = Some(value);
        }
        id
    }

    fn p_type_mark(&mut self) -> NodeId {
        self.begin("type mark");
        let name = self.identifier();
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::TypeRef, loc);
        self.node_mut(id).ident = Some(name);
        self.leave();
        id
    }
}
