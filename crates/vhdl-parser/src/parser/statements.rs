//! Statement grammar (§4.F, §6): sequential statements inside a process
//! body, and the handful of concurrent statements (process, concurrent
//! assertion) an architecture body may contain.

use vhdl_ast::arena::NodeId;
use vhdl_ast::node::{Direction, NodeKind, RangeBounds};

use super::declarations::ParseDeclarations;
use super::expressions::ParseExpressions;
use super::Parser;
use crate::lexer::TokenKind;

pub(super) trait ParseStatements {
    fn p_target(&mut self) -> NodeId;
    fn p_variable_assignment_statement(&mut self) -> NodeId;
    fn p_waveform(&mut self) -> Vec<NodeId>;
    fn p_signal_assignment_statement(&mut self) -> NodeId;
    fn p_sensitivity_list(&mut self) -> Vec<NodeId>;
    fn p_wait_statement(&mut self) -> NodeId;
    fn p_assertion(&mut self) -> (NodeId, NodeId, NodeId);
    fn p_assertion_statement(&mut self) -> NodeId;
    fn p_report_statement(&mut self) -> NodeId;
    fn p_if_statement(&mut self) -> NodeId;
    fn p_null_statement(&mut self) -> NodeId;
    fn p_loop_statement(&mut self) -> NodeId;
    fn p_return_statement(&mut self) -> NodeId;
    fn p_sequential_statement(&mut self) -> NodeId;
    fn p_sequence_of_statements(&mut self) -> Vec<NodeId>;
    fn p_concurrent_assertion_statement(&mut self) -> NodeId;
    fn p_process_statement(&mut self) -> NodeId;
    fn p_concurrent_statement(&mut self) -> Option<NodeId>;
}

impl ParseStatements for Parser<'_> {
    /// `p_target`: a name; full VHDL also allows aggregate targets, but this
    /// grammar subset restricts assignment targets to simple names (§6).
    fn p_target(&mut self) -> NodeId { self.p_name() }

    /// `p_variable_assignment_statement`: `target := expression ;`.
    fn p_variable_assignment_statement(&mut self) -> NodeId {
        self.begin("variable assignment");
        let target = self.p_target();
        drop(self.consume(TokenKind::Assign));
        let value = self.p_expression();
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::VarAssign, loc);
        {
            let node = self.node_mut(id);
            node.target = Some(target);
            node.value = Some(value);
        }
        self.leave();
        id
    }

    /// `p_waveform`: `waveform_element { , waveform_element }`, where a
    /// waveform element is `expression [after expression]` or `unaffected`.
    fn p_waveform(&mut self) -> Vec<NodeId> {
        let mut elems = vec![self.p_waveform_element()];
        while self.optional(TokenKind::Comma) {
            elems.push(self.p_waveform_element());
        }
        elems
    }

    /// `p_signal_assignment_statement`: `target <= waveform ;`.
    fn p_signal_assignment_statement(&mut self) -> NodeId {
        self.begin("signal assignment");
        let target = self.p_target();
        drop(self.consume(TokenKind::Le));
        let waveforms = self.p_waveform();
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::SignalAssign, loc);
        {
            let node = self.node_mut(id);
            node.target = Some(target);
            node.waveforms = waveforms;
        }
        self.leave();
        id
    }

    /// `p_sensitivity_list`: `name { , name }`.
    fn p_sensitivity_list(&mut self) -> Vec<NodeId> {
        let mut names = vec![self.p_name()];
        while self.optional(TokenKind::Comma) {
            names.push(self.p_name());
        }
        names
    }

    /// `p_wait_statement`: `wait [on sensitivity_list] [until condition]
    /// [for timeout] ;`, all three clauses optional (§6).
    fn p_wait_statement(&mut self) -> NodeId {
        self.begin("wait statement");
        drop(self.consume(TokenKind::Wait));
        let triggers = if self.optional(TokenKind::On) { self.p_sensitivity_list() } else { Vec::new() };
        let value = if self.optional(TokenKind::Until) { Some(self.p_expression()) } else { None };
        let timeout = if self.optional(TokenKind::For) { Some(self.p_expression()) } else { None };
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::Wait, loc);
        {
            let node = self.node_mut(id);
            node.triggers = triggers;
            node.value = value;
            node.target = timeout;
        }
        self.leave();
        id
    }

    /// `p_assertion`: `assert condition [report expression] [severity
    /// expression]`. Absent `report`/`severity` clauses fall back to the
    /// shared `"Assertion violation."` message and an `ERROR` severity
    /// reference (§4.F), mirroring the distilled source's cached defaults.
    /// Returns `(condition, message, severity)` for the caller to wrap into
    /// whatever statement kind it is building.
    fn p_assertion(&mut self) -> (NodeId, NodeId, NodeId) {
        self.begin("assertion");
        drop(self.consume(TokenKind::Assert));
        let condition = self.p_expression();
        let message = if self.optional(TokenKind::Report) {
            self.p_expression()
        } else {
            self.assertion_violation_message()
        };
        let severity = if self.optional(TokenKind::Severity) {
            self.p_expression()
        } else {
            let loc = self.current_loc();
            self.make_ref("ERROR", loc)
        };
        self.leave();
        (condition, message, severity)
    }

    /// `p_assertion_statement`: `assertion ;`, wrapped into an `Assert` node.
    fn p_assertion_statement(&mut self) -> NodeId {
        self.begin("assertion statement");
        let (condition, message, severity) = self.p_assertion();
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::Assert, loc);
        {
            let node = self.node_mut(id);
            node.value = Some(condition);
            node.message = Some(message);
            node.severity = Some(severity);
        }
        self.leave();
        id
    }

    /// `p_report_statement`: `report expression [severity expression] ;`,
    /// desugared into `assert false report expression severity ...` with the
    /// `is_report` flag set (§4.F), defaulting severity to `NOTE` like an
    /// unadorned assertion's message clause rather than assertion's default.
    fn p_report_statement(&mut self) -> NodeId {
        self.begin("report statement");
        drop(self.consume(TokenKind::Report));
        let message = self.p_expression();
        let severity = if self.optional(TokenKind::Severity) {
            self.p_expression()
        } else {
            let loc = self.current_loc();
            self.make_ref("NOTE", loc)
        };
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let condition = self.make_ref("FALSE", loc.clone());
        let id = self.alloc(NodeKind::Assert, loc);
        {
            let node = self.node_mut(id);
            node.value = Some(condition);
            node.message = Some(message);
            node.severity = Some(severity);
            node.attrs.is_report = true;
        }
        self.leave();
        id
    }

    /// `p_if_statement`: `if condition then stmts {elsif condition then
    /// stmts} [else stmts] end if ;`. `elsif` clauses desugar into nested
    /// `If` nodes chained through `else_stmts`, each holding exactly one
    /// statement: the nested `If` (§4.F).
    fn p_if_statement(&mut self) -> NodeId {
        self.begin("if statement");
        drop(self.consume(TokenKind::If));
        let condition = self.p_expression();
        drop(self.consume(TokenKind::Then));
        let stmts = self.p_sequence_of_statements();
        let loc0 = self.current_loc();
        let id = self.alloc(NodeKind::If, loc0);
        {
            let node = self.node_mut(id);
            node.value = Some(condition);
            node.stmts = stmts;
        }

        let mut tail = id;
        while self.peek_kind() == TokenKind::Elsif {
            drop(self.consume(TokenKind::Elsif));
            let elsif_cond = self.p_expression();
            drop(self.consume(TokenKind::Then));
            let elsif_stmts = self.p_sequence_of_statements();
            let loc = self.current_loc();
            let nested = self.alloc(NodeKind::If, loc);
            {
                let node = self.node_mut(nested);
                node.value = Some(elsif_cond);
                node.stmts = elsif_stmts;
            }
            self.node_mut(tail).else_stmts = vec![nested];
            tail = nested;
        }

        if self.optional(TokenKind::Else) {
            let else_stmts = self.p_sequence_of_statements();
            self.node_mut(tail).else_stmts = else_stmts;
        }

        drop(self.consume(TokenKind::End));
        drop(self.consume(TokenKind::If));
        drop(self.consume(TokenKind::Semi));
        self.node_mut(id).loc = self.current_loc();
        self.leave();
        id
    }

    /// `p_null_statement`: `null ;`.
    fn p_null_statement(&mut self) -> NodeId {
        self.begin("null statement");
        drop(self.consume(TokenKind::Null));
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::Null, loc);
        self.leave();
        id
    }

    /// `p_loop_statement`: `[while condition | for identifier in range] loop
    /// sequence_of_statements end loop ;`. An absent iteration scheme
    /// desugars into `While` with a `TRUE` condition (§4.F).
    fn p_loop_statement(&mut self) -> NodeId {
        self.begin("loop statement");
        let (condition, loop_var, range) = match self.peek_kind() {
            TokenKind::While => {
                drop(self.consume(TokenKind::While));
                (Some(self.p_expression()), None, None)
            }
            TokenKind::For => {
                drop(self.consume(TokenKind::For));
                let var = self.identifier();
                drop(self.consume(TokenKind::In));
                let left = self.p_simple_expression();
                let direction =
                    if self.optional(TokenKind::To) { Direction::To } else {
                        drop(self.consume(TokenKind::Downto));
                        Direction::Downto
                    };
                let right = self.p_simple_expression();
                (None, Some(var), Some(RangeBounds { left, right, direction }))
            }
            _ => {
                let loc = self.current_loc();
                (Some(self.make_ref("TRUE", loc)), None, None)
            }
        };

        drop(self.consume(TokenKind::Loop));
        let stmts = self.p_sequence_of_statements();
        drop(self.consume(TokenKind::End));
        drop(self.consume(TokenKind::Loop));
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();

        let actual_kind = if loop_var.is_some() { NodeKind::For } else { NodeKind::While };
        let id = self.alloc(actual_kind, loc);
        {
            let node = self.node_mut(id);
            node.value = condition;
            node.ident = loop_var;
            node.range = range;
            node.stmts = stmts;
        }
        self.leave();
        id
    }

    /// `p_return_statement`: `return [expression] ;`.
    fn p_return_statement(&mut self) -> NodeId {
        self.begin("return statement");
        drop(self.consume(TokenKind::Return));
        let value = if self.peek_kind() == TokenKind::Semi { None } else { Some(self.p_expression()) };
        drop(self.consume(TokenKind::Semi));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::Return, loc);
        self.node_mut(id).value = value;
        self.leave();
        id
    }

    /// `p_sequential_statement`: an optional `label :` prefix (needing two
    /// tokens of lookahead — `identifier` then `:` — to distinguish a label
    /// from the start of an assignment target, §4.B) followed by dispatch on
    /// the statement keyword.
    fn p_sequential_statement(&mut self) -> NodeId {
        self.begin("sequential statement");
        let label = if self.peek_kind() == TokenKind::Ident && self.peek2_kind() == TokenKind::Colon {
            let name = self.identifier();
            drop(self.consume(TokenKind::Colon));
            Some(name)
        } else {
            None
        };

        let id = match self.peek_kind() {
            TokenKind::Wait => self.p_wait_statement(),
            TokenKind::Assert => self.p_assertion_statement(),
            TokenKind::Report => self.p_report_statement(),
            TokenKind::If => self.p_if_statement(),
            TokenKind::Null => self.p_null_statement(),
            TokenKind::While | TokenKind::For | TokenKind::Loop => self.p_loop_statement(),
            TokenKind::Return => self.p_return_statement(),
            TokenKind::Ident if self.peek2_kind() == TokenKind::Le => {
                self.p_signal_assignment_statement()
            }
            TokenKind::Ident => self.p_variable_assignment_statement(),
            _ => {
                self.expect(&[
                    TokenKind::Wait,
                    TokenKind::Assert,
                    TokenKind::Report,
                    TokenKind::If,
                    TokenKind::Null,
                    TokenKind::While,
                    TokenKind::For,
                    TokenKind::Loop,
                    TokenKind::Return,
                    TokenKind::Ident,
                ]);
                self.p_null_statement()
            }
        };

        let loc = self.current_loc();
        self.set_label_and_loc(id, label, loc);
        self.leave();
        id
    }

    /// `p_sequence_of_statements`: zero or more sequential statements, up to
    /// `end`/`elsif`/`else`.
    fn p_sequence_of_statements(&mut self) -> Vec<NodeId> {
        let mut stmts = Vec::new();
        while !self.scan(&[TokenKind::End, TokenKind::Elsif, TokenKind::Else, TokenKind::Eof]) {
            stmts.push(self.p_sequential_statement());
        }
        stmts
    }

    /// `p_concurrent_assertion_statement`: `[label :] assertion ;`.
    fn p_concurrent_assertion_statement(&mut self) -> NodeId {
        self.begin("concurrent assertion");
        let label = if self.peek_kind() == TokenKind::Ident && self.peek2_kind() == TokenKind::Colon {
            let name = self.identifier();
            drop(self.consume(TokenKind::Colon));
            Some(name)
        } else {
            None
        };
        let id = self.p_assertion_statement();
        let loc = self.current_loc();
        self.set_label_and_loc(id, label, loc);
        self.leave();
        id
    }

    /// `p_process_statement`: `[label :] [postponed] process [( sensitivity
    /// list )] process_declarative_part begin sequence_of_statements end
    /// [postponed] process [label] ;`.
    fn p_process_statement(&mut self) -> NodeId {
        self.begin("process statement");
        let label = if self.peek_kind() == TokenKind::Ident && self.peek2_kind() == TokenKind::Colon {
            let name = self.identifier();
            drop(self.consume(TokenKind::Colon));
            Some(name)
        } else {
            None
        };
        let id = self.p_process_statement_body();
        let loc = self.current_loc();
        self.set_label_and_loc(id, label, loc);
        self.leave();
        id
    }

    /// `p_concurrent_statement`: dispatches on an optional `label :` prefix
    /// followed by `process`/`postponed` or `assert`; `None` at the
    /// architecture body's `end` boundary.
    fn p_concurrent_statement(&mut self) -> Option<NodeId> {
        if matches!(self.peek_kind(), TokenKind::Process | TokenKind::Postponed) {
            return Some(self.p_process_statement());
        }
        if self.peek_kind() == TokenKind::Assert {
            return Some(self.p_concurrent_assertion_statement());
        }
        if self.peek_kind() == TokenKind::Ident && self.peek2_kind() == TokenKind::Colon {
            // A labelled concurrent statement: the label applies to whatever
            // follows the colon, which this grammar subset restricts to a
            // process or a concurrent assertion (§6).
            return Some(self.p_labelled_concurrent_statement());
        }
        None
    }
}

impl Parser<'_> {
    /// `p_waveform_element`: `expression [after expression]` or
    /// `unaffected`.
    fn p_waveform_element(&mut self) -> NodeId {
        self.begin("waveform element");
        let id = if self.optional(TokenKind::Unaffected) {
            let loc = self.current_loc();
            self.alloc(NodeKind::Open, loc)
        } else {
            let value = self.p_expression();
            let after = if self.optional(TokenKind::After) { Some(self.p_expression()) } else { None };
            let loc = self.current_loc();
            let id = self.alloc(NodeKind::Waveform, loc);
            {
                let node = self.node_mut(id);
                node.value = Some(value);
                node.target = after;
            }
            id
        };
        self.leave();
        id
    }

    /// Handles a labelled concurrent statement by consuming the label first,
    /// then delegating to whichever production the following keyword names
    /// (mirrors `p_sequential_statement`'s own label handling, duplicated
    /// here because concurrent and sequential statements are disjoint
    /// grammars, §6).
    fn p_labelled_concurrent_statement(&mut self) -> NodeId {
        self.begin("labelled concurrent statement");
        let name = self.identifier();
        drop(self.consume(TokenKind::Colon));
        let id = match self.peek_kind() {
            TokenKind::Assert => self.p_assertion_statement(),
            _ => self.p_process_statement_body(),
        };
        let loc = self.current_loc();
        self.set_label_and_loc(id, Some(name), loc);
        self.leave();
        id
    }

    /// The body of `p_process_statement` minus its own label handling, used
    /// when a label has already been consumed by the caller.
    fn p_process_statement_body(&mut self) -> NodeId {
        self.extend("process statement");
        let postponed = self.optional(TokenKind::Postponed);
        drop(self.consume(TokenKind::Process));
        let triggers = if self.optional(TokenKind::LParen) {
            let list = self.p_sensitivity_list();
            drop(self.consume(TokenKind::RParen));
            list
        } else {
            Vec::new()
        };

        let decls = self.p_process_declarative_part();
        drop(self.consume(TokenKind::Begin));
        let stmts = self.p_sequence_of_statements();
        drop(self.consume(TokenKind::End));
        drop(self.optional(TokenKind::Postponed));
        drop(self.consume(TokenKind::Process));
        if self.peek_kind() == TokenKind::Ident {
            drop(self.identifier());
        }
        drop(self.consume(TokenKind::Semi));

        let loc = self.current_loc();
        let id = self.alloc(NodeKind::Process, loc);
        {
            let node = self.node_mut(id);
            node.decls = decls;
            node.stmts = stmts;
            node.triggers = triggers;
            node.attrs.postponed = postponed;
        }
        self.leave();
        id
    }
}
