//! Expression grammar (§4.F, §6 `expression ::= ...`). Every binary operator
//! level folds left-associatively into nested `FCall` nodes named after the
//! quoted operator symbol (`"+"`, `"and"`, `"<="`, ...), exactly the encoding
//! the built-in folder (§4.H) later pattern-matches on.

use vhdl_ast::arena::NodeId;
use vhdl_ast::ident::Ident;
use vhdl_ast::node::{AssocKind, LiteralValue, NodeKind};
use vhdl_source::types::Location;

use super::Parser;
use crate::lexer::{TokenKind, TokenValue};

pub(super) trait ParseExpressions {
    fn p_name(&mut self) -> NodeId;
    fn p_function_call(&mut self, callee: Ident, start: Location) -> NodeId;
    fn p_slice_name(&mut self, prefix: NodeId, left: NodeId) -> NodeId;
    fn p_literal(&mut self) -> NodeId;
    fn p_numeric_literal(&mut self) -> NodeId;
    fn p_physical_literal(&mut self, magnitude: NodeId) -> NodeId;
    fn p_aggregate(&mut self) -> NodeId;
    fn p_primary(&mut self) -> NodeId;
    fn p_factor(&mut self) -> NodeId;
    fn p_term(&mut self) -> NodeId;
    fn p_simple_expression(&mut self) -> NodeId;
    fn p_shift_expression(&mut self) -> NodeId;
    fn p_relation(&mut self) -> NodeId;
    fn p_expression(&mut self) -> NodeId;
}

impl ParseExpressions for Parser<'_> {
    /// `p_name`: an identifier optionally followed by `(`, disambiguated by
    /// the token immediately after the open paren's first argument, exactly
    /// as the distilled grammar resolves the `name` / `function_call` /
    /// `slice_name` ambiguity (§4.F).
    fn p_name(&mut self) -> NodeId {
        self.begin("name");
        let start = self.cur_loc.clone();
        let ident = self.identifier();

        let result = if self.peek_kind() == TokenKind::LParen {
            self.p_function_call(ident, start)
        } else {
            let loc = self.current_loc();
            let id = self.alloc(NodeKind::Ref, loc);
            self.node_mut(id).ident = Some(ident);
            id
        };
        self.leave();
        result
    }

    /// `p_function_call` / slice disambiguation: parses the first argument
    /// expression, then looks at the token that follows it to tell a
    /// positional-argument call (`,` or `)`) from a slice (`to` / `downto`),
    /// matching the distilled source's one-token-of-extra lookahead at this
    /// exact point (§4.F).
    fn p_function_call(&mut self, callee: Ident, start: Location) -> NodeId {
        self.extend("function call");
        drop(self.consume(TokenKind::LParen));
        let first = self.p_expression();

        let result = if self.scan(&[TokenKind::To, TokenKind::Downto]) {
            let prefix = self.alloc(NodeKind::Ref, start);
            self.node_mut(prefix).ident = Some(callee);
            self.p_slice_name(prefix, first)
        } else {
            let mut params = vec![first];
            while self.optional(TokenKind::Comma) {
                params.push(self.p_expression());
            }
            drop(self.consume(TokenKind::RParen));
            let loc = self.current_loc();
            let id = self.alloc(NodeKind::FCall, loc);
            {
                let node = self.node_mut(id);
                node.ident = Some(callee);
                node.params = params;
            }
            id
        };
        self.leave();
        result
    }

    /// `p_slice_name`: `prefix(left to|downto right)`, having already
    /// consumed `prefix (` and the first bound expression.
    fn p_slice_name(&mut self, prefix: NodeId, left: NodeId) -> NodeId {
        self.extend("slice");
        let direction = if self.optional(TokenKind::To) {
            vhdl_ast::node::Direction::To
        } else {
            drop(self.consume(TokenKind::Downto));
            vhdl_ast::node::Direction::Downto
        };
        let right = self.p_simple_expression();
        drop(self.consume(TokenKind::RParen));
        let loc = self.current_loc();
        let id = self.alloc(NodeKind::Slice, loc);
        {
            let node = self.node_mut(id);
            node.ty = Some(prefix);
            node.range = Some(vhdl_ast::node::RangeBounds { left, right, direction });
        }
        self.leave();
        id
    }

    /// `p_numeric_literal`: an integer or real literal, optionally suffixed
    /// by a physical unit name (§3: physical literals encode as `"*"(mag,
    /// unit)`).
    fn p_numeric_literal(&mut self) -> NodeId {
        self.begin("numeric literal");
        let tok = self.consume_numeric();
        let loc = tok.loc.clone();
        let lit = match tok.value {
            TokenValue::Integer(n) => LiteralValue::Integer(n),
            TokenValue::Real(r) => LiteralValue::Real(r),
            _ => LiteralValue::Integer(0),
        };
        let id = self.alloc(NodeKind::Literal, loc);
        self.node_mut(id).literal = Some(lit);

        let result = if self.peek_kind() == TokenKind::Ident {
            self.p_physical_literal(id)
        } else {
            id
        };
        self.leave();
        result
    }

    /// `p_physical_literal`: `magnitude unit_name`, encoded as `"*"(magnitude,
    /// unit_ref)` (§3).
    fn p_physical_literal(&mut self, magnitude: NodeId) -> NodeId {
        self.extend("physical literal");
        let unit = self.identifier();
        let loc = self.current_loc();
        let unit_ref = self.alloc(NodeKind::Ref, loc.clone());
        self.node_mut(unit_ref).ident = Some(unit);
        let id = self.binary_call("*", magnitude, unit_ref, loc);
        self.leave();
        id
    }

    /// `p_literal`: numeric literal, string literal (converted to an
    /// aggregate via [`Parser::str_to_agg`]), `null`, or a name (for
    /// enumeration-literal and character-literal references).
    fn p_literal(&mut self) -> NodeId {
        self.begin("literal");
        let result = match self.peek_kind() {
            TokenKind::Integer | TokenKind::Real => self.p_numeric_literal(),
            TokenKind::Str => {
                let tok = self.consume(TokenKind::Str);
                let text = match tok.value {
                    TokenValue::Str(s) => s,
                    _ => String::new(),
                };
                let inner = text.trim_matches('"');
                self.str_to_agg(inner, tok.loc)
            }
            TokenKind::CharLit => {
                let tok = self.consume(TokenKind::CharLit);
                let text = match tok.value {
                    TokenValue::Str(s) => s,
                    _ => "''".to_string(),
                };
                let id = self.alloc(NodeKind::Ref, tok.loc);
                self.node_mut(id).ident = Some(Ident::new(text));
                id
            }
            TokenKind::Null => {
                let tok = self.consume(TokenKind::Null);
                let id = self.alloc(NodeKind::Literal, tok.loc);
                self.node_mut(id).literal = Some(LiteralValue::Null);
                id
            }
            _ => self.p_name(),
        };
        self.leave();
        result
    }

    /// `p_aggregate`: `( element_association {, element_association} )`,
    /// supporting positional, named (`choice => value`), ranged (`left to
    /// right => value`), and `others =>` associations (§3, §6).
    fn p_aggregate(&mut self) -> NodeId {
        self.begin("aggregate");
        drop(self.consume(TokenKind::LParen));
        let loc0 = self.current_loc();
        let id = self.alloc(NodeKind::Aggregate, loc0);

        loop {
            let assoc = self.p_element_association();
            self.node_mut(id).assocs.push(assoc);
            if !self.optional(TokenKind::Comma) {
                break;
            }
        }
        drop(self.consume(TokenKind::RParen));
        self.node_mut(id).loc = self.current_loc();
        self.leave();
        id
    }

    /// `p_primary`: literal, aggregate, or parenthesised expression.
    fn p_primary(&mut self) -> NodeId {
        self.begin("primary expression");
        let result = match self.peek_kind() {
            TokenKind::LParen => {
                if self.peek2_kind() == TokenKind::Others {
                    self.p_aggregate()
                } else {
                    drop(self.consume(TokenKind::LParen));
                    let inner = self.p_expression();
                    if self.scan(&[TokenKind::Comma, TokenKind::Arrow, TokenKind::To, TokenKind::Downto]) {
                        self.finish_aggregate_from(inner)
                    } else {
                        drop(self.consume(TokenKind::RParen));
                        inner
                    }
                }
            }
            TokenKind::Others => self.p_aggregate(),
            _ => self.p_literal(),
        };
        self.leave();
        result
    }

    /// `p_factor`: `primary [** primary]` or `abs primary` / `not primary`.
    fn p_factor(&mut self) -> NodeId {
        self.begin("factor");
        let result = match self.peek_kind() {
            TokenKind::Abs => {
                let tok = self.consume(TokenKind::Abs);
                let operand = self.p_primary();
                self.binary_call_unary("abs", operand, tok.loc)
            }
            TokenKind::Not => {
                let tok = self.consume(TokenKind::Not);
                let operand = self.p_primary();
                self.binary_call_unary("not", operand, tok.loc)
            }
            _ => {
                let left = self.p_primary();
                if self.optional(TokenKind::Exp) {
                    let right = self.p_primary();
                    let loc = self.current_loc();
                    self.binary_call("**", left, right, loc)
                } else {
                    left
                }
            }
        };
        self.leave();
        result
    }

    /// `p_term`: `factor { (*|/|mod|rem) factor }`, left-associative.
    fn p_term(&mut self) -> NodeId {
        self.begin("term");
        let mut left = self.p_factor();
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => "*",
                TokenKind::Slash => "/",
                TokenKind::Mod => "mod",
                TokenKind::Rem => "rem",
                _ => break,
            };
            let kind = self.peek_kind();
            drop(self.consume(kind));
            let right = self.p_factor();
            let loc = self.current_loc();
            left = self.binary_call(op, left, right, loc);
        }
        self.leave();
        left
    }

    /// `p_simple_expression`: `[+|-] term { (+|-|&) term }`, left-associative,
    /// with an optional unary leading sign.
    fn p_simple_expression(&mut self) -> NodeId {
        self.begin("simple expression");
        let mut left = match self.peek_kind() {
            TokenKind::Plus => {
                let tok = self.consume(TokenKind::Plus);
                let operand = self.p_term();
                self.binary_call_unary("+", operand, tok.loc)
            }
            TokenKind::Minus => {
                let tok = self.consume(TokenKind::Minus);
                let operand = self.p_term();
                self.binary_call_unary("-", operand, tok.loc)
            }
            _ => self.p_term(),
        };
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                TokenKind::Amp => "&",
                _ => break,
            };
            let kind = self.peek_kind();
            drop(self.consume(kind));
            let right = self.p_term();
            let loc = self.current_loc();
            left = self.binary_call(op, left, right, loc);
        }
        self.leave();
        left
    }

    /// `p_shift_expression`: the grammar subset (§6) carries no shift
    /// operators of its own syntax beyond the keyword tokens already folded
    /// into `p_simple_expression`'s callers; this production exists as the
    /// precedence-chain link the distilled grammar names and simply defers.
    fn p_shift_expression(&mut self) -> NodeId { self.p_simple_expression() }

    /// `p_relation`: `shift_expression [relational_operator shift_expression]`.
    fn p_relation(&mut self) -> NodeId {
        self.begin("relation");
        let left = self.p_shift_expression();
        let result = match self.peek_kind() {
            TokenKind::Eq => self.finish_relation("=", left),
            TokenKind::Neq => self.finish_relation("/=", left),
            TokenKind::Lt => self.finish_relation("<", left),
            TokenKind::Le => self.finish_relation("<=", left),
            TokenKind::Gt => self.finish_relation(">", left),
            TokenKind::Geq => self.finish_relation(">=", left),
            _ => left,
        };
        self.leave();
        result
    }

    /// `p_expression`: `relation { (and|or|xor|nand|nor|xnor) relation }`,
    /// left-associative (§6 restricts mixed logical operators the way the
    /// full language does not, but this driver accepts any run).
    fn p_expression(&mut self) -> NodeId {
        self.begin("expression");
        let mut left = self.p_relation();
        loop {
            let op = match self.peek_kind() {
                TokenKind::And => "and",
                TokenKind::Or => "or",
                TokenKind::Xor => "xor",
                TokenKind::Nand => "nand",
                TokenKind::Nor => "nor",
                TokenKind::Xnor => "xnor",
                _ => break,
            };
            let kind = self.peek_kind();
            drop(self.consume(kind));
            let right = self.p_relation();
            let loc = self.current_loc();
            left = self.binary_call(op, left, right, loc);
        }
        self.leave();
        left
    }
}

impl Parser<'_> {
    fn consume_numeric(&mut self) -> crate::lexer::Token {
        let kind = self.peek_kind();
        self.consume(kind)
    }

    /// A unary-operator call: `"op"(operand)`, a one-argument `FCall`.
    fn binary_call_unary(&mut self, op: &str, operand: NodeId, loc: Location) -> NodeId {
        let id = self.alloc(NodeKind::FCall, loc);
        {
            let node = self.node_mut(id);
            node.ident = Some(Ident::new(op));
            node.params = vec![operand];
        }
        id
    }

    fn finish_relation(&mut self, op: &str, left: NodeId) -> NodeId {
        let kind = self.peek_kind();
        drop(self.consume(kind));
        let right = self.p_shift_expression();
        let loc = self.current_loc();
        self.binary_call(op, left, right, loc)
    }

    /// `p_element_association`: `[choice {| choice} =>] expression`, where a
    /// choice is `others`, a simple expression, or a `left to|downto right`
    /// range.
    fn p_element_association(&mut self) -> NodeId {
        self.begin("element association");
        let result = if self.optional(TokenKind::Others) {
            drop(self.consume(TokenKind::Arrow));
            let value = self.p_expression();
            let loc = self.current_loc();
            let id = self.alloc(NodeKind::Association, loc);
            {
                let node = self.node_mut(id);
                node.assoc_kind = Some(AssocKind::Others);
                node.value = Some(value);
            }
            id
        } else {
            let first = self.p_expression();
            if self.scan(&[TokenKind::To, TokenKind::Downto]) {
                let direction = if self.optional(TokenKind::To) {
                    vhdl_ast::node::Direction::To
                } else {
                    drop(self.consume(TokenKind::Downto));
                    vhdl_ast::node::Direction::Downto
                };
                let right = self.p_expression();
                drop(self.consume(TokenKind::Arrow));
                let value = self.p_expression();
                let loc = self.current_loc();
                let id = self.alloc(NodeKind::Association, loc);
                {
                    let node = self.node_mut(id);
                    node.assoc_kind = Some(AssocKind::Ranged);
                    node.range = Some(vhdl_ast::node::RangeBounds { left: first, right, direction });
                    node.value = Some(value);
                }
                id
            } else if self.optional(TokenKind::Arrow) {
                let value = self.p_expression();
                let loc = self.current_loc();
                let id = self.alloc(NodeKind::Association, loc);
                {
                    let node = self.node_mut(id);
                    node.assoc_kind = Some(AssocKind::Named);
                    node.target = Some(first);
                    node.value = Some(value);
                }
                id
            } else {
                let loc = self.current_loc();
                let id = self.alloc(NodeKind::Association, loc);
                {
                    let node = self.node_mut(id);
                    node.assoc_kind = Some(AssocKind::Positional);
                    node.value = Some(first);
                }
                id
            }
        };
        self.leave();
        result
    }

    /// Having parsed `( expression` and found a `,`/`=>` follows, the
    /// surrounding primary is in fact an aggregate whose first association's
    /// value (or choice, for the named case) is `first`; reinterprets and
    /// continues parsing the remaining associations.
    fn finish_aggregate_from(&mut self, first: NodeId) -> NodeId {
        self.extend("aggregate");
        let loc0 = self.current_loc();
        let id = self.alloc(NodeKind::Aggregate, loc0);

        let first_assoc = if self.scan(&[TokenKind::To, TokenKind::Downto]) {
            let direction = if self.optional(TokenKind::To) {
                vhdl_ast::node::Direction::To
            } else {
                drop(self.consume(TokenKind::Downto));
                vhdl_ast::node::Direction::Downto
            };
            let right = self.p_expression();
            drop(self.consume(TokenKind::Arrow));
            let value = self.p_expression();
            let loc = self.current_loc();
            let assoc = self.alloc(NodeKind::Association, loc);
            {
                let node = self.node_mut(assoc);
                node.assoc_kind = Some(AssocKind::Ranged);
                node.range = Some(vhdl_ast::node::RangeBounds { left: first, right, direction });
                node.value = Some(value);
            }
            assoc
        } else if self.optional(TokenKind::Arrow) {
            let value = self.p_expression();
            let loc = self.current_loc();
            let assoc = self.alloc(NodeKind::Association, loc);
            {
                let node = self.node_mut(assoc);
                node.assoc_kind = Some(AssocKind::Named);
                node.target = Some(first);
                node.value = Some(value);
            }
            assoc
        } else {
            let loc = self.current_loc();
            let assoc = self.alloc(NodeKind::Association, loc);
            {
                let node = self.node_mut(assoc);
                node.assoc_kind = Some(AssocKind::Positional);
                node.value = Some(first);
            }
            assoc
        };
        self.node_mut(id).assocs.push(first_assoc);

        while self.optional(TokenKind::Comma) {
            let assoc = self.p_element_association();
            self.node_mut(id).assocs.push(assoc);
        }
        drop(self.consume(TokenKind::RParen));
        self.node_mut(id).loc = self.current_loc();
        self.leave();
        id
    }
}
