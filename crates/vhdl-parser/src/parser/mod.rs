//! The grammar driver (§4.F) and the machinery it sits on: the lookahead
//! buffer (§4.B) and the location tracker (§4.D). The actual productions are
//! split across sibling modules by grammar area, each an extension trait
//! implemented for [`Parser`] — `expressions`, `declarations`, `statements`,
//! `units` — mirroring how the distilled source groups `p_*` functions by
//! section even though they all close over the same global parser state.

mod declarations;
mod expressions;
mod statements;
mod units;

use rustc_hash::FxHashSet;
use vhdl_ast::arena::{Arena, NodeId};
use vhdl_ast::ident::Ident;
use vhdl_ast::node::{Node, NodeKind};
use vhdl_source::types::{Location, SourceFile};

pub use units::ParseUnits;

use crate::diagnostics::{DiagnosticReporter, LexError, ParseError};
use crate::lexer::{Lexer, Token, TokenKind, TokenValue};

/// A recursive-descent parser over one source file, producing tree nodes
/// into an owned [`Arena`] (§5: "tree nodes are owned by an arena-like pool
/// that outlives every parse").
///
/// A `Parser` is not reentrant (§5): its lookahead buffer, hint stack, and
/// diagnostic counters are single-flow state. Parsing a second compilation
/// unit from the same source reuses the same buffer and arena; parsing two
/// sources concurrently requires two `Parser`s.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    arena: Arena,
    diagnostics: DiagnosticReporter,

    peek_tok: Option<Token>,
    peek2_tok: Option<Token>,

    hint: &'static str,
    hint_stack: Vec<(&'static str, Location)>,
    start_loc: Location,
    /// The location of the most recently fetched token — the distilled
    /// source's global `yylloc`, updated on every `yylex` call.
    cur_loc: Location,

    /// Identifiers already handed out by [`Parser::identifier`], used to keep
    /// synthesised statement labels unique within this parse (§4.F).
    seen_idents: FxHashSet<String>,
    /// The shared "Assertion violation." aggregate, built once and reused for
    /// every assertion without an explicit `report` clause (mirrors the
    /// distilled source's `assert_viol` cache).
    assert_viol: Option<NodeId>,
}

impl<'src> Parser<'src> {
    #[must_use]
    pub fn new(source: &'src SourceFile) -> Self {
        Self {
            lexer: Lexer::new(source),
            arena: Arena::new(),
            diagnostics: DiagnosticReporter::new(),
            peek_tok: None,
            peek2_tok: None,
            hint: "top level",
            hint_stack: Vec::new(),
            start_loc: Location::INVALID,
            cur_loc: Location::INVALID,
            seen_idents: FxHashSet::default(),
            assert_viol: None,
        }
    }

    #[must_use]
    pub fn arena(&self) -> &Arena { &self.arena }

    pub fn arena_mut(&mut self) -> &mut Arena { &mut self.arena }

    #[must_use]
    pub fn into_arena(self) -> Arena { self.arena }

    #[must_use]
    pub fn n_errors(&self) -> u32 { self.diagnostics.n_errors() }

    #[must_use]
    pub fn errors(&self) -> &[ParseError] { self.diagnostics.errors() }

    #[must_use]
    pub fn lex_errors(&self) -> &[LexError] { self.lexer.lex_errors() }

    // -- Lookahead buffer (§4.B) --------------------------------------

    fn fill_peek(&mut self) {
        if self.peek_tok.is_none() {
            debug_assert!(self.peek2_tok.is_none());
            let tok = self.lexer.next_token();
            self.cur_loc = tok.loc.clone();
            self.peek_tok = Some(tok);
        }
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.fill_peek();
        self.peek_tok.as_ref().expect("just filled").kind
    }

    fn peek2_kind(&mut self) -> TokenKind {
        self.fill_peek();
        if self.peek2_tok.is_none() {
            let tok = self.lexer.next_token();
            self.cur_loc = tok.loc.clone();
            self.peek2_tok = Some(tok);
        }
        self.peek2_tok.as_ref().expect("just filled").kind
    }

    /// Advances the buffer, reporting through the cascade-suppression policy
    /// if `expected` does not match the head token (§4.B `consume`). Always
    /// advances, matching the distilled source's "offending token is skipped
    /// only implicitly" recovery (§7, class 1).
    fn consume(&mut self, expected: TokenKind) -> Token {
        self.fill_peek();
        let got = self.peek_tok.take().expect("just filled");

        if got.kind == expected {
            self.diagnostics.record_match();
        } else {
            let hint = self.hint.to_string();
            let loc = got.loc.clone();
            self.diagnostics.record_mismatch(|| ParseError::Mismatch {
                expected,
                found: got.kind,
                hint,
                loc,
            });
        }

        if self.start_loc.is_invalid() {
            self.start_loc = got.loc.clone();
        }

        self.peek_tok = self.peek2_tok.take();
        got
    }

    /// Consumes the head token iff it equals `tok` (§4.B `optional`).
    fn optional(&mut self, tok: TokenKind) -> bool {
        if self.peek_kind() == tok {
            drop(self.consume(tok));
            true
        } else {
            false
        }
    }

    /// True iff the head token is in `set`, without consuming (§4.B `scan`).
    fn scan(&mut self, set: &[TokenKind]) -> bool {
        let head = self.peek_kind();
        set.contains(&head)
    }

    /// Reports an "unexpected token, expecting one of" diagnostic without
    /// consuming (§4.B `_expect`, invoked when a dispatching `switch` falls
    /// through to `default`).
    fn expect(&mut self, set: &[TokenKind]) {
        let found = self.peek_kind();
        let hint = self.hint.to_string();
        let loc = self.cur_loc.clone();
        let expected = set.to_vec();
        self.diagnostics.record_mismatch(|| ParseError::NoneOf { found, expected, hint, loc });
    }

    /// Consumes the head token iff it belongs to `set`, else reports and
    /// leaves the buffer untouched beyond the usual mismatch-counter reset
    /// (§4.B `one_of`). Returns the token actually found.
    fn one_of(&mut self, set: &[TokenKind]) -> TokenKind {
        let head = self.peek_kind();
        if set.contains(&head) {
            self.consume(head).kind
        } else {
            self.expect(set);
            head
        }
    }

    // -- Location tracker (§4.D) ---------------------------------------

    /// `BEGIN(s)`: pushes the caller's hint/start location and resets
    /// `start_loc` to invalid so the next `consume` establishes a fresh span.
    fn begin(&mut self, hint: &'static str) {
        self.hint_stack.push((self.hint, self.start_loc.clone()));
        self.hint = hint;
        self.start_loc = Location::INVALID;
    }

    /// `EXTEND(s)`: like [`Self::begin`] but inherits the caller's
    /// `start_loc`, used by productions that continue a span already opened
    /// by their caller (e.g. a statement's optional label).
    fn extend(&mut self, hint: &'static str) {
        self.hint_stack.push((self.hint, self.start_loc.clone()));
        self.hint = hint;
    }

    /// Pops the hint/start-location stack, restoring the caller's scope.
    fn leave(&mut self) {
        let (hint, start_loc) = self.hint_stack.pop().expect("unbalanced begin/leave");
        self.hint = hint;
        self.start_loc = start_loc;
    }

    /// `CURRENT_LOC`: the span from the scope's saved start through the most
    /// recently fetched token's end. Must be read before [`Self::leave`]
    /// restores the caller's `start_loc`.
    fn current_loc(&self) -> Location { self.start_loc.merge(&self.cur_loc) }

    // -- Shared helpers --------------------------------------------------

    fn alloc(&mut self, kind: NodeKind, loc: Location) -> NodeId {
        self.arena.alloc(|id| Node::new(id, kind, loc))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.arena.get_mut(id).expect("node freshly allocated by this parser")
    }

    /// `p_identifier`: consumes an identifier token, tracking it so label
    /// synthesis (§4.F) can avoid colliding with it later.
    fn identifier(&mut self) -> Ident {
        let tok = self.consume(TokenKind::Ident);
        let text = match tok.value {
            TokenValue::Ident(s) => s,
            _ => "error".to_string(),
        };
        drop(self.seen_idents.insert(text.to_ascii_lowercase()));
        Ident::new(text)
    }

    /// `p_identifier_list`: `identifier { , identifier }`.
    fn identifier_list(&mut self) -> Vec<Ident> {
        let mut ids = vec![self.identifier()];
        while self.optional(TokenKind::Comma) {
            ids.push(self.identifier());
        }
        ids
    }

    /// `loc_to_ident`: synthesises `line_<N>`, extended with a letter suffix
    /// until it does not collide with any identifier seen so far this parse
    /// (§4.F: "optionally extended with a suffix letter sequence to achieve
    /// uniqueness among interned identifiers in this run").
    fn synthesize_label(&mut self, loc: &Location) -> Ident {
        let base = format!("line_{}", loc.first_line);
        let mut candidate = base.clone();
        let mut suffix = 0u32;
        while self.seen_idents.contains(&candidate.to_ascii_lowercase()) {
            candidate = format!("{base}{}", suffix_letters(suffix));
            suffix += 1;
        }
        drop(self.seen_idents.insert(candidate.to_ascii_lowercase()));
        Ident::new(candidate)
    }

    /// `set_label_and_loc`: stamps a statement's location and, if no label
    /// was parsed, synthesises one.
    fn set_label_and_loc(&mut self, id: NodeId, label: Option<Ident>, loc: Location) {
        let ident = label.unwrap_or_else(|| self.synthesize_label(&loc));
        let node = self.node_mut(id);
        node.loc = loc;
        node.ident = Some(ident);
    }

    /// `str_to_agg`: a string literal becomes an aggregate of positional
    /// references to single-character identifiers (§4.F). Characters with
    /// value `0x81` are formatting pads and are skipped.
    fn str_to_agg(&mut self, text: &str, loc: Location) -> NodeId {
        let agg = self.alloc(NodeKind::Aggregate, loc.clone());
        for ch in text.chars() {
            if ch as u32 == 0x81 {
                continue;
            }
            let ref_id = self.alloc(NodeKind::Ref, loc.clone());
            self.node_mut(ref_id).ident = Some(Ident::new(format!("'{ch}'")));

            let assoc = self.alloc(NodeKind::Association, loc.clone());
            {
                let node = self.node_mut(assoc);
                node.assoc_kind = Some(vhdl_ast::node::AssocKind::Positional);
                node.value = Some(ref_id);
            }
            self.node_mut(agg).assocs.push(assoc);
        }
        agg
    }

    /// The shared `"Assertion violation."` message aggregate (§4.F), built
    /// once and reused like the distilled source's `assert_viol` cache.
    fn assertion_violation_message(&mut self) -> NodeId {
        if let Some(id) = self.assert_viol {
            return id;
        }
        let id = self.str_to_agg("Assertion violation.", Location::INVALID);
        self.assert_viol = Some(id);
        id
    }

    fn make_ref(&mut self, name: &str, loc: Location) -> NodeId {
        let id = self.alloc(NodeKind::Ref, loc);
        self.node_mut(id).ident = Some(Ident::new(name));
        id
    }

    /// `"op"(left, right)`: builds a binary-operator function call node, the
    /// encoding used by every precedence level in §4.F.
    fn binary_call(&mut self, op: &str, left: NodeId, right: NodeId, loc: Location) -> NodeId {
        let id = self.alloc(NodeKind::FCall, loc);
        {
            let node = self.node_mut(id);
            node.ident = Some(Ident::new(op));
            node.params = vec![left, right];
        }
        id
    }
}

fn suffix_letters(mut n: u32) -> String {
    // a, b, c, ... z, aa, ab, ... matching the distilled source's
    // `buf[nprint] = 'a' + i` walk, generalised past 26 collisions.
    let mut out = Vec::new();
    loop {
        let rem = (n % 26) as u8;
        out.push((b'a' + rem) as char);
        n /= 26;
        if n == 0 {
            break;
        }
        n -= 1;
    }
    out.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_letters_start_at_a() {
        assert_eq!(suffix_letters(0), "a");
        assert_eq!(suffix_letters(1), "b");
        assert_eq!(suffix_letters(25), "z");
        assert_eq!(suffix_letters(26), "aa");
    }
}
