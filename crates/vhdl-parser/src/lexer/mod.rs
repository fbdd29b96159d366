//! The token source (§1 component A, §6 "supporting entry points to the
//! scanner"). The distilled source drives a hand-written DFA through
//! `yylex`/`begin_token`/`get_next_char`; here the DFA itself is generated by
//! `logos`, but the shape the parser depends on is only [`Token`] and
//! [`Lexer::next_token`] — nothing downstream inspects how a token was found.

pub mod token;

pub use token::TokenKind;

use vhdl_source::types::{Location, Position, SourceFile, SourceSpan};

use crate::diagnostics::LexError;

/// The value carried by a value-bearing token (§3: "four value-bearing
/// kinds: identifier, integer literal, real literal, string literal"),
/// corresponding to the distilled source's `yylval_t { s, n, d }`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Ident(String),
    Integer(i64),
    Real(f64),
    /// Raw text between (and including) the literal's delimiting quotes,
    /// unescaped no further than the distilled source does.
    Str(String),
}

/// One lexical token: a kind, its source [`Location`], and its value, if any.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: Location,
    pub value: TokenValue,
}

impl Token {
    #[must_use]
    pub const fn eof(loc: Location) -> Self { Self { kind: TokenKind::Eof, loc, value: TokenValue::None } }
}

/// Wraps a `logos` lexer over one [`SourceFile`], translating byte spans into
/// [`Location`]s via the file's precomputed line starts (the distilled
/// source's `begin_token`/`get_next_char` pair, minus the hand-rolled DFA).
pub struct Lexer<'src> {
    source: &'src SourceFile,
    inner: logos::Lexer<'src, TokenKind>,
    lex_errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(source: &'src SourceFile) -> Self {
        use logos::Logos as _;
        Self { source, inner: TokenKind::lexer(&source.content), lex_errors: Vec::new() }
    }

    #[must_use]
    pub fn lex_errors(&self) -> &[LexError] { &self.lex_errors }

    fn location_for(&self, start: usize, end: usize) -> Location {
        let start_pos = self.source.position_from_offset(start);
        // `end` is exclusive; the last character of the token is at `end - 1`.
        let end_pos = self.source.position_from_offset(end.max(start + 1).min(self.source.content.len()));
        let span = SourceSpan::new(start_pos, end_pos, self.source.id);
        let line_text = self.source.line_text_arc(start_pos.line);
        Location::from_span(span, line_text)
    }

    fn eof_location(&self) -> Location {
        let end = self.source.content.len();
        let pos = self.source.position_from_offset(end);
        let span = SourceSpan::new(pos, pos, self.source.id);
        Location::from_span(span, None)
    }

    /// Advances the scanner and returns the next token, or [`TokenKind::Eof`]
    /// once the source is exhausted. A byte the `logos` DFA cannot classify is
    /// logged and skipped, matching this crate's treatment of lexical detail
    /// as out of the specification's scope (§1): the parser never sees a
    /// dedicated lex-error token, only a resynchronised stream.
    pub fn next_token(&mut self) -> Token {
        loop {
            match self.inner.next() {
                None => return Token::eof(self.eof_location()),
                Some(Err(())) => {
                    let span = self.inner.span();
                    let loc = self.location_for(span.start, span.end);
                    let byte_repr = self.inner.slice().to_string();
                    log::warn!("skipping unrecognised byte {byte_repr:?}");
                    self.lex_errors.push(LexError { byte_repr, loc });
                    continue;
                }
                Some(Ok(kind)) => {
                    let span = self.inner.span();
                    let loc = self.location_for(span.start, span.end);
                    let text = self.inner.slice();
                    let value = value_for(kind, text);
                    return Token { kind, loc, value };
                }
            }
        }
    }
}

fn value_for(kind: TokenKind, text: &str) -> TokenValue {
    match kind {
        TokenKind::Ident => TokenValue::Ident(text.to_string()),
        TokenKind::Integer => TokenValue::Integer(parse_integer(text)),
        TokenKind::Real => TokenValue::Real(parse_real(text)),
        TokenKind::Str | TokenKind::CharLit => TokenValue::Str(text.to_string()),
        _ => TokenValue::None,
    }
}

fn parse_integer(text: &str) -> i64 {
    let mut cleaned = String::with_capacity(text.len());
    cleaned.extend(text.chars().filter(|&c| c != '_'));
    cleaned.parse().unwrap_or(0)
}

fn parse_real(text: &str) -> f64 {
    let mut cleaned = String::with_capacity(text.len());
    cleaned.extend(text.chars().filter(|&c| c != '_'));
    cleaned.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use vhdl_source::types::{FileID, SourceFile};

    use super::*;

    fn lex_all(src: &str) -> Vec<TokenKind> {
        let file = SourceFile::new(FileID::new(1), "t.vhd".into(), src);
        let mut lexer = Lexer::new(&file);
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Eof {
                break;
            }
            kinds.push(tok.kind);
        }
        kinds
    }

    #[test]
    fn lexes_entity_header() {
        let kinds = lex_all("entity e is end;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Entity,
                TokenKind::Ident,
                TokenKind::Is,
                TokenKind::End,
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn integer_literal_strips_underscores() {
        let file = SourceFile::new(FileID::new(1), "t.vhd".into(), "1_000");
        let mut lexer = Lexer::new(&file);
        let tok = lexer.next_token();
        assert_eq!(tok.value, TokenValue::Integer(1000));
    }

    #[test]
    fn real_literal_round_trips() {
        let file = SourceFile::new(FileID::new(1), "t.vhd".into(), "3.14");
        let mut lexer = Lexer::new(&file);
        let tok = lexer.next_token();
        assert_eq!(tok.value, TokenValue::Real(3.14));
    }

    #[test]
    fn unrecognised_byte_is_recorded_and_skipped() {
        let file = SourceFile::new(FileID::new(1), "t.vhd".into(), "entity `@` is");
        let mut lexer = Lexer::new(&file);
        let kinds = std::iter::from_fn(|| {
            let tok = lexer.next_token();
            (tok.kind != TokenKind::Eof).then_some(tok.kind)
        })
        .collect::<Vec<_>>();
        assert_eq!(kinds, vec![TokenKind::Entity, TokenKind::Is]);
        assert!(!lexer.lex_errors().is_empty());
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let kinds = lex_all("ENTITY Entity entity");
        assert_eq!(kinds, vec![TokenKind::Entity, TokenKind::Entity, TokenKind::Entity]);
    }
}
