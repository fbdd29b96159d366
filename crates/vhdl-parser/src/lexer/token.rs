//! The token kinds the scanner (§1, out of scope for this crate's own
//! internals) must produce for the parser to consume, plus a concrete
//! `logos`-derived implementation of that scanner for the supported grammar
//! subset (§6).

use logos::Logos;

/// One lexical token of the supported grammar subset.
///
/// Keyword variants are matched case-insensitively, as VHDL identifiers and
/// reserved words both are. `Le` covers both the relational `<=` and the
/// signal assignment `<=`; the parser disambiguates by grammatical position,
/// exactly as the distilled grammar driver does.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"--[^\n]*")]
pub enum TokenKind {
    #[token("entity", ignore(ascii_case))]
    Entity,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("end", ignore(ascii_case))]
    End,
    #[token("generic", ignore(ascii_case))]
    Generic,
    #[token("port", ignore(ascii_case))]
    Port,
    #[token("in", ignore(ascii_case))]
    In,
    #[token("out", ignore(ascii_case))]
    Out,
    #[token("inout", ignore(ascii_case))]
    Inout,
    #[token("buffer", ignore(ascii_case))]
    Buffer,
    #[token("linkage", ignore(ascii_case))]
    Linkage,
    #[token("signal", ignore(ascii_case))]
    Signal,
    #[token("variable", ignore(ascii_case))]
    Variable,
    #[token("constant", ignore(ascii_case))]
    Constant,
    #[token("file", ignore(ascii_case))]
    File,
    #[token("begin", ignore(ascii_case))]
    Begin,
    #[token("architecture", ignore(ascii_case))]
    Architecture,
    #[token("of", ignore(ascii_case))]
    Of,
    #[token("process", ignore(ascii_case))]
    Process,
    #[token("postponed", ignore(ascii_case))]
    Postponed,
    #[token("wait", ignore(ascii_case))]
    Wait,
    #[token("on", ignore(ascii_case))]
    On,
    #[token("until", ignore(ascii_case))]
    Until,
    #[token("for", ignore(ascii_case))]
    For,
    #[token("assert", ignore(ascii_case))]
    Assert,
    #[token("report", ignore(ascii_case))]
    Report,
    #[token("severity", ignore(ascii_case))]
    Severity,
    #[token("if", ignore(ascii_case))]
    If,
    #[token("then", ignore(ascii_case))]
    Then,
    #[token("elsif", ignore(ascii_case))]
    Elsif,
    #[token("else", ignore(ascii_case))]
    Else,
    #[token("null", ignore(ascii_case))]
    Null,
    #[token("return", ignore(ascii_case))]
    Return,
    #[token("while", ignore(ascii_case))]
    While,
    #[token("loop", ignore(ascii_case))]
    Loop,
    #[token("library", ignore(ascii_case))]
    Library,
    #[token("use", ignore(ascii_case))]
    Use,
    #[token("attribute", ignore(ascii_case))]
    Attribute,
    #[token("after", ignore(ascii_case))]
    After,
    #[token("unaffected", ignore(ascii_case))]
    Unaffected,
    #[token("others", ignore(ascii_case))]
    Others,
    #[token("to", ignore(ascii_case))]
    To,
    #[token("downto", ignore(ascii_case))]
    Downto,
    #[token("procedure", ignore(ascii_case))]
    Procedure,
    #[token("label", ignore(ascii_case))]
    Label,

    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("xor", ignore(ascii_case))]
    Xor,
    #[token("nand", ignore(ascii_case))]
    Nand,
    #[token("nor", ignore(ascii_case))]
    Nor,
    #[token("xnor", ignore(ascii_case))]
    Xnor,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("abs", ignore(ascii_case))]
    Abs,
    #[token("mod", ignore(ascii_case))]
    Mod,
    #[token("rem", ignore(ascii_case))]
    Rem,
    #[token("sll", ignore(ascii_case))]
    Sll,
    #[token("srl", ignore(ascii_case))]
    Srl,
    #[token("sla", ignore(ascii_case))]
    Sla,
    #[token("sra", ignore(ascii_case))]
    Sra,
    #[token("rol", ignore(ascii_case))]
    Rol,
    #[token("ror", ignore(ascii_case))]
    Ror,

    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*")]
    Real,
    #[regex(r"[0-9][0-9_]*")]
    Integer,
    #[regex(r#""([^"]|"")*""#)]
    Str,
    #[regex(r"'.'")]
    CharLit,

    #[token(":=")]
    Assign,
    #[token("<=")]
    Le,
    #[token(">=")]
    Geq,
    #[token("=>")]
    Arrow,
    #[token("**")]
    Exp,
    #[token("/=")]
    Neq,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,

    Eof,
}

impl TokenKind {
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Is => "is",
            Self::End => "end",
            Self::Generic => "generic",
            Self::Port => "port",
            Self::In => "in",
            Self::Out => "out",
            Self::Inout => "inout",
            Self::Buffer => "buffer",
            Self::Linkage => "linkage",
            Self::Signal => "signal",
            Self::Variable => "variable",
            Self::Constant => "constant",
            Self::File => "file",
            Self::Begin => "begin",
            Self::Architecture => "architecture",
            Self::Of => "of",
            Self::Process => "process",
            Self::Postponed => "postponed",
            Self::Wait => "wait",
            Self::On => "on",
            Self::Until => "until",
            Self::For => "for",
            Self::Assert => "assert",
            Self::Report => "report",
            Self::Severity => "severity",
            Self::If => "if",
            Self::Then => "then",
            Self::Elsif => "elsif",
            Self::Else => "else",
            Self::Null => "null",
            Self::Return => "return",
            Self::While => "while",
            Self::Loop => "loop",
            Self::Library => "library",
            Self::Use => "use",
            Self::Attribute => "attribute",
            Self::After => "after",
            Self::Unaffected => "unaffected",
            Self::Others => "others",
            Self::To => "to",
            Self::Downto => "downto",
            Self::Procedure => "procedure",
            Self::Label => "label",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Nor => "nor",
            Self::Xnor => "xnor",
            Self::Not => "not",
            Self::Abs => "abs",
            Self::Mod => "mod",
            Self::Rem => "rem",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sla => "sla",
            Self::Sra => "sra",
            Self::Rol => "rol",
            Self::Ror => "ror",
            Self::Ident => "identifier",
            Self::Real => "real literal",
            Self::Integer => "integer literal",
            Self::Str => "string literal",
            Self::CharLit => "character literal",
            Self::Assign => ":=",
            Self::Le => "<=",
            Self::Geq => ">=",
            Self::Arrow => "=>",
            Self::Exp => "**",
            Self::Neq => "/=",
            Self::Colon => ":",
            Self::Semi => ";",
            Self::Comma => ",",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Dot => ".",
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Amp => "&",
            Self::Eof => "end of file",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.describe()) }
}
