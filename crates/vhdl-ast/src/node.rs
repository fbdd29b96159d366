//! The tree node shape shared by the parser and the evaluator (§3).
//!
//! The attribute set named in §3 is closed (a handful of flags plus the
//! builtin name), so per design note §9 it is modelled as explicit fields
//! plus a small flag map rather than an open-ended attribute bag.

use rustc_hash::FxHashMap;
use vhdl_source::types::Location;

use crate::arena::NodeId;
use crate::ident::Ident;

/// The closed set of tree node kinds (§3, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Top level
    ContextClause,
    DesignUnit,
    EntityDecl,
    ArchitectureBody,

    // Declarations
    PortDecl,
    GenericDecl,
    SignalDecl,
    VariableDecl,
    AttrDecl,
    AttrSpec,
    FuncDecl,
    FuncBody,
    TypeRef,
    EnumLit,

    // Concurrent / process statements
    Process,
    Wait,
    Assert,

    // Sequential statements
    SignalAssign,
    VarAssign,
    If,
    While,
    For,
    Return,
    Null,

    // Expressions
    FCall,
    Ref,
    Literal,
    Aggregate,
    Association,
    Slice,
    Open,
    Waveform,
}

/// The subkind of a literal node (§3: "a literal node has a subkind in
/// {integer, real, null}").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Real,
    Null,
}

/// The value carried by a literal node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Real(f64),
    Null,
}

impl LiteralValue {
    #[must_use]
    pub const fn kind(&self) -> LiteralKind {
        match self {
            Self::Integer(_) => LiteralKind::Integer,
            Self::Real(_) => LiteralKind::Real,
            Self::Null => LiteralKind::Null,
        }
    }
}

/// A port's mode (§6 interface list entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortMode {
    In,
    Out,
    InOut,
    Buffer,
    Linkage,
}

/// The kind of an aggregate association (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssocKind {
    Positional,
    Named,
    Ranged,
    Others,
}

/// The direction of a `left .. right` range (`to` or `downto`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    To,
    Downto,
}

/// A `(left, right, direction)` range, carried by a `ranged` association.
#[derive(Debug, Clone, Copy)]
pub struct RangeBounds {
    pub left: NodeId,
    pub right: NodeId,
    pub direction: Direction,
}

/// The small, closed attribute map (§3: "carries flags such as `postponed`,
/// `is_report`, and the builtin name").
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    pub postponed: bool,
    pub is_report: bool,
    pub builtin: Option<Ident>,
    flags: FxHashMap<String, bool>,
}

impl Attrs {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        drop(self.flags.insert(name.into(), value));
    }

    #[must_use]
    pub fn flag(&self, name: &str) -> bool { self.flags.get(name).copied().unwrap_or(false) }
}

/// A tree node (§3). One shape serves every [`NodeKind`]; fields that do not
/// apply to a given kind are left at their default (`None` / empty `Vec`).
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub loc: Location,

    pub ident: Option<Ident>,
    pub secondary_ident: Option<Ident>,
    pub referent: Option<NodeId>,
    pub ty: Option<NodeId>,

    pub literal: Option<LiteralValue>,
    pub mode: Option<PortMode>,
    pub assoc_kind: Option<AssocKind>,
    pub range: Option<RangeBounds>,
    /// The enumeration literal's ordinal, for `EnumLit` nodes (§4.H: 0 → false, 1 → true).
    pub ordinal: Option<i64>,

    pub ports: Vec<NodeId>,
    pub generics: Vec<NodeId>,
    pub decls: Vec<NodeId>,
    pub stmts: Vec<NodeId>,
    pub else_stmts: Vec<NodeId>,
    pub params: Vec<NodeId>,
    pub assocs: Vec<NodeId>,
    pub waveforms: Vec<NodeId>,
    pub triggers: Vec<NodeId>,

    /// The condition/value expression carried by `if`, `while`, `return`,
    /// `assert`, and assignment nodes (the distilled source's `tree_value`).
    pub value: Option<NodeId>,
    /// The assignment target, for `VarAssign`/`SignalAssign`.
    pub target: Option<NodeId>,
    /// The assertion message expression, for `Assert`.
    pub message: Option<NodeId>,
    /// The assertion severity expression, for `Assert`.
    pub severity: Option<NodeId>,

    pub attrs: Attrs,
}

impl Node {
    #[must_use]
    pub fn new(id: NodeId, kind: NodeKind, loc: Location) -> Self {
        Self {
            id,
            kind,
            loc,
            ident: None,
            secondary_ident: None,
            referent: None,
            ty: None,
            literal: None,
            mode: None,
            assoc_kind: None,
            range: None,
            ordinal: None,
            ports: Vec::new(),
            generics: Vec::new(),
            decls: Vec::new(),
            stmts: Vec::new(),
            else_stmts: Vec::new(),
            params: Vec::new(),
            assocs: Vec::new(),
            waveforms: Vec::new(),
            triggers: Vec::new(),
            value: None,
            target: None,
            message: None,
            severity: None,
            attrs: Attrs::new(),
        }
    }

    #[must_use]
    pub fn with_ident(mut self, ident: impl Into<Ident>) -> Self {
        self.ident = Some(ident.into());
        self
    }

    #[must_use]
    pub fn with_literal(mut self, value: LiteralValue) -> Self {
        self.literal = Some(value);
        self
    }
}
