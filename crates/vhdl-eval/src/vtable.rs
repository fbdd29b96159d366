//! The value-table (§3, §4.G): a stack of frames mapping identifier → tree
//! value, scoped to the lifetime of one function-body evaluation (§5).
//!
//! §9 describes the distilled source's frame as "a hand-rolled stack ...
//! with fixed capacity (16) and an inline array" walked "frame-to-frame via
//! an explicit `down` link"; that capacity is preserved here as a warning
//! threshold rather than a hard assertion (§9: "the capacity cap was an
//! assumption, not a contract"), and the `down` link is simply the next
//! element down a growable `Vec`-backed stack.

use rustc_hash::FxHashMap;
use vhdl_ast::arena::NodeId;
use vhdl_ast::ident::Ident;

/// The per-frame capacity hint inherited from the distilled source (§10.F).
pub const VTABLE_SZ: usize = 16;

/// The special identifier return statements use to hand a folded value back
/// to the body's caller (§3).
pub const RESULT_IDENT: &str = "result";

/// One lexically-scoped frame of bindings.
#[derive(Debug, Default)]
pub struct VtFrame {
    bindings: FxHashMap<String, NodeId>,
}

impl VtFrame {
    fn new() -> Self { Self { bindings: FxHashMap::default() } }

    /// Binds `name` in this frame, replacing any prior binding for the same
    /// name (§3: "binding in the top frame replaces any prior binding for
    /// the same name in that frame"). This is a scan-then-overwrite against
    /// the existing entry, matching `vtframe_get`'s binding behaviour
    /// (§10.F), rather than a blind push of a new slot.
    fn bind(&mut self, name: &Ident, value: NodeId) {
        let key = name.as_str().to_ascii_lowercase();
        if self.bindings.len() >= VTABLE_SZ && !self.bindings.contains_key(&key) {
            log::warn!("value-table frame exceeded its {VTABLE_SZ}-binding capacity hint binding `{name}`");
        }
        drop(self.bindings.insert(key, value));
    }

    fn get(&self, name: &Ident) -> Option<NodeId> {
        self.bindings.get(&name.as_str().to_ascii_lowercase()).copied()
    }
}

/// A stack of [`VtFrame`]s (§3). Binding into an empty stack is a silent
/// no-op (§4.G: "used when the evaluator is called with no active frame").
#[derive(Debug, Default)]
pub struct Vtable {
    frames: Vec<VtFrame>,
}

impl Vtable {
    #[must_use]
    pub fn new() -> Self { Self { frames: Vec::new() } }

    /// Pushes a new, empty frame (§3: "a push creates a new empty frame on
    /// top").
    pub fn push(&mut self) {
        log::trace!("value-table: pushing frame (depth {})", self.frames.len() + 1);
        self.frames.push(VtFrame::new());
    }

    /// Pops the top frame and its contents (§3).
    pub fn pop(&mut self) {
        drop(self.frames.pop());
        log::trace!("value-table: popped frame (depth {})", self.frames.len());
    }

    /// Binds `name` in the top frame; a silent no-op if the stack is empty.
    pub fn bind(&mut self, name: &Ident, value: NodeId) {
        match self.frames.last_mut() {
            Some(frame) => frame.bind(name, value),
            None => log::trace!("value-table: bind(`{name}`) on an empty stack, ignored"),
        }
    }

    /// Looks up `name`, searching top-down (§3: "lookup searches top-down").
    #[must_use]
    pub fn lookup(&self, name: &Ident) -> Option<NodeId> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    #[must_use]
    pub fn depth(&self) -> usize { self.frames.len() }
}

#[cfg(test)]
mod tests {
    use vhdl_ast::arena::Arena;
    use vhdl_ast::node::NodeKind;
    use vhdl_source::types::Location;

    use super::*;

    fn dummy_node(arena: &mut Arena) -> NodeId { arena.alloc(|id| vhdl_ast::node::Node::new(id, NodeKind::Null, Location::INVALID)) }

    #[test]
    fn lookup_after_bind_returns_the_bound_value() {
        let mut arena = Arena::new();
        let value = dummy_node(&mut arena);
        let mut vt = Vtable::new();
        vt.push();
        vt.bind(&Ident::new("x"), value);
        assert_eq!(vt.lookup(&Ident::new("x")), Some(value));
    }

    #[test]
    fn rebinding_in_the_same_frame_replaces_the_prior_value() {
        let mut arena = Arena::new();
        let first = dummy_node(&mut arena);
        let second = dummy_node(&mut arena);
        let mut vt = Vtable::new();
        vt.push();
        vt.bind(&Ident::new("x"), first);
        vt.bind(&Ident::new("x"), second);
        assert_eq!(vt.lookup(&Ident::new("x")), Some(second));
    }

    #[test]
    fn lookup_recurses_to_the_parent_frame_on_miss() {
        let mut arena = Arena::new();
        let outer_value = dummy_node(&mut arena);
        let mut vt = Vtable::new();
        vt.push();
        vt.bind(&Ident::new("outer"), outer_value);
        vt.push();
        assert_eq!(vt.lookup(&Ident::new("outer")), Some(outer_value));
    }

    #[test]
    fn pop_drops_the_frame_and_its_bindings() {
        let mut arena = Arena::new();
        let value = dummy_node(&mut arena);
        let mut vt = Vtable::new();
        vt.push();
        vt.bind(&Ident::new("x"), value);
        vt.pop();
        vt.push();
        assert_eq!(vt.lookup(&Ident::new("x")), None);
    }

    #[test]
    fn binding_into_an_empty_stack_is_a_silent_no_op() {
        let mut arena = Arena::new();
        let value = dummy_node(&mut arena);
        let mut vt = Vtable::new();
        vt.bind(&Ident::new("x"), value);
        assert_eq!(vt.lookup(&Ident::new("x")), None);
    }
}
