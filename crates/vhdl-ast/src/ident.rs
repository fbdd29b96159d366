//! A minimal stand-in for the identifier-interning pool.
//!
//! The interning pool itself is out of scope (§1): this crate only needs a
//! cheaply-cloneable, case-insensitively-comparable identifier type to store
//! on tree nodes. VHDL identifiers are case-insensitive, so `Ident` compares
//! and hashes on a lowercased view of its text rather than on the original
//! spelling, matching the distilled source's `icmp`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Ident(Arc<str>);

impl Ident {
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Self { Self(text.into()) }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Case-insensitive comparison against a plain string, matching the
    /// distilled source's `icmp(builtin, "add")`-style checks.
    #[must_use]
    pub fn icmp(&self, other: &str) -> bool { self.0.eq_ignore_ascii_case(other) }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool { self.0.eq_ignore_ascii_case(&other.0) }
}
impl Eq for Ident {}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            b.to_ascii_lowercase().hash(state);
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Self { Self::new(s) }
}
impl From<String> for Ident {
    fn from(s: String) -> Self { Self::new(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_compare_case_insensitively() {
        assert_eq!(Ident::new("ENTITY_NAME"), Ident::new("entity_name"));
        assert_ne!(Ident::new("foo"), Ident::new("bar"));
    }

    #[test]
    fn icmp_matches_builtin_names_case_insensitively() {
        assert!(Ident::new("ADD").icmp("add"));
        assert!(!Ident::new("add").icmp("sub"));
    }
}
