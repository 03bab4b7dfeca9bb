//! VCD identifier codes.
//!
//! A simulator prints a short, unique-per-file string as the identifier for
//! each declared variable (`$var wire 1 ! clk $end` declares `!` as the
//! identifier for `clk`). The same identifier code may be reused by more
//! than one `$var` declaration when two XMRs alias the same underlying net
//! — the symbol table, not this type, is responsible for tracking aliases.

use std::fmt;
use std::rc::Rc;

/// An opaque, simulator-assigned identifier code from a VCD file.
///
/// Cloning an `IdCode` is cheap (reference-counted), since the same code is
/// read from every value-change token touching that signal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdCode(Rc<str>);

impl IdCode {
    /// Builds an `IdCode` from the raw token text.
    pub fn new(text: &str) -> Self {
        Self(Rc::from(text))
    }

    /// Returns the identifier code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdCode({:?})", self.0)
    }
}

impl fmt::Display for IdCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IdCode {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_by_text() {
        assert_eq!(IdCode::new("!"), IdCode::new("!"));
        assert_ne!(IdCode::new("!"), IdCode::new("\""));
    }

    #[test]
    fn clone_is_cheap_and_equal() {
        let a = IdCode::new("#\"");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "#\"");
    }

    #[test]
    fn display_roundtrips_text() {
        let id = IdCode::new("$%");
        assert_eq!(format!("{id}"), "$%");
    }

    #[test]
    fn usable_as_hashmap_key() {
        use std::collections::HashMap;
        let mut m: HashMap<IdCode, u32> = HashMap::new();
        m.insert(IdCode::new("!"), 1);
        assert_eq!(m.get(&IdCode::new("!")), Some(&1));
    }
}
