//! Interned C type spellings.
//!
//! The translator looks the same few hundred type names up thousands of
//! times. A [`Symbol`] stores each distinct spelling once, for the lifetime
//! of the process, and compares by address.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{LazyLock, PoisonError, RwLock};

static SYMBOLS: LazyLock<RwLock<HashSet<&'static str>>> =
    LazyLock::new(|| RwLock::new(HashSet::new()));

/// An interned string.
///
/// Two symbols with the same content share the same storage, so equality is a
/// pointer comparison. Hashing uses the content, which keeps lookups by `&str`
/// working in maps keyed by symbols.
#[derive(Clone, Copy)]
pub struct Symbol {
    inner: &'static str,
}

impl Symbol {
    /// Intern `s`.
    pub fn new(s: impl AsRef<str>) -> Self {
        let s = s.as_ref();

        if let Some(&interned) = SYMBOLS.read().unwrap_or_else(PoisonError::into_inner).get(s) {
            return Symbol { inner: interned };
        }

        let mut symbols = SYMBOLS.write().unwrap_or_else(PoisonError::into_inner);
        // another writer may have won the race
        if let Some(&interned) = symbols.get(s) {
            return Symbol { inner: interned };
        }
        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        symbols.insert(leaked);
        Symbol { inner: leaked }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.inner
    }
}

impl Deref for Symbol {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.inner
    }
}

impl AsRef<str> for Symbol {
    #[inline]
    fn as_ref(&self) -> &str {
        self.inner
    }
}

impl Borrow<str> for Symbol {
    #[inline]
    fn borrow(&self) -> &str {
        self.inner
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.inner, other.inner)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner, f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner, f)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_same_spelling_same_storage() {
        let a = Symbol::new("LinphoneCore");
        let b = Symbol::from(String::from("LinphoneCore"));
        let c = Symbol::new("LinphoneCall");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(std::ptr::eq(a.as_str(), b.as_str()));
    }

    #[test]
    fn test_lookup_by_str() {
        let mut index: HashMap<Symbol, Option<u32>> = HashMap::new();
        index.insert(Symbol::new("LinphoneReason"), None);

        assert_eq!(index.get("LinphoneReason"), Some(&None));
        assert!(!index.contains_key("LinphoneCore"));
    }
}
