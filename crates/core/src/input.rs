//! Capabilities of caller-supplied input.
//!
//! Admin requests often arrive as loosely typed JSON. Validators accept
//! anything implementing these traits, so a typed `&str` and a
//! `serde_json::Value` go through the same rules, and a JSON number where a
//! string belongs is rejected at the boundary.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

/// Values that may carry text.
pub trait Textual {
    /// The text, or `None` if the value is not textual.
    fn as_text(&self) -> Option<&str>;

    /// Whether the value stands for "not provided".
    fn is_null(&self) -> bool {
        false
    }
}

impl Textual for str {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Textual for String {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Textual for Value {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        self.as_str()
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl<T: Textual + ?Sized> Textual for &T {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

/// Values that may be a string-keyed mapping.
pub trait KeyValue {
    fn is_mapping(&self) -> bool;

    /// Whether the value stands for "not provided".
    fn is_null(&self) -> bool {
        false
    }
}

impl KeyValue for Value {
    fn is_mapping(&self) -> bool {
        self.is_object()
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl KeyValue for Map<String, Value> {
    fn is_mapping(&self) -> bool {
        true
    }
}

impl<V, S: BuildHasher> KeyValue for HashMap<String, V, S> {
    fn is_mapping(&self) -> bool {
        true
    }
}

impl<V> KeyValue for BTreeMap<String, V> {
    fn is_mapping(&self) -> bool {
        true
    }
}

/// Values with a truthiness.
///
/// `None` means the value is null and has no boolean reading. Only `false`
/// is falsy; every other non-null value is truthy, including `0` and `""`.
pub trait Truthy {
    fn truthiness(&self) -> Option<bool>;
}

impl Truthy for bool {
    fn truthiness(&self) -> Option<bool> {
        Some(*self)
    }
}

impl Truthy for Value {
    fn truthiness(&self) -> Option<bool> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(*b),
            _ => Some(true),
        }
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn truthiness(&self) -> Option<bool> {
        self.as_ref().and_then(Truthy::truthiness)
    }
}
