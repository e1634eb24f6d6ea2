//! Tag collections with canonicalizing membership.
//!
//! A page carries two tag sets: one normalized for deduplication and
//! cross-referencing, one raw-case for display fidelity. Both apply the same
//! rule at insertion and membership test, so the two never silently diverge
//! in membership semantics.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

/// Canonicalize a tag name.
///
/// Single-character tags are uppercased. Otherwise the first character is
/// uppercased and the rest left as-is, underscores become spaces (the markup
/// encodes spaces as underscores), and a fixed lookup table overrides a
/// handful of results whose conventional casing differs.
///
/// The function is idempotent: applying it twice equals applying it once.
#[must_use]
pub fn normalize_certain_names(val: &str) -> String {
    let Some(first) = val.chars().next() else {
        return String::new();
    };
    if val.chars().count() == 1 {
        return val.to_uppercase();
    }

    let mut v: String = first.to_uppercase().collect();
    v.push_str(&val[first.len_utf8()..]);
    let v = v.replace('_', " ");

    match v.as_str() {
        "Us" => "US".to_string(),
        "Uk" => "UK".to_string(),
        "Nz" => "NZ".to_string(),
        "Apa" => "APA".to_string(),
        "Ia" => "IA".to_string(),
        "First fandom" => "First Fandom".to_string(),
        _ => v,
    }
}

/// An unordered collection of unique tag strings.
///
/// In normalized mode, [`normalize_certain_names`] is applied both when
/// inserting and when testing membership, so `contains("us")` and
/// `contains("US")` agree. A raw set stores values untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    members: HashSet<String>,
    normalized: bool,
}

impl Default for TagSet {
    fn default() -> Self {
        Self::normalized()
    }
}

impl TagSet {
    /// An empty set that canonicalizes values on insertion and lookup.
    #[must_use]
    pub fn normalized() -> Self {
        Self {
            members: HashSet::new(),
            normalized: true,
        }
    }

    /// An empty set that stores values exactly as given.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            members: HashSet::new(),
            normalized: false,
        }
    }

    /// Insert a single value.
    pub fn add_one(&mut self, value: &str) {
        let value = if self.normalized {
            normalize_certain_names(value)
        } else {
            value.to_string()
        };
        self.members.insert(value);
    }

    /// Insert every value of an iterator.
    pub fn add_many<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.add_one(value.as_ref());
        }
    }

    /// Membership test, applying the same canonicalization as insertion.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        if self.normalized {
            self.members.contains(&normalize_certain_names(value))
        } else {
            self.members.contains(value)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over members in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// Members sorted alphabetically.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.members.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}

impl fmt::Display for TagSet {
    /// Members sorted alphabetically, comma-joined.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sorted_vec().join(", "))
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_sorted_vec().serialize(serializer)
    }
}
