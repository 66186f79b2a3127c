//! Loose dotted-version ordering for milestone titles
//!
//! Milestone titles are version-ish strings ("2.1", "0.13.1", "1.0b1") but
//! follow no strict grammar. This comparator tokenizes a title into numeric
//! and textual components and imposes a total order on the result:
//!
//! - components compare pairwise, numerically where both are numeric and
//!   lexicographically where both are textual;
//! - a numeric component orders before a textual one ("2.1" < "2.1b");
//! - a version that is a strict prefix of another orders first
//!   ("2.1" < "2.1.1").

use std::cmp::Ordering;
use std::fmt;

/// One parsed component of a loose version string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Component {
    /// A run of ASCII digits, compared numerically
    Number(u64),
    /// Anything else, compared lexicographically
    Text(String),
}

/// A loosely-structured dotted version identifier
///
/// Ordering ignores the raw text and compares parsed components only, so
/// `"2.01"` and `"2.1"` are equal.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<Component>,
    raw: String,
}

impl Version {
    /// Parse a version string. Never fails; unrecognized text becomes
    /// textual components.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let mut components = Vec::new();
        for segment in s.split('.') {
            let mut rest = segment;
            while let Some(first) = rest.chars().next() {
                let in_digits = first.is_ascii_digit();
                let split = rest
                    .char_indices()
                    .find(|&(_, c)| c.is_ascii_digit() != in_digits)
                    .map_or(rest.len(), |(i, _)| i);
                let (run, tail) = rest.split_at(split);
                components.push(
                    run.parse::<u64>()
                        .map_or_else(|_| Component::Text(run.to_string()), Component::Number),
                );
                rest = tail;
            }
        }
        Self {
            components,
            raw: s.to_string(),
        }
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}
