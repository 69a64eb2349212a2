use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque caller token identifying who is acting on the ledger.
///
/// The ledger never creates or authenticates identities. The embedding
/// supplies one per call (an address, a DID, whatever names its callers),
/// and the ledger only compares and hashes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(pub String);

impl Identity {
    /// Create an identity from any string-like token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Identity {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mood tag attached to every journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Good,
    Normal,
    Bad,
}

impl Mood {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Normal => "normal",
            Self::Bad => "bad",
        }
    }

    /// Parse from a name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "good" => Some(Self::Good),
            "normal" => Some(Self::Normal),
            "bad" => Some(Self::Bad),
            _ => None,
        }
    }

    /// All moods, in declaration order.
    pub fn all() -> [Mood; 3] {
        [Self::Good, Self::Normal, Self::Bad]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single journal entry.
///
/// Immutable once appended: the ledger never edits or removes entries, and
/// an identity's sequence keeps append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry title.
    pub title: String,
    /// Entry body; the ledger imposes no length bound.
    pub content: String,
    /// Mood tag for filtered reads.
    pub mood: Mood,
    /// Caller-supplied creation time, milliseconds since UNIX epoch.
    pub created_at_ms: u64,
}

impl Entry {
    /// Create a new entry stamped at `now_ms`.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        mood: Mood,
        now_ms: u64,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            mood,
            created_at_ms: now_ms,
        }
    }
}

/// A recorded ballot.
///
/// At most one per identity, created on the first successful cast and
/// immutable thereafter. An identity "has acted" exactly when its ballot
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Index of the chosen candidate.
    pub choice: u8,
    /// Caller-supplied cast time, milliseconds since UNIX epoch.
    pub cast_at_ms: u64,
}
