//! Element identifiers and the records the store keeps for each element.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Rank assigned to a freshly added element.
pub(crate) const INITIAL_RANK: u32 = 1;

/// Opaque byte-string identifier naming one element of a forest.
///
/// Identifiers are compared byte-for-byte; no normalisation is applied.
///
/// # Examples
/// ```
/// use dsf_core::ElementId;
///
/// let id = ElementId::from("foo");
/// assert_eq!(id.as_bytes(), b"foo");
/// assert_eq!(id.to_string(), "foo");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Box<[u8]>);

impl ElementId {
    /// Wraps raw bytes as an identifier.
    #[must_use]
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Borrows the identifier bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the identifier, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_vec()
    }
}

impl Borrow<[u8]> for ElementId {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ElementId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for ElementId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

impl From<Vec<u8>> for ElementId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into_boxed_slice())
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().into())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value.into_bytes().into_boxed_slice())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Position of a record inside the element store arena.
///
/// Indices are non-owning links: the store owns every record and an index
/// only names a slot. An index stays valid until the next removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct RecordIndex(usize);

impl RecordIndex {
    pub(crate) const fn new(slot: usize) -> Self {
        Self(slot)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// Per-element state held by the store.
#[derive(Clone, Debug)]
pub(crate) struct ElementRecord {
    id: ElementId,
    /// `None` marks a root.
    pub(crate) representative: Option<RecordIndex>,
    /// Upper bound on subtree height; only meaningful on roots.
    pub(crate) rank: u32,
}

impl ElementRecord {
    pub(crate) const fn root(id: ElementId, rank: u32) -> Self {
        Self {
            id,
            representative: None,
            rank,
        }
    }

    pub(crate) const fn id(&self) -> &ElementId {
        &self.id
    }

    pub(crate) const fn is_root(&self) -> bool {
        self.representative.is_none()
    }
}
