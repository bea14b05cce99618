//! Result enums returned by forest operations.
//!
//! Absent elements are an expected outcome rather than an error, so each
//! operation reports them through a `NotFound` variant.

/// Answer to [`crate::DisjointSetForest::are_comembers`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comembership {
    /// Both elements belong to the same set.
    Yes,
    /// The elements belong to different sets.
    No,
    /// At least one element is not in the forest.
    NotFound,
}

impl Comembership {
    /// Returns `Some(true)` for [`Comembership::Yes`], `Some(false)` for
    /// [`Comembership::No`], and `None` when an element was missing.
    ///
    /// # Examples
    /// ```
    /// use dsf_core::Comembership;
    ///
    /// assert_eq!(Comembership::Yes.as_bool(), Some(true));
    /// assert_eq!(Comembership::NotFound.as_bool(), None);
    /// ```
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Yes => Some(true),
            Self::No => Some(false),
            Self::NotFound => None,
        }
    }
}

impl From<bool> for Comembership {
    fn from(same: bool) -> Self {
        if same { Self::Yes } else { Self::No }
    }
}

/// Answer to [`crate::DisjointSetForest::union`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Two distinct sets were merged into one.
    Merged,
    /// Both elements already shared a set; nothing changed.
    AlreadySame,
    /// At least one element is not in the forest; nothing changed.
    NotFound,
}

/// Answer to [`crate::DisjointSetForest::remove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The element was removed.
    Removed,
    /// The element is not in the forest.
    NotFound,
}

/// How [`crate::DisjointSetForest::random_members`] draws elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sampling {
    /// Up to `n` distinct elements; fewer when the forest is smaller.
    Distinct(usize),
    /// Exactly `n` independent draws, repeats allowed. Empty forests yield
    /// nothing.
    WithRepeats(usize),
}
