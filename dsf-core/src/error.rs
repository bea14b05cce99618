//! Error types for the disjoint set forest core.
//!
//! Only snapshot restoration can fail; every other operation reports absent
//! elements through its outcome enum.

use std::fmt;

use thiserror::Error;

use crate::ElementId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A snapshot could not be turned back into a forest.
///
/// Restoration is all-or-nothing: when any of these is returned no forest is
/// produced.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SnapshotError {
    /// A record names a representative that no record in the snapshot defines.
    #[error("element `{element}` names missing representative `{missing}`")]
    CorruptSnapshot {
        /// Element whose representative link dangles.
        element: ElementId,
        /// Identifier that could not be resolved.
        missing: ElementId,
    },
    /// The same identifier appears in more than one record.
    #[error("element `{id}` appears more than once")]
    DuplicateElement {
        /// Repeated identifier.
        id: ElementId,
    },
    /// A record carries rank zero, which no live element can have.
    #[error("element `{id}` has rank 0")]
    ZeroRank {
        /// Offending identifier.
        id: ElementId,
    },
    /// Following representative links from an element never reaches a root.
    #[error("representative links from `{id}` form a cycle")]
    RepresentativeCycle {
        /// An element on the cycle.
        id: ElementId,
    },
}

define_error_codes! {
    /// Stable codes describing [`SnapshotError`] variants.
    enum SnapshotErrorCode for SnapshotError {
        /// A record names a representative that no record defines.
        CorruptSnapshot => CorruptSnapshot { .. } => "DSF_CORRUPT_SNAPSHOT",
        /// The same identifier appears in more than one record.
        DuplicateElement => DuplicateElement { .. } => "DSF_DUPLICATE_ELEMENT",
        /// A record carries rank zero.
        ZeroRank => ZeroRank { .. } => "DSF_ZERO_RANK",
        /// Representative links form a cycle.
        RepresentativeCycle => RepresentativeCycle { .. } => "DSF_REPRESENTATIVE_CYCLE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SnapshotError>;
