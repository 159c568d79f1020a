//! Newtype domain identifiers.
//!
//! Every Cubby resource is addressed by a server-assigned, opaque string.
//! Each kind of identifier gets a distinct newtype, so a [`TransactionId`]
//! can never be passed where an [`ElementId`] is expected even though both
//! are strings under the hood.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! opaque_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

opaque_id! {
    /// Names a space: the top-level namespace containing buckets.
    ///
    /// Assigned by the server on space creation and immutable afterwards.
    SpaceName
}

opaque_id! {
    /// Names a bucket: a collection of elements within a space.
    ///
    /// Buckets are referenced by `(space, bucket)` name pairs; the client
    /// keeps no owned child collections.
    BucketName
}

opaque_id! {
    /// Identifies an element within a bucket.
    ///
    /// Assigned by the server when the element is added.
    ElementId
}

opaque_id! {
    /// Identifies a server-side transaction, from begin until commit or abort.
    TransactionId
}
