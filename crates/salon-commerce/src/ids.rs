//! Newtype IDs for type-safe identifiers.
//!
//! Products and blog posts are both addressed by opaque strings; keeping them
//! in distinct types stops a post id from ever reaching the product API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque string identifier with its own type.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True for the placeholder id of a post that was never saved.
            pub fn is_unsaved(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Product id as issued by the product API.
    ProductId
);
string_id!(
    /// Blog post id. Empty until the backend assigns one.
    PostId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsaved_post_id() {
        assert!(PostId::new("").is_unsaved());
        assert!(!PostId::new("post-1").is_unsaved());
    }

    #[test]
    fn test_id_from_string() {
        let id: PostId = "post-456".into();
        assert_eq!(id.to_string(), "post-456");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = ProductId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
