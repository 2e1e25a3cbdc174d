//! Commerce error types.

use thiserror::Error;

/// Errors raised by the storefront domain types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A product payload failed boundary validation.
    #[error("Invalid product{}: {}", slug_suffix(.slug), .reason)]
    InvalidProduct {
        slug: Option<String>,
        reason: String,
    },

    /// Blog post not found.
    #[error("Post not found: {0}")]
    PostNotFound(String),

    /// Tag already present on the post.
    #[error("Tag already added: {0}")]
    DuplicateTag(String),

    /// Tag was empty after trimming.
    #[error("Tag cannot be empty")]
    EmptyTag,
}

impl CommerceError {
    pub(crate) fn invalid_product(slug: Option<&str>, reason: impl Into<String>) -> Self {
        CommerceError::InvalidProduct {
            slug: slug.filter(|s| !s.is_empty()).map(str::to_string),
            reason: reason.into(),
        }
    }
}

fn slug_suffix(slug: &Option<String>) -> String {
    slug.as_deref()
        .map(|s| format!(" '{}'", s))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_product_message() {
        let err = CommerceError::invalid_product(Some("rose-oil"), "missing name");
        assert_eq!(err.to_string(), "Invalid product 'rose-oil': missing name");

        let err = CommerceError::invalid_product(None, "missing slug");
        assert_eq!(err.to_string(), "Invalid product: missing slug");
    }
}
