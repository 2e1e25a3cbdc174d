//! Tag set used by the post form.

use crate::error::CommerceError;

/// Ordered, lower-cased, duplicate-free tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and add a tag.
    ///
    /// Input is trimmed and lower-cased. Empty input and tags already present
    /// are rejected.
    pub fn add(&mut self, raw: &str) -> Result<&str, CommerceError> {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() {
            return Err(CommerceError::EmptyTag);
        }
        if self.tags.contains(&tag) {
            return Err(CommerceError::DuplicateTag(tag));
        }
        self.tags.push(tag);
        Ok(self.tags.last().map(String::as_str).unwrap_or_default())
    }

    /// Remove a tag by exact match. Returns whether anything was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.clone()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    /// Build from existing tags, dropping empties and duplicates.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            let _ = set.add(tag.as_ref());
        }
        set
    }
}
