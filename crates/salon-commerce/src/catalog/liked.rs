//! Client-only liked-products set.

use crate::ids::ProductId;
use std::collections::HashSet;

/// Products the shopper has hearted during this page visit.
///
/// Never persisted: a reload starts empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikedProducts {
    ids: HashSet<ProductId>,
}

impl LikedProducts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the liked state. Returns the new state.
    pub fn toggle(&mut self, id: &ProductId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn is_liked(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut liked = LikedProducts::new();
        let id = ProductId::new("p-1");

        assert!(liked.toggle(&id));
        assert!(liked.is_liked(&id));
        assert_eq!(liked.len(), 1);

        assert!(!liked.toggle(&id));
        assert!(!liked.is_liked(&id));
        assert!(liked.is_empty());
    }
}
