//! The page location as seen by views.

/// Read and replace the page query string.
///
/// Replacing does not navigate or add a history entry.
pub trait Location {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    /// Replace the query string. An empty string removes it.
    fn replace_query(&mut self, query: &str);
}

/// In-memory location for server rendering and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    path: String,
    query: String,
    writes: usize,
}

impl MemoryLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: String::new(),
            writes: 0,
        }
    }

    /// Parse `"/products?category=nails"` into path and query.
    pub fn from_url(url: &str) -> Self {
        match url.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: query.to_string(),
                writes: 0,
            },
            None => Self::new(url),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path plus query, as shown in the address bar.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// Number of `replace_query` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.trim_start_matches('?').to_string();
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_and_href() {
        let mut loc = MemoryLocation::from_url("/products?category=nails");
        assert_eq!(loc.path(), "/products");
        assert_eq!(loc.query(), "category=nails");

        loc.replace_query("");
        assert_eq!(loc.href(), "/products");
        assert_eq!(loc.writes(), 1);
    }
}
