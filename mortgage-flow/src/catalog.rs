use crate::error::{FlowError, Result};

/// The set of valid property locations, supplied by the embedding
/// application. The machine treats it as an opaque non-empty list: the only
/// check it performs is "the selection came from this list".
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    tokens: Vec<String>,
}

impl LocationCatalog {
    /// Build a catalog from location names. Tokens are lowercased so that
    /// matching is case-insensitive.
    pub fn new<I, S>(locations: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = locations
            .into_iter()
            .map(|s| s.into().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(FlowError::EmptyCatalog);
        }
        Ok(Self { tokens })
    }

    pub fn contains(&self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        self.tokens.iter().any(|t| *t == token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(
            LocationCatalog::new(Vec::<String>::new()),
            Err(FlowError::EmptyCatalog)
        ));
        // Blank entries do not count either.
        assert!(LocationCatalog::new(["  ", ""]).is_err());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = LocationCatalog::new(["Toronto", "Ottawa"]).unwrap();
        assert!(catalog.contains("toronto"));
        assert!(catalog.contains("OTTAWA"));
        assert!(catalog.contains(" Toronto "));
        assert!(!catalog.contains("montreal"));
        assert_eq!(catalog.len(), 2);
    }
}
