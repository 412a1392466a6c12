use std::collections::BTreeSet;

/// The set of trait names that stay sealed until the owner reveals them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionPolicy {
    sensitive: BTreeSet<String>,
}

impl RedactionPolicy {
    pub fn new<I, S>(traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sensitive: traits
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.trim().is_empty())
                .collect(),
        }
    }

    /// Trait names are matched exactly, including case.
    pub fn is_sensitive(&self, trait_type: &str) -> bool {
        self.sensitive.contains(trait_type)
    }

    pub fn traits(&self) -> impl Iterator<Item = &str> {
        self.sensitive.iter().map(String::as_str)
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(["Nickname"])
    }
}
