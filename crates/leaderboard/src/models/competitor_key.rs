use std::fmt;

/// A newtype that ensures competitor names are compared in a normalized form
/// so that "Max Verstappen", "max verstappen" and " Max  Verstappen " land in
/// the same competitor group.
///
/// The key is lowercase with surrounding whitespace trimmed and inner runs of
/// whitespace collapsed to a single space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompetitorKey(String);

impl CompetitorKey {
    /// Creates a normalized competitor key from a display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use leaderboard::CompetitorKey;
    ///
    /// let key1 = CompetitorKey::new("Jane  Doe");
    /// let key2 = CompetitorKey::new("jane doe ");
    ///
    /// assert_eq!(key1, key2);
    /// assert_eq!(key1.as_str(), "jane doe");
    /// ```
    pub fn new(name: impl AsRef<str>) -> Self {
        let normalized = name
            .as_ref()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompetitorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompetitorKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
