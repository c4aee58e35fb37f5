//! URL entry entity mapping a long URL to its short token.

/// A shortened URL owned by a single user.
///
/// `id` is assigned by the store on creation. The other fields are set once and
/// never change afterwards. `short_url` is not unique: every entry created from the
/// same long URL carries the same token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub id: i64,
    pub long_url: String,
    pub short_url: String,
    pub username: String,
}

impl UrlEntry {
    /// Creates a new UrlEntry instance.
    pub fn new(id: i64, long_url: String, short_url: String, username: String) -> Self {
        Self {
            id,
            long_url,
            short_url,
            username,
        }
    }

    /// Returns true if `username` owns this entry.
    ///
    /// Comparison is exact; usernames are free-form and not normalized.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }
}

/// Input data for persisting a new URL entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlEntry {
    pub long_url: String,
    pub short_url: String,
    pub username: String,
}
