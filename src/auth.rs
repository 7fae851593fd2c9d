//! Allow-list access guard.
//!
//! Authorization is a shared-secret exact match: the caller's `X-API-KEY`
//! header must equal one of the configured keys. An empty allow-list means
//! auth is disabled and every request is permitted. Case-sensitive, no
//! hashing, no expiry.

/// Parsed `ALLOWED_KEYS` value.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    keys: Vec<String>,
}

impl AllowList {
    /// Parse a comma-separated key list, trimming whitespace and dropping
    /// empty entries. `""` and `" , ,"` both yield an open allow-list.
    pub fn parse(raw: &str) -> Self {
        let keys = raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned)
            .collect();
        Self { keys }
    }

    /// True when no keys are configured, i.e. auth is disabled.
    pub fn is_open(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check a caller-supplied key. A missing header is an empty key, which
    /// only passes when the list is open.
    pub fn permits(&self, key: Option<&str>) -> bool {
        if self.is_open() {
            return true;
        }
        match key {
            Some(k) => self.keys.iter().any(|allowed| allowed == k.trim()),
            None => false,
        }
    }
}
