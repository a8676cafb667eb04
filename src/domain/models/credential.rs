use std::fmt;

use subtle::ConstantTimeEq;

/// Value object representing a text-encoded salt
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Wrap an already encoded salt, e.g. one loaded from storage
    pub fn new(salt: String) -> Self {
        Self(salt)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(..)")
    }
}

/// Value object representing a hashed password
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Create a new HashedPassword from an already hashed string
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Compare two encoded hashes without short-circuiting on the first
    /// differing byte. Only a length mismatch returns early.
    pub fn ct_matches(&self, other: &HashedPassword) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(..)")
    }
}

/// Salt and hash pair owned by a user record.
///
/// Intentionally not `Serialize`: nothing outside the record store should
/// ever see these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    salt: Salt,
    hash: HashedPassword,
}

impl Credential {
    pub fn new(salt: Salt, hash: HashedPassword) -> Self {
        Self { salt, hash }
    }

    /// Rebuild from the two stored columns. Both must be present.
    pub fn reconstruct(salt: Option<String>, hash: Option<String>) -> Option<Self> {
        match (salt, hash) {
            (Some(salt), Some(hash)) => Some(Self::new(Salt::new(salt), HashedPassword::new(hash))),
            _ => None,
        }
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn hash(&self) -> &HashedPassword {
        &self.hash
    }

    pub fn into_parts(self) -> (Salt, HashedPassword) {
        (self.salt, self.hash)
    }
}
