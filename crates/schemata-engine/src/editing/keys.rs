use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a block that survives edits
///
/// Keys are opaque to the engine: it only ever compares them for equality.
/// The block under the cursor keeps its key when an insertion retypes it, so
/// host-side references (focus, scroll position) stay valid across edits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Source of fresh block keys
///
/// Injected into the insertion engine rather than reached for globally, so
/// tests can supply a deterministic generator and assert exact output
/// structure. Implementations must make collisions with existing keys
/// effectively impossible.
pub trait KeyGenerator {
    fn next_key(&mut self) -> BlockKey;
}

/// Default generator: random UUID v4 keys
#[derive(Debug, Clone, Default)]
pub struct UuidKeys;

impl KeyGenerator for UuidKeys {
    fn next_key(&mut self) -> BlockKey {
        BlockKey::new(Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic generator for tests and replay: `gen-0`, `gen-1`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialKeys {
    next: u64,
}

impl SequentialKeys {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyGenerator for SequentialKeys {
    fn next_key(&mut self) -> BlockKey {
        let key = BlockKey::new(format!("gen-{}", self.next));
        self.next += 1;
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_keys_are_unique() {
        let mut keys = UuidKeys;
        let a = keys.next_key();
        let b = keys.next_key();
        assert_ne!(a, b);
    }

    #[test]
    fn sequential_keys_count_up() {
        let mut keys = SequentialKeys::new();
        assert_eq!(keys.next_key(), BlockKey::from("gen-0"));
        assert_eq!(keys.next_key(), BlockKey::from("gen-1"));
        assert_eq!(keys.next_key(), BlockKey::from("gen-2"));
    }

    #[test]
    fn key_round_trips_through_serde() {
        let key = BlockKey::from("abc123");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: BlockKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
