use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque block identifier, stable across moves and edits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Generate a random, collision-resistant id (UUID v4)
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Id source for blocks and list items inside block data
///
/// `Random` is what the editor uses. `Sequential` produces `seed-1`,
/// `seed-2`, ... and exists so fixtures and tests get deterministic ids.
#[derive(Debug, Clone)]
pub enum IdGenerator {
    Random,
    Sequential { seed: String, count: u32 },
}

impl IdGenerator {
    pub fn random() -> Self {
        Self::Random
    }

    pub fn sequential(seed: impl Into<String>) -> Self {
        Self::Sequential {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next id
    pub fn new_id(&mut self) -> String {
        match self {
            IdGenerator::Random => generate_id(),
            IdGenerator::Sequential { seed, count } => {
                *count += 1;
                format!("{}-{}", seed, count)
            }
        }
    }

    pub fn new_block_id(&mut self) -> BlockId {
        BlockId(self.new_id())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::Random
    }
}
