//! Label identifiers
//!
//! Every printed label carries a version-1 UUID (timestamp + node + clock
//! sequence). The full value is encoded in the Data Matrix barcode and its
//! first 8 characters are printed as plain text.

use std::fmt;
use std::sync::LazyLock;

use uuid::{Context, Timestamp, Uuid};

/// Number of leading characters printed next to the barcode
pub const PREFIX_LEN: usize = 8;

/// A unique label identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Canonical lowercase hyphenated form, as encoded in the barcode
    pub fn as_string(&self) -> String {
        self.0.hyphenated().to_string()
    }

    /// First 8 hex characters, printed for human reading
    pub fn prefix(&self) -> String {
        let mut s = self.as_string();
        s.truncate(PREFIX_LEN);
        s
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Identifier {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Generator for time-based identifiers
///
/// The clock sequence advances on every call, so two identifiers taken in the
/// same 100ns tick still differ.
pub struct IdentifierGenerator {
    context: Context,
    node_id: [u8; 6],
}

impl IdentifierGenerator {
    /// Create a generator with a random node id (multicast bit set)
    pub fn new() -> Self {
        let mut node_id: [u8; 6] = rand::random();
        node_id[0] |= 0x01;
        Self::with_node_id(node_id)
    }

    /// Create a generator for a fixed node id
    pub fn with_node_id(node_id: [u8; 6]) -> Self {
        Self {
            context: Context::new(rand::random()),
            node_id,
        }
    }

    /// Generate the next identifier
    pub fn next_identifier(&self) -> Identifier {
        let ts = Timestamp::now(&self.context);
        Identifier(Uuid::new_v1(ts, &self.node_id))
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new()
    }
}

static GENERATOR: LazyLock<IdentifierGenerator> = LazyLock::new(IdentifierGenerator::new);

/// Generate a new identifier from the process-wide generator
pub fn new_identifier() -> Identifier {
    GENERATOR.next_identifier()
}
