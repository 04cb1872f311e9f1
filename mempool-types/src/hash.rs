use std::fmt;

/// A 32-byte content hash. Used both as a transaction identifier and as a generic commitment
/// (UTXO root, address-spec hash) — the mempool never computes these, it only compares and
/// orders them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..")
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<[u8; 32]> for Hash32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Identifies a transaction by its content hash.
pub type TxId = Hash32;

/// Identifies an address by the hash of its spending condition (the "spec").
pub type SpecHash = Hash32;

/// Commits to the entire UTXO set at some block height.
pub type UtxoRoot = Hash32;
