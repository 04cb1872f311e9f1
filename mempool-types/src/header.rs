/// The synthetic next-block header a cluster is deep-validated against. Never broadcast or
/// stored; it exists only to give `Validation::validate_deep` a consistent view of "if this were
/// mined next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub height: u64,
    pub timestamp_ms: u64,
    pub version: u16,
}

impl BlockHeader {
    pub fn next(current_height: u64, timestamp_ms: u64, activation_height_shards: u64) -> Self {
        let height = current_height + 1;
        let version = if height >= activation_height_shards { 2 } else { 1 };
        Self { height, timestamp_ms, version }
    }
}
