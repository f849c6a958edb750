//! Deterministic fingerprints for datasets.

/// FNV-1a 64-bit hash, stable across platforms and releases.
#[derive(Copy, Clone, Debug)]
pub struct Fingerprint(u64);

impl Fingerprint {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    /// Create a new hash state with the FNV offset basis.
    pub fn new() -> Self {
        Self(Self::OFFSET)
    }

    /// Feed bytes into the hash function.
    pub fn update(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = (self.0 ^ u64::from(*b)).wrapping_mul(Self::PRIME);
        }
    }

    /// Feed a string followed by a separator so adjacent fields cannot alias.
    pub fn update_field(&mut self, field: &str) {
        self.update(field.as_bytes());
        self.update(&[0x1f]);
    }

    pub fn finish64(&self) -> u64 {
        self.0
    }

    /// Finalise the hash and return a 16-character lowercase hex string.
    pub fn finish_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}
