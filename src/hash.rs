/// 64-bit FNV offset basis.
pub const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
/// 64-bit FNV prime.
pub const PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hash that is fed one byte at a time, so a scanner can hash a station
/// name while it is still looking for the `;` that ends it.
#[derive(Clone, Copy, Debug)]
pub struct Fnv1a(u64);

impl Default for Fnv1a {
    fn default() -> Self {
        Self(OFFSET_BASIS)
    }
}

impl Fnv1a {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn write_byte(&mut self, byte: u8) {
        self.0 ^= byte as u64;
        self.0 = self.0.wrapping_mul(PRIME);
    }

    #[inline(always)]
    pub fn finish(self) -> u64 {
        self.0
    }
}

/// Hashes a whole name in one go. Equivalent to feeding every byte through
/// [`Fnv1a::write_byte`].
#[inline]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hasher = Fnv1a::new();
    for &b in bytes {
        hasher.write_byte(b);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_vectors() {
        assert_eq!(fnv1a(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn incremental_matches_whole() {
        let name = b"Hamburg";
        let mut hasher = Fnv1a::new();
        name.iter().for_each(|&b| hasher.write_byte(b));
        assert_eq!(hasher.finish(), fnv1a(name));
    }

    #[test]
    fn delimiter_changes_hash() {
        assert_ne!(fnv1a(b"Hamburg"), fnv1a(b"Hamburg;"));
    }
}
