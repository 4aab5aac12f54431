//! Token string hashing.
//!
//! Maps a token to a 32-bit seed with FNV-1a so that each distinct string
//! always receives the same embedding.

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV-1a hash over the UTF-16 code units of `s`.
///
/// The multiply by the FNV prime (0x0100_0193) is expressed as the usual
/// shift-add sum, with wrapping arithmetic keeping the result in 32 bits.
pub fn hash_str(s: &str) -> u32 {
    let mut h = FNV_OFFSET_BASIS;
    for unit in s.encode_utf16() {
        h ^= unit as u32;
        h = h
            .wrapping_add(h << 1)
            .wrapping_add(h << 4)
            .wrapping_add(h << 7)
            .wrapping_add(h << 8)
            .wrapping_add(h << 24);
    }
    h
}
