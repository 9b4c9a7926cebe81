//! Simple varint encoding for `u64`.
//!
//! Format: little-endian base-128 (LEB128-like): 7 bits per byte, MSB is continuation.

/// Longest valid encoding of a `u64`.
pub const MAX_LEN: usize = 10;

/// Encode a `u64` into varint bytes.
pub fn encode_u64(mut x: u64, out: &mut Vec<u8>) {
    while x >= 0x80 {
        out.push(((x as u8) & 0x7F) | 0x80);
        x >>= 7;
    }
    out.push(x as u8);
}

/// Decode a `u64` from varint bytes, returning (value, bytes_consumed).
///
/// Returns `None` on truncated input or when the value does not fit in 64 bits.
pub fn decode_u64(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut x: u64 = 0;
    let mut shift = 0u32;
    for (i, &b) in bytes.iter().enumerate() {
        let low = (b & 0x7F) as u64;
        if shift == 63 && low > 1 {
            return None;
        }
        x |= low << shift;
        if (b & 0x80) == 0 {
            return Some((x, i + 1));
        }
        shift += 7;
        if shift > 63 {
            return None;
        }
    }
    None
}
