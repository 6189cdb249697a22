//! Key expansion.

/// Multiplier of the per-element diffusion map.
const MIX_MUL: u64 = 0x15D;

/// The diffusion map keeps expanded elements within 16 bits.
const MIX_MASK: u64 = 0xFFFF;

/// Expands a raw key into a mixed key of the same length.
///
/// Each round first pushes every element through the diffusion map
/// `x * 0x15D + (x >> 3)`, masked to 16 bits, then XORs each element with
/// the element `min(3, len - 2)` positions ahead (circular). The XOR stage
/// reads all offsets from the pre-stage array and is skipped entirely for
/// keys shorter than three elements. The offset is fixed before the first
/// round and reused by every round.
pub fn expand_key(key: &[u64], rounds: usize) -> Vec<u64> {
    let mut expanded = key.to_vec();
    let offset = if key.len() >= 3 { 3.min(key.len() - 2) } else { 0 };

    for _ in 0..rounds {
        for x in expanded.iter_mut() {
            *x = (x.wrapping_mul(MIX_MUL).wrapping_add(*x >> 3)) & MIX_MASK;
        }
        if offset > 0 {
            let len = expanded.len();
            expanded = (0..len)
                .map(|i| expanded[(i + offset) % len] ^ expanded[i])
                .collect();
        }
    }

    expanded
}
