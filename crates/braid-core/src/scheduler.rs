//! Key-driven round scheduling.

use crate::permbox::PermBox;
use crate::process::Process;

/// Fixed opening rounds applied before the scheduled ones.
pub const PROCESS_PREFIX: [Process; 4] = [
    Process::Shift,
    Process::MirrorSubSwap,
    Process::MirrorShift,
    Process::SubSwap,
];

/// Default weighted pool the scheduler draws from. The exchange-heavy
/// selectors appear twice; the reserved selector is absent.
pub const DEFAULT_POOL: [(Process, usize); 4] = [
    (Process::Shift, 1),
    (Process::MirrorShift, 1),
    (Process::SubSwap, 2),
    (Process::MirrorSubSwap, 2),
];

/// Orders the weighted pool by a key-derived permutation.
///
/// Each key element is multiplied by its 1-based position to form the
/// permutation seed, so the same multiset of key values in a different
/// order schedules differently. The output always contains exactly the
/// pool's multiset of selectors. `key` must be non-empty when the pool
/// carries any weight.
pub fn schedule(key: &[u64], pool: &[(Process, usize)]) -> Vec<Process> {
    let mut entries = Vec::new();
    for &(process, weight) in pool {
        for _ in 0..weight {
            entries.push(process);
        }
    }
    let seed: Vec<u64> = key
        .iter()
        .enumerate()
        .map(|(i, &k)| k.wrapping_mul(i as u64 + 1))
        .collect();
    let order = PermBox::new(&seed, entries.len());
    order.as_slice().iter().map(|&i| entries[i as usize]).collect()
}
