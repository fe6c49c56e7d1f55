// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fork-join expansion of one BFS layer.
//!
//! Expanding distinct layer members is independent, so large layers are split
//! into contiguous chunks and expanded on scoped worker threads. Results are
//! re-joined in chunk order, which makes the output identical to a sequential
//! pass regardless of scheduling; deduplication happens after the join.

/// Layers smaller than this are expanded inline.
pub const PARALLEL_THRESHOLD: usize = 64;

/// Applies `expand` to every item of `layer`, preserving input order.
///
/// # Panics
/// Re-raises a panic from any worker on the calling thread.
pub fn expand_layer<T, R, F>(layer: &[T], workers: usize, expand: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if workers <= 1 || layer.len() < PARALLEL_THRESHOLD {
        return layer.iter().map(&expand).collect();
    }

    let chunk = layer.len().div_ceil(workers);
    let expand = &expand;
    std::thread::scope(|s| {
        let handles: Vec<_> = layer
            .chunks(chunk)
            .map(|part| s.spawn(move || part.iter().map(expand).collect::<Vec<R>>()))
            .collect();

        let mut out = Vec::with_capacity(layer.len());
        for handle in handles {
            match handle.join() {
                Ok(part) => out.extend(part),
                Err(e) => std::panic::resume_unwind(e),
            }
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_matches_sequential_order() {
        let items: Vec<u64> = (0..1_000).collect();
        let sequential = expand_layer(&items, 1, |x| x * 3);
        let parallel = expand_layer(&items, 7, |x| x * 3);
        assert_eq!(sequential, parallel);
        assert_eq!(parallel[999], 2_997);
    }

    #[test]
    fn small_layers_stay_inline() {
        let items = [1u8, 2, 3];
        assert_eq!(expand_layer(&items, 8, |x| u16::from(*x) + 1), [2, 3, 4]);
    }
}
