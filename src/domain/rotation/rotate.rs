//! Circular rotation of ordered sequences.

/// Rotates `items` right by `k` positions, so `result[(i + k) % n] == items[i]`.
///
/// `k` is taken modulo the length, so rotating by `k` and by `k + n` agree.
/// An empty slice rotates to an empty vector.
pub fn rotate_right<T: Clone>(items: &[T], k: usize) -> Vec<T> {
    let n = items.len();
    if n == 0 {
        return Vec::new();
    }
    let split = n - k % n;
    items[split..]
        .iter()
        .chain(items[..split].iter())
        .cloned()
        .collect()
}
