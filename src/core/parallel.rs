//! Per-item computation with results slotted by input position.
//!
//! With the `parallel` feature the work runs on rayon's pool; the collected
//! vector still has one slot per input item in input order, so callers join
//! results sequentially without any locking.

#[cfg(feature = "parallel")]
pub(crate) fn map_indexed<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(usize, &T) -> U + Sync + Send,
{
    use rayon::prelude::*;

    items
        .par_iter()
        .enumerate()
        .map(|(index, item)| f(index, item))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_indexed<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    F: Fn(usize, &T) -> U,
{
    items
        .iter()
        .enumerate()
        .map(|(index, item)| f(index, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_keep_input_order() {
        let items: Vec<u32> = (0..1_000).collect();
        let doubled = map_indexed(&items, |i, v| (i, v * 2));
        for (i, (index, value)) in doubled.into_iter().enumerate() {
            assert_eq!(index, i);
            assert_eq!(value, i as u32 * 2);
        }
    }
}
