use std::cmp::Ordering;

/// Insertion sort for slices with natural ordering.
///
/// Stable and in-place. Object key lists in JSON documents are typically
/// tiny, where this beats the standard library's pattern-defeating
/// quicksort; for large slices prefer `slice::sort`.
pub fn insertion_sort<T: Ord>(items: &mut [T]) {
    insertion_sort_by(items, T::cmp);
}

/// Insertion sort with a custom comparator.
///
/// # Examples
///
/// ```
/// use ejson_util::sort::insertion_sort_by;
///
/// let mut keys = vec!["b", "a", "c"];
/// insertion_sort_by(&mut keys, |a, b| a.cmp(b));
/// assert_eq!(keys, vec!["a", "b", "c"]);
/// ```
pub fn insertion_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
