use std::collections::BTreeMap;

/// Extends slices of discrete codes with simple counting operations
pub trait SliceExt<T> {
    /// Sorted list of every distinct value
    ///
    /// ```rust
    /// # use ftools_utils::SliceExt;
    /// assert_eq!([3, 1, 3, 0, 1].unique_sorted(), vec![0, 1, 3]);
    /// assert!(Vec::<i64>::new().unique_sorted().is_empty());
    /// ```
    fn unique_sorted(&self) -> Vec<T>;

    /// Number of occurrences of every distinct value, ordered by value
    ///
    /// ```rust
    /// # use ftools_utils::SliceExt;
    /// let counts = [3, 1, 3, 0, 1, 3].histogram();
    /// assert_eq!(counts.get(&3), Some(&3));
    /// assert_eq!(counts.get(&1), Some(&2));
    /// assert_eq!(counts.get(&2), None);
    /// ```
    fn histogram(&self) -> BTreeMap<T, usize>;
}

impl<T: Ord + Copy> SliceExt<T> for [T] {
    fn unique_sorted(&self) -> Vec<T> {
        let mut values = self.to_vec();
        values.sort_unstable();
        values.dedup();
        values
    }

    fn histogram(&self) -> BTreeMap<T, usize> {
        let mut counts = BTreeMap::new();
        for value in self {
            *counts.entry(*value).or_insert(0) += 1;
        }
        counts
    }
}
