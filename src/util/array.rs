// src/util/array.rs
use std::collections::HashSet;
use std::hash::Hash;

/// Distinct elements in first-occurrence order.
pub fn unique_elements<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    dedup_by_key(items, |x| x.clone())
}

/// Keep the first item for each key, preserving order.
pub fn dedup_by_key<T, K, F>(items: &[T], mut key: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|it| seen.insert(key(*it)))
        .cloned()
        .collect()
}

/// Largest element; `None` for empty input. Incomparable values (NaN) are skipped.
pub fn find_max<T: PartialOrd + Copy>(items: &[T]) -> Option<T> {
    items
        .iter()
        .copied()
        .filter(|x| x.partial_cmp(x).is_some())
        .fold(None, |best, x| match best {
            Some(b) if b >= x => Some(b),
            _ => Some(x),
        })
}

/// Arithmetic mean; `None` for empty input.
pub fn average(items: &[f64]) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    Some(items.iter().sum::<f64>() / items.len() as f64)
}

pub fn filter_by<T, F>(items: &[T], mut pred: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    items.iter().filter(|x| pred(*x)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_preserves_first_occurrence() {
        assert_eq!(unique_elements(&[1, 2, 2, 3, 1]), vec![1, 2, 3]);
        assert!(unique_elements::<i32>(&[]).is_empty());
    }

    #[test]
    fn max_and_average_sentinels() {
        assert_eq!(find_max(&[3, 7, 2]), Some(7));
        assert_eq!(find_max::<i32>(&[]), None);
        assert_eq!(find_max(&[f64::NAN, 1.5, 0.5]), Some(1.5));
        assert_eq!(average(&[2.0, 4.0, 6.0]), Some(4.0));
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn dedup_by_key_keeps_first() {
        let people = [("ana", 30), ("bo", 25), ("ana", 41)];
        let out = dedup_by_key(&people, |p| p.0);
        assert_eq!(out, vec![("ana", 30), ("bo", 25)]);
    }

    #[test]
    fn filter_by_predicate() {
        assert_eq!(filter_by(&[1, 2, 3, 4], |x| x % 2 == 0), vec![2, 4]);
    }
}
