//! Category tally - issue counts per team.

use std::collections::BTreeMap;

use rayon::prelude::*;
use triage_models::ClassifiedIssue;

/// Count of classified issues per category.
///
/// Categories are counted under their literal value, empty string included.
/// A category that was never seen has a count of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTally {
    counts: BTreeMap<String, usize>,
}

impl CategoryTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies issues sequentially.
    pub fn from_issues<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedIssue>,
    {
        let mut tally = Self::new();
        for issue in issues {
            tally.add(&issue.category);
        }
        tally
    }

    /// Tallies issues across the rayon pool, summing partial tallies per key.
    pub fn from_issues_parallel(issues: &[ClassifiedIssue]) -> Self {
        issues
            .par_iter()
            .fold(Self::new, |mut tally, issue| {
                tally.add(&issue.category);
                tally
            })
            .reduce(Self::new, |mut left, right| {
                left.merge(right);
                left
            })
    }

    /// Counts one more issue under `category`.
    pub fn add(&mut self, category: &str) {
        *self.counts.entry(category.to_string()).or_insert(0) += 1;
    }

    /// Adds another tally's counts into this one.
    pub fn merge(&mut self, other: CategoryTally) {
        for (category, count) in other.counts {
            *self.counts.entry(category).or_insert(0) += count;
        }
    }

    /// Returns the count for a category, zero if absent.
    pub fn count(&self, category: &str) -> usize {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Iterates categories in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total issues counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn into_map(self) -> BTreeMap<String, usize> {
        self.counts
    }
}

impl<'a> FromIterator<&'a ClassifiedIssue> for CategoryTally {
    fn from_iter<T: IntoIterator<Item = &'a ClassifiedIssue>>(iter: T) -> Self {
        Self::from_issues(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(categories: &[&str]) -> Vec<ClassifiedIssue> {
        categories
            .iter()
            .enumerate()
            .map(|(i, c)| ClassifiedIssue::new(i.to_string(), *c))
            .collect()
    }

    #[test]
    fn test_tally_counts_each_category() {
        let tally = CategoryTally::from_issues(&issues(&["A", "B", "A", "C", "A"]));

        assert_eq!(tally.count("A"), 3);
        assert_eq!(tally.count("B"), 1);
        assert_eq!(tally.count("C"), 1);
        assert_eq!(tally.len(), 3);
        assert_eq!(tally.total(), 5);
    }

    #[test]
    fn test_empty_input_gives_empty_tally() {
        let tally = CategoryTally::from_issues(&Vec::<ClassifiedIssue>::new());
        assert!(tally.is_empty());
        assert_eq!(tally.count("A"), 0);
    }

    #[test]
    fn test_empty_category_is_counted_literally() {
        let tally = CategoryTally::from_issues(&issues(&["", "", "Data_Team"]));
        assert_eq!(tally.count(""), 2);
        assert_eq!(tally.count("Data_Team"), 1);
    }

    #[test]
    fn test_tally_is_order_independent() {
        let input = issues(&["A", "B", "A"]);
        let forward = CategoryTally::from_issues(&input);
        let backward = CategoryTally::from_issues(input.iter().rev());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let categories: Vec<&str> = (0..1000)
            .map(|i| match i % 3 {
                0 => "Server_Team",
                1 => "Voice_Team",
                _ => "Data_Team",
            })
            .collect();
        let input = issues(&categories);

        assert_eq!(
            CategoryTally::from_issues_parallel(&input),
            CategoryTally::from_issues(&input)
        );
    }

    #[test]
    fn test_merge_sums_per_key() {
        let mut left = CategoryTally::from_issues(&issues(&["A", "B"]));
        let right = CategoryTally::from_issues(&issues(&["B", "C"]));
        left.merge(right);

        assert_eq!(left.count("A"), 1);
        assert_eq!(left.count("B"), 2);
        assert_eq!(left.count("C"), 1);
    }

    #[test]
    fn test_iter_is_sorted() {
        let tally = CategoryTally::from_issues(&issues(&["b", "a", "c"]));
        let keys: Vec<_> = tally.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
