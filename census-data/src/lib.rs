//! Derived metrics, rankings, and chart views over the census dataset.
//!
//! This crate turns the immutable `census_core::Dataset` into the filtered,
//! sorted subsets each dashboard chart needs. Nothing here mutates the base
//! records; every view is rebuilt from scratch on each interaction.

pub mod dashboard;
pub mod metrics;
pub mod views;

/// Top-N selection with deterministic tie-breaking.
pub mod ranking {
    /// Direction of a ranking.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SortOrder {
        Descending,
        Ascending,
    }

    /// Number of rows each ranked chart shows unless configured otherwise.
    pub const DEFAULT_TOP_N: usize = 10;

    /// Sort items by a metric, dropping items whose metric is undefined.
    ///
    /// The sort is stable, so equal values keep their input order.
    pub fn rank_by<T, F>(items: &[T], key: F, order: SortOrder) -> Vec<&T>
    where
        F: Fn(&T) -> Option<f64>,
    {
        let mut keyed: Vec<(f64, &T)> = items
            .iter()
            .filter_map(|item| key(item).filter(|v| v.is_finite()).map(|v| (v, item)))
            .collect();
        keyed.sort_by(|a, b| match order {
            SortOrder::Descending => b.0.total_cmp(&a.0),
            SortOrder::Ascending => a.0.total_cmp(&b.0),
        });
        keyed.into_iter().map(|(_, item)| item).collect()
    }

    /// The first `n` items of [`rank_by`].
    pub fn top_n<T, F>(items: &[T], key: F, order: SortOrder, n: usize) -> Vec<&T>
    where
        F: Fn(&T) -> Option<f64>,
    {
        let mut ranked = rank_by(items, key, order);
        ranked.truncate(n);
        ranked
    }

    /// Highest and lowest `n` items of one metric.
    #[derive(Debug, Clone, PartialEq)]
    pub struct DualRanking<'a, T> {
        pub highest: Vec<&'a T>,
        pub lowest: Vec<&'a T>,
    }

    /// Rank the same items in both directions.
    ///
    /// When more than `2 * n` items are eligible the two lists never share an
    /// item, even under ties. With fewer eligible items they may overlap.
    pub fn dual_top_n<'a, T, F>(items: &'a [T], key: F, n: usize) -> DualRanking<'a, T>
    where
        F: Fn(&T) -> Option<f64>,
    {
        let highest = top_n(items, &key, SortOrder::Descending, n);
        let ascending = rank_by(items, &key, SortOrder::Ascending);
        let lowest = if ascending.len() > n.saturating_mul(2) {
            ascending
                .into_iter()
                .filter(|item| !highest.iter().any(|h| std::ptr::eq(*h, *item)))
                .take(n)
                .collect()
        } else {
            ascending.into_iter().take(n).collect()
        };
        DualRanking { highest, lowest }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn value(v: &(char, Option<f64>)) -> Option<f64> {
            v.1
        }

        fn names(ranked: &[&(char, Option<f64>)]) -> String {
            ranked.iter().map(|(c, _)| *c).collect()
        }

        #[test]
        fn test_rank_descending_stable() {
            let items = vec![
                ('a', Some(1.0)),
                ('b', Some(3.0)),
                ('c', None),
                ('d', Some(3.0)),
                ('e', Some(2.0)),
            ];
            let ranked = rank_by(&items, value, SortOrder::Descending);
            assert_eq!(names(&ranked), "bdea");
        }

        #[test]
        fn test_rank_ascending_stable() {
            let items = vec![('a', Some(2.0)), ('b', Some(1.0)), ('c', Some(1.0))];
            let ranked = rank_by(&items, value, SortOrder::Ascending);
            assert_eq!(names(&ranked), "bca");
        }

        #[test]
        fn test_non_finite_excluded() {
            let items = vec![('a', Some(f64::NAN)), ('b', Some(f64::INFINITY)), ('c', Some(0.0))];
            let ranked = rank_by(&items, value, SortOrder::Descending);
            assert_eq!(names(&ranked), "c");
        }

        #[test]
        fn test_top_n_is_prefix_of_full_sort() {
            let items: Vec<(char, Option<f64>)> = "abcdefghijklmnop"
                .chars()
                .enumerate()
                .map(|(i, c)| (c, if i % 5 == 0 { None } else { Some(((i * 7) % 11) as f64) }))
                .collect();
            let full = rank_by(&items, value, SortOrder::Descending);
            let top = top_n(&items, value, SortOrder::Descending, DEFAULT_TOP_N);
            assert_eq!(top.len(), DEFAULT_TOP_N.min(full.len()));
            assert_eq!(top[..], full[..top.len()]);
        }

        #[test]
        fn test_top_n_smaller_than_n() {
            let items = vec![('a', Some(1.0)), ('b', None)];
            assert_eq!(top_n(&items, value, SortOrder::Descending, 10).len(), 1);
        }

        #[test]
        fn test_dual_disjoint_when_many_ties() {
            let items: Vec<(char, Option<f64>)> =
                ('a'..='y').map(|c| (c, Some(1.0))).collect();
            let dual = dual_top_n(&items, value, 10);
            assert_eq!(dual.highest.len(), 10);
            assert_eq!(dual.lowest.len(), 10);
            assert!(dual
                .lowest
                .iter()
                .all(|l| !dual.highest.iter().any(|h| std::ptr::eq(*h, *l))));
            assert_eq!(names(&dual.highest), "abcdefghij");
            assert_eq!(names(&dual.lowest), "klmnopqrst");
        }

        #[test]
        fn test_dual_small_set_may_overlap() {
            let items = vec![('a', Some(1.2)), ('b', Some(0.9)), ('c', Some(1.0))];
            let dual = dual_top_n(&items, value, 10);
            assert_eq!(names(&dual.highest), "acb");
            assert_eq!(names(&dual.lowest), "bca");
        }

        #[test]
        fn test_dual_huge_n_keeps_everything() {
            let items = vec![('a', Some(1.0)), ('b', Some(2.0)), ('c', Some(3.0))];
            let dual = dual_top_n(&items, value, usize::MAX / 2 + 1);
            assert_eq!(names(&dual.highest), "cba");
            assert_eq!(names(&dual.lowest), "abc");
            let dual = dual_top_n(&items, value, usize::MAX);
            assert_eq!(dual.lowest.len(), 3);
        }
    }
}
