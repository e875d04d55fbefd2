//! Conditional parallel evaluation.
//!
//! Uses rayon when the `parallel` feature is enabled and the configuration
//! asks for it. Output order always matches input order.

use parity_config::AnalysisConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection has at least `config.parallel_threshold` items
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AnalysisConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            log::debug!("evaluating {} items in parallel", items.len());
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_preserves_order() {
        let items: Vec<u32> = (0..10).collect();
        let result = maybe_parallel_map(&items, &AnalysisConfig::sequential(), |x| x * 2);
        assert_eq!(result, (0..10).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_parallel_preserves_order() {
        let config = AnalysisConfig {
            parallel: true,
            parallel_threshold: 1,
            ..AnalysisConfig::default()
        };
        let items: Vec<u64> = (0..1000).collect();

        let result = maybe_parallel_map(&items, &config, |x| x * x);

        assert_eq!(result.len(), 1000);
        assert!(result.iter().enumerate().all(|(i, &v)| v == (i as u64) * (i as u64)));
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = Vec::new();
        let result = maybe_parallel_map(&items, &AnalysisConfig::default(), |x| *x);
        assert!(result.is_empty());
    }
}
