//! Letter height classification and its word, line and page aggregates.
//!
//! Statistics are plain values recomputed from the current letters, words or
//! lines. Words and lines keep them in a [`Cached`] slot that every mutating
//! method clears.

mod line;
mod page;
mod word;

use std::cell::OnceCell;

pub use line::{LineCounts, LineMeans, LineStatistics, LineStatsOptions};
pub use page::{PageConfidences, PageCounts, PageMeans, PageStatistics, PageStatsOptions};
pub use word::{WordCounts, WordMeans, WordMinMax, WordStatistics};

/// Lazily computed value owned by the entity it describes.
///
/// Never takes part in equality: two entities with the same data compare
/// equal whether or not their statistics have been computed.
#[derive(Debug, Clone)]
pub(crate) struct Cached<T>(OnceCell<T>);

impl<T> Cached<T> {
    pub(crate) fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(init)
    }

    pub(crate) fn invalidate(&mut self) {
        self.0.take();
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.0.get().is_some()
    }
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self(OnceCell::new())
    }
}

impl<T> PartialEq for Cached<T> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_computes_once_until_invalidated() {
        let mut cache: Cached<u32> = Cached::default();
        let mut calls = 0;
        assert_eq!(
            *cache.get_or_init(|| {
                calls += 1;
                7
            }),
            7
        );
        assert_eq!(*cache.get_or_init(|| 9), 7);
        assert!(cache.is_cached());
        cache.invalidate();
        assert!(!cache.is_cached());
        assert_eq!(*cache.get_or_init(|| 9), 9);
        assert_eq!(calls, 1);
    }

    #[test]
    fn cached_ignored_by_equality() {
        let a: Cached<u32> = Cached::default();
        let b: Cached<u32> = Cached::default();
        b.get_or_init(|| 1);
        assert_eq!(a, b);
    }
}
