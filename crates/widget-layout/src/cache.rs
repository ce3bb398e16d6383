#![forbid(unsafe_code)]

//! Memoized layout planning.
//!
//! Dashboards re-plan on every resize event, but the widget list rarely
//! changes and viewport widths repeat. Planning is deterministic, so a
//! layout computed once for a (widgets, container width) pair can be reused.
//!
//! Keys use the *effective* container width (after clamping), so every
//! viewport wider than the maximum shares one entry.

use rustc_hash::FxHashMap;

use crate::config::{LayoutConfig, LayoutConfigError};
use crate::error::LayoutError;
use crate::plan::{DashboardLayout, LayoutPlanner};
use crate::size::WidgetSize;

/// Default number of cached layouts before the cache is flushed.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LayoutCacheKey {
    widgets: Vec<WidgetSize>,
    container_width: u32,
}

/// Hit/miss counters for a [`LayoutCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl LayoutCacheStats {
    /// Fraction of lookups served from the cache.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A [`LayoutPlanner`] with a bounded memo of previous results.
///
/// When the cache is full, the next insert flushes it entirely.
#[derive(Debug)]
pub struct LayoutCache {
    planner: LayoutPlanner,
    entries: FxHashMap<LayoutCacheKey, DashboardLayout>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutCache {
    /// Create a cache with [`DEFAULT_CACHE_CAPACITY`].
    ///
    /// Like [`LayoutPlanner::new`], the config is not validated.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_capacity(config, DEFAULT_CACHE_CAPACITY)
    }

    /// Create a cache after validating `config`.
    pub fn try_new(config: LayoutConfig) -> Result<Self, Vec<LayoutConfigError>> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a cache holding at most `capacity` layouts (at least one).
    #[must_use]
    pub fn with_capacity(config: LayoutConfig, capacity: usize) -> Self {
        Self {
            planner: LayoutPlanner::new(config),
            entries: FxHashMap::default(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// The wrapped planner.
    #[inline]
    #[must_use]
    pub fn planner(&self) -> &LayoutPlanner {
        &self.planner
    }

    /// Plan a layout, reusing a cached result when available.
    ///
    /// Errors are returned as-is and never cached.
    pub fn plan(
        &mut self,
        widgets: &[WidgetSize],
        viewport_width: f64,
    ) -> Result<DashboardLayout, LayoutError> {
        let container_width = self.planner.container_width(viewport_width)?;
        let key = LayoutCacheKey {
            widgets: widgets.to_vec(),
            container_width,
        };

        if let Some(layout) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(layout.clone());
        }
        self.misses += 1;

        let layout = self.planner.plan_at(widgets, container_width)?;
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(key, layout.clone());
        Ok(layout)
    }

    /// Number of cached layouts.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no layouts.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached layouts. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> LayoutCacheStats {
        LayoutCacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    /// Zero the hit/miss counters.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::{WidthRange, WidthTable};
    use crate::size::WidgetSize::{Lg, Md, Sm};

    #[test]
    fn repeated_plan_hits() {
        let mut cache = LayoutCache::default();
        let first = cache.plan(&[Md, Sm, Lg], 1360.0).unwrap();
        let second = cache.plan(&[Md, Sm, Lg], 1360.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            cache.stats(),
            LayoutCacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
        assert_eq!(cache.stats().hit_ratio(), 0.5);
    }

    #[test]
    fn cached_result_matches_fresh_plan() {
        let mut cache = LayoutCache::default();
        let planner = LayoutPlanner::default();
        for width in [700.0, 800.0, 1360.0, 1920.0, 1360.0, 700.0] {
            let widgets = [Md, Md, Sm, Md, Lg, Sm];
            assert_eq!(
                cache.plan(&widgets, width).unwrap(),
                planner.plan(&widgets, width).unwrap()
            );
        }
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn clamped_widths_share_an_entry() {
        let mut cache = LayoutCache::default();
        cache.plan(&[Sm], 2000.0).unwrap();
        cache.plan(&[Sm], 3000.0).unwrap();
        cache.plan(&[Sm], 1920.4).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn widget_order_is_part_of_the_key() {
        let mut cache = LayoutCache::default();
        cache.plan(&[Sm, Md], 1360.0).unwrap();
        cache.plan(&[Md, Sm], 1360.0).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn errors_are_not_cached() {
        let table = WidthTable::empty().with(Sm, WidthRange::fixed(300));
        let mut cache = LayoutCache::new(LayoutConfig::default().with_widths(table));
        assert!(cache.plan(&[Md], 1360.0).is_err());
        assert!(cache.plan(&[Sm], f64::NAN).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn try_new_validates_config() {
        assert!(LayoutCache::try_new(LayoutConfig::default()).is_ok());
        let config = LayoutConfig::default().with_container_bounds(0, 1920);
        let errors = LayoutCache::try_new(config).unwrap_err();
        assert_eq!(errors[0].field, "container_min_width");
    }

    #[test]
    fn full_cache_is_flushed() {
        let mut cache = LayoutCache::with_capacity(LayoutConfig::default(), 2);
        cache.plan(&[Sm], 1000.0).unwrap();
        cache.plan(&[Sm], 1100.0).unwrap();
        assert_eq!(cache.len(), 2);
        cache.plan(&[Sm], 1200.0).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_and_reset() {
        let mut cache = LayoutCache::default();
        cache.plan(&[Sm], 1000.0).unwrap();
        cache.plan(&[Sm], 1000.0).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 1);
        cache.reset_stats();
        assert_eq!(cache.stats(), LayoutCacheStats::default());
        assert_eq!(LayoutCacheStats::default().hit_ratio(), 0.0);
    }
}
