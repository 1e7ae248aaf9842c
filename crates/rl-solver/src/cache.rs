//! Bounded memo table for repeated solves.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::params::{FluidParameters, ParamKey};
use crate::result::AggregateResult;
use crate::solve::{SolverConfig, solve_system_with};

/// Default number of retained results.
pub const DEFAULT_CAPACITY: usize = 64;

/// Least-recently-used cache of solve results keyed by the exact input bits.
///
/// The cache is owned by the caller; there is no process-wide state.
#[derive(Debug)]
pub struct SolveCache {
    capacity: usize,
    config: SolverConfig,
    entries: HashMap<ParamKey, Arc<AggregateResult>>,
    /// Least recent first
    order: VecDeque<ParamKey>,
    hits: u64,
    misses: u64,
}

impl SolveCache {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, SolverConfig::default())
    }

    pub fn with_config(capacity: usize, config: SolverConfig) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            config,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached result for `params`, solving on a miss.
    pub fn get_or_solve(&mut self, params: &FluidParameters) -> Arc<AggregateResult> {
        let key = params.key();

        if let Some(result) = self.entries.get(&key).cloned() {
            self.hits += 1;
            self.touch(key);
            return result;
        }

        self.misses += 1;
        let result = Arc::new(solve_system_with(params, &self.config));

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                tracing::trace!(?oldest, "evicted cached solve");
            }
        }
        self.entries.insert(key, Arc::clone(&result));
        self.order.push_back(key);
        result
    }

    pub fn contains(&self, params: &FluidParameters) -> bool {
        self.entries.contains_key(&params.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn touch(&mut self, key: ParamKey) {
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key);
    }
}

impl Default for SolveCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(q: f64) -> FluidParameters {
        FluidParameters::reference().with_flow(q)
    }

    #[test]
    fn identical_inputs_hit() {
        let mut cache = SolveCache::new(4);
        let a = cache.get_or_solve(&flow(0.02));
        let b = cache.get_or_solve(&flow(0.02));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn capacity_is_respected() {
        let mut cache = SolveCache::new(3);
        for i in 1..=10 {
            cache.get_or_solve(&flow(0.01 * f64::from(i)));
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.misses(), 10);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = SolveCache::new(2);
        cache.get_or_solve(&flow(0.01));
        cache.get_or_solve(&flow(0.02));
        // Refresh 0.01 so 0.02 becomes the oldest.
        cache.get_or_solve(&flow(0.01));
        cache.get_or_solve(&flow(0.03));

        assert!(cache.contains(&flow(0.01)));
        assert!(!cache.contains(&flow(0.02)));
        assert!(cache.contains(&flow(0.03)));
    }

    #[test]
    fn zero_capacity_still_caches_one() {
        let mut cache = SolveCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.get_or_solve(&flow(0.02));
        cache.get_or_solve(&flow(0.02));
        assert_eq!(cache.hits(), 1);
    }
}
