//! Caller-owned memoization around the engine
//!
//! Results live in a bounded `moka` cache keyed on a structural hash of the
//! inputs. Each entry also keeps an owned copy of the inputs it was computed
//! from, so two inputs sharing a hash never share a result. The engine stays
//! pure; this wrapper is the only place holding state between calls.

use moka::sync::Cache;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use devicecalc_common::{Device, Money};
use rust_decimal::Decimal;

use crate::engine::{CalculationEngine, CalculationResult};
use crate::inputs::{CalculationInputs, ConsumptionPreference, LeasingModel, PaymentMode};
use crate::service::ServiceTier;

/// Owned copy of a [`CalculationInputs`] snapshot
#[derive(Debug, Clone)]
struct MemoKey {
    device: Option<Device>,
    uses_per_day: Decimal,
    unit_price: Option<Money>,
    payment_mode: PaymentMode,
    leasing_months: Option<u32>,
    insurance: bool,
    service_tier: ServiceTier,
    adjustment_factor: Decimal,
    consumption: ConsumptionPreference,
    working_days_per_month: Option<u32>,
    leasing_model: LeasingModel,
}

impl MemoKey {
    fn new(inputs: &CalculationInputs<'_>) -> Self {
        Self {
            device: inputs.device.cloned(),
            uses_per_day: inputs.uses_per_day,
            unit_price: inputs.unit_price,
            payment_mode: inputs.payment_mode,
            leasing_months: inputs.leasing_months,
            insurance: inputs.insurance,
            service_tier: inputs.service_tier,
            adjustment_factor: inputs.adjustment_factor,
            consumption: inputs.consumption,
            working_days_per_month: inputs.working_days_per_month,
            leasing_model: inputs.leasing_model,
        }
    }

    fn inputs(&self) -> CalculationInputs<'_> {
        CalculationInputs {
            device: self.device.as_ref(),
            uses_per_day: self.uses_per_day,
            unit_price: self.unit_price,
            payment_mode: self.payment_mode,
            leasing_months: self.leasing_months,
            insurance: self.insurance,
            service_tier: self.service_tier,
            adjustment_factor: self.adjustment_factor,
            consumption: self.consumption,
            working_days_per_month: self.working_days_per_month,
            leasing_model: self.leasing_model,
        }
    }
}

struct MemoEntry {
    key: MemoKey,
    result: CalculationResult,
}

/// Bounded memo cache in front of a [`CalculationEngine`]
pub struct MemoizedEngine {
    engine: CalculationEngine,
    cache: Cache<u64, Arc<MemoEntry>>,
    capacity: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoizedEngine {
    /// Wrap an engine, keeping at most `capacity` results
    pub fn new(engine: CalculationEngine, capacity: u64) -> Self {
        let capacity = capacity.max(1);
        let cache = Cache::builder().max_capacity(capacity).build();

        Self {
            engine,
            cache,
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Structural hash of an input snapshot
    pub fn fingerprint(inputs: &CalculationInputs<'_>) -> u64 {
        let mut hasher = DefaultHasher::new();
        inputs.hash(&mut hasher);
        hasher.finish()
    }

    /// Return the cached result for identical inputs, computing it once
    pub fn calculate(&self, inputs: &CalculationInputs<'_>) -> CalculationResult {
        let hash = Self::fingerprint(inputs);

        if let Some(result) = self.cached(hash, inputs) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(hash, "Memo hit");
            return result;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = self.engine.calculate(inputs);
        self.store(hash, inputs, result.clone());
        result
    }

    fn cached(&self, hash: u64, inputs: &CalculationInputs<'_>) -> Option<CalculationResult> {
        self.cache
            .get(&hash)
            .filter(|entry| entry.key.inputs() == *inputs)
            .map(|entry| entry.result.clone())
    }

    fn store(&self, hash: u64, inputs: &CalculationInputs<'_>, result: CalculationResult) {
        let entry = MemoEntry {
            key: MemoKey::new(inputs),
            result,
        };
        self.cache.insert(hash, Arc::new(entry));
    }

    /// (hits, misses) since creation or the last clear
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }

    /// Maximum number of cached results
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of cached results
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached results and reset counters
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Wrapped engine
    pub fn engine(&self) -> &CalculationEngine {
        &self.engine
    }
}
