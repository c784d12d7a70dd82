//! Per-provider schedule engine registry.
//!
//! Every provider's schedule is a read-modify-write target (booking flips a
//! slot in place), so each engine sits behind its own async mutex and all
//! mutations for one provider serialize on it. The registry map itself is
//! only locked long enough to hand out the engine handle.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::api::ProviderId;
use crate::scheduler::ScheduleEngine;

/// Shared handle to one provider's engine.
pub type EngineHandle = Arc<Mutex<ScheduleEngine>>;

/// Registry of live schedule engines, one per provider.
#[derive(Clone, Default)]
pub struct ScheduleRegistry {
    engines: Arc<RwLock<HashMap<ProviderId, EngineHandle>>>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the engine handle for a provider, creating an empty engine on
    /// first access.
    pub fn engine_for(&self, provider_id: &ProviderId) -> EngineHandle {
        {
            let engines = self.engines.read();
            if let Some(engine) = engines.get(provider_id) {
                return Arc::clone(engine);
            }
        }

        let mut engines = self.engines.write();
        Arc::clone(
            engines
                .entry(provider_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(ScheduleEngine::new()))),
        )
    }

    /// Whether an engine exists for the provider (without creating one).
    pub fn contains(&self, provider_id: &ProviderId) -> bool {
        self.engines.read().contains_key(provider_id)
    }

    /// Drop a provider's engine. Returns whether one existed.
    pub fn remove(&self, provider_id: &ProviderId) -> bool {
        self.engines.write().remove(provider_id).is_some()
    }

    /// Number of providers with a live engine.
    pub fn provider_count(&self) -> usize {
        self.engines.read().len()
    }
}
