//! In-process plan store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::planning::Plan;
use crate::ports::{PlanStore, PortError};

/// Keeps plans in a map for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    plans: Mutex<HashMap<String, Plan>>,
}

impl MemoryPlanStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanStore for MemoryPlanStore {
    fn get(&self, id: &str) -> Result<Option<Plan>, PortError> {
        Ok(self.plans.lock().unwrap_or_else(PoisonError::into_inner).get(id).cloned())
    }

    fn set(&self, id: &str, plan: &Plan) -> Result<(), PortError> {
        self.plans.lock().unwrap_or_else(PoisonError::into_inner).insert(id.to_string(), plan.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, PortError> {
        Ok(self.plans.lock().unwrap_or_else(PoisonError::into_inner).remove(id).is_some())
    }

    fn list(&self) -> Result<Vec<Plan>, PortError> {
        Ok(self.plans.lock().unwrap_or_else(PoisonError::into_inner).values().cloned().collect())
    }
}
