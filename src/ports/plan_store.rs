//! Plan store port: keyed storage for materialized plans.

use crate::planning::Plan;
use crate::ports::PortError;

/// Keyed storage for plans.
///
/// No ordering or transactional guarantees are implied; callers that need an
/// order (e.g. newest first) sort the result of [`PlanStore::list`].
pub trait PlanStore: Send + Sync {
    /// Fetches a plan by id, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, id: &str) -> Result<Option<Plan>, PortError>;

    /// Inserts or replaces the plan stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, id: &str, plan: &Plan) -> Result<(), PortError>;

    /// Removes a plan, returning whether one was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn delete(&self, id: &str) -> Result<bool, PortError>;

    /// Returns every stored plan in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn list(&self) -> Result<Vec<Plan>, PortError>;
}
