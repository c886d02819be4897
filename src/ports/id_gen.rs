//! ID generator port for producing unique identifiers.

/// Generates unique identifiers.
///
/// Source of every plan and task id.
pub trait IdGenerator: Send + Sync {
    /// Generates a new identifier that no earlier call has returned.
    fn generate_id(&self) -> String;
}
