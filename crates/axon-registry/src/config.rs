//! Registry tuning knobs.

/// Configuration for a [`ServiceRegistry`](crate::ServiceRegistry).
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Hard bound on recursive resolution depth.
    ///
    /// Cycle detection catches true cycles before resolution starts;
    /// this bound is the backstop for pathological acyclic chains.
    pub max_resolution_depth: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: 32,
        }
    }
}
