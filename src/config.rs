//! Engine configuration.

/// What loading a company under an already registered name does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// Replace the registered company. Stored reservations for the name are
    /// re-attached to the new fleet.
    #[default]
    Overwrite,
    /// Refuse the load with `CompanyExists`.
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub reload_policy: ReloadPolicy,
    /// Seed for the car selector. `None` draws from OS entropy.
    pub seed: Option<u64>,
}
