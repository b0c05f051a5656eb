use super::coordinator::ConfirmationCoordinator;
use super::manager::ManagerService;
use super::quoting::QuoteEngine;
use super::session::ReservationSession;
use crate::config::EngineConfig;
use crate::domain::ports::{CarSelectorRef, CompanyStoreRef, ReservationStoreRef};
use crate::infrastructure::selector::RandomCarSelector;
use std::sync::Arc;

/// The main entry point of the rental engine.
///
/// `RentalService` owns the fleet registry and the reservation store for the
/// lifetime of the process and hands out client sessions and the manager
/// view over the same shared state.
#[derive(Clone)]
pub struct RentalService {
    companies: CompanyStoreRef,
    reservations: ReservationStoreRef,
    selector: CarSelectorRef,
    config: EngineConfig,
}

impl RentalService {
    /// Creates a service that books cars at random, seeded from `config`.
    ///
    /// # Arguments
    ///
    /// * `companies` - The fleet registry.
    /// * `reservations` - The store confirmed reservations are persisted to.
    /// * `config` - Engine settings.
    pub fn new(companies: CompanyStoreRef, reservations: ReservationStoreRef, config: EngineConfig) -> Self {
        let selector: CarSelectorRef = match config.seed {
            Some(seed) => Arc::new(RandomCarSelector::seeded(seed)),
            None => Arc::new(RandomCarSelector::new()),
        };
        Self::with_selector(companies, reservations, selector, config)
    }

    pub fn with_selector(
        companies: CompanyStoreRef,
        reservations: ReservationStoreRef,
        selector: CarSelectorRef,
        config: EngineConfig,
    ) -> Self {
        Self {
            companies,
            reservations,
            selector,
            config,
        }
    }

    pub fn quote_engine(&self) -> QuoteEngine {
        QuoteEngine::new(self.companies.clone())
    }

    pub fn coordinator(&self) -> ConfirmationCoordinator {
        ConfirmationCoordinator::new(
            self.companies.clone(),
            self.reservations.clone(),
            self.selector.clone(),
        )
    }

    pub fn new_reservation_session(&self) -> ReservationSession {
        ReservationSession::new(self.companies.clone(), self.quote_engine(), self.coordinator())
    }

    pub fn manager(&self) -> ManagerService {
        ManagerService::new(
            self.companies.clone(),
            self.reservations.clone(),
            self.config.reload_policy,
        )
    }
}
