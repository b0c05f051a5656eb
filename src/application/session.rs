use super::coordinator::ConfirmationCoordinator;
use super::quoting::QuoteEngine;
use crate::domain::car_type::CarType;
use crate::domain::period::RentalPeriod;
use crate::domain::ports::CompanyStoreRef;
use crate::domain::quote::{Quote, ReservationConstraints};
use crate::domain::reservation::Reservation;
use crate::error::{RentalError, Result};
use std::collections::BTreeSet;

/// One client's reservation session.
///
/// Collects quotes until the client confirms them as a batch. A session is
/// owned by a single client and is not shared, so it needs no locking.
pub struct ReservationSession {
    renter: Option<String>,
    quotes: Vec<Quote>,
    companies: CompanyStoreRef,
    quote_engine: QuoteEngine,
    coordinator: ConfirmationCoordinator,
}

impl ReservationSession {
    pub fn new(
        companies: CompanyStoreRef,
        quote_engine: QuoteEngine,
        coordinator: ConfirmationCoordinator,
    ) -> Self {
        Self {
            renter: None,
            quotes: Vec::new(),
            companies,
            quote_engine,
            coordinator,
        }
    }

    pub fn set_renter_name(&mut self, name: impl Into<String>) -> Result<()> {
        if self.renter.is_some() {
            return Err(RentalError::AlreadySet);
        }
        self.renter = Some(name.into());
        Ok(())
    }

    pub fn renter_name(&self) -> Option<&str> {
        self.renter.as_deref()
    }

    pub async fn all_rental_companies(&self) -> Result<BTreeSet<String>> {
        self.companies.names().await
    }

    pub async fn available_car_types(&self, period: &RentalPeriod) -> Result<Vec<CarType>> {
        self.quote_engine.available_car_types(period).await
    }

    pub async fn cheapest_car_type(&self, period: &RentalPeriod, region: &str) -> Result<Option<String>> {
        self.quote_engine.cheapest_car_type(period, region).await
    }

    pub async fn create_quote(&mut self, client: &str, constraints: &ReservationConstraints) -> Result<Quote> {
        let quote = self.quote_engine.create_quote(client, constraints).await?;
        self.quotes.push(quote.clone());
        Ok(quote)
    }

    pub fn current_quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Confirms every held quote or none of them.
    ///
    /// The quote list is cleared on success and left as is on failure.
    pub async fn confirm_quotes(&mut self) -> Result<Vec<Reservation>> {
        let reservations = self.coordinator.confirm_quotes(&self.quotes).await?;
        self.quotes.clear();
        Ok(reservations)
    }
}
