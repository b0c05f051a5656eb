use crate::domain::ports::{CarSelectorRef, CompanyStoreRef, ReservationStoreRef};
use crate::domain::quote::Quote;
use crate::domain::reservation::Reservation;
use crate::error::{RentalError, Result};
use tracing::{error, info, warn};

/// Turns a batch of quotes into reservations, all or nothing.
///
/// Quotes are booked one by one in order; each booking locks only the
/// quote's company. When a quote can no longer be honoured, every
/// reservation made earlier in the batch is cancelled again before the
/// error is returned. This is compensation, not a distributed transaction:
/// a crash mid-batch can leave the earlier bookings in place.
#[derive(Clone)]
pub struct ConfirmationCoordinator {
    companies: CompanyStoreRef,
    reservations: ReservationStoreRef,
    selector: CarSelectorRef,
}

impl ConfirmationCoordinator {
    pub fn new(
        companies: CompanyStoreRef,
        reservations: ReservationStoreRef,
        selector: CarSelectorRef,
    ) -> Self {
        Self {
            companies,
            reservations,
            selector,
        }
    }

    pub async fn confirm_quotes(&self, quotes: &[Quote]) -> Result<Vec<Reservation>> {
        let mut done: Vec<Reservation> = Vec::with_capacity(quotes.len());
        for quote in quotes {
            match self.confirm_quote(quote).await {
                Ok(reservation) => done.push(reservation),
                Err(e) => {
                    warn!(
                        client = %quote.car_renter,
                        company = %quote.rental_company,
                        rolled_back = done.len(),
                        error = %e,
                        "Confirmation failed, rolling back batch"
                    );
                    self.roll_back(&done).await;
                    return Err(RentalError::ConfirmationFailed(Box::new(e)));
                }
            }
        }
        info!(reservations = done.len(), "Quotes confirmed");
        Ok(done)
    }

    async fn confirm_quote(&self, quote: &Quote) -> Result<Reservation> {
        let company = self
            .companies
            .get(&quote.rental_company)
            .await?
            .ok_or_else(|| RentalError::not_found("company", &quote.rental_company))?;
        let id = self.reservations.next_id().await?;

        let reservation = company
            .lock()
            .await
            .confirm_quote(quote, id, self.selector.as_ref())?;

        if let Err(e) = self.reservations.persist(reservation.clone()).await {
            company.lock().await.cancel_reservation(&reservation)?;
            return Err(e);
        }
        Ok(reservation)
    }

    async fn roll_back(&self, done: &[Reservation]) {
        for reservation in done.iter().rev() {
            if let Err(e) = self.cancel_reservation(reservation).await {
                error!(reservation = %reservation.id, error = %e, "Failed to compensate reservation");
            }
        }
    }

    /// Removes a reservation from its car and from the reservation store.
    ///
    /// The stored row is removed even when the company no longer holds the
    /// reservation; the first error is returned.
    pub async fn cancel_reservation(&self, reservation: &Reservation) -> Result<()> {
        let released = self.release_car(reservation).await;
        let removed = self.reservations.remove(reservation.id).await.map(|_| ());
        released.and(removed)
    }

    async fn release_car(&self, reservation: &Reservation) -> Result<()> {
        let company = self
            .companies
            .get(reservation.rental_company())
            .await?
            .ok_or_else(|| RentalError::not_found("company", reservation.rental_company()))?;
        company.lock().await.cancel_reservation(reservation)
    }
}
