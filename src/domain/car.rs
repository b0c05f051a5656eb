use super::car_type::CarType;
use super::period::RentalPeriod;
use super::reservation::{Reservation, ReservationId};

/// One physical car and its booking history.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: u32,
    pub car_type: CarType,
    reservations: Vec<Reservation>,
}

impl Car {
    pub fn new(id: u32, car_type: CarType) -> Self {
        Self {
            id,
            car_type,
            reservations: Vec::new(),
        }
    }

    /// A car is available iff none of its reservations overlap `period`.
    pub fn is_available(&self, period: &RentalPeriod) -> bool {
        self.reservations
            .iter()
            .all(|res| !res.quote.period.overlaps(period))
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn has_reservation(&self, id: ReservationId) -> bool {
        self.reservations.iter().any(|res| res.id == id)
    }

    pub fn add_reservation(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    /// Removes a reservation from the history, returning it if it was present.
    pub fn remove_reservation(&mut self, id: ReservationId) -> Option<Reservation> {
        let pos = self.reservations.iter().position(|res| res.id == id)?;
        Some(self.reservations.remove(pos))
    }
}
