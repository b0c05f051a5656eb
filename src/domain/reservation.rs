use super::quote::Quote;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReservationId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A confirmed booking of one concrete car.
///
/// The quote is copied in by value at confirmation time, so later changes to
/// a session's quote list never touch a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub car_id: u32,
    pub quote: Quote,
}

impl Reservation {
    pub fn new(id: ReservationId, quote: Quote, car_id: u32) -> Self {
        Self { id, car_id, quote }
    }

    pub fn car_renter(&self) -> &str {
        &self.quote.car_renter
    }

    pub fn rental_company(&self) -> &str {
        &self.quote.rental_company
    }

    pub fn car_type(&self) -> &str {
        &self.quote.car_type
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation {} for {} from {} to {} at {} (car type: {}, car: {}, total price: {:.2})",
            self.id,
            self.quote.car_renter,
            self.quote.period.start(),
            self.quote.period.end(),
            self.quote.rental_company,
            self.quote.car_type,
            self.car_id,
            self.quote.rental_price
        )
    }
}
