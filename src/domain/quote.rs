use super::period::RentalPeriod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a client asks for when requesting a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationConstraints {
    pub period: RentalPeriod,
    pub car_type: String,
    pub region: String,
}

impl ReservationConstraints {
    pub fn new(period: RentalPeriod, car_type: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            period,
            car_type: car_type.into(),
            region: region.into(),
        }
    }
}

/// A non-binding price offer.
///
/// Quotes are optimistic: nothing is held for the client until the quote is
/// confirmed, so a quote may turn out to be unconfirmable later on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub car_renter: String,
    pub period: RentalPeriod,
    pub rental_company: String,
    pub car_type: String,
    pub rental_price: Decimal,
}
