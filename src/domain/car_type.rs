use super::period::RentalPeriod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A category of car offered by a company.
///
/// The name is unique within a company. Two types compare equal only when
/// the name and every attribute match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarType {
    pub name: String,
    pub passenger_capacity: u32,
    pub trunk_space: f32,
    pub price_per_day: Decimal,
    pub smoking_allowed: bool,
}

impl CarType {
    pub fn new(
        name: impl Into<String>,
        passenger_capacity: u32,
        trunk_space: f32,
        price_per_day: Decimal,
        smoking_allowed: bool,
    ) -> Self {
        Self {
            name: name.into(),
            passenger_capacity,
            trunk_space,
            price_per_day,
            smoking_allowed,
        }
    }

    /// Price of renting one car of this type for `period`.
    pub fn rental_price(&self, period: &RentalPeriod) -> Decimal {
        calculate_price(self.price_per_day, period)
    }
}

/// Flat per-day pricing: every started day is charged in full.
pub fn calculate_price(price_per_day: Decimal, period: &RentalPeriod) -> Decimal {
    price_per_day * Decimal::from(period.billable_days())
}
