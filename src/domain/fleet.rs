use super::car::Car;
use super::car_type::CarType;
use super::company::CarRentalCompany;
use crate::error::{RentalError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One line of a fleet file: a car type and how many cars of it the company owns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarEntry {
    pub name: String,
    pub passenger_capacity: u32,
    pub trunk_space: f32,
    pub price_per_day: Decimal,
    pub smoking_allowed: bool,
    pub count: u32,
}

impl CarEntry {
    pub fn car_type(&self) -> CarType {
        CarType::new(
            self.name.clone(),
            self.passenger_capacity,
            self.trunk_space,
            self.price_per_day,
            self.smoking_allowed,
        )
    }
}

/// Parsed description of one company's fleet.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetData {
    pub name: String,
    pub regions: Vec<String>,
    pub entries: Vec<CarEntry>,
}

impl FleetData {
    /// Expands every entry into `count` individual cars.
    ///
    /// Car ids are local to the company and numbered from 0 in file order.
    /// Entries may repeat a type name only with identical attributes.
    pub fn into_company(self) -> Result<CarRentalCompany> {
        let mut cars = Vec::new();
        let mut types: Vec<CarType> = Vec::new();
        let mut next_id = 0u32;
        for entry in &self.entries {
            let car_type = entry.car_type();
            match types.iter().find(|t| t.name == car_type.name) {
                Some(known) if *known != car_type => {
                    return Err(RentalError::BadData {
                        line: 0,
                        reason: format!("conflicting definition of car type {}", car_type.name),
                    });
                }
                Some(_) => {}
                None => types.push(car_type.clone()),
            }
            for _ in 0..entry.count {
                cars.push(Car::new(next_id, car_type.clone()));
                next_id += 1;
            }
        }
        Ok(CarRentalCompany::new(self.name, self.regions, cars))
    }
}
