use super::car::Car;
use super::car_type::CarType;
use super::period::RentalPeriod;
use super::ports::CarSelector;
use super::quote::{Quote, ReservationConstraints};
use super::reservation::{Reservation, ReservationId};
use crate::error::{RentalError, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// A rental company: its fleet, the car types that fleet is made of, and the
/// regions it serves.
///
/// Car types are derived from the cars, so every car's type is always known
/// to the company. Type names are the key: cars sharing a type name must
/// carry identical attributes (`FleetData::into_company` enforces this).
#[derive(Debug, Clone)]
pub struct CarRentalCompany {
    name: String,
    regions: Vec<String>,
    cars: Vec<Car>,
    car_types: Vec<CarType>,
}

impl CarRentalCompany {
    pub fn new(name: impl Into<String>, regions: Vec<String>, cars: Vec<Car>) -> Self {
        let name = name.into();
        info!(company = %name, cars = cars.len(), "Starting up car rental company");
        let mut car_types: Vec<CarType> = Vec::new();
        for car in &cars {
            if !car_types.iter().any(|t| t.name == car.car_type.name) {
                car_types.push(car.car_type.clone());
            }
        }
        Self {
            name,
            regions,
            cars,
            car_types,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn operates_in_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }

    pub fn all_types(&self) -> &[CarType] {
        &self.car_types
    }

    pub fn car_type(&self, name: &str) -> Result<&CarType> {
        self.car_types
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| RentalError::not_found("car type", format!("{}/{}", self.name, name)))
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn car(&self, id: u32) -> Result<&Car> {
        self.cars
            .iter()
            .find(|car| car.id == id)
            .ok_or_else(|| RentalError::not_found("car", format!("{}/{}", self.name, id)))
    }

    fn car_mut(&mut self, id: u32) -> Result<&mut Car> {
        let company = &self.name;
        self.cars
            .iter_mut()
            .find(|car| car.id == id)
            .ok_or_else(|| RentalError::not_found("car", format!("{}/{}", company, id)))
    }

    pub fn car_ids(&self, car_type: &str) -> BTreeSet<u32> {
        self.cars
            .iter()
            .filter(|car| car.car_type.name == car_type)
            .map(|car| car.id)
            .collect()
    }

    /// Types with at least one car free for the whole period, in fleet order.
    pub fn available_car_types(&self, period: &RentalPeriod) -> Vec<CarType> {
        self.car_types
            .iter()
            .filter(|t| {
                self.cars
                    .iter()
                    .any(|car| car.car_type.name == t.name && car.is_available(period))
            })
            .cloned()
            .collect()
    }

    pub fn is_available(&self, car_type: &str, period: &RentalPeriod) -> Result<bool> {
        debug!(company = %self.name, car_type, "Checking availability");
        let wanted = self.car_type(car_type)?;
        Ok(self
            .available_car_types(period)
            .iter()
            .any(|t| t.name == wanted.name))
    }

    fn available_car_ids(&self, car_type: &str, period: &RentalPeriod) -> Vec<u32> {
        self.cars
            .iter()
            .filter(|car| car.car_type.name == car_type && car.is_available(period))
            .map(|car| car.id)
            .collect()
    }

    pub fn create_quote(&self, constraints: &ReservationConstraints, client: &str) -> Result<Quote> {
        info!(company = %self.name, client, car_type = %constraints.car_type, "Creating quote");
        let no_availability = || RentalError::NoAvailability {
            company: self.name.clone(),
        };

        if !self.operates_in_region(&constraints.region) {
            return Err(no_availability());
        }
        let car_type = self.car_type(&constraints.car_type).map_err(|_| no_availability())?;
        if !self.is_available(&car_type.name, &constraints.period)? {
            return Err(no_availability());
        }

        Ok(Quote {
            car_renter: client.to_string(),
            period: constraints.period,
            rental_company: self.name.clone(),
            car_type: car_type.name.clone(),
            rental_price: car_type.rental_price(&constraints.period),
        })
    }

    /// Re-checks availability and books one of the free cars of the quoted type.
    ///
    /// Must run under the company's lock so the check and the booking happen
    /// as a single step.
    pub fn confirm_quote(
        &mut self,
        quote: &Quote,
        id: ReservationId,
        selector: &dyn CarSelector,
    ) -> Result<Reservation> {
        info!(company = %self.name, client = %quote.car_renter, car_type = %quote.car_type, "Confirming quote");
        let candidates = self.available_car_ids(&quote.car_type, &quote.period);
        if candidates.is_empty() {
            return Err(RentalError::NoAvailability {
                company: self.name.clone(),
            });
        }
        let car_id = selector.pick(&candidates);

        let reservation = Reservation::new(id, quote.clone(), car_id);
        self.car_mut(car_id)?.add_reservation(reservation.clone());
        Ok(reservation)
    }

    /// Puts an already persisted reservation back on its car.
    ///
    /// Returns `false` when the car already holds that reservation. A
    /// reservation overlapping another booking of the car is refused with
    /// `ReservationConflict`.
    pub fn attach_reservation(&mut self, reservation: Reservation) -> Result<bool> {
        let car = self.car_mut(reservation.car_id)?;
        if car.has_reservation(reservation.id) {
            return Ok(false);
        }
        if !car.is_available(&reservation.quote.period) {
            return Err(RentalError::ReservationConflict {
                id: reservation.id.0,
                car_id: reservation.car_id,
            });
        }
        car.add_reservation(reservation);
        Ok(true)
    }

    pub fn cancel_reservation(&mut self, reservation: &Reservation) -> Result<()> {
        info!(company = %self.name, reservation = %reservation.id, "Cancelling reservation");
        self.car_mut(reservation.car_id)?
            .remove_reservation(reservation.id)
            .map(|_| ())
            .ok_or_else(|| RentalError::not_found("reservation", reservation.id.to_string()))
    }

    pub fn reservations(&self) -> impl Iterator<Item = &Reservation> {
        self.cars.iter().flat_map(|car| car.reservations())
    }

    pub fn reservations_by(&self, renter: &str) -> Vec<Reservation> {
        self.reservations()
            .filter(|res| res.car_renter() == renter)
            .cloned()
            .collect()
    }

    pub fn number_of_reservations_by(&self, renter: &str) -> usize {
        self.reservations()
            .filter(|res| res.car_renter() == renter)
            .count()
    }

    pub fn clients_with_reservations(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for res in self.reservations() {
            *counts.entry(res.car_renter().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn number_of_reservations_for_car_type(&self, car_type: &str) -> usize {
        self.cars
            .iter()
            .filter(|car| car.car_type.name == car_type)
            .map(|car| car.reservations().len())
            .sum()
    }

    /// The type with the most reservations starting in `year`.
    ///
    /// Ties go to the type whose first reservation in that year comes first
    /// in fleet order.
    pub fn most_popular_car_type_in(&self, year: i32) -> Option<CarType> {
        let mut counts: Vec<(&CarType, usize)> = Vec::new();
        for car in &self.cars {
            for res in car.reservations() {
                if res.quote.period.start_year() != year {
                    continue;
                }
                match counts.iter_mut().find(|(t, _)| t.name == car.car_type.name) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((&car.car_type, 1)),
                }
            }
        }

        let mut best: Option<(&CarType, usize)> = None;
        for (car_type, n) in counts {
            if best.is_none_or(|(_, max)| n > max) {
                best = Some((car_type, n));
            }
        }
        best.map(|(car_type, _)| car_type.clone())
    }
}
