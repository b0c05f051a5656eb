use crate::config::ReloadPolicy;
use crate::domain::car_type::CarType;
use crate::domain::company::CarRentalCompany;
use crate::domain::fleet::FleetData;
use crate::domain::ports::{CompanyStoreRef, ReservationStoreRef, SharedCompany};
use crate::error::{RentalError, Result};
use crate::interfaces::csv::fleet_reader::FleetReader;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{error, info, warn};

/// One row of the fleet report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarTypeSummary {
    pub company: String,
    pub car_type: String,
    pub price_per_day: Decimal,
    pub cars: usize,
    pub reservations: usize,
}

/// Fleet loading and read-only reporting across all companies.
#[derive(Clone)]
pub struct ManagerService {
    companies: CompanyStoreRef,
    reservations: ReservationStoreRef,
    reload_policy: ReloadPolicy,
}

impl ManagerService {
    pub fn new(
        companies: CompanyStoreRef,
        reservations: ReservationStoreRef,
        reload_policy: ReloadPolicy,
    ) -> Self {
        Self {
            companies,
            reservations,
            reload_policy,
        }
    }

    async fn company(&self, name: &str) -> Result<SharedCompany> {
        self.companies
            .get(name)
            .await?
            .ok_or_else(|| RentalError::UnknownCompany(name.to_string()))
    }

    /// Registers the company described by `data`.
    ///
    /// Reservations already in the reservation store for that company name
    /// are attached to the new fleet first, so reloading a company keeps its
    /// bookings. Stored reservations that no longer fit the fleet are
    /// skipped with a warning.
    pub async fn load_company(&self, data: FleetData) -> Result<()> {
        let mut company = data.into_company()?;
        let name = company.name().to_string();
        let cars = company.cars().len();
        let restored = self.attach_stored(&mut company).await?;

        match self.reload_policy {
            ReloadPolicy::Overwrite => self.companies.store(company).await?,
            ReloadPolicy::Reject => {
                if !self.companies.store_if_absent(company).await? {
                    return Err(RentalError::CompanyExists(name));
                }
            }
        }
        info!(company = %name, cars, restored, "Loaded company");
        Ok(())
    }

    async fn attach_stored(&self, company: &mut CarRentalCompany) -> Result<usize> {
        let mut attached = 0;
        for reservation in self.reservations.get_all().await? {
            if reservation.rental_company() != company.name() {
                continue;
            }
            let id = reservation.id;
            match company.attach_reservation(reservation) {
                Ok(true) => attached += 1,
                Ok(false) => {}
                Err(e) => warn!(reservation = %id, error = %e, "Skipping reservation"),
            }
        }
        Ok(attached)
    }

    /// Loads one fleet file. Failures are logged and returned; nothing else
    /// is affected.
    pub async fn load_company_from_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        let loaded = async {
            let data = FleetReader::from_path(path)?.read()?;
            let name = data.name.clone();
            self.load_company(data).await?;
            Ok::<_, RentalError>(name)
        }
        .await;
        if let Err(e) = &loaded {
            error!(file = %path.display(), error = %e, "Bad fleet file");
        }
        loaded
    }

    /// Puts every stored reservation back on its car.
    ///
    /// Reservations the car already holds are left alone. Reservations whose
    /// company or car is not loaded, or that overlap another booking of the
    /// car, are skipped.
    pub async fn restore_reservations(&self) -> Result<usize> {
        let mut restored = 0;
        for reservation in self.reservations.get_all().await? {
            let Some(company) = self.companies.get(reservation.rental_company()).await? else {
                warn!(reservation = %reservation.id, company = %reservation.rental_company(), "Skipping reservation of unknown company");
                continue;
            };
            let id = reservation.id;
            match company.lock().await.attach_reservation(reservation) {
                Ok(true) => restored += 1,
                Ok(false) => {}
                Err(e) => warn!(reservation = %id, error = %e, "Skipping reservation"),
            }
        }
        info!(restored, "Restored reservations");
        Ok(restored)
    }

    pub async fn car_types(&self, company: &str) -> Result<Vec<CarType>> {
        Ok(self.company(company).await?.lock().await.all_types().to_vec())
    }

    pub async fn car_ids(&self, company: &str, car_type: &str) -> Result<BTreeSet<u32>> {
        Ok(self.company(company).await?.lock().await.car_ids(car_type))
    }

    pub async fn number_of_reservations_for_car(&self, company: &str, car_id: u32) -> Result<usize> {
        let company = self.company(company).await?;
        let company = company.lock().await;
        Ok(company.car(car_id)?.reservations().len())
    }

    pub async fn number_of_reservations_for_car_type(&self, company: &str, car_type: &str) -> Result<usize> {
        Ok(self
            .company(company)
            .await?
            .lock()
            .await
            .number_of_reservations_for_car_type(car_type))
    }

    pub async fn number_of_reservations_by(&self, client: &str) -> Result<usize> {
        let mut total = 0;
        for company in self.companies.get_all().await? {
            total += company.lock().await.number_of_reservations_by(client);
        }
        Ok(total)
    }

    /// All clients tied at the highest reservation count across companies.
    pub async fn best_clients(&self) -> Result<BTreeSet<String>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for company in self.companies.get_all().await? {
            for (client, n) in company.lock().await.clients_with_reservations() {
                *counts.entry(client).or_insert(0) += n;
            }
        }

        let Some(max) = counts.values().copied().max() else {
            return Ok(BTreeSet::new());
        };
        Ok(counts
            .into_iter()
            .filter(|(_, n)| *n == max)
            .map(|(client, _)| client)
            .collect())
    }

    pub async fn most_popular_car_type_in(&self, company: &str, year: i32) -> Result<Option<CarType>> {
        Ok(self
            .company(company)
            .await?
            .lock()
            .await
            .most_popular_car_type_in(year))
    }

    pub async fn fleet_summary(&self) -> Result<Vec<CarTypeSummary>> {
        let mut rows = Vec::new();
        for company in self.companies.get_all().await? {
            let company = company.lock().await;
            let mut types: Vec<&CarType> = company.all_types().iter().collect();
            types.sort_by(|a, b| a.name.cmp(&b.name));
            for car_type in types {
                rows.push(CarTypeSummary {
                    company: company.name().to_string(),
                    car_type: car_type.name.clone(),
                    price_per_day: car_type.price_per_day,
                    cars: company.car_ids(&car_type.name).len(),
                    reservations: company.number_of_reservations_for_car_type(&car_type.name),
                });
            }
        }
        Ok(rows)
    }
}
