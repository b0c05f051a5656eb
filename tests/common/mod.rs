#![allow(dead_code)]

use carrental::application::service::RentalService;
use carrental::config::EngineConfig;
use carrental::domain::car_type::CarType;
use carrental::domain::company::CarRentalCompany;
use carrental::domain::car::Car;
use carrental::domain::period::RentalPeriod;
use carrental::domain::ports::CompanyStore;
use carrental::infrastructure::in_memory::{InMemoryCompanyStore, InMemoryReservationStore};
use carrental::infrastructure::selector::FirstCarSelector;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::sync::Arc;

pub const HERTZ_FLEET: &str = "tests/fixtures/hertz.csv";
pub const DOCKX_FLEET: &str = "tests/fixtures/dockx.csv";
pub const BAD_FLEET: &str = "tests/fixtures/bad.csv";

pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn period(start: DateTime<Utc>, end: DateTime<Utc>) -> RentalPeriod {
    RentalPeriod::new(start, end).unwrap()
}

/// A service over fresh in-memory stores that always books the first free car.
pub fn service() -> (RentalService, Arc<InMemoryCompanyStore>) {
    let companies = Arc::new(InMemoryCompanyStore::new());
    let service = RentalService::with_selector(
        companies.clone(),
        Arc::new(InMemoryReservationStore::new()),
        Arc::new(FirstCarSelector),
        EngineConfig::default(),
    );
    (service, companies)
}

/// Service with the Hertz and Dockx fixture fleets loaded.
pub async fn loaded_service() -> RentalService {
    let (service, _) = service();
    let manager = service.manager();
    manager.load_company_from_file(HERTZ_FLEET).await.unwrap();
    manager.load_company_from_file(DOCKX_FLEET).await.unwrap();
    service
}

/// Registers a company with `count` cars of a single type.
pub async fn single_type_company(
    companies: &InMemoryCompanyStore,
    name: &str,
    region: &str,
    car_type: &str,
    count: u32,
) {
    let car_type = CarType::new(car_type, 4, 2.0, dec!(50), false);
    let cars = (0..count).map(|id| Car::new(id, car_type.clone())).collect();
    companies
        .store(CarRentalCompany::new(name, vec![region.to_string()], cars))
        .await
        .unwrap();
}
