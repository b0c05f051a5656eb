use crate::domain::company::CarRentalCompany;
use crate::domain::ports::{CompanyStore, ReservationStore, SharedCompany};
use crate::domain::reservation::{Reservation, ReservationId};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

/// A thread-safe in-memory fleet registry.
///
/// The index is a `BTreeMap` so companies always enumerate in name order.
/// Each company sits behind its own mutex; confirmations against different
/// companies never contend.
#[derive(Default, Clone)]
pub struct InMemoryCompanyStore {
    companies: Arc<RwLock<BTreeMap<String, SharedCompany>>>,
}

impl InMemoryCompanyStore {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn store(&self, company: CarRentalCompany) -> Result<()> {
        let mut companies = self.companies.write().await;
        companies.insert(company.name().to_string(), Arc::new(Mutex::new(company)));
        Ok(())
    }

    async fn store_if_absent(&self, company: CarRentalCompany) -> Result<bool> {
        let mut companies = self.companies.write().await;
        match companies.entry(company.name().to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(company)));
                Ok(true)
            }
        }
    }

    async fn get(&self, name: &str) -> Result<Option<SharedCompany>> {
        let companies = self.companies.read().await;
        Ok(companies.get(name).cloned())
    }

    async fn get_all(&self) -> Result<Vec<SharedCompany>> {
        let companies = self.companies.read().await;
        Ok(companies.values().cloned().collect())
    }

    async fn names(&self) -> Result<BTreeSet<String>> {
        let companies = self.companies.read().await;
        Ok(companies.keys().cloned().collect())
    }
}

/// A thread-safe in-memory reservation ledger.
///
/// Ids come from a process-wide counter starting at 1.
#[derive(Clone)]
pub struct InMemoryReservationStore {
    reservations: Arc<RwLock<BTreeMap<ReservationId, Reservation>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryReservationStore {
    /// Creates a new, empty reservation store.
    pub fn new() -> Self {
        Self {
            reservations: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for InMemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn next_id(&self) -> Result<ReservationId> {
        Ok(ReservationId(self.next_id.fetch_add(1, Ordering::Relaxed)))
    }

    async fn persist(&self, reservation: Reservation) -> Result<()> {
        let mut reservations = self.reservations.write().await;
        reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn remove(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let mut reservations = self.reservations.write().await;
        Ok(reservations.remove(&id))
    }

    async fn get_all(&self) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        Ok(reservations.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::car::Car;
    use crate::domain::car_type::CarType;
    use crate::domain::period::RentalPeriod;
    use crate::domain::quote::Quote;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn company(name: &str) -> CarRentalCompany {
        let car_type = CarType::new("Compact", 4, 2.0, dec!(40), false);
        CarRentalCompany::new(name, vec!["Leuven".to_string()], vec![Car::new(0, car_type)])
    }

    #[tokio::test]
    async fn test_company_store_enumerates_by_name() {
        let store = InMemoryCompanyStore::new();
        store.store(company("Hertz")).await.unwrap();
        store.store(company("Avis")).await.unwrap();
        store.store(company("Dockx")).await.unwrap();

        let mut names = Vec::new();
        for crc in store.get_all().await.unwrap() {
            names.push(crc.lock().await.name().to_string());
        }
        assert_eq!(names, vec!["Avis", "Dockx", "Hertz"]);
        assert_eq!(store.names().await.unwrap().len(), 3);

        assert!(store.get("Hertz").await.unwrap().is_some());
        assert!(store.get("Sixt").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_company_store_overwrites_same_name() {
        let store = InMemoryCompanyStore::new();
        store.store(company("Hertz")).await.unwrap();
        let replacement = CarRentalCompany::new("Hertz", vec!["Ghent".to_string()], Vec::new());
        store.store(replacement).await.unwrap();

        let crc = store.get("Hertz").await.unwrap().unwrap();
        assert!(crc.lock().await.operates_in_region("Ghent"));
        assert_eq!(store.names().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_if_absent_keeps_first() {
        let store = InMemoryCompanyStore::new();
        assert!(store.store_if_absent(company("Hertz")).await.unwrap());
        let replacement = CarRentalCompany::new("Hertz", vec!["Ghent".to_string()], Vec::new());
        assert!(!store.store_if_absent(replacement).await.unwrap());

        let crc = store.get("Hertz").await.unwrap().unwrap();
        assert!(crc.lock().await.operates_in_region("Leuven"));
    }

    #[tokio::test]
    async fn test_reservation_store() {
        let store = InMemoryReservationStore::new();
        let first = store.next_id().await.unwrap();
        let second = store.next_id().await.unwrap();
        assert_ne!(first, second);

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let reservation = Reservation::new(
            first,
            Quote {
                car_renter: "alice".to_string(),
                period: RentalPeriod::new(start, end).unwrap(),
                rental_company: "Hertz".to_string(),
                car_type: "Compact".to_string(),
                rental_price: dec!(80),
            },
            0,
        );

        store.persist(reservation.clone()).await.unwrap();
        assert_eq!(store.get_all().await.unwrap(), vec![reservation.clone()]);

        assert_eq!(store.remove(first).await.unwrap(), Some(reservation));
        assert!(store.remove(first).await.unwrap().is_none());
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
