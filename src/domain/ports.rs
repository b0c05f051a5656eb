use super::company::CarRentalCompany;
use super::reservation::{Reservation, ReservationId};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A company shared between sessions. Holding the lock makes the
/// check-then-book sequence atomic for that company's fleet.
pub type SharedCompany = Arc<Mutex<CarRentalCompany>>;

/// Fleet registry: every loaded company, addressable by name.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Registers a company, replacing any company of the same name.
    async fn store(&self, company: CarRentalCompany) -> Result<()>;
    /// Registers a company unless the name is taken, as one atomic step.
    /// Returns whether the company was stored.
    async fn store_if_absent(&self, company: CarRentalCompany) -> Result<bool>;
    async fn get(&self, name: &str) -> Result<Option<SharedCompany>>;
    /// All companies, sorted by name.
    async fn get_all(&self) -> Result<Vec<SharedCompany>>;
    async fn names(&self) -> Result<BTreeSet<String>>;
}

/// Durable record of confirmed reservations.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn next_id(&self) -> Result<ReservationId>;
    async fn persist(&self, reservation: Reservation) -> Result<()>;
    async fn remove(&self, id: ReservationId) -> Result<Option<Reservation>>;
    async fn get_all(&self) -> Result<Vec<Reservation>>;
}

/// Chooses which free car a confirmation books. `candidates` is never empty.
pub trait CarSelector: Send + Sync {
    fn pick(&self, candidates: &[u32]) -> u32;
}

pub type CompanyStoreRef = Arc<dyn CompanyStore>;
pub type ReservationStoreRef = Arc<dyn ReservationStore>;
pub type CarSelectorRef = Arc<dyn CarSelector>;
