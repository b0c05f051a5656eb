use crate::domain::ports::ReservationStore;
use crate::domain::reservation::{Reservation, ReservationId};
use crate::error::{RentalError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing confirmed reservations.
pub const CF_RESERVATIONS: &str = "reservations";
/// Column Family for bookkeeping such as the id sequence.
pub const CF_META: &str = "meta";

const NEXT_ID_KEY: &[u8] = b"next_reservation_id";

fn internal(msg: impl Into<String>) -> RentalError {
    RentalError::InternalError(Box::new(std::io::Error::other(msg.into())))
}

/// A persistent reservation store backed by RocksDB.
///
/// Reservations are keyed by big-endian id, so iteration returns them in id
/// order. The id sequence is persisted too and survives restarts.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBReservationStore {
    db: Arc<DB>,
    next_id: Arc<Mutex<u64>>,
}

impl RocksDBReservationStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist and loads the id
    /// sequence.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_reservations = ColumnFamilyDescriptor::new(CF_RESERVATIONS, Options::default());
        let cf_meta = ColumnFamilyDescriptor::new(CF_META, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_reservations, cf_meta])?;

        let next_id = {
            let cf = db
                .cf_handle(CF_META)
                .ok_or_else(|| internal("Meta column family not found"))?;
            match db.get_cf(&cf, NEXT_ID_KEY)? {
                Some(bytes) => {
                    let raw: [u8; 8] = bytes
                        .as_slice()
                        .try_into()
                        .map_err(|_| internal("Corrupt reservation id sequence"))?;
                    u64::from_be_bytes(raw)
                }
                None => 1,
            }
        };

        Ok(Self {
            db: Arc::new(db),
            next_id: Arc::new(Mutex::new(next_id)),
        })
    }
}

#[async_trait]
impl ReservationStore for RocksDBReservationStore {
    async fn next_id(&self) -> Result<ReservationId> {
        let mut next = self.next_id.lock().await;
        let cf = self
            .db
            .cf_handle(CF_META)
            .ok_or_else(|| internal("Meta column family not found"))?;

        let id = *next;
        self.db.put_cf(&cf, NEXT_ID_KEY, (id + 1).to_be_bytes())?;
        *next = id + 1;
        Ok(ReservationId(id))
    }

    async fn persist(&self, reservation: Reservation) -> Result<()> {
        let cf = self
            .db
            .cf_handle(CF_RESERVATIONS)
            .ok_or_else(|| internal("Reservations column family not found"))?;

        let key = reservation.id.0.to_be_bytes();
        let value = serde_json::to_vec(&reservation)
            .map_err(|e| internal(format!("Serialization error: {}", e)))?;

        self.db.put_cf(&cf, key, value)?;
        Ok(())
    }

    async fn remove(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let cf = self
            .db
            .cf_handle(CF_RESERVATIONS)
            .ok_or_else(|| internal("Reservations column family not found"))?;

        let key = id.0.to_be_bytes();
        let Some(bytes) = self.db.get_cf(&cf, key)? else {
            return Ok(None);
        };
        let reservation = serde_json::from_slice(&bytes)
            .map_err(|e| internal(format!("Deserialization error: {}", e)))?;
        self.db.delete_cf(&cf, key)?;
        Ok(Some(reservation))
    }

    async fn get_all(&self) -> Result<Vec<Reservation>> {
        let cf = self
            .db
            .cf_handle(CF_RESERVATIONS)
            .ok_or_else(|| internal("Reservations column family not found"))?;

        let mut reservations = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) =
                item.map_err(|e| internal(format!("RocksDB iteration error: {}", e)))?;
            let reservation: Reservation = serde_json::from_slice(&value)
                .map_err(|e| internal(format!("Failed to deserialize reservation: {}", e)))?;
            reservations.push(reservation);
        }
        Ok(reservations)
    }
}
