use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },
    #[error("<{company}> No cars available to satisfy the given constraints")]
    NoAvailability { company: String },
    #[error("Didn't find an available quote for these constraints")]
    NoQuoteAvailable,
    #[error("Couldn't confirm quotes: {0}")]
    ConfirmationFailed(#[source] Box<RentalError>),
    #[error("Renter name already set")]
    AlreadySet,
    #[error("Car rental company is not registered: {0}")]
    UnknownCompany(String),
    #[error("Car rental company already loaded: {0}")]
    CompanyExists(String),
    #[error("Bad fleet data at line {line}: {reason}")]
    BadData { line: u64, reason: String },
    #[error("Reservation {id} overlaps an existing booking of car {car_id}")]
    ReservationConflict { id: u64, car_id: u32 },
    #[error("Invalid rental period: {0}")]
    InvalidPeriod(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl RentalError {
    pub fn not_found(entity: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            name: name.into(),
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for RentalError {
    fn from(err: rocksdb::Error) -> Self {
        Self::InternalError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, RentalError>;
