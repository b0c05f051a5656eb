use crate::domain::car_type::CarType;
use crate::domain::period::RentalPeriod;
use crate::domain::ports::CompanyStoreRef;
use crate::domain::quote::{Quote, ReservationConstraints};
use crate::error::{RentalError, Result};
use tracing::{debug, info};

/// Cross-company availability and pricing.
///
/// Companies are always visited in name order, so "first company that can
/// serve the request" and tie-breaks are deterministic.
#[derive(Clone)]
pub struct QuoteEngine {
    companies: CompanyStoreRef,
}

impl QuoteEngine {
    pub fn new(companies: CompanyStoreRef) -> Self {
        Self { companies }
    }

    /// Quotes against the first company able to satisfy `constraints`.
    pub async fn create_quote(&self, client: &str, constraints: &ReservationConstraints) -> Result<Quote> {
        for company in self.companies.get_all().await? {
            let company = company.lock().await;
            match company.create_quote(constraints, client) {
                Ok(quote) => {
                    info!(
                        company = %quote.rental_company,
                        client,
                        price = %quote.rental_price,
                        "Quote created"
                    );
                    return Ok(quote);
                }
                Err(e) => debug!(company = %company.name(), error = %e, "Company cannot quote"),
            }
        }
        Err(RentalError::NoQuoteAvailable)
    }

    /// Every car type free for `period` at some company, without duplicates.
    pub async fn available_car_types(&self, period: &RentalPeriod) -> Result<Vec<CarType>> {
        let mut available: Vec<CarType> = Vec::new();
        for company in self.companies.get_all().await? {
            for car_type in company.lock().await.available_car_types(period) {
                if !available.contains(&car_type) {
                    available.push(car_type);
                }
            }
        }
        Ok(available)
    }

    /// Name of the cheapest type available for `period` in `region`, if any.
    pub async fn cheapest_car_type(&self, period: &RentalPeriod, region: &str) -> Result<Option<String>> {
        let mut cheapest: Option<CarType> = None;
        for company in self.companies.get_all().await? {
            let company = company.lock().await;
            if !company.operates_in_region(region) {
                continue;
            }
            for car_type in company.available_car_types(period) {
                if cheapest
                    .as_ref()
                    .is_none_or(|best| car_type.price_per_day < best.price_per_day)
                {
                    cheapest = Some(car_type);
                }
            }
        }
        Ok(cheapest.map(|t| t.name))
    }
}
