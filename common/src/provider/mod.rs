mod client;

pub use client::{HttpClient, RetryPolicy};

use crate::config::{ApiConfig, Endpoints};
use crate::domain::{parse_date, EnergyType};
use crate::error::Result;
use crate::prices::{EnergyRecord, RawResponse};
use tracing::{debug, info, warn};

/// Transport used by [`EnergyProvider`] to reach the upstream API
pub trait Fetch: Send + Sync {
    fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<RawResponse>;
}

/// Result of asking the upstream for a day of prices
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Data(Vec<EnergyRecord>),
    /// Upstream answered but had no priced entries
    Empty,
}

pub struct EnergyProvider {
    client: Box<dyn Fetch>,
    endpoints: Endpoints,
}

impl EnergyProvider {
    pub fn new(client: impl Fetch + 'static, endpoints: Endpoints) -> Self {
        Self {
            client: Box::new(client),
            endpoints,
        }
    }

    /// Provider talking to the real API. Fails when the secret is not configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::new(config)?, config.endpoints.clone()))
    }

    /// Validates `energy_type` and `date` and fetches the raw upstream response.
    /// Without a date the upstream returns its upcoming period.
    pub fn get_data(&self, energy_type: &str, date: Option<&str>) -> Result<RawResponse> {
        debug!(energy_type, ?date, "Retrieving energy data");

        let energy_type = energy_type.parse::<EnergyType>()?;
        let mut query = Vec::new();
        if let Some(date) = date {
            parse_date(date)?;
            query.push(("date", date.to_string()));
        }

        let endpoint = self.endpoints.for_type(energy_type);
        let response = self.client.get(endpoint, &query)?;
        info!(
            %energy_type,
            data_points = response.data.as_ref().map_or(0, Vec::len),
            "Fetched energy data"
        );
        Ok(response)
    }

    /// True when the response has no entries, or none of them carries a price.
    pub fn is_empty(response: &RawResponse) -> bool {
        response.data.as_ref().map_or(true, |data| {
            data.iter().all(|entry| entry.total_price_tax_included.is_none())
        })
    }

    pub fn fetch(&self, energy_type: EnergyType, date: Option<&str>) -> Result<FetchOutcome> {
        let response = self.get_data(energy_type.as_str(), date)?;
        if Self::is_empty(&response) {
            warn!(%energy_type, ?date, "No data available from API");
            return Ok(FetchOutcome::Empty);
        }
        Ok(FetchOutcome::Data(response.into_records()))
    }
}
