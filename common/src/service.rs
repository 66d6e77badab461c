use crate::cache::{Cache, CacheEntry};
use crate::domain::{format_date, EnergyType};
use crate::error::Result;
use crate::prices::EnergyRecord;
use crate::provider::{EnergyProvider, FetchOutcome};
use crate::ranking::{extract_summary, process_electricity, process_gas};
use chrono::NaiveDate;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Cached(CacheEntry),
    Fetched(CacheEntry),
    NoData,
}

impl Lookup {
    pub fn into_entry(self) -> Option<CacheEntry> {
        match self {
            Lookup::Cached(entry) | Lookup::Fetched(entry) => Some(entry),
            Lookup::NoData => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Stored(Vec<NaiveDate>),
    /// Upstream had nothing for this date; later dates were not attempted
    NoData(NaiveDate),
}

/// Ties the provider, the ranking and the cache together.
pub struct PriceService {
    provider: EnergyProvider,
    cache: Cache,
}

impl PriceService {
    pub fn new(provider: EnergyProvider, cache: Cache) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Ranks raw records and derives their summary.
    pub fn build_entry(energy_type: EnergyType, raw: Vec<EnergyRecord>) -> Result<CacheEntry> {
        let data = match energy_type {
            EnergyType::Electricity => process_electricity(raw),
            EnergyType::Gas => process_gas(raw),
        };
        let records = extract_summary(&data, energy_type.has_sustainability())?;
        Ok(CacheEntry { records, data })
    }

    /// Fetches `energy_type` prices (for `date` if given), stores them under
    /// `file_date` and returns the stored entry.
    fn fetch_and_store(
        &self,
        energy_type: EnergyType,
        date: Option<NaiveDate>,
        file_date: NaiveDate,
    ) -> Result<Option<CacheEntry>> {
        let date = date.map(format_date);
        let raw = match self.provider.fetch(energy_type, date.as_deref())? {
            FetchOutcome::Data(raw) => raw,
            FetchOutcome::Empty => return Ok(None),
        };

        let entry = Self::build_entry(energy_type, raw)?;
        let path = self.cache.filename(energy_type, file_date);
        self.cache.save(&entry, &path)?;
        Ok(Some(entry))
    }

    /// Returns the cached entry for the date, fetching and caching it first
    /// when missing. A cached entry is never refreshed here.
    pub fn get_or_fetch(&self, energy_type: EnergyType, date: NaiveDate) -> Result<Lookup> {
        let path = self.cache.filename(energy_type, date);
        if let Some(entry) = self.cache.check(&path)? {
            return Ok(Lookup::Cached(entry));
        }

        info!(%energy_type, %date, "Not cached, fetching");
        Ok(match self.fetch_and_store(energy_type, Some(date), date)? {
            Some(entry) => Lookup::Fetched(entry),
            None => Lookup::NoData,
        })
    }

    /// Refetches and overwrites electricity prices for every date in order,
    /// stopping at the first date the upstream has no prices for.
    pub fn run_electricity_job(&self, dates: &[NaiveDate]) -> Result<JobOutcome> {
        info!(?dates, "Starting electricity data job");
        let mut stored = Vec::with_capacity(dates.len());
        for &date in dates {
            if self
                .fetch_and_store(EnergyType::Electricity, Some(date), date)?
                .is_none()
            {
                warn!(%date, "No electricity data available from API");
                return Ok(JobOutcome::NoData(date));
            }
            stored.push(date);
        }
        Ok(JobOutcome::Stored(stored))
    }

    /// Fetches the upstream's upcoming gas prices and stores them under `today`.
    pub fn run_gas_job(&self, today: NaiveDate) -> Result<JobOutcome> {
        info!(%today, "Starting gas data job");
        Ok(match self.fetch_and_store(EnergyType::Gas, None, today)? {
            Some(_) => JobOutcome::Stored(vec![today]),
            None => JobOutcome::NoData(today),
        })
    }
}
