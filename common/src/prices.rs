use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One upstream price data point. Fields the ranking does not care about are
/// kept in `extra` so they survive into the cache untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    #[serde(default)]
    pub total_price_tax_included: Option<f64>,

    #[serde(default)]
    pub sustainability_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_total_price: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_sustainability_score: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EnergyRecord {
    pub fn with_price(price: f64) -> Self {
        Self {
            total_price_tax_included: Some(price),
            ..Self::default()
        }
    }

    pub fn with_price_and_score(price: Option<f64>, score: Option<f64>) -> Self {
        Self {
            total_price_tax_included: price,
            sustainability_score: score,
            ..Self::default()
        }
    }
}

/// Numeric field a record can be filtered or ranked on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    TotalPrice,
    SustainabilityScore,
}

impl Metric {
    pub fn value(&self, record: &EnergyRecord) -> Option<f64> {
        match self {
            Metric::TotalPrice => record.total_price_tax_included,
            Metric::SustainabilityScore => record.sustainability_score,
        }
    }
}

/// Field a computed rank is written into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankField {
    TotalPrice,
    SustainabilityScore,
}

impl RankField {
    pub fn get(&self, record: &EnergyRecord) -> Option<u32> {
        match self {
            RankField::TotalPrice => record.rank_total_price,
            RankField::SustainabilityScore => record.rank_sustainability_score,
        }
    }

    fn slot<'a>(&self, record: &'a mut EnergyRecord) -> &'a mut Option<u32> {
        match self {
            RankField::TotalPrice => &mut record.rank_total_price,
            RankField::SustainabilityScore => &mut record.rank_sustainability_score,
        }
    }

    pub fn set(&self, record: &mut EnergyRecord, rank: u32) {
        *self.slot(record) = Some(rank);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub price_low: EnergyRecord,
    pub price_high: EnergyRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_high: Option<EnergyRecord>,
}

/// Upstream response body. `data` may be missing or null on days without prices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub data: Option<Vec<EnergyRecord>>,
}

impl RawResponse {
    pub fn new(data: Vec<EnergyRecord>) -> Self {
        Self { data: Some(data) }
    }

    pub fn into_records(self) -> Vec<EnergyRecord> {
        self.data.unwrap_or_default()
    }
}
