use crate::domain::EnergyType;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_ELECTRICITY_ENDPOINT: &str = "/energy-prices/electricity/upcoming";
const DEFAULT_GAS_ENDPOINT: &str = "/energy-prices/gas/upcoming";
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Zonneplan API, without trailing slash
    pub base_url: String,

    /// Shared secret sent as the `secret` query parameter
    pub secret: Option<String>,

    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub electricity: String,
    pub gas: String,
}

impl Endpoints {
    pub fn for_type(&self, energy_type: EnergyType) -> &str {
        match energy_type {
            EnergyType::Electricity => &self.electricity,
            EnergyType::Gas => &self.gas,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            electricity: DEFAULT_ELECTRICITY_ENDPOINT.to_string(),
            gas: DEFAULT_GAS_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,

    /// Directory holding the per-date JSON files
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = var("ZONNEPLAN_API_BASE_URL").ok_or_else(|| {
            Error::configuration("ZONNEPLAN_API_BASE_URL environment variable is not set")
        })?;

        Ok(Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                secret: var("ZONNEPLAN_API_SECRET"),
                endpoints: Endpoints {
                    electricity: var("ZONNEPLAN_ELECTRICITY_ENDPOINT")
                        .unwrap_or_else(|| DEFAULT_ELECTRICITY_ENDPOINT.to_string()),
                    gas: var("ZONNEPLAN_GAS_ENDPOINT")
                        .unwrap_or_else(|| DEFAULT_GAS_ENDPOINT.to_string()),
                },
            },
            data_dir: var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("ZONNEPLAN_API_BASE_URL", "https://api.example.com/")]).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.secret, None);
        assert_eq!(config.api.endpoints, Endpoints::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("ZONNEPLAN_API_BASE_URL", "http://localhost:1234"),
            ("ZONNEPLAN_API_SECRET", "s3cret"),
            ("ZONNEPLAN_GAS_ENDPOINT", "/gas"),
            ("DATA_DIR", "/var/lib/prices"),
        ])
        .unwrap();
        assert_eq!(config.api.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.api.endpoints.for_type(EnergyType::Gas), "/gas");
        assert_eq!(
            config.api.endpoints.for_type(EnergyType::Electricity),
            DEFAULT_ELECTRICITY_ENDPOINT
        );
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/prices"));
    }

    #[test]
    fn missing_base_url() {
        assert!(matches!(
            load(&[("ZONNEPLAN_API_SECRET", "s3cret")]),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn blank_secret_counts_as_unset() {
        let config = load(&[
            ("ZONNEPLAN_API_BASE_URL", "http://localhost"),
            ("ZONNEPLAN_API_SECRET", "  "),
        ])
        .unwrap();
        assert_eq!(config.api.secret, None);
    }
}
