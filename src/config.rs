use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_CWA_BASE_URL: &str = "https://opendata.cwa.gov.tw/api/v1/rest/datastore";
pub const DEFAULT_CWA_DATASET_ID: &str = "F-C0032-001";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub port: u16,
    pub cwa_api_key: Option<String>,
    pub cwa_base_url: String,
    pub cwa_dataset_id: String,
    pub cwa_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {:?}", raw))?,
            None => 3000,
        };

        let cwa_timeout_secs = match var("CWA_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("CWA_TIMEOUT_SECS must be a whole number of seconds, got {:?}", raw)
            })?),
            None => None,
        };

        Ok(Config {
            port,
            cwa_api_key: var("CWA_API_KEY"),
            cwa_base_url: var("CWA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CWA_BASE_URL.to_string()),
            cwa_dataset_id: var("CWA_DATASET_ID")
                .unwrap_or_else(|| DEFAULT_CWA_DATASET_ID.to_string()),
            cwa_timeout_secs,
        })
    }
}
