// ⚙️ Planner Configuration
// Default calculator inputs, server address and fund catalog location
//
// Sources, later wins:
//   1. Built-in defaults (the familiar form values)
//   2. JSON file named by PLANNER_CONFIG
//   3. PLANNER_ADDR / PLANNER_FUNDS environment variables (.env is read too)

use crate::calculators::{EpfInput, LumpSumInput, PpfInput, RetirementInput, SipInput, WithdrawalInput};
use crate::recommendations::{FundCatalog, InvestorProfile};
use crate::scoring::HlvInput;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PLANNER_CONFIG";
pub const ADDR_ENV: &str = "PLANNER_ADDR";
pub const FUNDS_ENV: &str = "PLANNER_FUNDS";

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Default input for every calculator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorDefaults {
    pub sip: SipInput,
    pub lump_sum: LumpSumInput,
    pub ppf: PpfInput,
    pub epf: EpfInput,
    pub retirement: RetirementInput,
    pub withdrawal: WithdrawalInput,
    pub hlv: HlvInput,
    pub investor: InvestorProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub defaults: CalculatorDefaults,

    /// Address the API server binds to
    pub server_addr: String,

    /// JSON fund list; the built-in catalog is used when absent
    pub fund_catalog: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            defaults: CalculatorDefaults::default(),
            server_addr: DEFAULT_ADDR.to_string(),
            fund_catalog: None,
        }
    }
}

impl PlannerConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Defaults, then PLANNER_CONFIG, then environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match env::var(CONFIG_ENV) {
            Ok(path) => PlannerConfig::from_file(&path)?,
            Err(_) => PlannerConfig::default(),
        };

        if let Ok(addr) = env::var(ADDR_ENV) {
            config.server_addr = addr;
        }
        if let Ok(funds) = env::var(FUNDS_ENV) {
            config.fund_catalog = Some(PathBuf::from(funds));
        }

        tracing::debug!(addr = %config.server_addr, "loaded planner config");
        Ok(config)
    }

    pub fn fund_catalog(&self) -> Result<FundCatalog> {
        match &self.fund_catalog {
            Some(path) => FundCatalog::from_file(path),
            None => Ok(FundCatalog::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_calculators() {
        let config = PlannerConfig::default();

        assert_eq!(config.defaults.sip, SipInput::default());
        assert_eq!(config.defaults.ppf.annual_rate, 7.1);
        assert_eq!(config.server_addr, DEFAULT_ADDR);
        assert!(config.fund_catalog().unwrap().fund_count() > 0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("planner-{}.json", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            r#"{ "server_addr": "127.0.0.1:8080", "defaults": { "sip": { "monthly_investment": 5000, "annual_rate": 10, "years": 10 } } }"#,
        )
        .unwrap();

        let config = PlannerConfig::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.defaults.sip.monthly_investment, 5_000.0);
        assert_eq!(config.defaults.epf, EpfInput::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(PlannerConfig::from_file("/nonexistent/planner.json").is_err());
    }
}
