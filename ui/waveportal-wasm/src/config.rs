//! Page configuration.
//!
//! Defaults target the deployed contract. The page query string may
//! override the contract (`?contract=0x...`) and log filter (`?log=debug`)
//! for local development.

use anyhow::{Context, Result};
use wp_wave_portal::PortalConfig;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    pub portal: PortalConfig,
    pub log_filter: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            portal: PortalConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl UiConfig {
    /// Parse `location.search`. Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut config = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "contract" => {
                    config.portal = config
                        .portal
                        .with_contract(value)
                        .context("contract query parameter")?;
                }
                "log" if !value.is_empty() => config.log_filter = value.to_owned(),
                _ => {}
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wp_wave_portal::WAVE_PORTAL_ADDRESS;

    #[test]
    fn empty_query_yields_defaults() -> Result<()> {
        assert_eq!(UiConfig::from_query("")?, UiConfig::default());
        assert_eq!(UiConfig::from_query("?")?.portal.contract_address, WAVE_PORTAL_ADDRESS);
        Ok(())
    }

    #[test]
    fn overrides_are_applied() -> Result<()> {
        let config =
            UiConfig::from_query("?log=debug&contract=0x5FbDB2315678afecb367f032d93F642f64180aa3")?;
        assert_eq!(config.log_filter, "debug");
        assert_ne!(config.portal.contract_address, WAVE_PORTAL_ADDRESS);
        Ok(())
    }

    #[test]
    fn bad_contract_reports_context() {
        let err = UiConfig::from_query("?contract=nope").unwrap_err();
        assert!(format!("{err:#}").contains("contract query parameter"));
    }
}
