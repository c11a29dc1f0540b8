/// Config Module
///
/// Explorer configuration, read from the environment (after `.env`) and then
/// overridden by command-line flags.
use std::env;
use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://polkadot-api.statescan.io";

/// Rows per list page; the indexer pages by this size too
pub const PAGE_SIZE: u32 = 10;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_DECIMALS: u8 = 30;

/// Known chains and their native token settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Chain {
    Polkadot,
    Kusama,
    Westend,
}

impl Chain {
    pub fn setting(self) -> ChainSetting {
        let (decimals, symbol) = match self {
            Chain::Polkadot => (10, "DOT"),
            Chain::Kusama => (12, "KSM"),
            Chain::Westend => (12, "WND"),
        };
        ChainSetting { decimals, symbol: symbol.to_string() }
    }

    fn from_name(name: &str) -> Option<Self> {
        Chain::from_str(name, true).ok()
    }
}

/// Token precision and symbol used to render balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainSetting {
    pub decimals: u8,
    pub symbol: String,
}

impl Default for ChainSetting {
    fn default() -> Self {
        Chain::Polkadot.setting()
    }
}

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub api_url: Url,
    pub chain: ChainSetting,
    pub timeout: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API url is valid"),
            chain: ChainSetting::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Values that may come from either the environment or the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub chain: Option<Chain>,
    pub decimals: Option<u8>,
    pub symbol: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Read `SCAN_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let chain = match lookup("SCAN_CHAIN") {
            Some(name) => Some(Chain::from_name(&name).ok_or_else(|| ConfigError::InvalidValue {
                key: "SCAN_CHAIN",
                message: format!("unknown chain `{}`", name),
            })?),
            None => None,
        };

        Ok(Self {
            api_url: lookup("SCAN_API_URL"),
            chain,
            decimals: parse_var(&lookup, "SCAN_DECIMALS")?,
            symbol: lookup("SCAN_SYMBOL"),
            timeout_secs: parse_var(&lookup, "SCAN_TIMEOUT_SECS")?,
        })
    }

    /// Layer `other` on top of `self`; values set in `other` win
    pub fn merge(self, other: ConfigOverrides) -> Self {
        Self {
            api_url: other.api_url.or(self.api_url),
            chain: other.chain.or(self.chain),
            decimals: other.decimals.or(self.decimals),
            symbol: other.symbol.or(self.symbol),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue { key, message: e.to_string() }))
        .transpose()
}

impl ExplorerConfig {
    /// Build a validated configuration, starting from defaults
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(api_url) = overrides.api_url {
            config.api_url =
                Url::parse(api_url.trim()).map_err(|source| ConfigError::InvalidUrl { url: api_url.clone(), source })?;
        }
        if let Some(chain) = overrides.chain {
            config.chain = chain.setting();
        }
        if let Some(decimals) = overrides.decimals {
            config.chain.decimals = decimals;
        }
        if let Some(symbol) = overrides.symbol {
            config.chain.symbol = symbol;
        }
        if let Some(secs) = overrides.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "api_url",
                message: format!("unsupported scheme `{}`", self.api_url.scheme()),
            });
        }
        if self.chain.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                key: "decimals",
                message: format!("{} exceeds the maximum of {}", self.chain.decimals, MAX_DECIMALS),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue { key: "timeout", message: "must be greater than 0".to_string() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::from_overrides(ConfigOverrides::default()).unwrap();
        assert_eq!(config.api_url.as_str(), "https://polkadot-api.statescan.io/");
        assert_eq!(config.chain, ChainSetting { decimals: 10, symbol: "DOT".to_string() });
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_values() {
        let overrides = ConfigOverrides::from_lookup(lookup(&[
            ("SCAN_CHAIN", "Kusama"),
            ("SCAN_SYMBOL", "XYZ"),
            ("SCAN_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        let config = ExplorerConfig::from_overrides(overrides).unwrap();
        assert_eq!(config.chain.decimals, 12);
        assert_eq!(config.chain.symbol, "XYZ");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_env_values() {
        assert!(ConfigOverrides::from_lookup(lookup(&[("SCAN_CHAIN", "mars")])).is_err());
        assert!(ConfigOverrides::from_lookup(lookup(&[("SCAN_DECIMALS", "ten")])).is_err());
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = ConfigOverrides { api_url: Some("http://env.local".to_string()), ..Default::default() };
        let cli = ConfigOverrides { api_url: Some("http://cli.local".to_string()), ..Default::default() };

        let config = ExplorerConfig::from_overrides(env.merge(cli)).unwrap();
        assert_eq!(config.api_url.host_str(), Some("cli.local"));
    }

    #[test]
    fn test_validation() {
        let bad_url = ConfigOverrides { api_url: Some("not a url".to_string()), ..Default::default() };
        assert!(ExplorerConfig::from_overrides(bad_url).is_err());

        let bad_scheme = ConfigOverrides { api_url: Some("ftp://x.org".to_string()), ..Default::default() };
        assert!(ExplorerConfig::from_overrides(bad_scheme).is_err());

        let zero_timeout = ConfigOverrides { timeout_secs: Some(0), ..Default::default() };
        assert!(ExplorerConfig::from_overrides(zero_timeout).is_err());

        let too_precise = ConfigOverrides { decimals: Some(31), ..Default::default() };
        assert!(ExplorerConfig::from_overrides(too_precise).is_err());
    }
}
