//! CLI configuration loading

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Provider selection for the CLI. Unset fields fall back to flags or to the
/// documented defaults (`mainnet`, chain id 1).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSpec {
    #[serde(default)]
    pub kind: Option<String>,

    /// JSON-RPC gateway URL (node kind only).
    pub gateway: Option<String>,

    pub api_key: Option<String>,

    pub network: Option<String>,

    /// Etherscan v2 chain selector.
    pub chain_id: Option<u64>,

    /// HTTP basic-auth credentials (node kind only).
    pub user: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderSpec,
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("EVMPROXY_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("evmproxy").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("evmproxy").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "evmproxy", "evmproxy")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_provider() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            kind = "bscscan"
            api_key = "KEY"
            network = "testnet"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.kind.as_deref(), Some("bscscan"));
        assert_eq!(config.provider.api_key.as_deref(), Some("KEY"));
        assert_eq!(config.provider.network.as_deref(), Some("testnet"));
        assert_eq!(config.provider.chain_id, None);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.provider.kind.is_none());
    }
}
