use serde::{Deserialize, Serialize};

/// Top-level client configuration (loaded from cryptshare.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptshareConfig {
    pub backend: BackendConfig,
    pub ledger: LedgerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the encryption service
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the registry node
    pub rpc_url: String,
    /// Address of the file registry contract
    pub contract_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".into(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".into(),
            contract_address: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512".into(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
[backend]
endpoint = "https://encrypt.example.com"

[ledger]
rpc_url = "https://rpc.example.com:8545"
contract_address = "0x0000000000000000000000000000000000000042"

[log]
level = "debug"
format = "json"
"#;
        let config: CryptshareConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.backend.endpoint, "https://encrypt.example.com");
        assert_eq!(config.ledger.rpc_url, "https://rpc.example.com:8545");
        assert_eq!(
            config.ledger.contract_address,
            "0x0000000000000000000000000000000000000042"
        );
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, "json");
    }

    #[test]
    fn test_parse_defaults() {
        let config: CryptshareConfig = toml::from_str("").unwrap();

        assert_eq!(config.backend.endpoint, "http://localhost:8000");
        assert_eq!(config.ledger.rpc_url, "http://localhost:8545");
        assert_eq!(
            config.ledger.contract_address,
            "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
        );
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, "text");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
[backend]
endpoint = "http://192.168.1.100:8000"
"#;
        let config: CryptshareConfig = toml::from_str(toml_str).unwrap();

        // Overridden
        assert_eq!(config.backend.endpoint, "http://192.168.1.100:8000");
        // Defaults
        assert_eq!(config.ledger.rpc_url, "http://localhost:8545");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = CryptshareConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: CryptshareConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.backend.endpoint, parsed.backend.endpoint);
        assert_eq!(config.ledger.rpc_url, parsed.ledger.rpc_url);
        assert_eq!(config.ledger.contract_address, parsed.ledger.contract_address);
    }
}
