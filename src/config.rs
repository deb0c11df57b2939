use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Gas limits per transaction kind, in gas units as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationGas {
    pub vote: String,
    pub delegate: String,
    pub undelegate: String,
    pub redelegate: String,
    pub claim_rewards: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: String,
    /// REST gateway base url, without a trailing slash.
    pub api_url: String,
    pub staking_denom: String,
    /// Decimal places between the view denom and the base denom.
    pub view_denom_decimals: u32,
    pub operation_gas: OperationGas,
}

impl ChainConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        crate::utils::read_data_from_yaml(path)
    }

    /// Multiplier from view-denom amounts to base-denom amounts.
    pub fn conversion_factor(&self) -> Decimal {
        Decimal::from_i128_with_scale(10_i128.pow(self.view_denom_decimals), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChainConfig {
        ChainConfig {
            chain_id: "c4e-testnet".to_owned(),
            api_url: "https://lcd.example".to_owned(),
            staking_denom: "uc4e".to_owned(),
            view_denom_decimals: 6,
            operation_gas: OperationGas {
                vote: "10000".to_owned(),
                delegate: "20000".to_owned(),
                undelegate: "30000".to_owned(),
                redelegate: "40000".to_owned(),
                claim_rewards: "50000".to_owned(),
            },
        }
    }

    #[test]
    fn conversion_factor_is_power_of_ten() {
        let config = test_config();
        assert_eq!(config.conversion_factor(), Decimal::from(1_000_000_u64));
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = test_config();
        let yaml = serde_yaml::to_string(&config).expect("serialize");
        let parsed: ChainConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(parsed.chain_id, config.chain_id);
        assert_eq!(parsed.operation_gas.delegate, "20000");
        assert_eq!(parsed.view_denom_decimals, 6);
    }
}
