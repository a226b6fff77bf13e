use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub log_to_file: bool,
    pub log_file: String,
    pub base_asset: String,
    pub base_asset_decimals: u32,
    pub display_decimals: u32,
    pub management_fee_bps: u64,
    pub performance_fee_bps: u64,
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let s = Config::builder()
        // Set defaults
        .set_default("log_level", "info")?
        .set_default("log_to_file", false)?
        .set_default("log_file", "log/fund_ledger.log")?
        .set_default("base_asset", "SUI")?
        .set_default("base_asset_decimals", 9)?
        .set_default("display_decimals", 4)?
        .set_default("management_fee_bps", 200)?
        .set_default("performance_fee_bps", 2000)?
        // Add configuration from a file
        .add_source(File::with_name("config/config.yaml").required(false))
        // Add configuration from environment variables
        .add_source(config::Environment::with_prefix("FUND"))
        .build()?;

    s.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_file() {
        let config = load_config().expect("defaults should load");
        assert_eq!(config.base_asset, "SUI");
        assert_eq!(config.base_asset_decimals, 9);
        assert_eq!(config.management_fee_bps, 200);
        assert!(!config.log_to_file);
    }
}
