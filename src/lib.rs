pub mod amounts;
pub mod asset_vault;
pub mod configure;
pub mod fund_core;
pub mod logger;
pub mod logging;
