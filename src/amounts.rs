use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

/// Per-asset precision configuration: internal storage scale and the
/// maximum decimal places accepted from client input.
#[derive(Debug, Clone, Copy)]
struct AssetPrecision {
    decimals: u32,
    display_decimals: u32,
}

/// Registry of known assets and their precision
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: FxHashMap<String, AssetPrecision>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_asset(&mut self, name: &str, decimals: u32, display_decimals: u32) {
        self.assets
            .insert(name.to_string(), AssetPrecision { decimals, display_decimals });
    }

    fn get(&self, name: &str) -> Option<AssetPrecision> {
        self.assets.get(name).copied()
    }
}

/// Converts between client decimal amounts and internal u64 amounts in the
/// asset's smallest denomination.
pub struct AmountConverter {
    registry: AssetRegistry,
}

impl AmountConverter {
    pub fn new(registry: AssetRegistry) -> Self {
        Self { registry }
    }

    pub fn to_internal_amount(&self, asset_name: &str, amount: Decimal) -> Result<u64, String> {
        let precision = self
            .registry
            .get(asset_name)
            .ok_or_else(|| format!("Unknown asset: {}", asset_name))?;

        if amount.is_sign_negative() {
            return Err(format!("Amount {} is negative", amount));
        }

        // Validate input precision
        // Example: if display_decimals is 3, input 1.234 is valid, 1.2345 is invalid.
        if amount.normalize().scale() > precision.display_decimals {
            return Err(format!(
                "Amount {} exceeds max precision {}",
                amount, precision.display_decimals
            ));
        }

        let multiplier = Decimal::from(
            10_u64
                .checked_pow(precision.decimals)
                .ok_or("Decimals too large, overflow")?,
        );

        (amount * multiplier)
            .round()
            .to_string()
            .parse::<u64>()
            .map_err(|_| "Amount overflow".to_string())
    }

    pub fn to_client_amount(&self, asset_name: &str, amount: u64) -> Option<Decimal> {
        let precision = self.registry.get(asset_name)?;
        let divisor = Decimal::from(10_u64.checked_pow(precision.decimals)?);

        Some((Decimal::from(amount) / divisor).round_dp_with_strategy(
            precision.display_decimals,
            rust_decimal::RoundingStrategy::ToZero,
        ))
    }
}
