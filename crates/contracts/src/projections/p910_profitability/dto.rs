use serde::{Deserialize, Serialize};

/// Row of `GET /profitability`, ranked by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityRow {
    pub rank: u32,
    pub sku: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub units_sold: i64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub profit: f64,
    /// Profit / revenue, percent
    #[serde(default)]
    pub margin: f64,
}

impl ProfitabilityRow {
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        needle.is_empty()
            || self.sku.to_lowercase().contains(&needle)
            || self.product.to_lowercase().contains(&needle)
    }
}
