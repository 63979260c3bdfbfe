use contracts::projections::p910_profitability::dto::ProfitabilityRow;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "p910_profitability_list_state_v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersistedState {
    pub q: String,
}

#[derive(Clone, Debug, Default)]
pub struct P910ListState {
    pub rows: Vec<ProfitabilityRow>,
    pub q: String,
    pub is_loading: bool,
    pub is_loaded: bool,
    pub error: Option<String>,
}

impl P910ListState {
    /// Rows matching the search, in server rank order
    pub fn visible(&self) -> Vec<ProfitabilityRow> {
        let mut rows: Vec<ProfitabilityRow> = self
            .rows
            .iter()
            .filter(|row| row.matches(&self.q))
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.rank);
        rows
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_persisted() -> Option<PersistedState> {
    let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    serde_json::from_str::<PersistedState>(&raw).ok()
}

pub fn persist_state(signal: RwSignal<P910ListState>) {
    let persisted = PersistedState {
        q: signal.with_untracked(|s| s.q.clone()),
    };
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(&persisted) else { return };
    let _ = storage.set_item(STORAGE_KEY, &raw);
}

pub fn create_state() -> RwSignal<P910ListState> {
    let mut st = P910ListState::default();
    if let Some(p) = load_persisted() {
        st.q = p.q;
    }
    RwSignal::new(st)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: u32, sku: &str, product: &str) -> ProfitabilityRow {
        ProfitabilityRow {
            rank,
            sku: sku.to_string(),
            product: product.to_string(),
            units_sold: 10,
            revenue: 100.0,
            cost: 60.0,
            profit: 40.0,
            margin: 40.0,
        }
    }

    #[test]
    fn test_visible_rows_keep_rank_order() {
        let state = P910ListState {
            rows: vec![row(3, "SKU003", "Lamp"), row(1, "SKU001", "Desk"), row(2, "SKU002", "Lamp shade")],
            ..Default::default()
        };
        let ranks: Vec<u32> = state.visible().iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_search_matches_sku_or_product() {
        let mut state = P910ListState {
            rows: vec![row(1, "SKU001", "Desk"), row(2, "SKU002", "Lamp"), row(3, "SKU003", "Lamp shade")],
            ..Default::default()
        };
        state.q = "lamp".to_string();
        let skus: Vec<String> = state.visible().into_iter().map(|r| r.sku).collect();
        assert_eq!(skus, vec!["SKU002", "SKU003"]);

        state.q = "sku001".to_string();
        assert_eq!(state.visible().len(), 1);
    }

    #[test]
    fn test_figures_use_shared_amount_format() {
        use contracts::domain::common::format_amount;
        let mut r = row(1, "SKU001", "Desk");
        r.margin = 33.3333;
        assert_eq!(format_amount(r.margin), "33.33");
        assert_eq!(format_amount(r.profit), "40.00");
    }
}
