//! Packing list returned by the packing advisor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingItem {
    pub item_name: String,
    /// Free-form quantity such as "2 pairs".
    pub quantity: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingCategory {
    pub category_name: String,
    pub items: Vec<PackingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingList {
    pub packing_list: Vec<PackingCategory>,
}

impl PackingList {
    pub fn item_count(&self) -> usize {
        self.packing_list.iter().map(|category| category.items.len()).sum()
    }
}
