//! Menu Model
//!
//! The `/menu` endpoint returns a recursive category tree; items carry
//! their configuration groups inline.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{bool_true, flex_bool, flex_f64};

/// Menu category (recursive tree node)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: i64,
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
    /// Display order within the parent
    #[serde(default)]
    pub order: i32,
    #[serde(default = "crate::serde_helpers::truthy", deserialize_with = "bool_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub subcategories: Vec<MenuCategory>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Base price; the backend sends either a number or a numeric string
    #[serde(with = "flex_f64")]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "crate::serde_helpers::truthy", deserialize_with = "bool_true")]
    pub is_enabled: bool,
    #[serde(default, deserialize_with = "flex_bool::deserialize")]
    pub is_disabled: bool,
    #[serde(default, deserialize_with = "flex_bool::deserialize")]
    pub sold_out: bool,
    /// Configuration groups (absent for plain items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_configurations: Option<Vec<ItemConfiguration>>,
}

impl MenuItem {
    /// Whether the item may currently be added to an order
    pub fn is_orderable(&self) -> bool {
        self.is_enabled && !self.is_disabled && !self.sold_out
    }

    /// Configuration groups, empty slice when the item has none
    pub fn configurations(&self) -> &[ItemConfiguration] {
        self.item_configurations.as_deref().unwrap_or(&[])
    }
}

/// Selection mode of a configuration group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    /// Exactly one option may be chosen
    Single,
    /// Any subset of options may be chosen
    Multiple,
}

/// Configuration group attached to a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfiguration {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub selection_type: SelectionType,
    /// A fixed group's selection cannot be changed by staff
    #[serde(default, deserialize_with = "flex_bool::deserialize")]
    pub fixed_preselection: bool,
    #[serde(default)]
    pub configuration_options: Vec<ConfigurationOption>,
}

impl ItemConfiguration {
    /// Look up an option by title
    pub fn option(&self, title: &str) -> Option<&ConfigurationOption> {
        self.configuration_options.iter().find(|o| o.title == title)
    }
}

/// One selectable option inside a configuration group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationOption {
    pub id: i64,
    pub title: String,
    /// Additive price delta, wire-flexible like item prices
    #[serde(with = "flex_f64")]
    pub price_change: f64,
    #[serde(default, deserialize_with = "flex_bool::deserialize")]
    pub preselected: bool,
    /// A fixed option cannot be deselected
    #[serde(default, deserialize_with = "flex_bool::deserialize")]
    pub fixed_preselection: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_item_parses_string_price_and_integer_flags() {
        let raw = r#"{
            "id": 4,
            "uuid": "itm-4",
            "title": "Flat White",
            "description": "double shot",
            "price": "3.60",
            "image": null,
            "is_enabled": true,
            "is_disabled": false,
            "sold_out": 0,
            "item_configurations": [{
                "id": 9,
                "title": "Size",
                "type": "single",
                "fixed_preselection": 0,
                "configuration_options": [
                    {"id": 1, "title": "Small", "price_change": "0.00", "preselected": 1},
                    {"id": 2, "title": "Large", "price_change": 1.5, "preselected": 0}
                ]
            }]
        }"#;
        let item: MenuItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.price, 3.60);
        assert!(item.is_orderable());

        let group = &item.configurations()[0];
        assert_eq!(group.selection_type, SelectionType::Single);
        assert!(group.option("Small").unwrap().preselected);
        assert_eq!(group.option("Large").unwrap().price_change, 1.5);
    }

    #[test]
    fn sold_out_item_is_not_orderable() {
        let raw = r#"{"id": 1, "uuid": "u", "title": "Soup", "price": 4, "sold_out": true}"#;
        let item: MenuItem = serde_json::from_str(raw).unwrap();
        assert!(!item.is_orderable());
        assert!(item.configurations().is_empty());
    }
}
