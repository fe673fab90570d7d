//! Menu flattening, lookup, and search
//!
//! The backend ships a recursive category tree; screens work from a
//! flattened list of enabled categories (depth-first, display order,
//! empty categories dropped) and need item lookup by uuid when an order
//! is submitted or a cart line re-edited.

use shared::models::{MenuCategory, MenuItem};

/// Flattened, display-ready menu
#[derive(Debug, Clone, Default)]
pub struct MenuIndex {
    categories: Vec<MenuCategory>,
}

impl MenuIndex {
    /// Flatten the raw category tree.
    ///
    /// Keeps enabled categories with at least one enabled item, walks
    /// subcategories depth-first in display order, and drops disabled
    /// items inside each kept category. Sold-out items stay listed (the
    /// cart rejects them on add).
    pub fn build(tree: &[MenuCategory]) -> Self {
        let mut categories = Vec::new();

        let mut roots: Vec<&MenuCategory> = tree.iter().filter(|c| c.is_enabled).collect();
        roots.sort_by_key(|c| c.order);
        for category in roots {
            flatten_into(category, &mut categories);
        }

        Self { categories }
    }

    /// Flattened categories in display order
    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    /// Look up an item by uuid across all categories
    pub fn item(&self, uuid: &str) -> Option<&MenuItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|item| item.uuid == uuid)
    }

    /// Case-insensitive search over title and description of orderable
    /// items; queries shorter than 2 characters return nothing.
    pub fn search(&self, query: &str) -> Vec<&MenuItem> {
        let query = query.trim().to_lowercase();
        if query.len() < 2 {
            return Vec::new();
        }

        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|item| item.is_orderable())
            .filter(|item| {
                item.title.to_lowercase().contains(&query)
                    || item
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn flatten_into(category: &MenuCategory, out: &mut Vec<MenuCategory>) {
    let enabled_items: Vec<MenuItem> = category
        .items
        .iter()
        .filter(|item| item.is_enabled && !item.is_disabled)
        .cloned()
        .collect();

    if !enabled_items.is_empty() {
        let mut kept = category.clone();
        kept.items = enabled_items;
        kept.subcategories = Vec::new();
        out.push(kept);
    }

    let mut subs: Vec<&MenuCategory> = category
        .subcategories
        .iter()
        .filter(|c| c.is_enabled)
        .collect();
    subs.sort_by_key(|c| c.order);
    for sub in subs {
        flatten_into(sub, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(uuid: &str, title: &str, enabled: bool) -> MenuItem {
        MenuItem {
            id: 0,
            uuid: uuid.to_string(),
            title: title.to_string(),
            description: Some(format!("house {title}")),
            price: 5.0,
            image: None,
            is_enabled: enabled,
            is_disabled: false,
            sold_out: false,
            item_configurations: None,
        }
    }

    fn category(title: &str, order: i32, items: Vec<MenuItem>, subs: Vec<MenuCategory>) -> MenuCategory {
        MenuCategory {
            id: 0,
            uuid: format!("cat-{title}"),
            title: title.to_string(),
            description: None,
            order,
            is_enabled: true,
            items,
            subcategories: subs,
        }
    }

    fn sample_tree() -> Vec<MenuCategory> {
        let drinks = category(
            "Drinks",
            2,
            vec![item("d1", "Cola", true), item("d2", "Secret Soda", false)],
            vec![],
        );
        let mains = category(
            "Mains",
            1,
            vec![item("m1", "Pad Thai", true)],
            vec![category("Curries", 1, vec![item("c1", "Green Curry", true)], vec![])],
        );
        let mut hidden = category("Hidden", 3, vec![item("h1", "Ghost", true)], vec![]);
        hidden.is_enabled = false;
        vec![drinks, mains, hidden]
    }

    #[test]
    fn flattening_orders_and_filters() {
        let index = MenuIndex::build(&sample_tree());
        let titles: Vec<&str> = index.categories().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Mains", "Curries", "Drinks"]);

        // Disabled item dropped from its category
        let drinks = &index.categories()[2];
        assert_eq!(drinks.items.len(), 1);

        // Disabled category gone entirely
        assert!(index.item("h1").is_none());
    }

    #[test]
    fn lookup_reaches_subcategory_items() {
        let index = MenuIndex::build(&sample_tree());
        assert_eq!(index.item("c1").unwrap().title, "Green Curry");
    }

    #[test]
    fn search_matches_title_and_description() {
        let index = MenuIndex::build(&sample_tree());
        assert_eq!(index.search("curry").len(), 1);
        assert_eq!(index.search("house").len(), 3);
        // Too-short queries return nothing
        assert!(index.search("c").is_empty());
    }

    #[test]
    fn search_skips_sold_out_items() {
        let mut tree = sample_tree();
        tree[1].items[0].sold_out = true;
        let index = MenuIndex::build(&tree);
        assert!(index.search("pad thai").is_empty());
        // But the item is still listed and resolvable
        assert!(index.item("m1").is_some());
    }
}
