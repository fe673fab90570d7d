//! Local snapshot of the active order list
//!
//! The board holds the last-known server state plus optimistic edits
//! applied ahead of backend confirmation. It is plain synchronous state;
//! the optimistic flow around it lives in [`crate::sync`].

use shared::models::Order;

/// Active orders as currently shown to staff
#[derive(Debug, Default)]
pub struct OrderBoard {
    orders: Vec<Order>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole board with a fresh server snapshot
    pub fn apply_snapshot(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Optimistically flip an item's readiness flag.
    ///
    /// Returns the new flag value, or `None` when the item is unknown.
    pub fn toggle_item_ready(&mut self, item_uuid: &str) -> Option<bool> {
        for order in &mut self.orders {
            if let Some(item) = order.order_items.iter_mut().find(|i| i.uuid == item_uuid) {
                item.is_ready = !item.is_ready;
                return Some(item.is_ready);
            }
        }
        None
    }

    /// Optimistically remove a cancelled item; orders left without items
    /// disappear from the board
    pub fn remove_item(&mut self, item_uuid: &str) -> bool {
        let before: usize = self.orders.iter().map(|o| o.order_items.len()).sum();
        for order in &mut self.orders {
            order.order_items.retain(|i| i.uuid != item_uuid);
        }
        self.orders.retain(|o| !o.order_items.is_empty());
        let after: usize = self.orders.iter().map(|o| o.order_items.len()).sum();
        after < before
    }

    /// Optimistically remove a completed order
    pub fn remove_order(&mut self, order_id: i64) -> bool {
        let before = self.orders.len();
        self.orders.retain(|o| o.id != order_id);
        self.orders.len() < before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderItem, OrderItemSummary};

    fn order(id: i64, item_uuids: &[&str]) -> Order {
        Order {
            id,
            uuid: format!("ord-{id}"),
            company_id: 1,
            status: "open".to_string(),
            subtotal: 10.0,
            total_items: item_uuids.len() as u32,
            note: None,
            created_at: "2025-11-02 18:00:00".to_string(),
            order_items: item_uuids
                .iter()
                .enumerate()
                .map(|(i, uuid)| OrderItem {
                    id: id * 100 + i as i64,
                    uuid: uuid.to_string(),
                    table_id: 4,
                    item_id: 9,
                    status: "open".to_string(),
                    price: 5.0,
                    quantity: 1.0,
                    subtotal: 5.0,
                    is_ready: false,
                    note: None,
                    configurations: None,
                    is_added_by_staff: false,
                    created_at: "2025-11-02 18:00:00".to_string(),
                    item: OrderItemSummary {
                        id: 9,
                        uuid: "itm-9".to_string(),
                        title: "Pad Thai".to_string(),
                        description: None,
                        price: 5.0,
                        status: None,
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn toggling_flips_and_reports_the_flag() {
        let mut board = OrderBoard::new();
        board.apply_snapshot(vec![order(1, &["a", "b"])]);

        assert_eq!(board.toggle_item_ready("a"), Some(true));
        assert_eq!(board.toggle_item_ready("a"), Some(false));
        assert_eq!(board.toggle_item_ready("missing"), None);
    }

    #[test]
    fn removing_last_item_drops_the_order() {
        let mut board = OrderBoard::new();
        board.apply_snapshot(vec![order(1, &["a"]), order(2, &["b", "c"])]);

        assert!(board.remove_item("a"));
        assert_eq!(board.len(), 1);

        assert!(board.remove_item("b"));
        assert_eq!(board.len(), 1);
        assert_eq!(board.orders()[0].order_items.len(), 1);

        assert!(!board.remove_item("a"));
    }

    #[test]
    fn completing_removes_the_order() {
        let mut board = OrderBoard::new();
        board.apply_snapshot(vec![order(1, &["a"]), order(2, &["b"])]);

        assert!(board.remove_order(2));
        assert_eq!(board.len(), 1);
        assert!(!board.remove_order(2));
    }

    #[test]
    fn snapshot_replaces_optimistic_state() {
        let mut board = OrderBoard::new();
        board.apply_snapshot(vec![order(1, &["a"])]);
        board.toggle_item_ready("a");

        board.apply_snapshot(vec![order(1, &["a"]), order(2, &["b"])]);
        assert_eq!(board.len(), 2);
        assert!(!board.orders()[0].order_items[0].is_ready);
    }
}
