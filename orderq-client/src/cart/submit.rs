//! Order submission: cart entries back into the wire format
//!
//! Each entry resolves to its original menu item to recover the base
//! price and group metadata, then its selection is re-derived into the
//! singles/multiples breakdown the order-placement endpoint expects.
//!
//! No idempotency key is attached: a retry after a network ambiguity can
//! duplicate an order. Known gap, pending a product decision.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{MenuItem, SelectionType};
use shared::request::{
    ConfigurationSelections, MultipleSelection, OrderLine, PlaceOrderRequest, SingleSelection,
};

use crate::menu::MenuIndex;
use crate::{ClientError, ClientResult, HttpClient};

use super::money::{format_amount, to_decimal, to_f64};
use super::{Cart, CartEntry, CartError, Choice};

/// The one network capability submission needs, split out so the flow
/// is testable without a backend
#[async_trait]
pub trait OrderPlacer: Send + Sync {
    async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<()>;
}

#[async_trait]
impl OrderPlacer for HttpClient {
    async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<()> {
        HttpClient::place_order(self, request).await
    }
}

/// Translate the cart into order lines
pub fn build_order_lines(cart: &Cart, menu: &MenuIndex) -> Result<Vec<OrderLine>, CartError> {
    cart.entries()
        .iter()
        .map(|entry| build_line(entry, menu))
        .collect()
}

/// Submit the cart as a staff order for a table.
///
/// An empty cart is rejected before any network call. On success the
/// cart is cleared; on any failure it is preserved untouched so the
/// staff member can retry.
pub async fn submit_order<P: OrderPlacer + ?Sized>(
    placer: &P,
    table_code: &str,
    cart: &mut Cart,
    menu: &MenuIndex,
    note: Option<String>,
) -> ClientResult<()> {
    if cart.is_empty() {
        return Err(ClientError::Validation(CartError::EmptyCart.to_string()));
    }

    let request = PlaceOrderRequest {
        table_code: table_code.to_string(),
        cart: build_order_lines(cart, menu).map_err(|e| ClientError::Validation(e.to_string()))?,
        note,
        placed_by_staff: true,
    };

    placer.place_order(&request).await?;

    tracing::info!(table = %table_code, lines = request.cart.len(), "Order placed");
    cart.clear();
    Ok(())
}

fn build_line(entry: &CartEntry, menu: &MenuIndex) -> Result<OrderLine, CartError> {
    let item = menu
        .item(&entry.item_uuid)
        .ok_or_else(|| CartError::UnknownItem(entry.item_uuid.clone()))?;

    let (configurations, configuration_total) = build_breakdown(entry, item);

    Ok(OrderLine {
        item_id: entry.item_uuid.clone(),
        qty: entry.quantity,
        price: entry.unit_price,
        comments: entry.note.clone().into_iter().collect(),
        item_configurations: (!configurations.is_empty()).then_some(configurations),
        configuration_total: to_f64(configuration_total),
        base_price: to_f64(to_decimal(item.price)),
    })
}

/// Re-derive the per-group breakdown from the menu's option metadata,
/// walking options in menu order
fn build_breakdown(entry: &CartEntry, item: &MenuItem) -> (ConfigurationSelections, Decimal) {
    let mut singles = BTreeMap::new();
    let mut multiples = BTreeMap::new();
    let mut total = Decimal::ZERO;

    for group in item.configurations() {
        match (entry.selection.choice(&group.title), group.selection_type) {
            (Some(Choice::Single(title)), SelectionType::Single) => {
                if let Some(option) = group.option(title) {
                    let delta = to_decimal(option.price_change);
                    total += delta;
                    singles.insert(
                        group.title.clone(),
                        SingleSelection {
                            value: option.title.clone(),
                            price_change: format_amount(option.price_change),
                        },
                    );
                }
            }
            (Some(Choice::Multiple(titles)), SelectionType::Multiple) => {
                let selected: Vec<MultipleSelection> = group
                    .configuration_options
                    .iter()
                    .filter(|option| titles.contains(&option.title))
                    .map(|option| {
                        total += to_decimal(option.price_change);
                        MultipleSelection {
                            title: option.title.clone(),
                            price_change: format_amount(option.price_change),
                        }
                    })
                    .collect();
                if !selected.is_empty() {
                    multiples.insert(group.title.clone(), selected);
                }
            }
            _ => {}
        }
    }

    let configurations = ConfigurationSelections {
        singles: (!singles.is_empty()).then_some(singles),
        multiples: (!multiples.is_empty()).then_some(multiples),
    };
    (configurations, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Selection;
    use shared::models::{ConfigurationOption, ItemConfiguration, MenuCategory};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn configured_item() -> MenuItem {
        MenuItem {
            id: 1,
            uuid: "itm-1".to_string(),
            title: "Burger".to_string(),
            description: None,
            price: 8.0,
            image: None,
            is_enabled: true,
            is_disabled: false,
            sold_out: false,
            item_configurations: Some(vec![
                ItemConfiguration {
                    id: 1,
                    title: "Size".to_string(),
                    selection_type: SelectionType::Single,
                    fixed_preselection: false,
                    configuration_options: vec![
                        ConfigurationOption {
                            id: 1,
                            title: "Regular".to_string(),
                            price_change: 0.0,
                            preselected: true,
                            fixed_preselection: false,
                        },
                        ConfigurationOption {
                            id: 2,
                            title: "XL".to_string(),
                            price_change: 2.5,
                            preselected: false,
                            fixed_preselection: false,
                        },
                    ],
                },
                ItemConfiguration {
                    id: 2,
                    title: "Extras".to_string(),
                    selection_type: SelectionType::Multiple,
                    fixed_preselection: false,
                    configuration_options: vec![
                        ConfigurationOption {
                            id: 3,
                            title: "Cheese".to_string(),
                            price_change: 0.8,
                            preselected: false,
                            fixed_preselection: false,
                        },
                        ConfigurationOption {
                            id: 4,
                            title: "Bacon".to_string(),
                            price_change: 1.2,
                            preselected: false,
                            fixed_preselection: false,
                        },
                    ],
                },
            ]),
        }
    }

    fn plain_item() -> MenuItem {
        MenuItem {
            id: 2,
            uuid: "itm-2".to_string(),
            title: "Cola".to_string(),
            description: None,
            price: 3.5,
            image: None,
            is_enabled: true,
            is_disabled: false,
            sold_out: false,
            item_configurations: None,
        }
    }

    fn menu_with(items: Vec<MenuItem>) -> MenuIndex {
        MenuIndex::build(&[MenuCategory {
            id: 1,
            uuid: "cat-1".to_string(),
            title: "Food".to_string(),
            description: None,
            order: 1,
            is_enabled: true,
            items,
            subcategories: vec![],
        }])
    }

    struct StubPlacer {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OrderPlacer for StubPlacer {
        async fn place_order(&self, _request: &PlaceOrderRequest) -> ClientResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ClientError::Backend("kitchen offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn configured_line_carries_breakdown_and_totals() {
        let item = configured_item();
        let menu = menu_with(vec![item.clone()]);
        let mut cart = Cart::new();

        let mut selection = Selection::default_for(&item);
        selection.toggle(&item, "Size", "XL").unwrap();
        selection.toggle(&item, "Extras", "Bacon").unwrap();
        selection.toggle(&item, "Extras", "Cheese").unwrap();
        cart.add(&item, selection, Some("well done".into()), 2).unwrap();

        let lines = build_order_lines(&cart, &menu).unwrap();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];

        assert_eq!(line.qty, 2);
        assert_eq!(line.base_price, 8.0);
        assert_eq!(line.price, 12.5); // 8.0 + 2.5 + 0.8 + 1.2
        assert_eq!(line.configuration_total, 4.5);
        assert_eq!(line.comments, vec!["well done".to_string()]);

        let configs = line.item_configurations.as_ref().unwrap();
        let single = &configs.singles.as_ref().unwrap()["Size"];
        assert_eq!(single.value, "XL");
        assert_eq!(single.price_change, "2.50");

        let extras = &configs.multiples.as_ref().unwrap()["Extras"];
        // Menu order, not toggle order
        assert_eq!(extras[0].title, "Cheese");
        assert_eq!(extras[0].price_change, "0.80");
        assert_eq!(extras[1].title, "Bacon");
        assert_eq!(extras[1].price_change, "1.20");
    }

    #[test]
    fn unconfigured_line_omits_the_breakdown() {
        let item = plain_item();
        let menu = menu_with(vec![item.clone()]);
        let mut cart = Cart::new();
        cart.add(&item, Selection::new(), None, 1).unwrap();

        let line = &build_order_lines(&cart, &menu).unwrap()[0];
        assert!(line.item_configurations.is_none());
        assert!(line.comments.is_empty());
        assert_eq!(line.configuration_total, 0.0);
    }

    #[test]
    fn empty_multiple_selection_is_omitted() {
        let item = configured_item();
        let menu = menu_with(vec![item.clone()]);
        let mut cart = Cart::new();
        // Default selection: Regular + empty Extras set
        cart.add(&item, Selection::default_for(&item), None, 1).unwrap();

        let line = &build_order_lines(&cart, &menu).unwrap()[0];
        let configs = line.item_configurations.as_ref().unwrap();
        assert!(configs.singles.is_some());
        assert!(configs.multiples.is_none());
    }

    #[test]
    fn unknown_item_fails_translation() {
        let item = plain_item();
        let menu = menu_with(vec![]);
        let mut cart = Cart::new();
        cart.add(&item, Selection::new(), None, 1).unwrap();
        assert!(matches!(
            build_order_lines(&cart, &menu),
            Err(CartError::UnknownItem(_))
        ));
    }

    #[tokio::test]
    async fn successful_submission_clears_the_cart() {
        let item = plain_item();
        let menu = menu_with(vec![item.clone()]);
        let mut cart = Cart::new();
        cart.add(&item, Selection::new(), None, 2).unwrap();

        let placer = StubPlacer { fail: false, calls: AtomicUsize::new(0) };
        submit_order(&placer, "T1", &mut cart, &menu, None).await.unwrap();

        assert!(cart.is_empty());
        assert_eq!(placer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_submission_preserves_the_cart() {
        let item = plain_item();
        let menu = menu_with(vec![item.clone()]);
        let mut cart = Cart::new();
        cart.add(&item, Selection::new(), None, 2).unwrap();

        let placer = StubPlacer { fail: true, calls: AtomicUsize::new(0) };
        let err = submit_order(&placer, "T1", &mut cart, &menu, None).await.unwrap_err();

        assert!(matches!(err, ClientError::Backend(_)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[tokio::test]
    async fn empty_cart_is_blocked_before_any_network_call() {
        let menu = menu_with(vec![]);
        let mut cart = Cart::new();
        let placer = StubPlacer { fail: false, calls: AtomicUsize::new(0) };

        let err = submit_order(&placer, "T1", &mut cart, &menu, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(placer.calls.load(Ordering::SeqCst), 0);
    }
}
