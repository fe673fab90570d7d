//! Backend entity models
//!
//! Snapshots of remote-owned state. The client never mutates these
//! directly; it refreshes them from the API and sends explicit
//! mutation requests.

pub mod billing;
pub mod menu;
pub mod order;
pub mod table;
pub mod waiter_call;

pub use billing::{BillingItem, BillingTotals, CustomerBill, TableBilling, TableRef};
pub use menu::{ConfigurationOption, ItemConfiguration, MenuCategory, MenuItem, SelectionType};
pub use order::{Order, OrderItem, OrderItemSummary};
pub use table::{Table, TableStatus};
pub use waiter_call::WaiterCall;
