//! OrderQ Client - staff-side client for the OrderQ backend
//!
//! HTTP access to the REST API plus the local state machinery a staff
//! app needs: persisted login session, cart building and pricing, order
//! submission, menu indexing, the optimistic order board, and the
//! polling refresh loops.

pub mod board;
pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod menu;
pub mod poll;
pub mod session;
pub mod sync;
pub mod tasks;

pub use board::OrderBoard;
pub use cart::{
    build_order_lines, is_locked, submit_order, Cart, CartEntry, CartError, Choice, OrderPlacer,
    Selection,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use menu::MenuIndex;
pub use poll::{Notification, OrderFeed, PollEvent, RefreshLoop};
pub use session::{Session, SessionStore, SessionStoreError};
pub use sync::{with_resync, MutationTracker};
pub use tasks::BackgroundTasks;

// Re-export shared types for convenience
pub use shared::client::{LoginData, LoginRequest, UserInfo};
pub use shared::response::ApiResponse;
