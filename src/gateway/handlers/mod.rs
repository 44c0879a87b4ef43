//! HTTP handlers
//!
//! Thin adapters: extract path/body, call the resource service, wrap the
//! result in the `{ data }` envelope. All validation lives in the services'
//! guard chains.

pub mod dish;
pub mod health;
pub mod order;

pub use dish::{create_dish, list_dishes, read_dish, update_dish};
pub use health::{HealthResponse, VERSION, health_check, path_not_found};
pub use order::{create_order, delete_order, list_orders, read_order, update_order};
