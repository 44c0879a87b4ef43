//! GrubDash - dishes and delivery orders over HTTP
//!
//! Two in-memory collections behind a JSON API. Every request runs through a
//! named guard chain; the first failing guard decides the response.
//!
//! # Modules
//!
//! - [`core_types`] - Id aliases and id generation
//! - [`models`] - Dish, Order, LineItem and OrderStatus
//! - [`payload`] - Read-only view of a request's `data` object
//! - [`guard`] - Guard chains and the guards shared by both resources
//! - [`repository`] - Storage seam and the in-memory store
//! - [`error`] - ApiError and its HTTP mapping
//! - [`gateway`] - Services, handlers, router and server
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup
//! - [`seed`] - Fixture loading at startup

// Core types - must be first!
pub mod core_types;

pub mod error;
pub mod guard;
pub mod models;
pub mod payload;
pub mod repository;

pub mod config;
pub mod gateway;
pub mod logging;
pub mod seed;

// Convenient re-exports at crate root
pub use core_types::{DishId, OrderId};
pub use error::ApiError;
pub use gateway::services::{DishService, OrderService};
pub use gateway::state::AppState;
pub use guard::{GuardChain, GuardContext};
pub use models::{Dish, LineItem, Order, OrderStatus};
pub use payload::Payload;
pub use repository::{InMemoryRepository, Repository, RepositoryError};
