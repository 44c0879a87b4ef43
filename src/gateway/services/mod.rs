//! Gateway Services Layer
//!
//! Business logic behind the handlers: one service per resource, each owning
//! its repository and its guard chains. Handlers stay thin HTTP adapters.

pub mod dish;
pub mod order;

pub use dish::DishService;
pub use order::OrderService;
