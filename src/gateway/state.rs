use std::sync::Arc;
use std::time::Instant;

use super::services::{DishService, OrderService};

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// Dish collection + guard chains
    pub dishes: Arc<DishService>,
    /// Order collection + guard chains
    pub orders: Arc<OrderService>,
    /// Process start, for uptime in /health
    pub started_at: Instant,
}

impl AppState {
    pub fn new(dishes: DishService, orders: OrderService) -> Self {
        Self {
            dishes: Arc::new(dishes),
            orders: Arc::new(orders),
            started_at: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DishService::default(), OrderService::default())
    }
}
