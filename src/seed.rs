//! Startup data
//!
//! Loads JSON fixture arrays into the in-memory repositories. Fixture records
//! bypass the guard chains, so they get a light structural check here instead.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use serde::de::DeserializeOwned;

use crate::config::SeedConfig;
use crate::gateway::services::{DishService, OrderService};
use crate::gateway::state::AppState;
use crate::models::{Dish, Order};
use crate::repository::InMemoryRepository;

/// Read a JSON array of records
pub fn load_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<Vec<T>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse fixture file: {}", path.display()))
}

fn check_dish(dish: &Dish) -> anyhow::Result<()> {
    for (field, value) in [
        ("id", &dish.id),
        ("name", &dish.name),
        ("description", &dish.description),
        ("image_url", &dish.image_url),
    ] {
        if value.trim().is_empty() {
            bail!("Dish {:?} has an empty {}", dish.id, field);
        }
    }
    if dish.price == 0 {
        bail!("Dish {} has a price of 0", dish.id);
    }
    Ok(())
}

fn check_order(order: &Order) -> anyhow::Result<()> {
    for (field, value) in [
        ("id", &order.id),
        ("deliverTo", &order.deliver_to),
        ("mobileNumber", &order.mobile_number),
    ] {
        if value.trim().is_empty() {
            bail!("Order {:?} has an empty {}", order.id, field);
        }
    }
    if order.dishes.is_empty() {
        bail!("Order {} has no dishes", order.id);
    }
    if let Some(index) = order.dishes.iter().position(|item| item.quantity == 0) {
        bail!("Order {} dish {} has a quantity of 0", order.id, index);
    }
    Ok(())
}

pub fn dish_service(dishes: Vec<Dish>) -> anyhow::Result<DishService> {
    for dish in &dishes {
        check_dish(dish)?;
    }
    let repo = InMemoryRepository::with_records(dishes).context("Invalid dish fixtures")?;
    Ok(DishService::new(repo))
}

pub fn order_service(orders: Vec<Order>) -> anyhow::Result<OrderService> {
    for order in &orders {
        check_order(order)?;
    }
    let repo = InMemoryRepository::with_records(orders).context("Invalid order fixtures")?;
    Ok(OrderService::new(repo))
}

/// Build the application state, seeding whichever collections are configured.
/// Relative fixture paths resolve against `base_dir`.
pub fn build_state(seed: &SeedConfig, base_dir: impl AsRef<Path>) -> anyhow::Result<AppState> {
    let base_dir = base_dir.as_ref();

    let dishes: Vec<Dish> = match &seed.dishes {
        Some(path) => load_records(base_dir.join(path))?,
        None => Vec::new(),
    };
    let orders: Vec<Order> = match &seed.orders {
        Some(path) => load_records(base_dir.join(path))?,
        None => Vec::new(),
    };

    tracing::info!(
        dishes = dishes.len(),
        orders = orders.len(),
        "Seeding collections"
    );

    Ok(AppState::new(dish_service(dishes)?, order_service(orders)?))
}
