//! Order Service - guard chains and terminal steps for `/orders`
//!
//! | Operation | Guards (in order)                                                       |
//! |-----------|-------------------------------------------------------------------------|
//! | list      | -                                                                       |
//! | create    | deliverTo, mobileNumber, dishes, quantities                             |
//! | read      | exists                                                                  |
//! | update    | exists, not-delivered, id-match, deliverTo, mobileNumber, status,       |
//! |           | dishes, quantities                                                      |
//! | delete    | exists, pending                                                         |
//!
//! Status lifecycle: created as `pending`; any status may be set by update
//! until the order is `delivered`, after which it is frozen. Only `pending`
//! orders may be deleted.

use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::core_types::next_id;
use crate::error::ApiError;
use crate::guard::{
    Guard, GuardChain, GuardContext, id_matches_route, read_text, record_exists, require_text,
};
use crate::models::{LineItem, Order, OrderStatus};
use crate::payload::{Payload, positive_integer};
use crate::repository::{InMemoryRepository, Repository};

const ORDER: &str = "Order";

// ============================================================================
// Guards
// ============================================================================

fn order_exists() -> Guard<Order> {
    record_exists(|id| format!("Order id not found: {id}"))
}

fn order_id_matches_route() -> Guard<Order> {
    id_matches_route(|id, route| {
        format!("Order id does not match route id. Order: {id}, Route: {route}.")
    })
}

fn status_is_not_delivered() -> Guard<Order> {
    Guard::new(
        "status_is_not_delivered",
        |ctx: &GuardContext<'_, Order>| {
            if ctx.record()?.status.is_delivered() {
                return Err(ApiError::validation("A delivered order cannot be changed"));
            }
            Ok(())
        },
    )
}

fn status_is_pending() -> Guard<Order> {
    Guard::new("status_is_pending", |ctx: &GuardContext<'_, Order>| {
        if !ctx.record()?.status.is_pending() {
            return Err(ApiError::validation(
                "An order cannot be deleted unless it is pending",
            ));
        }
        Ok(())
    })
}

/// Payload `status` is one of the four lifecycle values
fn valid_status() -> Guard<Order> {
    Guard::new("valid_status", |ctx: &GuardContext<'_, Order>| {
        read_status(ctx.payload).map(|_| ())
    })
}

fn read_status(payload: &Payload) -> Result<OrderStatus, ApiError> {
    payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            ApiError::validation(
                "Order must have a status of pending, preparing, out-for-delivery, delivered",
            )
        })
}

/// `dishes` present and a non-empty array
fn has_dishes() -> Guard<Order> {
    Guard::new("has_dishes", |ctx: &GuardContext<'_, Order>| {
        dish_items(ctx.payload).map(|_| ())
    })
}

fn dish_items(payload: &Payload) -> Result<&Vec<Value>, ApiError> {
    if !payload.has("dishes") {
        return Err(ApiError::validation("Order must include a dish"));
    }
    payload
        .non_empty_array("dishes")
        .ok_or_else(|| ApiError::validation("Order must include at least one dish"))
}

/// Every line item carries an integer `quantity` > 0. Reports the first
/// offending index and stops there.
fn valid_quantities() -> Guard<Order> {
    Guard::new("valid_quantities", |ctx: &GuardContext<'_, Order>| {
        read_line_items(ctx.payload).map(|_| ())
    })
}

fn read_line_items(payload: &Payload) -> Result<Vec<LineItem>, ApiError> {
    dish_items(payload)?
        .iter()
        .enumerate()
        .map(|(index, item)| read_line_item(index, item))
        .collect()
}

/// Quantity is the only checked key; the rest of the item is copied as sent.
fn read_line_item(index: usize, item: &Value) -> Result<LineItem, ApiError> {
    let invalid = || {
        ApiError::validation(format!(
            "Dish {index} must have a quantity that is an integer greater than 0"
        ))
    };
    let fields = item.as_object().ok_or_else(invalid)?;
    let quantity = fields
        .get("quantity")
        .and_then(positive_integer)
        .and_then(|q| u32::try_from(q).ok())
        .ok_or_else(invalid)?;

    let mut fields = fields.clone();
    fields.remove("quantity");
    Ok(LineItem { quantity, fields })
}

// ============================================================================
// Service
// ============================================================================

/// Order Service - same locking discipline as the dish service
pub struct OrderService {
    repo: Mutex<Box<dyn Repository<Order>>>,
    next_id: Box<dyn Fn() -> String + Send + Sync>,
    create_chain: GuardChain<Order>,
    read_chain: GuardChain<Order>,
    update_chain: GuardChain<Order>,
    delete_chain: GuardChain<Order>,
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new(InMemoryRepository::new())
    }
}

impl OrderService {
    pub fn new(repo: impl Repository<Order> + 'static) -> Self {
        Self::with_id_generator(repo, next_id)
    }

    /// Same as `new` with a custom id source
    pub fn with_id_generator(
        repo: impl Repository<Order> + 'static,
        next_id: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            repo: Mutex::new(Box::new(repo)),
            next_id: Box::new(next_id),
            create_chain: GuardChain::new("order.create")
                .then(require_text(ORDER, "deliverTo"))
                .then(require_text(ORDER, "mobileNumber"))
                .then(has_dishes())
                .then(valid_quantities()),
            read_chain: GuardChain::new("order.read").then(order_exists()),
            update_chain: GuardChain::new("order.update")
                .then(order_exists())
                .then(status_is_not_delivered())
                .then(order_id_matches_route())
                .then(require_text(ORDER, "deliverTo"))
                .then(require_text(ORDER, "mobileNumber"))
                .then(valid_status())
                .then(has_dishes())
                .then(valid_quantities()),
            delete_chain: GuardChain::new("order.delete")
                .then(order_exists())
                .then(status_is_pending()),
        }
    }

    fn repo(&self) -> Result<MutexGuard<'_, Box<dyn Repository<Order>>>, ApiError> {
        self.repo
            .lock()
            .map_err(|_| ApiError::internal("order repository lock poisoned"))
    }

    fn not_found(order_id: &str) -> ApiError {
        ApiError::not_found(format!("Order id not found: {order_id}"))
    }

    pub fn len(&self) -> Result<usize, ApiError> {
        Ok(self.repo()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ApiError> {
        Ok(self.repo()?.is_empty())
    }

    /// All orders in insertion order
    pub fn list(&self) -> Result<Vec<Order>, ApiError> {
        Ok(self.repo()?.list())
    }

    /// Validate and store a new order; status is always `pending`
    pub fn create(&self, payload: &Payload) -> Result<Order, ApiError> {
        let mut repo = self.repo()?;
        self.create_chain.run(&GuardContext::new(payload))?;

        let order = Order {
            id: (self.next_id)(),
            deliver_to: read_text(payload, ORDER, "deliverTo")?.to_string(),
            mobile_number: read_text(payload, ORDER, "mobileNumber")?.to_string(),
            status: OrderStatus::Pending,
            dishes: read_line_items(payload)?,
        };
        let order = repo.insert(order)?;
        tracing::info!(
            order_id = %order.id,
            items = order.dishes.len(),
            "order created"
        );
        Ok(order)
    }

    pub fn read(&self, order_id: &str) -> Result<Order, ApiError> {
        let repo = self.repo()?;
        let found = repo.get(order_id);
        let empty = Payload::default();
        self.read_chain
            .run(&GuardContext::for_route(&empty, order_id, found.as_ref()))?;
        found.ok_or_else(|| Self::not_found(order_id))
    }

    /// Overwrite deliverTo, mobileNumber, status and dishes; the id never changes
    pub fn update(&self, order_id: &str, payload: &Payload) -> Result<Order, ApiError> {
        let mut repo = self.repo()?;
        let found = repo.get(order_id);
        self.update_chain
            .run(&GuardContext::for_route(payload, order_id, found.as_ref()))?;

        let mut order = found.ok_or_else(|| Self::not_found(order_id))?;
        let previous = order.status;
        order.deliver_to = read_text(payload, ORDER, "deliverTo")?.to_string();
        order.mobile_number = read_text(payload, ORDER, "mobileNumber")?.to_string();
        order.status = read_status(payload)?;
        order.dishes = read_line_items(payload)?;

        let order = repo.update(order)?;
        tracing::info!(
            order_id = %order.id,
            from = %previous,
            to = %order.status,
            "order updated"
        );
        Ok(order)
    }

    /// Remove a pending order
    pub fn delete(&self, order_id: &str) -> Result<(), ApiError> {
        let mut repo = self.repo()?;
        let found = repo.get(order_id);
        let empty = Payload::default();
        self.delete_chain
            .run(&GuardContext::for_route(&empty, order_id, found.as_ref()))?;

        repo.delete(order_id)?;
        tracing::info!(order_id = %order_id, "order deleted");
        Ok(())
    }
}
